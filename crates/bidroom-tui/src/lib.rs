pub mod app;
pub mod protocol;
pub mod session;
pub mod tui;
