// Library root: the auction engine and the domain data around it, with no
// terminal or async runtime dependencies.

pub mod achievements;
pub mod auction;
pub mod catalog;
pub mod config;
pub mod notify;
pub mod prefs;
pub mod tournament;
