// TUI widget modules, one per panel or overlay.

pub mod achievements;
pub mod auction_list;
pub mod auction_stats;
pub mod bid_history;
pub mod bid_panel;
pub mod help_bar;
pub mod modal;
pub mod not_found;
pub mod notifications;
pub mod onboarding;
pub mod participants;
pub mod player_card;
pub mod price_banner;
pub mod quit_confirm;
pub mod result_banner;
pub mod status_bar;
pub mod tournament_form;
pub mod tournaments;
