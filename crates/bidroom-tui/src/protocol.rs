// Messages exchanged between the app orchestrator and the TUI.
//
// The orchestrator owns all auction state and pushes `UiUpdate`s; the TUI
// turns key presses into `UserCommand`s. Neither side shares memory.

use bidroom_core::achievements::AchievementStatus;
use bidroom_core::auction::{AuctionResult, AuctionStats, Bid, Participant};
use bidroom_core::catalog::{Catalog, Player};
use bidroom_core::notify::Notification;
use bidroom_core::tournament::Tournament;

/// Which page is showing.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum Screen {
    #[default]
    AuctionList,
    /// Live or finished room for the given player id.
    AuctionRoom(String),
    /// A room was requested for a player id that does not exist.
    NotFound(String),
    Tournaments,
    Achievements,
}

/// Commands from the TUI to the app orchestrator.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UserCommand {
    OpenAuction(String),
    /// Local participant bids this exact amount.
    PlaceBid(u64),
    /// Local participant bids the current price plus the preset at this index.
    QuickBid(usize),
    BackToList,
    ShowTournaments,
    ShowAchievements,
    /// Quick test tournament; an empty name takes the preset one.
    QuickTournament(String),
    CreateTournament(TournamentRequest),
    JoinTournament(String),
    /// Drop the newest notification.
    DismissNotification,
    CompleteOnboarding,
    Quit,
}

/// Fields of the create-tournament form.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TournamentRequest {
    pub name: String,
    pub real_life_tournament: String,
    pub max_participants: u32,
    pub budget: u64,
}

/// Everything the auction room panels need for one frame.
#[derive(Debug, Clone, PartialEq)]
pub struct RoomSnapshot {
    pub player: Player,
    pub live: bool,
    pub current_price: u64,
    pub minimum_bid: u64,
    pub time_remaining: u32,
    /// Clock at or under the urgent threshold.
    pub urgent: bool,
    /// Remaining time as a fraction of the window, within 0.0..=1.0.
    pub time_fraction: f64,
    pub leader_id: Option<String>,
    pub participants: Vec<Participant>,
    /// Newest first.
    pub bids: Vec<Bid>,
    pub stats: AuctionStats,
    pub result: Option<AuctionResult>,
    pub quick_increments: Vec<u64>,
}

impl RoomSnapshot {
    pub fn local(&self) -> Option<&Participant> {
        self.participants.iter().find(|p| p.is_local)
    }

    pub fn leader_name(&self) -> Option<&str> {
        self.bids
            .iter()
            .find(|b| b.leading)
            .map(|b| b.participant_name.as_str())
    }

    pub fn online_count(&self) -> usize {
        self.participants.iter().filter(|p| p.online).count()
    }
}

/// Full application state pushed after every change.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct AppSnapshot {
    pub screen: Screen,
    pub room: Option<RoomSnapshot>,
    pub tournaments: Vec<Tournament>,
    pub achievements: Vec<AchievementStatus>,
    /// Newest first.
    pub notifications: Vec<Notification>,
    pub show_onboarding: bool,
}

/// Updates from the app orchestrator to the TUI.
#[derive(Debug, Clone, PartialEq)]
pub enum UiUpdate {
    /// Sent once at startup; the catalog never changes afterwards.
    Catalog(Box<Catalog>),
    StateSnapshot(Box<AppSnapshot>),
    /// Only the notification list changed (expiry).
    Notifications(Vec<Notification>),
}
