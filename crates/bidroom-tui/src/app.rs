// App orchestrator: owns all state and runs the main event loop.
//
// Commands from the TUI and timer events from the live session are handled
// one at a time on this loop, so every auction mutation is serialised.

use std::time::Duration;

use chrono::Local;
use tokio::sync::mpsc;
use tracing::{debug, info, warn};

use bidroom_core::achievements::{Achievement, AchievementTracker};
use bidroom_core::auction::{
    AuctionController, BidError, BidReceipt, OpponentStrategy, RandomOpponents, Roster,
    TickOutcome,
};
use bidroom_core::catalog::Catalog;
use bidroom_core::config::{Config, OpponentConfig};
use bidroom_core::notify::{
    achievement_unlocked_message, auction_ended_message, bid_accepted_message,
    bid_rejected_message, NotificationFeed, NotificationLevel,
};
use bidroom_core::prefs::{Preferences, PrefsStore};
use bidroom_core::tournament::{TournamentDirectory, TournamentDraft};

use crate::protocol::{
    AppSnapshot, RoomSnapshot, Screen, TournamentRequest, UiUpdate, UserCommand,
};
use crate::session::{AuctionSession, SessionEvent, SessionId};

/// How often expired notifications are swept.
pub const NOTIFICATION_PRUNE_INTERVAL: Duration = Duration::from_millis(500);

/// Name the local user joins tournaments under.
pub const LOCAL_USER_NAME: &str = "You";

/// Builds the rival strategy for each new auction room.
pub type OpponentFactory = Box<dyn FnMut(&OpponentConfig) -> Box<dyn OpponentStrategy> + Send>;

// ---------------------------------------------------------------------------
// AppState
// ---------------------------------------------------------------------------

pub struct AppState {
    pub config: Config,
    pub catalog: Catalog,
    pub tournaments: TournamentDirectory,
    pub feed: NotificationFeed,
    pub achievements: AchievementTracker,
    pub preferences: Preferences,
    pub screen: Screen,
    /// The open auction room, if any. Replaced (and its timers cancelled)
    /// whenever another room opens or the user leaves.
    pub session: Option<AuctionSession>,
    prefs_store: Option<PrefsStore>,
    next_session_id: SessionId,
    session_tx: mpsc::Sender<SessionEvent>,
    opponent_factory: OpponentFactory,
}

impl AppState {
    pub fn new(
        config: Config,
        catalog: Catalog,
        tournaments: TournamentDirectory,
        prefs_store: Option<PrefsStore>,
        session_tx: mpsc::Sender<SessionEvent>,
    ) -> Self {
        let preferences = prefs_store
            .as_ref()
            .map(PrefsStore::load)
            .unwrap_or_default();
        let feed = NotificationFeed::from_config(&config.notifications);

        AppState {
            config,
            catalog,
            tournaments,
            feed,
            achievements: AchievementTracker::new(),
            preferences,
            screen: Screen::AuctionList,
            session: None,
            prefs_store,
            next_session_id: 1,
            session_tx,
            opponent_factory: Box::new(|config: &OpponentConfig| -> Box<dyn OpponentStrategy> {
                Box::new(RandomOpponents::new(config))
            }),
        }
    }

    /// Replace the default random rivals.
    pub fn with_opponents(mut self, factory: OpponentFactory) -> Self {
        self.opponent_factory = factory;
        self
    }

    // --- Commands ---

    /// Apply one user command. Returns whether anything visible changed.
    pub fn handle_command(&mut self, cmd: UserCommand) -> bool {
        match cmd {
            UserCommand::OpenAuction(player_id) => {
                self.open_auction(&player_id);
                true
            }
            UserCommand::PlaceBid(amount) => self.place_bid(amount),
            UserCommand::QuickBid(idx) => self.quick_bid(idx),
            UserCommand::BackToList => {
                self.close_session();
                self.screen = Screen::AuctionList;
                true
            }
            UserCommand::ShowTournaments => {
                self.close_session();
                self.screen = Screen::Tournaments;
                true
            }
            UserCommand::ShowAchievements => {
                self.close_session();
                self.screen = Screen::Achievements;
                true
            }
            UserCommand::QuickTournament(name) => {
                let now = Local::now().naive_local();
                let created = self.tournaments.quick_create(&name, now);
                let message = format!(
                    "Test tournament created! Invite code: {}",
                    created.invite_code
                );
                let unlocked = self.achievements.record_tournament_created();
                self.announce(unlocked);
                self.notify(NotificationLevel::Success, message);
                true
            }
            UserCommand::CreateTournament(request) => {
                self.create_tournament(request);
                true
            }
            UserCommand::JoinTournament(code) => {
                match self.tournaments.join(&code, LOCAL_USER_NAME) {
                    Ok(t) => {
                        let message = format!("Joined {}!", t.name);
                        let unlocked = self.achievements.record_tournament_joined();
                        self.announce(unlocked);
                        self.notify(NotificationLevel::Success, message);
                    }
                    Err(e) => {
                        info!("Join with code {} failed: {}", code, e);
                        self.notify(NotificationLevel::Error, e.to_string());
                    }
                }
                true
            }
            UserCommand::DismissNotification => self.feed.dismiss_latest().is_some(),
            UserCommand::CompleteOnboarding => self.complete_onboarding(),
            // Handled by the event loop.
            UserCommand::Quit => false,
        }
    }

    /// Open a fresh room for `player_id`, or the not-found page.
    pub fn open_auction(&mut self, player_id: &str) {
        self.close_session();

        let Some(player) = self.catalog.get(player_id) else {
            warn!("Requested auction for unknown player id {}", player_id);
            self.screen = Screen::NotFound(player_id.to_string());
            return;
        };

        let id = self.next_session_id;
        self.next_session_id += 1;

        let controller =
            AuctionController::new(player.clone(), Roster::sample(), &self.config.auction);
        let opponents = (self.opponent_factory)(&self.config.opponents);
        let mut session = AuctionSession::new(id, controller, opponents);
        session.start(
            Duration::from_millis(self.config.auction.tick_interval_ms),
            Duration::from_millis(self.config.opponents.interval_ms),
            self.session_tx.clone(),
        );

        info!("Opened auction room {} for {}", id, player.name);
        self.session = Some(session);
        self.feed.clear();
        self.screen = Screen::AuctionRoom(player_id.to_string());
        let unlocked = self.achievements.record_auction_entered();
        self.announce(unlocked);
    }

    fn create_tournament(&mut self, request: TournamentRequest) {
        let now = Local::now().naive_local();
        let draft = TournamentDraft {
            name: request.name,
            real_life_tournament: request.real_life_tournament,
            max_participants: request.max_participants,
            budget: request.budget,
            ..TournamentDraft::new(now)
        };
        match self.tournaments.create(draft, now) {
            Ok(created) => {
                let message = format!("Tournament created! Invite code: {}", created.invite_code);
                let unlocked = self.achievements.record_tournament_created();
                self.announce(unlocked);
                self.notify(NotificationLevel::Success, message);
            }
            Err(e) => {
                info!("Create tournament failed: {}", e);
                self.notify(NotificationLevel::Error, e.to_string());
            }
        }
    }

    /// Drop the open room, cancelling its timers.
    pub fn close_session(&mut self) {
        if let Some(mut session) = self.session.take() {
            session.stop();
            info!("Closed auction room {}", session.id());
        }
    }

    fn place_bid(&mut self, amount: u64) -> bool {
        let Some(session) = self.session.as_mut() else {
            debug!("Bid of {} with no open room ignored", amount);
            return false;
        };
        let local_id = session.controller().local_participant().id.clone();
        let result = session.controller_mut().submit_bid(&local_id, amount);
        self.report_bid(result)
    }

    fn quick_bid(&mut self, idx: usize) -> bool {
        let Some(&increment) = self.config.auction.quick_increments.get(idx) else {
            debug!("No quick bid preset at index {}", idx);
            return false;
        };
        let Some(session) = self.session.as_mut() else {
            return false;
        };
        let result = session.controller_mut().quick_bid(increment);
        self.report_bid(result)
    }

    fn report_bid(&mut self, result: Result<BidReceipt, BidError>) -> bool {
        match result {
            Ok(receipt) => {
                let unlocked = self.achievements.record_bid(&receipt);
                self.announce(unlocked);
                let (level, message) = bid_accepted_message(&receipt);
                self.notify(level, message);
                true
            }
            Err(e) => match bid_rejected_message(&e) {
                Some((level, message)) => {
                    self.notify(level, message);
                    true
                }
                None => {
                    debug!("Bid ignored: {}", e);
                    false
                }
            },
        }
    }

    fn complete_onboarding(&mut self) -> bool {
        if self.preferences.onboarding_complete {
            return false;
        }
        self.preferences.onboarding_complete = true;
        if let Some(store) = &self.prefs_store {
            if let Err(e) = store.save(&self.preferences) {
                warn!("Failed to save preferences: {}", e);
            }
        }
        true
    }

    // --- Timer events ---

    /// Apply a timer event. Events for a room that is no longer open are
    /// dropped. Returns whether anything visible changed.
    pub fn handle_session_event(&mut self, event: SessionEvent) -> bool {
        let Some(session) = self.session.as_mut() else {
            debug!("Dropping {:?}: no open room", event);
            return false;
        };
        if session.id() != event.session_id() {
            debug!("Dropping stale {:?} (open room is {})", event, session.id());
            return false;
        }

        match event {
            SessionEvent::Tick(_) => match session.on_tick() {
                TickOutcome::Running { .. } => true,
                TickOutcome::Ended(result) => {
                    let unlocked = self.achievements.record_auction_result(&result);
                    self.announce(unlocked);
                    let (level, message) = auction_ended_message(&result);
                    self.notify(level, message);
                    true
                }
                TickOutcome::Idle => false,
            },
            SessionEvent::OpponentTurn(_) => match session.on_opponent_turn() {
                Some(Ok(receipt)) => {
                    let (level, message) = bid_accepted_message(&receipt);
                    self.notify(level, message);
                    true
                }
                Some(Err(e)) => {
                    debug!("Rival bid rejected: {}", e);
                    false
                }
                None => false,
            },
        }
    }

    // --- Notifications ---

    fn notify(&mut self, level: NotificationLevel, message: impl Into<String>) {
        self.feed.push(level, message, Local::now());
    }

    /// Unlock toasts go in before the message for the action that earned
    /// them, so that message stays on top.
    fn announce(&mut self, unlocked: Vec<Achievement>) {
        for achievement in unlocked {
            let (level, message) = achievement_unlocked_message(&achievement);
            self.notify(level, message);
        }
    }

    /// Drop expired notifications. Returns how many were removed.
    pub fn prune_notifications(&mut self) -> usize {
        self.feed.prune(Local::now())
    }

    // --- Snapshots ---

    pub fn build_snapshot(&self) -> AppSnapshot {
        AppSnapshot {
            screen: self.screen.clone(),
            room: self
                .session
                .as_ref()
                .map(|s| room_snapshot(s.controller(), &self.config.auction.quick_increments)),
            tournaments: self.tournaments.tournaments().to_vec(),
            achievements: self.achievements.statuses(),
            notifications: self.feed.iter().cloned().collect(),
            show_onboarding: !self.preferences.onboarding_complete,
        }
    }
}

fn room_snapshot(controller: &AuctionController, quick_increments: &[u64]) -> RoomSnapshot {
    RoomSnapshot {
        player: controller.player().clone(),
        live: controller.is_live(),
        current_price: controller.current_price(),
        minimum_bid: controller.minimum_bid(),
        time_remaining: controller.time_remaining(),
        urgent: controller.clock().is_urgent(),
        time_fraction: controller.clock().fraction_remaining(),
        leader_id: controller.leader().map(|b| b.participant_id.clone()),
        participants: controller.roster().participants().to_vec(),
        bids: controller.ledger().bids().cloned().collect(),
        stats: controller.stats(),
        result: controller.resolution(),
        quick_increments: quick_increments.to_vec(),
    }
}

// ---------------------------------------------------------------------------
// Main event loop
// ---------------------------------------------------------------------------

/// Run the main application event loop.
///
/// Listens with `tokio::select!` on:
/// 1. User commands from the TUI
/// 2. Timer events from the open auction room
/// 3. A periodic notification sweep
///
/// Pushes UI updates through `ui_tx` after every visible change.
pub async fn run(
    mut session_rx: mpsc::Receiver<SessionEvent>,
    mut cmd_rx: mpsc::Receiver<UserCommand>,
    ui_tx: mpsc::Sender<UiUpdate>,
    mut state: AppState,
) -> anyhow::Result<()> {
    info!("Application event loop started");

    let catalog = Box::new(state.catalog.clone());
    let _ = ui_tx.send(UiUpdate::Catalog(catalog)).await;
    let snapshot = state.build_snapshot();
    send_snapshot(snapshot, &ui_tx).await;

    let mut prune_interval = tokio::time::interval(NOTIFICATION_PRUNE_INTERVAL);
    prune_interval.tick().await;

    loop {
        tokio::select! {
            // --- User commands ---
            cmd = cmd_rx.recv() => {
                match cmd {
                    Some(UserCommand::Quit) => {
                        info!("Quit command received, shutting down");
                        break;
                    }
                    Some(cmd) => {
                        debug!("Command: {:?}", cmd);
                        if state.handle_command(cmd) {
                            let snapshot = state.build_snapshot();
                            send_snapshot(snapshot, &ui_tx).await;
                        }
                    }
                    None => {
                        info!("Command channel closed, shutting down");
                        break;
                    }
                }
            }

            // --- Session timers ---
            Some(event) = session_rx.recv() => {
                if state.handle_session_event(event) {
                    let snapshot = state.build_snapshot();
                    send_snapshot(snapshot, &ui_tx).await;
                }
            }

            // --- Notification expiry ---
            _ = prune_interval.tick() => {
                if state.prune_notifications() > 0 {
                    let notifications = state.feed.iter().cloned().collect();
                    let _ = ui_tx.send(UiUpdate::Notifications(notifications)).await;
                }
            }
        }
    }

    state.close_session();
    info!("Application event loop exiting");
    Ok(())
}

/// Takes the snapshot by value: `AppState` is not `Sync`, so no borrow of it
/// may be held across the send.
async fn send_snapshot(snapshot: AppSnapshot, ui_tx: &mpsc::Sender<UiUpdate>) {
    let _ = ui_tx.send(UiUpdate::StateSnapshot(Box::new(snapshot))).await;
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use bidroom_core::auction::{AuctionResult, BidProposal, ScriptedOpponents};
    use bidroom_core::achievements::AchievementId;
    use bidroom_core::notify::format_money;
    use bidroom_core::tournament::{search_tournaments, TournamentStatus, REAL_LIFE_TOURNAMENTS};

    fn create_test_app_state() -> (AppState, mpsc::Receiver<SessionEvent>) {
        let (tx, rx) = mpsc::channel(64);
        let state = AppState::new(
            Config::default(),
            Catalog::builtin().unwrap(),
            TournamentDirectory::with_seed(11),
            None,
            tx,
        )
        .with_opponents(Box::new(|_: &OpponentConfig| -> Box<dyn OpponentStrategy> {
            Box::new(ScriptedOpponents::default())
        }));
        (state, rx)
    }

    fn first_player_id(state: &AppState) -> String {
        state.catalog.players()[0].id.clone()
    }

    fn latest_message(state: &AppState) -> String {
        state
            .feed
            .iter()
            .next()
            .map(|n| n.message.clone())
            .unwrap_or_default()
    }

    // -----------------------------------------------------------------------
    // Screens
    // -----------------------------------------------------------------------

    #[test]
    fn starts_on_auction_list_with_onboarding() {
        let (state, _rx) = create_test_app_state();
        let snapshot = state.build_snapshot();
        assert_eq!(snapshot.screen, Screen::AuctionList);
        assert!(snapshot.room.is_none());
        assert!(snapshot.show_onboarding);
    }

    #[tokio::test(start_paused = true)]
    async fn open_auction_creates_live_room() {
        let (mut state, _rx) = create_test_app_state();
        let id = first_player_id(&state);
        state.handle_command(UserCommand::OpenAuction(id.clone()));

        assert_eq!(state.screen, Screen::AuctionRoom(id));
        let room = state.build_snapshot().room.unwrap();
        assert!(room.live);
        assert_eq!(room.current_price, room.player.base_price);
        assert!(room.bids.is_empty());
        assert_eq!(room.time_remaining, 180);
        assert_eq!(room.participants.len(), 5);
    }

    #[test]
    fn unknown_player_shows_not_found() {
        let (mut state, _rx) = create_test_app_state();
        state.handle_command(UserCommand::OpenAuction("does-not-exist".into()));
        assert_eq!(state.screen, Screen::NotFound("does-not-exist".into()));
        assert!(state.session.is_none());

        state.handle_command(UserCommand::BackToList);
        assert_eq!(state.screen, Screen::AuctionList);
    }

    #[tokio::test(start_paused = true)]
    async fn reopening_starts_a_fresh_session() {
        let (mut state, _rx) = create_test_app_state();
        let id = first_player_id(&state);
        state.handle_command(UserCommand::OpenAuction(id.clone()));
        state.handle_command(UserCommand::QuickBid(0));
        let first_session = state.session.as_ref().unwrap().id();

        state.handle_command(UserCommand::BackToList);
        assert!(state.session.is_none());

        state.handle_command(UserCommand::OpenAuction(id));
        let session = state.session.as_ref().unwrap();
        assert_ne!(session.id(), first_session);
        assert!(session.controller().ledger().is_empty());
    }

    // -----------------------------------------------------------------------
    // Bidding
    // -----------------------------------------------------------------------

    #[tokio::test(start_paused = true)]
    async fn place_bid_success_and_rejections_notify() {
        let (mut state, _rx) = create_test_app_state();
        state.handle_command(UserCommand::OpenAuction(first_player_id(&state)));
        let minimum = state.build_snapshot().room.unwrap().minimum_bid;

        assert!(state.handle_command(UserCommand::PlaceBid(minimum)));
        assert!(latest_message(&state).starts_with("Bid placed:"));

        assert!(state.handle_command(UserCommand::PlaceBid(minimum)));
        assert!(latest_message(&state).starts_with("Minimum bid is"));

        assert!(state.handle_command(UserCommand::PlaceBid(50_000_000)));
        assert_eq!(latest_message(&state), "Insufficient budget!");
    }

    #[test]
    fn bid_without_room_is_ignored() {
        let (mut state, _rx) = create_test_app_state();
        assert!(!state.handle_command(UserCommand::PlaceBid(1_000)));
        assert!(state.feed.is_empty());
    }

    #[tokio::test(start_paused = true)]
    async fn quick_bid_out_of_range_is_ignored() {
        let (mut state, _rx) = create_test_app_state();
        state.handle_command(UserCommand::OpenAuction(first_player_id(&state)));
        assert!(!state.handle_command(UserCommand::QuickBid(9)));
    }

    #[tokio::test(start_paused = true)]
    async fn empty_bid_reports_the_minimum() {
        let (mut state, _rx) = create_test_app_state();
        state.handle_command(UserCommand::OpenAuction(first_player_id(&state)));
        let minimum = state.build_snapshot().room.unwrap().minimum_bid;

        assert!(state.handle_command(UserCommand::PlaceBid(0)));
        assert_eq!(
            latest_message(&state),
            format!("Minimum bid is {}", format_money(minimum))
        );
        assert!(state.build_snapshot().room.unwrap().bids.is_empty());
    }

    #[tokio::test(start_paused = true)]
    async fn room_snapshot_carries_clock_urgency() {
        let (mut state, _rx) = create_test_app_state();
        state.handle_command(UserCommand::OpenAuction(first_player_id(&state)));
        let room = state.build_snapshot().room.unwrap();
        assert!(!room.urgent);
        assert_eq!(room.time_fraction, 1.0);

        let id = state.session.as_ref().unwrap().id();
        for _ in 0..150 {
            state.handle_session_event(SessionEvent::Tick(id));
        }
        let room = state.build_snapshot().room.unwrap();
        assert_eq!(room.time_remaining, 30);
        assert!(room.urgent);
        assert!((room.time_fraction - 30.0 / 180.0).abs() < 1e-9);
    }

    // -----------------------------------------------------------------------
    // Timer events
    // -----------------------------------------------------------------------

    #[tokio::test(start_paused = true)]
    async fn stale_session_events_are_dropped() {
        let (mut state, _rx) = create_test_app_state();
        state.handle_command(UserCommand::OpenAuction(first_player_id(&state)));
        let old = state.session.as_ref().unwrap().id();
        state.handle_command(UserCommand::OpenAuction(first_player_id(&state)));

        assert!(!state.handle_session_event(SessionEvent::Tick(old)));
        assert_eq!(
            state.session.as_ref().unwrap().controller().time_remaining(),
            180
        );
    }

    #[tokio::test(start_paused = true)]
    async fn ticks_end_the_auction_and_notify() {
        let catalog = Catalog::builtin().unwrap();
        let cheapest = catalog
            .players()
            .iter()
            .min_by_key(|p| p.base_price)
            .unwrap()
            .clone();
        let rival_amount = cheapest.base_price + 100_000;

        let (tx, _rx) = mpsc::channel(64);
        let mut config = Config::default();
        config.auction.starting_window_secs = 2;
        // Caps the rival's +30 s bonus so two ticks still end the room.
        config.auction.max_window_secs = 2;
        let mut state = AppState::new(config, catalog, TournamentDirectory::with_seed(1), None, tx)
            .with_opponents(Box::new(move |_: &OpponentConfig| -> Box<dyn OpponentStrategy> {
                Box::new(ScriptedOpponents::new(vec![Some(BidProposal::new(
                    "1",
                    rival_amount,
                ))]))
            }));
        state.handle_command(UserCommand::OpenAuction(cheapest.id.clone()));
        let id = state.session.as_ref().unwrap().id();

        assert!(state.handle_session_event(SessionEvent::OpponentTurn(id)));
        assert_eq!(
            latest_message(&state),
            format!("CricketKing bid {}!", format_money(rival_amount))
        );
        assert_eq!(state.build_snapshot().room.unwrap().time_remaining, 2);

        assert!(state.handle_session_event(SessionEvent::Tick(id)));
        assert!(state.build_snapshot().room.unwrap().live);
        assert!(state.handle_session_event(SessionEvent::Tick(id)));
        assert!(latest_message(&state).starts_with("Auction ended!"));

        let room = state.build_snapshot().room.unwrap();
        assert!(!room.live);
        assert!(matches!(
            room.result,
            Some(AuctionResult::Sold { ref winner_name, amount, .. })
                if winner_name == "CricketKing" && amount == rival_amount
        ));

        assert!(!state.handle_session_event(SessionEvent::Tick(id)));
        assert!(!state.handle_command(UserCommand::PlaceBid(5_000_000)));
    }

    // -----------------------------------------------------------------------
    // Tournaments and onboarding
    // -----------------------------------------------------------------------

    #[test]
    fn quick_tournament_then_join() {
        let (mut state, _rx) = create_test_app_state();
        state.handle_command(UserCommand::ShowTournaments);
        assert_eq!(state.screen, Screen::Tournaments);

        state.handle_command(UserCommand::QuickTournament("Office League".into()));
        let code = search_tournaments(state.tournaments.tournaments(), "office", None)
            .first()
            .map(|t| t.invite_code.clone())
            .unwrap();
        assert!(latest_message(&state).contains(&code));

        state.handle_command(UserCommand::JoinTournament(code.to_lowercase()));
        assert_eq!(latest_message(&state), "Joined Office League!");

        state.handle_command(UserCommand::JoinTournament(code));
        assert!(latest_message(&state).contains("already joined"));
    }

    #[test]
    fn create_tournament_from_form() {
        let (mut state, _rx) = create_test_app_state();
        let request = TournamentRequest {
            name: "Weekend League".into(),
            real_life_tournament: REAL_LIFE_TOURNAMENTS[1].into(),
            max_participants: 6,
            budget: 80_000,
        };
        assert!(state.handle_command(UserCommand::CreateTournament(request.clone())));

        let created = state.tournaments.tournaments().last().unwrap();
        assert_eq!(created.name, "Weekend League");
        assert_eq!(created.real_life_tournament, "BBL 2024");
        assert_eq!(created.max_participants, 6);
        assert_eq!(created.budget, 80_000);
        assert_eq!(created.status, TournamentStatus::Draft);
        assert_eq!(
            latest_message(&state),
            format!("Tournament created! Invite code: {}", created.invite_code)
        );

        let blank = TournamentRequest {
            name: "   ".into(),
            ..request
        };
        let count = state.tournaments.len();
        assert!(state.handle_command(UserCommand::CreateTournament(blank)));
        assert_eq!(state.tournaments.len(), count);
        assert_eq!(latest_message(&state), "missing required field `name`");
    }

    #[test]
    fn dismiss_drops_newest_notification() {
        let (mut state, _rx) = create_test_app_state();
        assert!(!state.handle_command(UserCommand::DismissNotification));

        state.handle_command(UserCommand::QuickTournament("A".into()));
        state.handle_command(UserCommand::QuickTournament("B".into()));
        let before = state.feed.len();
        assert!(latest_message(&state).starts_with("Test tournament created!"));

        assert!(state.handle_command(UserCommand::DismissNotification));
        assert_eq!(state.feed.len(), before - 1);
        assert_eq!(state.build_snapshot().notifications.len(), before - 1);
    }

    #[tokio::test(start_paused = true)]
    async fn achievements_unlock_with_notifications() {
        let (mut state, _rx) = create_test_app_state();
        state.handle_command(UserCommand::OpenAuction(first_player_id(&state)));
        assert!(state.handle_command(UserCommand::QuickBid(0)));

        let messages: Vec<&str> = state.feed.iter().map(|n| n.message.as_str()).collect();
        assert!(messages[0].starts_with("Bid placed:"));
        assert_eq!(messages[1], "Achievement unlocked: Bidding Rookie!");
        assert!(state.achievements.is_unlocked(AchievementId::BiddingRookie));

        assert_eq!(state.achievements.stats().total_bids, 1);

        state.handle_command(UserCommand::QuickTournament(String::new()));
        assert!(state.achievements.is_unlocked(AchievementId::TournamentCreator));

        state.handle_command(UserCommand::ShowAchievements);
        assert_eq!(state.screen, Screen::Achievements);
        assert!(state.session.is_none());
        let snapshot = state.build_snapshot();
        assert_eq!(snapshot.achievements.len(), 8);
        assert_eq!(snapshot.achievements.iter().filter(|a| a.unlocked).count(), 2);
    }

    #[tokio::test(start_paused = true)]
    async fn local_win_counts_toward_champion() {
        let catalog = Catalog::builtin().unwrap();
        let id = catalog.players()[0].id.clone();
        let (tx, _rx) = mpsc::channel(64);
        let mut config = Config::default();
        config.auction.starting_window_secs = 1;
        config.auction.max_window_secs = 1;
        let mut state = AppState::new(config, catalog, TournamentDirectory::with_seed(1), None, tx)
            .with_opponents(Box::new(|_: &OpponentConfig| -> Box<dyn OpponentStrategy> {
                Box::new(ScriptedOpponents::default())
            }));

        state.handle_command(UserCommand::OpenAuction(id));
        state.handle_command(UserCommand::QuickBid(0));
        let session = state.session.as_ref().unwrap().id();
        assert!(state.handle_session_event(SessionEvent::Tick(session)));

        assert!(state.achievements.is_unlocked(AchievementId::Champion));
        assert!(latest_message(&state).starts_with("Auction ended! You won"));
    }

    #[test]
    fn complete_onboarding_once() {
        let (mut state, _rx) = create_test_app_state();
        assert!(state.handle_command(UserCommand::CompleteOnboarding));
        assert!(!state.build_snapshot().show_onboarding);
        assert!(!state.handle_command(UserCommand::CompleteOnboarding));
    }

    // -----------------------------------------------------------------------
    // Event loop
    // -----------------------------------------------------------------------

    #[tokio::test(start_paused = true)]
    async fn run_sends_catalog_then_snapshot_and_quits() {
        let (state, session_rx) = create_test_app_state();
        let (cmd_tx, cmd_rx) = mpsc::channel(16);
        let (ui_tx, mut ui_rx) = mpsc::channel(64);

        let handle = tokio::spawn(run(session_rx, cmd_rx, ui_tx, state));

        assert!(matches!(ui_rx.recv().await, Some(UiUpdate::Catalog(_))));
        assert!(matches!(ui_rx.recv().await, Some(UiUpdate::StateSnapshot(_))));

        cmd_tx.send(UserCommand::Quit).await.unwrap();
        assert!(handle.await.unwrap().is_ok());
    }

    fn assert_send<T: Send>(_: &T) {}

    #[tokio::test(start_paused = true)]
    async fn run_can_be_spawned_with_a_live_room() {
        let (state, session_rx) = create_test_app_state();
        let id = first_player_id(&state);
        let (cmd_tx, cmd_rx) = mpsc::channel(16);
        let (ui_tx, mut ui_rx) = mpsc::channel(64);

        let task = run(session_rx, cmd_rx, ui_tx, state);
        assert_send(&task);
        let handle = tokio::spawn(task);

        cmd_tx.send(UserCommand::OpenAuction(id.clone())).await.unwrap();
        cmd_tx.send(UserCommand::QuickBid(0)).await.unwrap();
        let mut saw_bid = false;
        while let Some(update) = ui_rx.recv().await {
            if let UiUpdate::StateSnapshot(snapshot) = update {
                if snapshot.room.as_ref().is_some_and(|r| !r.bids.is_empty()) {
                    assert_eq!(snapshot.screen, Screen::AuctionRoom(id));
                    saw_bid = true;
                    break;
                }
            }
        }
        assert!(saw_bid);

        cmd_tx.send(UserCommand::Quit).await.unwrap();
        assert!(handle.await.unwrap().is_ok());
    }
}
