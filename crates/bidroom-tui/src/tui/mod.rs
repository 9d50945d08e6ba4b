// Terminal UI: view state, input handling and widget rendering.
//
// The TUI owns a `ViewState` that mirrors the orchestrator's latest snapshot
// plus purely local editing state (bid buffer, search text, selection). The
// orchestrator pushes `UiUpdate` messages; the TUI applies them and
// re-renders at ~30 fps.

pub mod form;
pub mod input;
pub mod layout;
pub mod widgets;

use std::time::Duration;

use crossterm::event::{Event, EventStream};
use futures_util::StreamExt;
use ratatui::Frame;
use tokio::sync::mpsc;
use tracing::{debug, warn};

use bidroom_core::achievements::AchievementStatus;
use bidroom_core::catalog::{Catalog, Player};
use bidroom_core::notify::Notification;
use bidroom_core::tournament::{search_tournaments, Tournament, TournamentStatus};

use crate::protocol::{RoomSnapshot, Screen, UiUpdate, UserCommand};

use form::TournamentForm;
use layout::{build_list_layout, build_room_layout};

/// Longest bid the entry buffer accepts, in digits.
pub const MAX_BID_DIGITS: usize = 12;

// ---------------------------------------------------------------------------
// ViewState
// ---------------------------------------------------------------------------

/// Text-entry mode the keyboard is currently captured by, if any.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum InputMode {
    #[default]
    Normal,
    /// Typing a search on the auction list or the tournaments page.
    Search,
    /// Typing a bid amount in the auction room.
    BidEntry,
    /// Typing a tournament invite code.
    InviteCode,
    /// Naming a quick test tournament.
    TournamentName,
    /// Filling in the create-tournament form.
    CreateTournament,
}

/// TUI-local state that mirrors the application state for rendering.
#[derive(Debug, Default)]
pub struct ViewState {
    pub catalog: Option<Catalog>,
    pub screen: Screen,
    pub room: Option<RoomSnapshot>,
    pub tournaments: Vec<Tournament>,
    pub achievements: Vec<AchievementStatus>,
    pub notifications: Vec<Notification>,
    pub show_onboarding: bool,

    pub input_mode: InputMode,
    pub search_text: String,
    pub bid_input: String,
    pub invite_input: String,
    pub tournament_search: String,
    /// Status tab on the tournaments page; `None` is "All".
    pub status_filter: Option<TournamentStatus>,
    pub tournament_name_input: String,
    pub create_form: TournamentForm,
    /// Highlighted row in the auction list (index into `filtered_players`).
    pub selected: usize,
    pub confirm_quit: bool,
}

impl ViewState {
    /// Players matching the current search, in catalog order.
    pub fn filtered_players(&self) -> Vec<&Player> {
        match &self.catalog {
            Some(catalog) => catalog.search(&self.search_text),
            None => Vec::new(),
        }
    }

    pub fn selected_player(&self) -> Option<&Player> {
        self.filtered_players().get(self.selected).copied()
    }

    /// Tournaments under the current search and status tab.
    pub fn visible_tournaments(&self) -> Vec<&Tournament> {
        search_tournaments(&self.tournaments, &self.tournament_search, self.status_filter)
    }

    /// Keep the selection inside the filtered list.
    pub fn clamp_selection(&mut self) {
        let len = self.filtered_players().len();
        if len == 0 {
            self.selected = 0;
        } else if self.selected >= len {
            self.selected = len - 1;
        }
    }
}

// ---------------------------------------------------------------------------
// UiUpdate processing
// ---------------------------------------------------------------------------

/// Apply a single UiUpdate to the ViewState.
pub fn apply_ui_update(state: &mut ViewState, update: UiUpdate) {
    match update {
        UiUpdate::Catalog(catalog) => {
            state.catalog = Some(*catalog);
            state.clamp_selection();
        }
        UiUpdate::StateSnapshot(snapshot) => {
            let snapshot = *snapshot;
            if snapshot.screen != state.screen {
                // Leaving a page abandons whatever was being typed on it.
                state.input_mode = InputMode::Normal;
                state.bid_input.clear();
                state.invite_input.clear();
                state.tournament_name_input.clear();
                state.create_form = TournamentForm::default();
            }
            state.screen = snapshot.screen;
            state.room = snapshot.room;
            state.tournaments = snapshot.tournaments;
            state.achievements = snapshot.achievements;
            state.notifications = snapshot.notifications;
            state.show_onboarding = snapshot.show_onboarding;
            if state.room.as_ref().is_some_and(|r| !r.live) && state.input_mode == InputMode::BidEntry {
                state.input_mode = InputMode::Normal;
                state.bid_input.clear();
            }
        }
        UiUpdate::Notifications(notifications) => {
            state.notifications = notifications;
        }
    }
}

// ---------------------------------------------------------------------------
// Render frame
// ---------------------------------------------------------------------------

/// Render the complete frame for the current screen, then overlays.
pub fn render_frame(frame: &mut Frame, state: &ViewState) {
    let area = frame.area();

    match &state.screen {
        Screen::AuctionRoom(_) => match &state.room {
            Some(room) => render_room(frame, state, room),
            None => widgets::not_found::render(frame, area, ""),
        },
        Screen::NotFound(id) => {
            let layout = build_list_layout(area);
            widgets::status_bar::render(frame, layout.status_bar, state);
            widgets::not_found::render(frame, layout.main, id);
            widgets::help_bar::render(frame, layout.help_bar, state);
        }
        Screen::AuctionList => {
            let layout = build_list_layout(area);
            widgets::status_bar::render(frame, layout.status_bar, state);
            widgets::auction_list::render(frame, layout.main, state);
            widgets::help_bar::render(frame, layout.help_bar, state);
        }
        Screen::Tournaments => {
            let layout = build_list_layout(area);
            widgets::status_bar::render(frame, layout.status_bar, state);
            widgets::tournaments::render(frame, layout.main, state);
            widgets::help_bar::render(frame, layout.help_bar, state);
        }
        Screen::Achievements => {
            let layout = build_list_layout(area);
            widgets::status_bar::render(frame, layout.status_bar, state);
            widgets::achievements::render(frame, layout.main, &state.achievements);
            widgets::help_bar::render(frame, layout.help_bar, state);
        }
    }

    if state.input_mode == InputMode::CreateTournament {
        widgets::tournament_form::render(frame, area, &state.create_form);
    }

    widgets::notifications::render(frame, area, &state.notifications);

    if state.show_onboarding {
        widgets::onboarding::render(frame, area);
    }
    if state.confirm_quit {
        widgets::quit_confirm::render(frame, area);
    }
}

fn render_room(frame: &mut Frame, state: &ViewState, room: &RoomSnapshot) {
    let layout = build_room_layout(frame.area());

    widgets::status_bar::render(frame, layout.status_bar, state);
    widgets::price_banner::render(frame, layout.price_banner, room);
    widgets::player_card::render(frame, layout.player_card, &room.player);
    match &room.result {
        Some(result) => widgets::result_banner::render(frame, layout.bid_panel, result),
        None => widgets::bid_panel::render(frame, layout.bid_panel, state, room),
    }
    widgets::bid_history::render(frame, layout.history, room);
    widgets::participants::render(frame, layout.participants, room);
    widgets::auction_stats::render(frame, layout.stats, room);
    widgets::help_bar::render(frame, layout.help_bar, state);
}

// ---------------------------------------------------------------------------
// Main TUI loop
// ---------------------------------------------------------------------------

/// Run the TUI event loop.
///
/// Initializes the terminal and a panic hook that restores it, then selects
/// over UI updates, keyboard input and a render tick until the user quits
/// or the orchestrator goes away.
pub async fn run(
    mut ui_rx: mpsc::Receiver<UiUpdate>,
    cmd_tx: mpsc::Sender<UserCommand>,
) -> anyhow::Result<()> {
    let mut terminal = ratatui::init();

    let original_hook = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |panic_info| {
        ratatui::restore();
        original_hook(panic_info);
    }));

    let mut view_state = ViewState::default();
    let mut event_stream = EventStream::new();

    let mut render_tick = tokio::time::interval(Duration::from_millis(33));
    render_tick.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Skip);

    loop {
        tokio::select! {
            update = ui_rx.recv() => {
                match update {
                    Some(ui_update) => apply_ui_update(&mut view_state, ui_update),
                    None => {
                        debug!("UI channel closed");
                        break;
                    }
                }
            }

            maybe_event = event_stream.next() => {
                match maybe_event {
                    Some(Ok(Event::Key(key_event))) => {
                        if let Some(cmd) = input::handle_key(key_event, &mut view_state) {
                            let quit = cmd == UserCommand::Quit;
                            if cmd_tx.send(cmd).await.is_err() || quit {
                                break;
                            }
                        }
                    }
                    Some(Ok(_)) => {}
                    Some(Err(e)) => {
                        warn!("Terminal input error: {}", e);
                        break;
                    }
                    None => break,
                }
            }

            _ = render_tick.tick() => {
                terminal.draw(|frame| render_frame(frame, &view_state))?;
            }
        }
    }

    ratatui::restore();
    Ok(())
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
