// Keyboard input handling and command dispatch.
//
// Translates crossterm key events into UserCommand messages for the app
// orchestrator, or into local ViewState mutations (selection, search text,
// bid buffer, tournament form).

use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

use bidroom_core::tournament::TournamentStatus;

use super::form::TournamentForm;
use super::{InputMode, ViewState, MAX_BID_DIGITS};
use crate::protocol::{Screen, UserCommand};

const MAX_INVITE_CHARS: usize = 12;
const MAX_TOURNAMENT_NAME_CHARS: usize = 40;

/// Handle a keyboard event.
///
/// Returns `Some(UserCommand)` when the key press should be forwarded to the
/// app orchestrator. Returns `None` when it was handled locally.
pub fn handle_key(key_event: KeyEvent, view_state: &mut ViewState) -> Option<UserCommand> {
    // Some terminals report both Press and Release; act on Press only.
    if key_event.kind != KeyEventKind::Press {
        return None;
    }

    if key_event.modifiers.contains(KeyModifiers::CONTROL) && key_event.code == KeyCode::Char('c')
    {
        return Some(UserCommand::Quit);
    }

    if view_state.confirm_quit {
        return handle_confirm_quit(key_event, view_state);
    }

    if view_state.show_onboarding {
        return handle_onboarding(key_event, view_state);
    }

    match view_state.input_mode {
        InputMode::Search => return handle_search_mode(key_event, view_state),
        InputMode::BidEntry => return handle_bid_entry(key_event, view_state),
        InputMode::InviteCode => return handle_invite_entry(key_event, view_state),
        InputMode::TournamentName => return handle_tournament_name(key_event, view_state),
        InputMode::CreateTournament => return handle_create_form(key_event, view_state),
        InputMode::Normal => {}
    }

    match key_event.code {
        KeyCode::Char('q') => {
            view_state.confirm_quit = true;
            return None;
        }
        KeyCode::Char('x') if !view_state.notifications.is_empty() => {
            return Some(UserCommand::DismissNotification);
        }
        _ => {}
    }

    match view_state.screen {
        Screen::AuctionList => handle_list_key(key_event, view_state),
        Screen::AuctionRoom(_) => handle_room_key(key_event, view_state),
        Screen::NotFound(_) => match key_event.code {
            KeyCode::Enter | KeyCode::Esc => Some(UserCommand::BackToList),
            _ => None,
        },
        Screen::Tournaments => handle_tournaments_key(key_event, view_state),
        Screen::Achievements => match key_event.code {
            KeyCode::Esc => Some(UserCommand::BackToList),
            KeyCode::Char('t') => Some(UserCommand::ShowTournaments),
            _ => None,
        },
    }
}

/// y/q confirm, n/Esc cancel, everything else is blocked.
fn handle_confirm_quit(key_event: KeyEvent, view_state: &mut ViewState) -> Option<UserCommand> {
    match key_event.code {
        KeyCode::Char('y') | KeyCode::Char('Y') | KeyCode::Char('q') | KeyCode::Char('Q') => {
            Some(UserCommand::Quit)
        }
        KeyCode::Char('n') | KeyCode::Char('N') | KeyCode::Esc => {
            view_state.confirm_quit = false;
            None
        }
        _ => None,
    }
}

fn handle_onboarding(key_event: KeyEvent, view_state: &mut ViewState) -> Option<UserCommand> {
    match key_event.code {
        KeyCode::Enter | KeyCode::Esc | KeyCode::Char(' ') => {
            view_state.show_onboarding = false;
            Some(UserCommand::CompleteOnboarding)
        }
        KeyCode::Char('q') => {
            view_state.confirm_quit = true;
            None
        }
        _ => None,
    }
}

// ---------------------------------------------------------------------------
// Auction list
// ---------------------------------------------------------------------------

fn handle_list_key(key_event: KeyEvent, view_state: &mut ViewState) -> Option<UserCommand> {
    match key_event.code {
        KeyCode::Up | KeyCode::Char('k') => {
            view_state.selected = view_state.selected.saturating_sub(1);
            None
        }
        KeyCode::Down | KeyCode::Char('j') => {
            view_state.selected = view_state.selected.saturating_add(1);
            view_state.clamp_selection();
            None
        }
        KeyCode::Enter => view_state
            .selected_player()
            .map(|p| UserCommand::OpenAuction(p.id.clone())),
        KeyCode::Char('/') => {
            view_state.input_mode = InputMode::Search;
            None
        }
        KeyCode::Esc => {
            view_state.search_text.clear();
            view_state.clamp_selection();
            None
        }
        KeyCode::Char('t') => Some(UserCommand::ShowTournaments),
        KeyCode::Char('a') => Some(UserCommand::ShowAchievements),
        _ => None,
    }
}

/// Enter keeps the search, Esc clears it. Edits the player search on the
/// auction list and the tournament search on the tournaments page.
fn handle_search_mode(key_event: KeyEvent, view_state: &mut ViewState) -> Option<UserCommand> {
    let on_tournaments = view_state.screen == Screen::Tournaments;
    let buffer = if on_tournaments {
        &mut view_state.tournament_search
    } else {
        &mut view_state.search_text
    };
    match key_event.code {
        KeyCode::Esc => {
            view_state.input_mode = InputMode::Normal;
            buffer.clear();
        }
        KeyCode::Enter => {
            view_state.input_mode = InputMode::Normal;
        }
        KeyCode::Backspace => {
            buffer.pop();
        }
        KeyCode::Char(c) => buffer.push(c),
        _ => return None,
    }
    if !on_tournaments {
        if matches!(key_event.code, KeyCode::Backspace | KeyCode::Char(_)) {
            view_state.selected = 0;
        }
        view_state.clamp_selection();
    }
    None
}

// ---------------------------------------------------------------------------
// Auction room
// ---------------------------------------------------------------------------

fn room_is_live(view_state: &ViewState) -> bool {
    view_state.room.as_ref().is_some_and(|r| r.live)
}

fn handle_room_key(key_event: KeyEvent, view_state: &mut ViewState) -> Option<UserCommand> {
    match key_event.code {
        KeyCode::Esc => Some(UserCommand::BackToList),
        KeyCode::Char('b') if room_is_live(view_state) => {
            view_state.input_mode = InputMode::BidEntry;
            view_state.bid_input.clear();
            None
        }
        KeyCode::Char(c @ '1'..='9') if room_is_live(view_state) => {
            let idx = (c as usize) - ('1' as usize);
            let presets = view_state
                .room
                .as_ref()
                .map_or(0, |r| r.quick_increments.len());
            (idx < presets).then_some(UserCommand::QuickBid(idx))
        }
        _ => None,
    }
}

fn handle_bid_entry(key_event: KeyEvent, view_state: &mut ViewState) -> Option<UserCommand> {
    match key_event.code {
        KeyCode::Esc => {
            view_state.input_mode = InputMode::Normal;
            view_state.bid_input.clear();
            None
        }
        // An empty buffer still goes through, so the room answers with the
        // minimum bid.
        KeyCode::Enter => {
            view_state.input_mode = InputMode::Normal;
            let amount = view_state.bid_input.parse::<u64>().unwrap_or(0);
            view_state.bid_input.clear();
            Some(UserCommand::PlaceBid(amount))
        }
        KeyCode::Backspace => {
            view_state.bid_input.pop();
            None
        }
        KeyCode::Char(c) if c.is_ascii_digit() => {
            if view_state.bid_input.len() < MAX_BID_DIGITS {
                view_state.bid_input.push(c);
            }
            None
        }
        _ => None,
    }
}

// ---------------------------------------------------------------------------
// Tournaments
// ---------------------------------------------------------------------------

/// Next (or previous) status tab: All, then each status in order.
pub fn cycle_status_filter(
    current: Option<TournamentStatus>,
    forward: bool,
) -> Option<TournamentStatus> {
    let tabs: Vec<Option<TournamentStatus>> = std::iter::once(None)
        .chain(TournamentStatus::ALL.into_iter().map(Some))
        .collect();
    let idx = tabs.iter().position(|t| *t == current).unwrap_or(0);
    let next = if forward {
        (idx + 1) % tabs.len()
    } else {
        (idx + tabs.len() - 1) % tabs.len()
    };
    tabs[next]
}

fn handle_tournaments_key(key_event: KeyEvent, view_state: &mut ViewState) -> Option<UserCommand> {
    match key_event.code {
        // Esc drops an active search or tab first, then leaves.
        KeyCode::Esc => {
            if view_state.tournament_search.is_empty() && view_state.status_filter.is_none() {
                return Some(UserCommand::BackToList);
            }
            view_state.tournament_search.clear();
            view_state.status_filter = None;
            None
        }
        KeyCode::Tab | KeyCode::Right => {
            view_state.status_filter = cycle_status_filter(view_state.status_filter, true);
            None
        }
        KeyCode::BackTab | KeyCode::Left => {
            view_state.status_filter = cycle_status_filter(view_state.status_filter, false);
            None
        }
        KeyCode::Char('/') => {
            view_state.input_mode = InputMode::Search;
            None
        }
        KeyCode::Char('n') => {
            view_state.input_mode = InputMode::TournamentName;
            view_state.tournament_name_input.clear();
            None
        }
        KeyCode::Char('c') => {
            view_state.input_mode = InputMode::CreateTournament;
            view_state.create_form = TournamentForm::default();
            None
        }
        KeyCode::Char('j') => {
            view_state.input_mode = InputMode::InviteCode;
            view_state.invite_input.clear();
            None
        }
        _ => None,
    }
}

/// Enter creates the quick tournament; an empty name takes the preset.
fn handle_tournament_name(key_event: KeyEvent, view_state: &mut ViewState) -> Option<UserCommand> {
    match key_event.code {
        KeyCode::Esc => {
            view_state.input_mode = InputMode::Normal;
            view_state.tournament_name_input.clear();
            None
        }
        KeyCode::Enter => {
            view_state.input_mode = InputMode::Normal;
            let name = std::mem::take(&mut view_state.tournament_name_input);
            Some(UserCommand::QuickTournament(name.trim().to_string()))
        }
        KeyCode::Backspace => {
            view_state.tournament_name_input.pop();
            None
        }
        KeyCode::Char(c) => {
            if view_state.tournament_name_input.chars().count() < MAX_TOURNAMENT_NAME_CHARS {
                view_state.tournament_name_input.push(c);
            }
            None
        }
        _ => None,
    }
}

fn handle_create_form(key_event: KeyEvent, view_state: &mut ViewState) -> Option<UserCommand> {
    let form = &mut view_state.create_form;
    match key_event.code {
        KeyCode::Esc => {
            view_state.input_mode = InputMode::Normal;
            view_state.create_form = TournamentForm::default();
            None
        }
        KeyCode::Enter => {
            let request = form.to_request();
            view_state.input_mode = InputMode::Normal;
            view_state.create_form = TournamentForm::default();
            Some(UserCommand::CreateTournament(request))
        }
        KeyCode::Tab | KeyCode::Down => {
            form.focus = form.focus.next();
            None
        }
        KeyCode::BackTab | KeyCode::Up => {
            form.focus = form.focus.prev();
            None
        }
        KeyCode::Left => {
            form.cycle(false);
            None
        }
        KeyCode::Right => {
            form.cycle(true);
            None
        }
        KeyCode::Backspace => {
            form.pop_char();
            None
        }
        KeyCode::Char(c) => {
            form.push_char(c);
            None
        }
        _ => None,
    }
}

fn handle_invite_entry(key_event: KeyEvent, view_state: &mut ViewState) -> Option<UserCommand> {
    match key_event.code {
        KeyCode::Esc => {
            view_state.input_mode = InputMode::Normal;
            view_state.invite_input.clear();
            None
        }
        KeyCode::Enter => {
            view_state.input_mode = InputMode::Normal;
            let code = std::mem::take(&mut view_state.invite_input);
            (!code.is_empty()).then_some(UserCommand::JoinTournament(code))
        }
        KeyCode::Backspace => {
            view_state.invite_input.pop();
            None
        }
        KeyCode::Char(c) if c.is_ascii_alphanumeric() => {
            if view_state.invite_input.len() < MAX_INVITE_CHARS {
                view_state.invite_input.push(c.to_ascii_uppercase());
            }
            None
        }
        _ => None,
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
