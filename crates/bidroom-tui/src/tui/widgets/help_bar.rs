// Help bar widget: context-sensitive key hints.

use ratatui::layout::Rect;
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;
use ratatui::Frame;

use crate::protocol::Screen;
use crate::tui::{InputMode, ViewState};

pub fn render(frame: &mut Frame, area: Rect, state: &ViewState) {
    let mut spans = Vec::new();
    for (key, action) in key_hints(state) {
        spans.push(Span::styled(
            format!(" {key}"),
            Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD),
        ));
        spans.push(Span::styled(
            format!(":{action} "),
            Style::default().fg(Color::Gray),
        ));
    }
    let paragraph = Paragraph::new(Line::from(spans)).style(Style::default().bg(Color::Black));
    frame.render_widget(paragraph, area);
}

/// Key/action pairs valid for the current screen and input mode.
pub fn key_hints(state: &ViewState) -> Vec<(&'static str, &'static str)> {
    match state.input_mode {
        InputMode::Search => return vec![("Enter", "Keep"), ("Esc", "Clear")],
        InputMode::BidEntry => return vec![("0-9", "Amount"), ("Enter", "Bid"), ("Esc", "Cancel")],
        InputMode::InviteCode => return vec![("Enter", "Join"), ("Esc", "Cancel")],
        InputMode::TournamentName => return vec![("Enter", "Create"), ("Esc", "Cancel")],
        InputMode::CreateTournament => {
            return vec![("Tab", "Next"), ("←→", "Change"), ("Enter", "Create"), ("Esc", "Cancel")]
        }
        InputMode::Normal => {}
    }

    let mut hints = screen_hints(state);
    if !state.notifications.is_empty() {
        // Keep Quit last.
        let at = hints.len().saturating_sub(1);
        hints.insert(at, ("x", "Dismiss"));
    }
    hints
}

fn screen_hints(state: &ViewState) -> Vec<(&'static str, &'static str)> {
    match &state.screen {
        Screen::AuctionList => vec![
            ("↑↓", "Select"),
            ("Enter", "Open"),
            ("/", "Search"),
            ("t", "Tournaments"),
            ("a", "Achievements"),
            ("q", "Quit"),
        ],
        Screen::AuctionRoom(_) => {
            if state.room.as_ref().is_some_and(|r| r.live) {
                vec![("b", "Bid"), ("1-3", "Quick bid"), ("Esc", "Back"), ("q", "Quit")]
            } else {
                vec![("Esc", "Back"), ("q", "Quit")]
            }
        }
        Screen::NotFound(_) => vec![("Enter", "Back to auctions"), ("q", "Quit")],
        Screen::Tournaments => vec![
            ("Tab", "Status"),
            ("/", "Search"),
            ("c", "Create"),
            ("n", "Quick create"),
            ("j", "Join by code"),
            ("Esc", "Back"),
            ("q", "Quit"),
        ],
        Screen::Achievements => vec![("t", "Tournaments"), ("Esc", "Back"), ("q", "Quit")],
    }
}
