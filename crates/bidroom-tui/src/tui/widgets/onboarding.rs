// First-run welcome overlay.

use ratatui::layout::Rect;
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::Frame;

use super::modal::Modal;

const WELCOME: Modal<'static> = Modal {
    title: "Welcome to BidRoom",
    accent: Color::Cyan,
    width: 56,
    height: 13,
};

pub fn render(frame: &mut Frame, area: Rect) {
    WELCOME.render(frame, area, welcome_lines());
}

fn welcome_lines() -> Vec<Line<'static>> {
    let bullet = |text: &'static str| {
        Line::from(vec![
            Span::styled("  • ", Style::default().fg(Color::Yellow)),
            Span::raw(text),
        ])
    };
    vec![
        Line::from(" Bid against rival managers for cricket stars."),
        Line::from(""),
        bullet("Pick a player and press Enter to join the room"),
        bullet("Press b to type a bid, or 1-3 for quick raises"),
        bullet("Every bid adds time back to the clock"),
        bullet("Highest bid when the timer hits 0:00 wins"),
        bullet("Press x to dismiss a notification"),
        Line::from(""),
        Line::from(Span::styled(
            " Press Enter to start",
            Style::default().fg(Color::Green).add_modifier(Modifier::BOLD),
        )),
    ]
}
