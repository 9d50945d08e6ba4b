// Status bar widget: app name, current page, live indicator, local budget.

use ratatui::layout::Rect;
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;
use ratatui::Frame;

use bidroom_core::notify::format_money;

use crate::protocol::{RoomSnapshot, Screen};
use crate::tui::ViewState;

/// Render the status bar into the given area.
///
/// Layout: [app name] [page] [live indicator] [online count] [budget]
pub fn render(frame: &mut Frame, area: Rect, state: &ViewState) {
    let mut spans = vec![
        Span::styled(
            " BidRoom ",
            Style::default()
                .fg(Color::Black)
                .bg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
        ),
        Span::raw(" "),
        Span::styled(page_label(&state.screen), Style::default().fg(Color::White)),
    ];

    if let (Screen::AuctionRoom(_), Some(room)) = (&state.screen, &state.room) {
        spans.extend(room_spans(room));
    }

    let paragraph = Paragraph::new(Line::from(spans)).style(Style::default().bg(Color::Black));
    frame.render_widget(paragraph, area);
}

/// Human label for the page being shown.
pub fn page_label(screen: &Screen) -> String {
    match screen {
        Screen::AuctionList => "Live Auctions".to_string(),
        Screen::AuctionRoom(id) => format!("Auction #{id}"),
        Screen::NotFound(_) => "Not Found".to_string(),
        Screen::Tournaments => "Tournaments".to_string(),
        Screen::Achievements => "Achievements".to_string(),
    }
}

/// Return the live dot label and its color.
pub fn live_indicator(live: bool) -> (&'static str, Color) {
    if live {
        ("● LIVE", Color::Red)
    } else {
        ("● ENDED", Color::DarkGray)
    }
}

fn room_spans(room: &RoomSnapshot) -> Vec<Span<'static>> {
    let (label, color) = live_indicator(room.live);
    let mut spans = vec![
        Span::styled(" | ", Style::default().fg(Color::Gray)),
        Span::styled(label, Style::default().fg(color).add_modifier(Modifier::BOLD)),
        Span::styled(" | ", Style::default().fg(Color::Gray)),
        Span::styled(
            format!("{} online", room.online_count()),
            Style::default().fg(Color::Green),
        ),
    ];
    if let Some(local) = room.local() {
        spans.push(Span::styled(" | ", Style::default().fg(Color::Gray)));
        spans.push(Span::styled(
            format!("Budget {}", format_money(local.remaining_budget)),
            Style::default().fg(Color::Cyan),
        ));
    }
    spans
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tui::test_support::sample_room;

    #[test]
    fn page_labels() {
        assert_eq!(page_label(&Screen::AuctionList), "Live Auctions");
        assert_eq!(page_label(&Screen::AuctionRoom("7".into())), "Auction #7");
        assert_eq!(page_label(&Screen::Tournaments), "Tournaments");
        assert_eq!(page_label(&Screen::Achievements), "Achievements");
    }

    #[test]
    fn live_indicator_colors() {
        assert_eq!(live_indicator(true).1, Color::Red);
        assert_eq!(live_indicator(false).0, "● ENDED");
    }

    #[test]
    fn room_spans_show_budget() {
        let spans = room_spans(&sample_room());
        let text: String = spans.iter().map(|s| s.content.as_ref()).collect();
        assert!(text.contains("LIVE"));
        assert!(text.contains("Budget $"));
    }

    #[test]
    fn render_does_not_panic_with_defaults() {
        let backend = ratatui::backend::TestBackend::new(80, 1);
        let mut terminal = ratatui::Terminal::new(backend).unwrap();
        let state = ViewState::default();
        terminal
            .draw(|frame| render(frame, frame.area(), &state))
            .unwrap();
    }
}
