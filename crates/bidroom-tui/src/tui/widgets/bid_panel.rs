// Bid panel widget: bid entry field and quick-bid presets.
//
// Row 1: entry field ("Your bid: $_" while typing, otherwise a hint)
// Row 2: quick bids "[1] +$25K → $925K  [2] +$50K → $950K ..."
// Row 3: local remaining budget
// Presets the local participant cannot afford are dimmed.

use ratatui::layout::Rect;
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Paragraph, Wrap};
use ratatui::Frame;

use bidroom_core::notify::{format_money, format_short_money};

use crate::protocol::RoomSnapshot;
use crate::tui::{InputMode, ViewState};

pub fn render(frame: &mut Frame, area: Rect, state: &ViewState, room: &RoomSnapshot) {
    let entering = state.input_mode == InputMode::BidEntry;
    let border = if entering {
        Style::default().fg(Color::Yellow)
    } else {
        Style::default()
    };

    let budget = room.local().map_or(0, |p| p.remaining_budget);
    let lines = vec![
        entry_line(entering, &state.bid_input, room.minimum_bid),
        Line::from(quick_bid_spans(room, budget)),
        Line::from(vec![
            Span::styled(" Your budget: ", Style::default().fg(Color::Gray)),
            Span::styled(format_money(budget), Style::default().fg(Color::Cyan)),
        ]),
    ];

    let paragraph = Paragraph::new(lines)
        .wrap(Wrap { trim: false })
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(border)
                .title("Place Bid"),
        );
    frame.render_widget(paragraph, area);
}

fn entry_line(entering: bool, input: &str, minimum: u64) -> Line<'static> {
    if entering {
        Line::from(vec![
            Span::styled(" Your bid: $", Style::default().fg(Color::Gray)),
            Span::styled(
                format!("{input}_"),
                Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD),
            ),
        ])
    } else {
        Line::from(Span::styled(
            format!(" Press b to bid (minimum {})", format_money(minimum)),
            Style::default().fg(Color::DarkGray),
        ))
    }
}

/// One span per quick-bid preset, numbered from 1.
pub fn quick_bid_spans(room: &RoomSnapshot, budget: u64) -> Vec<Span<'static>> {
    let mut spans = vec![Span::raw(" ")];
    for (i, increment) in room.quick_increments.iter().enumerate() {
        let target = room.current_price.saturating_add(*increment);
        let style = if target <= budget {
            Style::default().fg(Color::Green)
        } else {
            Style::default().fg(Color::DarkGray).add_modifier(Modifier::DIM)
        };
        spans.push(Span::styled(
            format!(
                "[{}] +{} → {}",
                i + 1,
                format_short_money(*increment),
                format_short_money(target)
            ),
            style,
        ));
        spans.push(Span::raw("  "));
    }
    spans
}
