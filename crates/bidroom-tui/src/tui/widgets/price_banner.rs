// Price banner widget: current price, leader, next minimum and the countdown.
//
// Row 1: "$900,000  Leader: CricketKing"
// Row 2: "Next minimum bid: $925,000"
// Row 3: countdown gauge, red once inside the urgent threshold

use ratatui::layout::{Constraint, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Gauge, Paragraph};
use ratatui::Frame;

use bidroom_core::auction::format_clock;
use bidroom_core::notify::format_money;

use crate::protocol::RoomSnapshot;

pub fn render(frame: &mut Frame, area: Rect, room: &RoomSnapshot) {
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(timer_color(room)))
        .title(if room.live { "Current Bid" } else { "Final Price" });
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let [price_row, min_row, gauge_row] = Layout::vertical([
        Constraint::Length(1),
        Constraint::Length(1),
        Constraint::Length(1),
    ])
    .areas(inner);

    frame.render_widget(Paragraph::new(price_line(room)), price_row);

    if room.live {
        frame.render_widget(
            Paragraph::new(Line::from(vec![
                Span::styled(" Next minimum bid: ", Style::default().fg(Color::Gray)),
                Span::styled(format_money(room.minimum_bid), Style::default().fg(Color::White)),
            ])),
            min_row,
        );
    }

    let gauge = Gauge::default()
        .gauge_style(Style::default().fg(timer_color(room)).bg(Color::Black))
        .ratio(room.time_fraction.clamp(0.0, 1.0))
        .label(format!("{} left", format_clock(room.time_remaining)));
    frame.render_widget(gauge, gauge_row);
}

fn price_line(room: &RoomSnapshot) -> Line<'static> {
    let mut spans = vec![Span::styled(
        format!(" {}", format_money(room.current_price)),
        Style::default()
            .fg(Color::Green)
            .add_modifier(Modifier::BOLD),
    )];
    match room.leader_name() {
        Some(name) => {
            spans.push(Span::styled("  Leader: ", Style::default().fg(Color::Gray)));
            spans.push(Span::styled(
                name.to_string(),
                Style::default().fg(Color::White).add_modifier(Modifier::BOLD),
            ));
        }
        None => spans.push(Span::styled(
            "  No bids yet",
            Style::default().fg(Color::DarkGray),
        )),
    }
    Line::from(spans)
}

/// Red while urgent, gray once ended, green otherwise.
pub fn timer_color(room: &RoomSnapshot) -> Color {
    if !room.live {
        Color::DarkGray
    } else if room.urgent {
        Color::Red
    } else {
        Color::Green
    }
}
