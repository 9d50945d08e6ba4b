// Auction stats widget: bid count, starting price, rise and average raise.

use ratatui::layout::Rect;
use ratatui::style::{Color, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Paragraph};
use ratatui::Frame;

use bidroom_core::auction::AuctionStats;
use bidroom_core::notify::format_money;

use crate::protocol::RoomSnapshot;

pub fn render(frame: &mut Frame, area: Rect, room: &RoomSnapshot) {
    let paragraph = Paragraph::new(stats_lines(&room.stats))
        .block(Block::default().borders(Borders::ALL).title("Auction Stats"));
    frame.render_widget(paragraph, area);
}

fn stats_lines(stats: &AuctionStats) -> Vec<Line<'static>> {
    let row = |label: &'static str, value: String, color: Color| {
        Line::from(vec![
            Span::styled(label, Style::default().fg(Color::Gray)),
            Span::styled(value, Style::default().fg(color)),
        ])
    };
    vec![
        row(" Total bids:    ", stats.total_bids.to_string(), Color::White),
        row(" Starting:      ", format_money(stats.starting_price), Color::White),
        row(" Increase:      ", format!("+{}", format_money(stats.price_increase)), Color::Green),
        row(" Avg increment: ", format_money(stats.average_increment), Color::Cyan),
    ]
}
