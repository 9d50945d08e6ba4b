// "Auction not found" page for unknown player ids.

use ratatui::layout::{Alignment, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Paragraph};
use ratatui::Frame;

pub fn render(frame: &mut Frame, area: Rect, player_id: &str) {
    let mut lines = vec![
        Line::from(""),
        Line::from(Span::styled(
            "Auction not found",
            Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
        )),
    ];
    if !player_id.is_empty() {
        lines.push(Line::from(Span::styled(
            format!("No player with id `{player_id}` is up for auction."),
            Style::default().fg(Color::Gray),
        )));
    }
    lines.push(Line::from(""));
    lines.push(Line::from(Span::styled(
        "Press Enter to go back to the auction list",
        Style::default().fg(Color::DarkGray),
    )));

    let paragraph = Paragraph::new(lines)
        .alignment(Alignment::Center)
        .block(Block::default().borders(Borders::ALL));
    frame.render_widget(paragraph, area);
}
