// Result banner: replaces the bid panel once the auction has ended.

use ratatui::layout::{Alignment, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Paragraph};
use ratatui::Frame;

use bidroom_core::auction::AuctionResult;
use bidroom_core::notify::format_money;

pub fn render(frame: &mut Frame, area: Rect, result: &AuctionResult) {
    let (headline, detail, color) = describe(result);
    let paragraph = Paragraph::new(vec![
        Line::from(Span::styled(
            headline,
            Style::default().fg(color).add_modifier(Modifier::BOLD),
        )),
        Line::from(Span::styled(detail, Style::default().fg(Color::Gray))),
        Line::from(""),
        Line::from(Span::styled(
            "Esc: back to auctions",
            Style::default().fg(Color::DarkGray),
        )),
    ])
    .alignment(Alignment::Center)
    .block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(color))
            .title("Auction Ended"),
    );
    frame.render_widget(paragraph, area);
}

/// Headline, detail line and accent color for a result.
pub fn describe(result: &AuctionResult) -> (String, String, Color) {
    match result {
        AuctionResult::Sold {
            amount,
            won_by_local: true,
            ..
        } => (
            "You won!".to_string(),
            format!("Final price {}", format_money(*amount)),
            Color::Green,
        ),
        AuctionResult::Sold {
            winner_name, amount, ..
        } => (
            format!("Sold to {winner_name}"),
            format!("Final price {}", format_money(*amount)),
            Color::Yellow,
        ),
        AuctionResult::Unsold { base_price } => (
            "Unsold".to_string(),
            format!("No bids at base price {}", format_money(*base_price)),
            Color::DarkGray,
        ),
    }
}
