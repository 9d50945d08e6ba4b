// Bid history widget: newest bid first, leading bid highlighted.
//
// Each row: "HH:MM:SS  {bidder}  ${amount}"

use ratatui::layout::Rect;
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, List, ListItem, Paragraph};
use ratatui::Frame;

use bidroom_core::auction::Bid;
use bidroom_core::notify::format_money;

use crate::protocol::RoomSnapshot;

pub fn render(frame: &mut Frame, area: Rect, room: &RoomSnapshot) {
    let title = format!("Bid History ({})", room.stats.total_bids);

    if room.bids.is_empty() {
        let paragraph = Paragraph::new("  No bids yet. Be the first!")
            .style(Style::default().fg(Color::DarkGray))
            .block(Block::default().borders(Borders::ALL).title(title));
        frame.render_widget(paragraph, area);
        return;
    }

    let visible_rows = (area.height as usize).saturating_sub(2).max(1);
    let local_id = room.local().map(|p| p.id.as_str());
    let items: Vec<ListItem> = room
        .bids
        .iter()
        .take(visible_rows)
        .map(|bid| ListItem::new(bid_line(bid, local_id == Some(bid.participant_id.as_str()))))
        .collect();

    let list = List::new(items).block(Block::default().borders(Borders::ALL).title(title));
    frame.render_widget(list, area);
}

fn bid_line(bid: &Bid, by_local: bool) -> Line<'static> {
    let name_style = if by_local {
        Style::default().fg(Color::Cyan)
    } else {
        Style::default().fg(Color::White)
    };
    let amount_style = if bid.leading {
        Style::default().fg(Color::Green).add_modifier(Modifier::BOLD)
    } else {
        Style::default().fg(Color::Gray)
    };
    let mut spans = vec![
        Span::styled(
            format!(" {} ", bid.placed_at.format("%H:%M:%S")),
            Style::default().fg(Color::DarkGray),
        ),
        Span::styled(format!("{:<14}", bid.participant_name), name_style),
        Span::styled(format_money(bid.amount), amount_style),
    ];
    if bid.leading {
        spans.push(Span::styled(" ▲", Style::default().fg(Color::Green)));
    }
    Line::from(spans)
}
