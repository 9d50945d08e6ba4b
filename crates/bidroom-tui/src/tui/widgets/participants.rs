// Participants widget: every bidder in the room with presence and budget.
//
// Columns: presence dot, Name, Remaining, Spent, Last bid. The leader's row
// is bold; the local participant is cyan.

use ratatui::layout::{Constraint, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::Span;
use ratatui::widgets::{Block, Borders, Cell, Row, Table};
use ratatui::Frame;

use bidroom_core::auction::Participant;
use bidroom_core::notify::format_short_money;

use crate::protocol::RoomSnapshot;

pub fn render(frame: &mut Frame, area: Rect, room: &RoomSnapshot) {
    let header = Row::new(vec!["", "Name", "Left", "Spent", "Last"])
        .style(Style::default().fg(Color::White).add_modifier(Modifier::BOLD));

    let rows: Vec<Row> = room
        .participants
        .iter()
        .map(|p| participant_row(p, room.leader_id.as_deref() == Some(p.id.as_str())))
        .collect();

    let widths = [
        Constraint::Length(2),
        Constraint::Min(12),
        Constraint::Length(8),
        Constraint::Length(8),
        Constraint::Length(8),
    ];

    let title = format!(
        "Participants ({}/{} online)",
        room.online_count(),
        room.participants.len()
    );
    let table = Table::new(rows, widths)
        .header(header)
        .block(Block::default().borders(Borders::ALL).title(title));
    frame.render_widget(table, area);
}

fn participant_row(p: &Participant, leading: bool) -> Row<'static> {
    let (dot, dot_color) = presence_indicator(p.online);
    let mut style = if p.is_local {
        Style::default().fg(Color::Cyan)
    } else {
        Style::default().fg(Color::White)
    };
    if leading {
        style = style.add_modifier(Modifier::BOLD);
    }

    let name = if p.is_local {
        format!("{} (you)", p.name)
    } else {
        p.name.clone()
    };

    Row::new(vec![
        Cell::from(Span::styled(dot, Style::default().fg(dot_color))),
        Cell::from(name),
        Cell::from(format_short_money(p.remaining_budget)),
        Cell::from(format_short_money(p.total_spent)),
        Cell::from(p.last_bid.map_or_else(|| "--".to_string(), format_short_money)),
    ])
    .style(style)
}

/// Green dot for online, gray for offline.
pub fn presence_indicator(online: bool) -> (&'static str, Color) {
    if online {
        ("●", Color::Green)
    } else {
        ("○", Color::DarkGray)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tui::test_support::sample_room;

    #[test]
    fn presence() {
        assert_eq!(presence_indicator(true), ("●", Color::Green));
        assert_eq!(presence_indicator(false), ("○", Color::DarkGray));
    }

    #[test]
    fn render_marks_local_user() {
        let backend = ratatui::backend::TestBackend::new(60, 10);
        let mut terminal = ratatui::Terminal::new(backend).unwrap();
        let room = sample_room();
        terminal
            .draw(|frame| render(frame, frame.area(), &room))
            .unwrap();
        let content: String = terminal
            .backend()
            .buffer()
            .content()
            .iter()
            .map(|c| c.symbol())
            .collect();
        assert!(content.contains("You (you)"));
        assert!(content.contains("4/5 online"));
    }
}
