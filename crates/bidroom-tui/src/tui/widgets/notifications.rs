// Toast notifications stacked in the top-right corner.
//
// Newest on top. Each toast is three rows (border, message, border) and the
// stack stops when it runs out of vertical space.

use ratatui::layout::Rect;
use ratatui::style::{Color, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Clear, Paragraph};
use ratatui::Frame;

use bidroom_core::notify::{Notification, NotificationLevel};

const TOAST_WIDTH: u16 = 42;
const TOAST_HEIGHT: u16 = 3;

pub fn render(frame: &mut Frame, area: Rect, notifications: &[Notification]) {
    for (rect, note) in toast_rects(area, notifications.len())
        .into_iter()
        .zip(notifications)
    {
        frame.render_widget(Clear, rect);
        let (icon, color) = level_style(note.level);
        let paragraph = Paragraph::new(Line::from(vec![
            Span::styled(format!("{icon} "), Style::default().fg(color)),
            Span::raw(note.message.clone()),
        ]))
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(color)),
        )
        .style(Style::default().bg(Color::Black));
        frame.render_widget(paragraph, rect);
    }
}

/// Icon and accent color for a notification level.
pub fn level_style(level: NotificationLevel) -> (&'static str, Color) {
    match level {
        NotificationLevel::Success => ("✓", Color::Green),
        NotificationLevel::Error => ("✗", Color::Red),
        NotificationLevel::Info => ("i", Color::Cyan),
    }
}

/// Stack positions for up to `count` toasts, below the status bar.
fn toast_rects(area: Rect, count: usize) -> Vec<Rect> {
    let width = TOAST_WIDTH.min(area.width);
    let x = area.x + area.width - width;
    let mut rects = Vec::new();
    let mut y = area.y + 1;
    for _ in 0..count {
        if y + TOAST_HEIGHT > area.y + area.height {
            break;
        }
        rects.push(Rect::new(x, y, width, TOAST_HEIGHT));
        y += TOAST_HEIGHT;
    }
    rects
}
