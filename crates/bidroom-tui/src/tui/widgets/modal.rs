// Modal overlays: a cleared, bordered box centered over whatever page is
// showing. Used by the quit prompt, the welcome screen and the tournament
// form.

use ratatui::layout::Rect;
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Clear, Paragraph, Wrap};
use ratatui::Frame;

/// Size, title and accent color of one overlay.
#[derive(Debug, Clone, Copy)]
pub struct Modal<'a> {
    pub title: &'a str,
    pub accent: Color,
    pub width: u16,
    pub height: u16,
}

impl Modal<'_> {
    /// Clear the box and draw `lines` inside it. Returns the box's area.
    pub fn render(&self, frame: &mut Frame, area: Rect, lines: Vec<Line<'_>>) -> Rect {
        let dialog = centered_rect(self.width, self.height, area);
        frame.render_widget(Clear, dialog);

        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(self.accent))
            .title(Span::styled(
                format!(" {} ", self.title),
                Style::default().fg(self.accent).add_modifier(Modifier::BOLD),
            ));
        let body = Paragraph::new(lines)
            .wrap(Wrap { trim: false })
            .block(block)
            .style(Style::default().bg(Color::Black));
        frame.render_widget(body, dialog);
        dialog
    }
}

/// `width` x `height` box in the middle of `area`, shrunk to fit.
pub fn centered_rect(width: u16, height: u16, area: Rect) -> Rect {
    let width = width.min(area.width);
    let height = height.min(area.height);
    Rect {
        x: area.x + (area.width - width) / 2,
        y: area.y + (area.height - height) / 2,
        width,
        height,
    }
}
