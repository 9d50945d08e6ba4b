// "Leave BidRoom?" prompt, drawn over any page while
// `ViewState::confirm_quit` is set.

use ratatui::layout::Rect;
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::Frame;

use super::modal::Modal;

const PROMPT: Modal<'static> = Modal {
    title: "Leave BidRoom?",
    accent: Color::Yellow,
    width: 34,
    height: 4,
};

pub fn render(frame: &mut Frame, area: Rect) {
    PROMPT.render(frame, area, vec![prompt_line()]);
}

/// "Open rooms close on exit. y / n", with the keys colored.
fn prompt_line() -> Line<'static> {
    let key = |k: &'static str, color: Color| {
        Span::styled(k, Style::default().fg(color).add_modifier(Modifier::BOLD))
    };
    Line::from(vec![
        Span::raw(" Open rooms close on exit. "),
        key("y", Color::Green),
        Span::raw(" / "),
        key("n", Color::Red),
    ])
}
