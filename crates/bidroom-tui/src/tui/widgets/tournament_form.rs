// Create-tournament form overlay.
//
// One row per field; the focused row is highlighted. Choice fields show
// "◀ value ▶" and cycle with Left/Right.

use ratatui::layout::Rect;
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::Frame;

use bidroom_core::notify::format_money;

use super::modal::Modal;
use crate::tui::form::{FormField, TournamentForm};

const FORM: Modal<'static> = Modal {
    title: "Create Tournament",
    accent: Color::Green,
    width: 54,
    height: 10,
};

pub fn render(frame: &mut Frame, area: Rect, form: &TournamentForm) {
    FORM.render(frame, area, form_lines(form));
}

fn form_lines(form: &TournamentForm) -> Vec<Line<'static>> {
    let budget = match form.budget.parse::<u64>() {
        Ok(amount) => format_money(amount),
        Err(_) => String::new(),
    };
    let mut lines = vec![
        field_line(form, FormField::Name, format!("{}_", form.name), false),
        field_line(form, FormField::Following, form.following_name().to_string(), true),
        field_line(form, FormField::Seats, format!("{} players", form.seat_count()), true),
        field_line(form, FormField::Budget, budget, false),
        Line::from(""),
    ];
    lines.push(Line::from(Span::styled(
        " Tab:Next  ◀▶:Change  Enter:Create  Esc:Cancel",
        Style::default().fg(Color::DarkGray),
    )));
    lines
}

fn field_line(
    form: &TournamentForm,
    field: FormField,
    value: String,
    choice: bool,
) -> Line<'static> {
    let focused = form.focus == field;
    let label_style = if focused {
        Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD)
    } else {
        Style::default().fg(Color::Gray)
    };
    let value = if choice && focused {
        format!("◀ {value} ▶")
    } else {
        value
    };
    Line::from(vec![
        Span::styled(format!(" {:<10}", field.label()), label_style),
        Span::styled(value, Style::default().fg(Color::White)),
    ])
}
