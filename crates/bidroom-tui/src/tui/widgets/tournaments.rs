// Tournaments page: status tabs with counts, the active search, and a table
// of matching tournaments with membership and invite code.
//
// While an invite code or a quick-tournament name is being typed, a
// three-row entry box is shown under the table.

use ratatui::layout::{Constraint, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Cell, Paragraph, Row, Table};
use ratatui::Frame;

use bidroom_core::notify::format_short_money;
use bidroom_core::tournament::{count_by_status, Tournament, TournamentStatus};

use crate::tui::{InputMode, ViewState};

pub fn render(frame: &mut Frame, area: Rect, state: &ViewState) {
    let entry = match state.input_mode {
        InputMode::InviteCode => Some(("Join Tournament", " Code: ", &state.invite_input)),
        InputMode::TournamentName => Some((
            "Quick Tournament",
            " Name (blank for preset): ",
            &state.tournament_name_input,
        )),
        _ => None,
    };

    let [tabs_area, body] = Layout::vertical([Constraint::Length(1), Constraint::Min(3)]).areas(area);
    frame.render_widget(Paragraph::new(tab_line(state)), tabs_area);

    let table_area = match entry {
        Some((title, label, text)) => {
            let [table, entry_area] =
                Layout::vertical([Constraint::Min(3), Constraint::Length(3)]).areas(body);
            render_entry(frame, entry_area, title, label, text);
            table
        }
        None => body,
    };

    render_table(frame, table_area, &state.visible_tournaments(), state.tournaments.is_empty());
}

/// "All (3) | Setup (0) | Draft (1) ...  / bbl", current tab highlighted.
fn tab_line(state: &ViewState) -> Line<'static> {
    let tabs = std::iter::once((None, "All", state.tournaments.len())).chain(
        TournamentStatus::ALL
            .into_iter()
            .map(|s| (Some(s), s.label(), count_by_status(&state.tournaments, s))),
    );

    let mut spans = vec![Span::raw(" ")];
    for (i, (status, label, count)) in tabs.enumerate() {
        if i > 0 {
            spans.push(Span::styled(" | ", Style::default().fg(Color::DarkGray)));
        }
        let style = if status == state.status_filter {
            Style::default()
                .fg(Color::Black)
                .bg(Color::Cyan)
                .add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(Color::Gray)
        };
        spans.push(Span::styled(format!("{label} ({count})"), style));
    }

    let searching = state.input_mode == InputMode::Search;
    if searching || !state.tournament_search.is_empty() {
        let cursor = if searching { "_" } else { "" };
        spans.push(Span::styled(
            format!("   / {}{cursor}", state.tournament_search),
            Style::default().fg(Color::Yellow),
        ));
    }
    Line::from(spans)
}

fn render_entry(frame: &mut Frame, area: Rect, title: &str, label: &str, text: &str) {
    let paragraph = Paragraph::new(Line::from(vec![
        Span::styled(label.to_string(), Style::default().fg(Color::Gray)),
        Span::styled(
            format!("{text}_"),
            Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD),
        ),
    ]))
    .block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::Yellow))
            .title(title.to_string()),
    );
    frame.render_widget(paragraph, area);
}

fn render_table(frame: &mut Frame, area: Rect, tournaments: &[&Tournament], none_at_all: bool) {
    let title = format!("Tournaments ({})", tournaments.len());
    if tournaments.is_empty() {
        let hint = if none_at_all {
            "  No tournaments yet. Press c to create one or n for a quick one."
        } else {
            "  No tournaments match. Esc clears the search and tab."
        };
        let paragraph = Paragraph::new(hint)
            .style(Style::default().fg(Color::DarkGray))
            .block(Block::default().borders(Borders::ALL).title(title));
        frame.render_widget(paragraph, area);
        return;
    }

    let header = Row::new(vec![
        "Name", "Following", "Status", "Members", "Open", "Budget", "Auction", "Code",
    ])
    .style(Style::default().fg(Color::White).add_modifier(Modifier::BOLD));

    let rows: Vec<Row> = tournaments.iter().map(|t| tournament_row(t)).collect();

    let widths = [
        Constraint::Min(20),
        Constraint::Min(14),
        Constraint::Length(13),
        Constraint::Length(8),
        Constraint::Length(5),
        Constraint::Length(8),
        Constraint::Length(13),
        Constraint::Length(7),
    ];

    let table = Table::new(rows, widths)
        .header(header)
        .block(Block::default().borders(Borders::ALL).title(title));
    frame.render_widget(table, area);
}

fn tournament_row(t: &Tournament) -> Row<'static> {
    let open = if t.status.is_open() {
        Cell::from(t.open_slots().to_string())
    } else {
        Cell::from(Span::styled("--", Style::default().fg(Color::DarkGray)))
    };
    Row::new(vec![
        Cell::from(t.name.clone()),
        Cell::from(t.real_life_tournament.clone()),
        Cell::from(Span::styled(
            t.status.label(),
            Style::default().fg(status_color(t.status)),
        )),
        Cell::from(format!("{}/{}", t.participants.len(), t.max_participants)),
        open,
        Cell::from(format_short_money(t.budget)),
        Cell::from(t.auction_date.format("%b %d %H:%M").to_string()),
        Cell::from(t.invite_code.clone()),
    ])
}

/// Badge color per status.
pub fn status_color(status: TournamentStatus) -> Color {
    match status {
        TournamentStatus::Setup => Color::Gray,
        TournamentStatus::Draft => Color::Yellow,
        TournamentStatus::AuctionScheduled => Color::Cyan,
        TournamentStatus::Active => Color::Green,
        TournamentStatus::Completed => Color::DarkGray,
    }
}
