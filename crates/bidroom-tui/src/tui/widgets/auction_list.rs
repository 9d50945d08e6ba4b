// Auction list widget: searchable table of players up for auction.
//
// Columns: #, Name, Role, Rating, Base price. The selected row is
// highlighted; the title carries the search text and match count.

use ratatui::layout::{Constraint, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Cell, Paragraph, Row, Table, TableState};
use ratatui::Frame;

use bidroom_core::catalog::Player;
use bidroom_core::notify::format_money;

use crate::tui::{InputMode, ViewState};

pub fn render(frame: &mut Frame, area: Rect, state: &ViewState) {
    let players = state.filtered_players();
    let title = build_title(state, players.len());

    if players.is_empty() {
        let message = if state.catalog.is_none() {
            "  Loading players..."
        } else {
            "  No players match your search."
        };
        let paragraph = Paragraph::new(message)
            .style(Style::default().fg(Color::DarkGray))
            .block(Block::default().borders(Borders::ALL).title(title));
        frame.render_widget(paragraph, area);
        return;
    }

    let header = Row::new(vec!["#", "Name", "Role", "Rating", "Base Price"]).style(
        Style::default()
            .fg(Color::White)
            .add_modifier(Modifier::BOLD),
    );

    let rows: Vec<Row> = players
        .iter()
        .enumerate()
        .map(|(i, p)| player_row(i, p))
        .collect();

    let widths = [
        Constraint::Length(4),
        Constraint::Min(20),
        Constraint::Length(14),
        Constraint::Length(7),
        Constraint::Length(12),
    ];

    let table = Table::new(rows, widths)
        .header(header)
        .block(Block::default().borders(Borders::ALL).title(title))
        .row_highlight_style(Style::default().bg(Color::DarkGray).add_modifier(Modifier::BOLD))
        .highlight_symbol(">> ");

    let mut table_state = TableState::default().with_selected(Some(state.selected));
    frame.render_stateful_widget(table, area, &mut table_state);
}

fn player_row(index: usize, player: &Player) -> Row<'static> {
    Row::new(vec![
        Cell::from(format!("{}", index + 1)),
        Cell::from(player.name.clone()),
        Cell::from(player.role.display_str()),
        Cell::from(Span::styled(
            format!("{}", player.rating),
            Style::default().fg(rating_color(player.rating)),
        )),
        Cell::from(format_money(player.base_price)),
    ])
}

/// Green for stars, yellow for regulars, gray otherwise.
pub fn rating_color(rating: u8) -> Color {
    match rating {
        90.. => Color::Green,
        80..=89 => Color::Yellow,
        _ => Color::Gray,
    }
}

fn build_title(state: &ViewState, count: usize) -> Line<'static> {
    let mut title = format!("Live Auctions ({count})");
    if state.input_mode == InputMode::Search {
        title.push_str(&format!(" [/{}_]", state.search_text));
    } else if !state.search_text.is_empty() {
        title.push_str(&format!(" [/{}]", state.search_text));
    }
    Line::from(title)
}
