// Player card widget: who is on the block, with rating and career stats.

use ratatui::layout::Rect;
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Paragraph};
use ratatui::Frame;

use bidroom_core::catalog::Player;
use bidroom_core::notify::format_money;

use super::auction_list::rating_color;

pub fn render(frame: &mut Frame, area: Rect, player: &Player) {
    let paragraph = Paragraph::new(card_lines(player)).block(
        Block::default()
            .borders(Borders::ALL)
            .title(format!("[{}] {}", player.initials(), player.name)),
    );
    frame.render_widget(paragraph, area);
}

fn card_lines(player: &Player) -> Vec<Line<'static>> {
    let mut lines = vec![
        Line::from(vec![
            Span::styled(" Role:   ", Style::default().fg(Color::Gray)),
            Span::styled(
                player.role.display_str(),
                Style::default().fg(Color::White).add_modifier(Modifier::BOLD),
            ),
        ]),
        Line::from(vec![
            Span::styled(" Rating: ", Style::default().fg(Color::Gray)),
            Span::styled(
                format!("{}/100", player.rating),
                Style::default().fg(rating_color(player.rating)),
            ),
        ]),
        Line::from(vec![
            Span::styled(" Base:   ", Style::default().fg(Color::Gray)),
            Span::styled(format_money(player.base_price), Style::default().fg(Color::Cyan)),
        ]),
    ];

    for (name, value) in &player.stats {
        lines.push(Line::from(vec![
            Span::styled(format!(" {:<8}", stat_label(name)), Style::default().fg(Color::Gray)),
            Span::styled(format_stat(*value), Style::default().fg(Color::White)),
        ]));
    }
    lines
}

/// "strike_rate" -> "Strike rate".
pub fn stat_label(key: &str) -> String {
    let spaced = key.replace('_', " ");
    let mut chars = spaced.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

/// Whole numbers print without decimals, the rest with two.
pub fn format_stat(value: f64) -> String {
    if value.fract() == 0.0 {
        format!("{value:.0}")
    } else {
        format!("{value:.2}")
    }
}
