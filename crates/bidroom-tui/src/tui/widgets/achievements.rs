// Achievements page: every badge with its progress.
//
// Row: "✓ Bidding Rookie   Place your first bid...   1/1"

use ratatui::layout::Rect;
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, List, ListItem};
use ratatui::Frame;

use bidroom_core::achievements::{AchievementId, AchievementStatus};
use bidroom_core::notify::format_short_money;

pub fn render(frame: &mut Frame, area: Rect, achievements: &[AchievementStatus]) {
    let unlocked = achievements.iter().filter(|a| a.unlocked).count();
    let title = format!("Achievements ({unlocked}/{} unlocked)", achievements.len());
    let items: Vec<ListItem> = achievements
        .iter()
        .map(|a| ListItem::new(achievement_line(a)))
        .collect();
    let list = List::new(items).block(Block::default().borders(Borders::ALL).title(title));
    frame.render_widget(list, area);
}

fn achievement_line(status: &AchievementStatus) -> Line<'static> {
    let a = &status.achievement;
    let (mark, mark_color, title_style) = if status.unlocked {
        (
            " ✓ ",
            Color::Green,
            Style::default().fg(Color::White).add_modifier(Modifier::BOLD),
        )
    } else {
        (" · ", Color::DarkGray, Style::default().fg(Color::Gray))
    };
    Line::from(vec![
        Span::styled(mark, Style::default().fg(mark_color)),
        Span::styled(format!("{:<20}", a.title), title_style),
        Span::styled(format!("{:<38}", a.description), Style::default().fg(Color::Gray)),
        Span::styled(progress_label(status), Style::default().fg(Color::Cyan)),
        Span::styled(format!("  {}", a.reward), Style::default().fg(Color::Yellow)),
    ])
}

/// "3/5", or money for the bid-size badge.
fn progress_label(status: &AchievementStatus) -> String {
    let progress = status.progress.min(status.achievement.goal);
    if status.achievement.id == AchievementId::HighRoller {
        format!(
            "{}/{}",
            format_short_money(progress),
            format_short_money(status.achievement.goal)
        )
    } else {
        format!("{progress}/{}", status.achievement.goal)
    }
}
