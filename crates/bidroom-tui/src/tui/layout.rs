// Screen layout: panel arrangement and sizing.
//
// Auction room:
//
// +--------------------------------------------------+
// | Status Bar (1 row)                                |
// +--------------------------------------------------+
// | Price / Timer Banner (5 rows)                     |
// +-------------------------+------------------------+
// | Player Card (9 rows)     | Participants (fill)    |
// | Bid Panel (6 rows)       |                        |
// | Bid History (fill)       | Auction Stats (7 rows) |
// +-------------------------+------------------------+
// | Help Bar (1 row)                                  |
// +--------------------------------------------------+
//
// List pages (auction list, tournaments, not found) use status bar, one
// main panel and the help bar.

use ratatui::layout::{Constraint, Direction, Layout, Rect};

/// Resolved screen areas for the auction room.
#[derive(Debug, Clone)]
pub struct RoomLayout {
    pub status_bar: Rect,
    pub price_banner: Rect,
    pub player_card: Rect,
    /// Bid entry and quick bids; replaced by the result once the auction ends.
    pub bid_panel: Rect,
    pub history: Rect,
    pub participants: Rect,
    pub stats: Rect,
    pub help_bar: Rect,
}

/// Resolved screen areas for single-panel pages.
#[derive(Debug, Clone)]
pub struct ListLayout {
    pub status_bar: Rect,
    pub main: Rect,
    pub help_bar: Rect,
}

pub fn build_room_layout(area: Rect) -> RoomLayout {
    let vertical = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1), // status bar
            Constraint::Length(5), // price banner
            Constraint::Min(10),   // middle section
            Constraint::Length(1), // help bar
        ])
        .split(area);

    let horizontal = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(60), Constraint::Percentage(40)])
        .split(vertical[2]);

    let left = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(9),
            Constraint::Length(6),
            Constraint::Min(3),
        ])
        .split(horizontal[0]);

    let right = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(5), Constraint::Length(7)])
        .split(horizontal[1]);

    RoomLayout {
        status_bar: vertical[0],
        price_banner: vertical[1],
        player_card: left[0],
        bid_panel: left[1],
        history: left[2],
        participants: right[0],
        stats: right[1],
        help_bar: vertical[3],
    }
}

pub fn build_list_layout(area: Rect) -> ListLayout {
    let vertical = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1),
            Constraint::Min(3),
            Constraint::Length(1),
        ])
        .split(area);

    ListLayout {
        status_bar: vertical[0],
        main: vertical[1],
        help_bar: vertical[2],
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
