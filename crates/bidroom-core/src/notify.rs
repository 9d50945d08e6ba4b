// Transient notifications shown over the auction room, plus the money
// formatting shared by every screen.

use std::collections::VecDeque;

use chrono::{DateTime, Duration, Local};

use crate::achievements::Achievement;
use crate::auction::{AuctionResult, BidError, BidReceipt};
use crate::config::NotificationConfig;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NotificationLevel {
    Success,
    Error,
    Info,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notification {
    pub id: u64,
    pub level: NotificationLevel,
    pub message: String,
    pub created_at: DateTime<Local>,
}

// ---------------------------------------------------------------------------
// NotificationFeed
// ---------------------------------------------------------------------------

/// Bounded newest-first list of notifications with time-based expiry.
#[derive(Debug, Clone)]
pub struct NotificationFeed {
    items: VecDeque<Notification>,
    capacity: usize,
    ttl: Duration,
    next_id: u64,
}

impl NotificationFeed {
    pub fn new(capacity: usize, ttl: Duration) -> Self {
        NotificationFeed {
            items: VecDeque::new(),
            capacity: capacity.max(1),
            ttl,
            next_id: 1,
        }
    }

    pub fn from_config(config: &NotificationConfig) -> Self {
        // Capped at a day; anything longer is effectively "never expires".
        let ttl = Duration::seconds(config.ttl_secs.min(86_400) as i64);
        Self::new(config.capacity, ttl)
    }

    /// Add a notification, evicting the oldest once over capacity.
    pub fn push(
        &mut self,
        level: NotificationLevel,
        message: impl Into<String>,
        now: DateTime<Local>,
    ) -> u64 {
        let id = self.next_id;
        self.next_id += 1;
        self.items.push_front(Notification {
            id,
            level,
            message: message.into(),
            created_at: now,
        });
        self.items.truncate(self.capacity);
        id
    }

    /// Drop every notification older than the TTL. Returns how many went.
    pub fn prune(&mut self, now: DateTime<Local>) -> usize {
        let before = self.items.len();
        let ttl = self.ttl;
        self.items.retain(|n| now - n.created_at < ttl);
        before - self.items.len()
    }

    pub fn dismiss_latest(&mut self) -> Option<Notification> {
        self.items.pop_front()
    }

    pub fn clear(&mut self) {
        self.items.clear();
    }

    /// Newest first.
    pub fn iter(&self) -> impl Iterator<Item = &Notification> {
        self.items.iter()
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

// ---------------------------------------------------------------------------
// Message wording
// ---------------------------------------------------------------------------

/// Level and text for an accepted bid.
pub fn bid_accepted_message(receipt: &BidReceipt) -> (NotificationLevel, String) {
    if receipt.by_local {
        (
            NotificationLevel::Success,
            format!("Bid placed: {}!", format_money(receipt.amount)),
        )
    } else {
        (
            NotificationLevel::Info,
            format!(
                "{} bid {}!",
                receipt.participant_name,
                format_money(receipt.amount)
            ),
        )
    }
}

/// Level and text for a rejected bid. Bids after the end are ignored
/// silently.
pub fn bid_rejected_message(err: &BidError) -> Option<(NotificationLevel, String)> {
    match err {
        BidError::BidTooLow { minimum, .. } => Some((
            NotificationLevel::Error,
            format!("Minimum bid is {}", format_money(*minimum)),
        )),
        BidError::InsufficientBudget { .. } => {
            Some((NotificationLevel::Error, "Insufficient budget!".to_string()))
        }
        BidError::UnknownParticipant(id) => Some((
            NotificationLevel::Error,
            format!("Unknown bidder `{id}`"),
        )),
        BidError::AuctionNotLive => None,
    }
}

pub fn auction_ended_message(result: &AuctionResult) -> (NotificationLevel, String) {
    let text = match result {
        AuctionResult::Sold {
            won_by_local: true,
            amount,
            ..
        } => format!("Auction ended! You won for {}", format_money(*amount)),
        AuctionResult::Sold {
            winner_name,
            amount,
            ..
        } => format!(
            "Auction ended! {} won for {}",
            winner_name,
            format_money(*amount)
        ),
        AuctionResult::Unsold { .. } => "Auction ended! No bids were placed".to_string(),
    };
    (NotificationLevel::Success, text)
}

pub fn achievement_unlocked_message(achievement: &Achievement) -> (NotificationLevel, String) {
    (
        NotificationLevel::Success,
        format!("Achievement unlocked: {}!", achievement.title),
    )
}

// ---------------------------------------------------------------------------
// Money formatting
// ---------------------------------------------------------------------------

/// `1250000` -> `"$1,250,000"`.
pub fn format_money(amount: u64) -> String {
    let digits = amount.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3 + 1);
    out.push('$');
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}

/// Compact form for tight columns: `$525K`, `$2.5K`, `$1.25M`.
///
/// Rounds first and picks the unit afterwards, so `999_950` is `$1M`.
pub fn format_short_money(amount: u64) -> String {
    if amount < 1_000 {
        return format!("${amount}");
    }
    let tenths_of_k = amount.saturating_add(50) / 100;
    if tenths_of_k < 10_000 {
        return match tenths_of_k % 10 {
            0 => format!("${}K", tenths_of_k / 10),
            frac => format!("${}.{}K", tenths_of_k / 10, frac),
        };
    }
    let hundredths_of_m = amount.saturating_add(5_000) / 10_000;
    let (whole, frac) = (hundredths_of_m / 100, hundredths_of_m % 100);
    match frac {
        0 => format!("${whole}M"),
        f if f % 10 == 0 => format!("${whole}.{}M", f / 10),
        f => format!("${whole}.{f:02}M"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::auction::BidId;

    fn receipt(by_local: bool) -> BidReceipt {
        BidReceipt {
            bid_id: BidId(1),
            participant_id: if by_local { "2" } else { "1" }.into(),
            participant_name: if by_local { "You" } else { "CricketKing" }.into(),
            amount: if by_local { 525_000 } else { 550_000 },
            by_local,
            time_remaining: 120,
        }
    }

    // -----------------------------------------------------------------------
    // Feed
    // -----------------------------------------------------------------------

    #[test]
    fn feed_is_newest_first_and_bounded() {
        let now = Local::now();
        let mut feed = NotificationFeed::new(2, Duration::seconds(4));
        feed.push(NotificationLevel::Info, "one", now);
        feed.push(NotificationLevel::Info, "two", now);
        feed.push(NotificationLevel::Info, "three", now);
        let messages: Vec<&str> = feed.iter().map(|n| n.message.as_str()).collect();
        assert_eq!(messages, vec!["three", "two"]);
    }

    #[test]
    fn prune_drops_expired() {
        let start = Local::now();
        let mut feed = NotificationFeed::new(5, Duration::seconds(4));
        feed.push(NotificationLevel::Info, "old", start);
        feed.push(NotificationLevel::Info, "new", start + Duration::seconds(3));

        assert_eq!(feed.prune(start + Duration::seconds(2)), 0);
        assert_eq!(feed.prune(start + Duration::seconds(5)), 1);
        assert_eq!(feed.iter().next().unwrap().message, "new");
        assert_eq!(feed.prune(start + Duration::seconds(7)), 1);
        assert!(feed.is_empty());
    }

    #[test]
    fn dismiss_latest_pops_front() {
        let now = Local::now();
        let mut feed = NotificationFeed::from_config(&NotificationConfig::default());
        feed.push(NotificationLevel::Info, "a", now);
        let id = feed.push(NotificationLevel::Error, "b", now);
        assert_eq!(feed.dismiss_latest().unwrap().id, id);
        assert_eq!(feed.len(), 1);
    }

    // -----------------------------------------------------------------------
    // Wording
    // -----------------------------------------------------------------------

    #[test]
    fn local_bid_message() {
        let (level, text) = bid_accepted_message(&receipt(true));
        assert_eq!(level, NotificationLevel::Success);
        assert_eq!(text, "Bid placed: $525,000!");
    }

    #[test]
    fn rival_bid_message() {
        let (level, text) = bid_accepted_message(&receipt(false));
        assert_eq!(level, NotificationLevel::Info);
        assert_eq!(text, "CricketKing bid $550,000!");
    }

    #[test]
    fn rejection_messages() {
        let low = BidError::BidTooLow {
            amount: 530_000,
            minimum: 550_000,
        };
        assert_eq!(bid_rejected_message(&low).unwrap().1, "Minimum bid is $550,000");

        let broke = BidError::InsufficientBudget {
            amount: 600_000,
            remaining: 500_000,
        };
        assert_eq!(bid_rejected_message(&broke).unwrap().1, "Insufficient budget!");

        assert!(bid_rejected_message(&BidError::AuctionNotLive).is_none());
    }

    #[test]
    fn ended_messages() {
        let sold = AuctionResult::Sold {
            winner_id: "1".into(),
            winner_name: "CricketKing".into(),
            amount: 650_000,
            won_by_local: false,
        };
        assert_eq!(
            auction_ended_message(&sold).1,
            "Auction ended! CricketKing won for $650,000"
        );
        let unsold = AuctionResult::Unsold { base_price: 1 };
        assert!(auction_ended_message(&unsold).1.starts_with("Auction ended!"));
    }

    #[test]
    fn achievement_message_names_the_badge() {
        let (level, text) = achievement_unlocked_message(&crate::achievements::ACHIEVEMENTS[2]);
        assert_eq!(level, NotificationLevel::Success);
        assert_eq!(text, "Achievement unlocked: Bidding Rookie!");
    }

    // -----------------------------------------------------------------------
    // Money
    // -----------------------------------------------------------------------

    #[test]
    fn money_has_thousands_separators() {
        assert_eq!(format_money(0), "$0");
        assert_eq!(format_money(999), "$999");
        assert_eq!(format_money(1_000), "$1,000");
        assert_eq!(format_money(525_000), "$525,000");
        assert_eq!(format_money(1_250_000), "$1,250,000");
    }

    #[test]
    fn short_money_rounds_before_picking_unit() {
        assert_eq!(format_short_money(999_950), "$1M");
        assert_eq!(format_short_money(999_949), "$999.9K");
        assert_eq!(format_short_money(1_950), "$2K");
        assert_eq!(format_short_money(1_999_999), "$2M");
        assert_eq!(format_short_money(u64::MAX).chars().last(), Some('M'));
    }

    #[test]
    fn short_money() {
        assert_eq!(format_short_money(500), "$500");
        assert_eq!(format_short_money(525_000), "$525K");
        assert_eq!(format_short_money(2_500), "$2.5K");
        assert_eq!(format_short_money(1_000_000), "$1M");
        assert_eq!(format_short_money(1_250_000), "$1.25M");
        assert_eq!(format_short_money(1_500_000), "$1.5M");
        assert_eq!(format_short_money(2_050_000), "$2.05M");
    }
}
