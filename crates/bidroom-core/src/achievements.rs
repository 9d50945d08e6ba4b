// Achievement tracker: running totals of what the local user has done this
// session, and the badges those totals unlock.
//
// Fed by accepted bids, finished auctions and tournament activity. Each
// `record_*` call returns only the achievements it newly unlocked, so the
// caller can announce each one exactly once.

use std::collections::BTreeSet;

use tracing::info;

use crate::auction::{AuctionResult, BidReceipt};

/// A bid at or above this amount earns High Roller.
pub const HIGH_ROLLER_BID: u64 = 1_000_000;

// ---------------------------------------------------------------------------
// Definitions
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum AchievementId {
    TournamentCreator,
    TeamPlayer,
    BiddingRookie,
    HighRoller,
    SocialButterfly,
    Champion,
    CricketLegend,
    AuctionMaster,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Achievement {
    pub id: AchievementId,
    pub title: &'static str,
    pub description: &'static str,
    pub reward: &'static str,
    /// Value of the tracked stat that unlocks this badge.
    pub goal: u64,
}

/// Every achievement, in display order.
pub const ACHIEVEMENTS: [Achievement; 8] = [
    Achievement {
        id: AchievementId::TournamentCreator,
        title: "Tournament Creator",
        description: "Create your first tournament",
        reward: "100 bonus credits",
        goal: 1,
    },
    Achievement {
        id: AchievementId::TeamPlayer,
        title: "Team Player",
        description: "Join your first tournament",
        reward: "50 bonus credits",
        goal: 1,
    },
    Achievement {
        id: AchievementId::BiddingRookie,
        title: "Bidding Rookie",
        description: "Place your first bid in an auction",
        reward: "Bid strategies guide",
        goal: 1,
    },
    Achievement {
        id: AchievementId::HighRoller,
        title: "High Roller",
        description: "Place a bid of $1,000,000 or more",
        reward: "VIP bidder badge",
        goal: HIGH_ROLLER_BID,
    },
    Achievement {
        id: AchievementId::SocialButterfly,
        title: "Social Butterfly",
        description: "Join 5 different tournaments",
        reward: "Social player badge",
        goal: 5,
    },
    Achievement {
        id: AchievementId::Champion,
        title: "Champion",
        description: "Win your first auction",
        reward: "Champion badge + 500 credits",
        goal: 1,
    },
    Achievement {
        id: AchievementId::CricketLegend,
        title: "Cricket Legend",
        description: "Win 3 auctions",
        reward: "Legend status",
        goal: 3,
    },
    Achievement {
        id: AchievementId::AuctionMaster,
        title: "Auction Master",
        description: "Enter 10 auction rooms",
        reward: "Auction expert badge",
        goal: 10,
    },
];

// ---------------------------------------------------------------------------
// Stats
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct UserStats {
    pub tournaments_created: u64,
    pub tournaments_joined: u64,
    pub auctions_entered: u64,
    pub total_bids: u64,
    pub auctions_won: u64,
    pub highest_bid: u64,
}

impl UserStats {
    /// Current value of the stat `id` is measured against.
    pub fn progress(&self, id: AchievementId) -> u64 {
        match id {
            AchievementId::TournamentCreator => self.tournaments_created,
            AchievementId::TeamPlayer | AchievementId::SocialButterfly => self.tournaments_joined,
            AchievementId::BiddingRookie => self.total_bids,
            AchievementId::HighRoller => self.highest_bid,
            AchievementId::Champion | AchievementId::CricketLegend => self.auctions_won,
            AchievementId::AuctionMaster => self.auctions_entered,
        }
    }
}

/// One row of the achievements page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AchievementStatus {
    pub achievement: Achievement,
    pub progress: u64,
    pub unlocked: bool,
}

// ---------------------------------------------------------------------------
// AchievementTracker
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Default)]
pub struct AchievementTracker {
    stats: UserStats,
    unlocked: BTreeSet<AchievementId>,
}

impl AchievementTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Count an accepted bid. Rival bids are ignored.
    pub fn record_bid(&mut self, receipt: &BidReceipt) -> Vec<Achievement> {
        if !receipt.by_local {
            return Vec::new();
        }
        self.stats.total_bids += 1;
        self.stats.highest_bid = self.stats.highest_bid.max(receipt.amount);
        self.refresh()
    }

    pub fn record_auction_entered(&mut self) -> Vec<Achievement> {
        self.stats.auctions_entered += 1;
        self.refresh()
    }

    /// Count a finished auction; only a local win moves any stat.
    pub fn record_auction_result(&mut self, result: &AuctionResult) -> Vec<Achievement> {
        if matches!(result, AuctionResult::Sold { won_by_local: true, .. }) {
            self.stats.auctions_won += 1;
        }
        self.refresh()
    }

    pub fn record_tournament_created(&mut self) -> Vec<Achievement> {
        self.stats.tournaments_created += 1;
        self.refresh()
    }

    pub fn record_tournament_joined(&mut self) -> Vec<Achievement> {
        self.stats.tournaments_joined += 1;
        self.refresh()
    }

    pub fn stats(&self) -> &UserStats {
        &self.stats
    }

    pub fn is_unlocked(&self, id: AchievementId) -> bool {
        self.unlocked.contains(&id)
    }

    pub fn unlocked_count(&self) -> usize {
        self.unlocked.len()
    }

    /// Every achievement with its progress, in display order.
    pub fn statuses(&self) -> Vec<AchievementStatus> {
        ACHIEVEMENTS
            .iter()
            .map(|a| AchievementStatus {
                achievement: *a,
                progress: self.stats.progress(a.id),
                unlocked: self.is_unlocked(a.id),
            })
            .collect()
    }

    fn refresh(&mut self) -> Vec<Achievement> {
        let mut fresh = Vec::new();
        for achievement in ACHIEVEMENTS {
            if self.stats.progress(achievement.id) >= achievement.goal
                && self.unlocked.insert(achievement.id)
            {
                info!("Achievement unlocked: {}", achievement.title);
                fresh.push(achievement);
            }
        }
        fresh
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::auction::BidId;

    fn bid(amount: u64, by_local: bool) -> BidReceipt {
        BidReceipt {
            bid_id: BidId(1),
            participant_id: if by_local { "2" } else { "1" }.into(),
            participant_name: if by_local { "You" } else { "CricketKing" }.into(),
            amount,
            by_local,
            time_remaining: 60,
        }
    }

    fn won(by_local: bool) -> AuctionResult {
        AuctionResult::Sold {
            winner_id: "2".into(),
            winner_name: "You".into(),
            amount: 600_000,
            won_by_local: by_local,
        }
    }

    fn ids(unlocked: &[Achievement]) -> Vec<AchievementId> {
        unlocked.iter().map(|a| a.id).collect()
    }

    #[test]
    fn first_local_bid_unlocks_rookie_once() {
        let mut tracker = AchievementTracker::new();
        assert!(tracker.record_bid(&bid(500_000, false)).is_empty());
        assert_eq!(tracker.stats().total_bids, 0);

        assert_eq!(
            ids(&tracker.record_bid(&bid(500_000, true))),
            vec![AchievementId::BiddingRookie]
        );
        assert!(tracker.record_bid(&bid(525_000, true)).is_empty());
        assert_eq!(tracker.stats().total_bids, 2);
        assert_eq!(tracker.stats().highest_bid, 525_000);
    }

    #[test]
    fn high_roller_needs_a_seven_figure_bid() {
        let mut tracker = AchievementTracker::new();
        tracker.record_bid(&bid(HIGH_ROLLER_BID - 1, true));
        assert!(!tracker.is_unlocked(AchievementId::HighRoller));
        assert_eq!(
            ids(&tracker.record_bid(&bid(HIGH_ROLLER_BID, true))),
            vec![AchievementId::HighRoller]
        );
    }

    #[test]
    fn tournament_activity() {
        let mut tracker = AchievementTracker::new();
        assert_eq!(
            ids(&tracker.record_tournament_created()),
            vec![AchievementId::TournamentCreator]
        );
        assert_eq!(
            ids(&tracker.record_tournament_joined()),
            vec![AchievementId::TeamPlayer]
        );
        for _ in 0..3 {
            assert!(tracker.record_tournament_joined().is_empty());
        }
        assert_eq!(
            ids(&tracker.record_tournament_joined()),
            vec![AchievementId::SocialButterfly]
        );
    }

    #[test]
    fn wins_and_rooms_entered() {
        let mut tracker = AchievementTracker::new();
        assert!(tracker.record_auction_result(&won(false)).is_empty());
        assert!(tracker
            .record_auction_result(&AuctionResult::Unsold { base_price: 1 })
            .is_empty());
        assert_eq!(
            ids(&tracker.record_auction_result(&won(true))),
            vec![AchievementId::Champion]
        );
        tracker.record_auction_result(&won(true));
        assert_eq!(
            ids(&tracker.record_auction_result(&won(true))),
            vec![AchievementId::CricketLegend]
        );

        for _ in 0..9 {
            assert!(tracker.record_auction_entered().is_empty());
        }
        assert_eq!(
            ids(&tracker.record_auction_entered()),
            vec![AchievementId::AuctionMaster]
        );
        assert_eq!(tracker.unlocked_count(), 3);
    }

    #[test]
    fn statuses_report_progress_in_display_order() {
        let mut tracker = AchievementTracker::new();
        tracker.record_tournament_joined();
        tracker.record_tournament_joined();

        let statuses = tracker.statuses();
        assert_eq!(statuses.len(), ACHIEVEMENTS.len());
        assert_eq!(statuses[0].achievement.id, AchievementId::TournamentCreator);
        let social = statuses
            .iter()
            .find(|s| s.achievement.id == AchievementId::SocialButterfly)
            .unwrap();
        assert_eq!(social.progress, 2);
        assert!(!social.unlocked);
        assert!(statuses
            .iter()
            .any(|s| s.achievement.id == AchievementId::TeamPlayer && s.unlocked));
    }
}
