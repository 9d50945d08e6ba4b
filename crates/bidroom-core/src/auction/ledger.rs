// Bid ledger: ordered record of accepted bids for the current auction.
//
// Newest first. The head is always the single leading bid; older entries
// beyond the history window are dropped for display.

use std::collections::VecDeque;

use chrono::{DateTime, Local};
use serde::{Deserialize, Serialize};

/// Monotonically increasing bid identifier, unique within a ledger.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct BidId(pub u64);

/// An accepted bid. Only the `leading` flag changes after creation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Bid {
    pub id: BidId,
    pub participant_id: String,
    /// Display name at the time the bid was placed.
    pub participant_name: String,
    pub amount: u64,
    pub placed_at: DateTime<Local>,
    pub leading: bool,
}

/// Summary figures for the auction stats panel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct AuctionStats {
    /// Every accepted bid, including ones scrolled out of the history window.
    pub total_bids: usize,
    pub starting_price: u64,
    pub price_increase: u64,
    /// Mean raise per accepted bid; 0 before the first bid.
    pub average_increment: u64,
}

#[derive(Debug, Clone)]
pub struct BidLedger {
    bids: VecDeque<Bid>,
    history_limit: usize,
    next_id: u64,
    total_bids: usize,
}

impl BidLedger {
    /// Create an empty ledger keeping at most `history_limit` bids (min 1).
    pub fn new(history_limit: usize) -> Self {
        let history_limit = history_limit.max(1);
        BidLedger {
            bids: VecDeque::with_capacity(history_limit),
            history_limit,
            next_id: 1,
            total_bids: 0,
        }
    }

    /// Append a new leading bid and demote every earlier one.
    pub fn append(
        &mut self,
        participant_id: &str,
        participant_name: &str,
        amount: u64,
        placed_at: DateTime<Local>,
    ) -> &Bid {
        for bid in self.bids.iter_mut() {
            bid.leading = false;
        }

        let id = BidId(self.next_id);
        self.next_id += 1;
        self.total_bids += 1;

        self.bids.push_front(Bid {
            id,
            participant_id: participant_id.to_string(),
            participant_name: participant_name.to_string(),
            amount,
            placed_at,
            leading: true,
        });
        self.bids.truncate(self.history_limit);

        &self.bids[0]
    }

    /// The leading bid, if any bid has been accepted.
    pub fn leader(&self) -> Option<&Bid> {
        self.bids.front()
    }

    /// Visible history, newest first.
    pub fn bids(&self) -> impl Iterator<Item = &Bid> {
        self.bids.iter()
    }

    pub fn len(&self) -> usize {
        self.bids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bids.is_empty()
    }

    pub fn total_bids(&self) -> usize {
        self.total_bids
    }

    pub fn history_limit(&self) -> usize {
        self.history_limit
    }

    pub fn stats(&self, base_price: u64) -> AuctionStats {
        let price_increase = self
            .leader()
            .map(|b| b.amount.saturating_sub(base_price))
            .unwrap_or(0);
        let average_increment = if self.total_bids == 0 {
            0
        } else {
            price_increase / self.total_bids as u64
        };
        AuctionStats {
            total_bids: self.total_bids,
            starting_price: base_price,
            price_increase,
            average_increment,
        }
    }
}
