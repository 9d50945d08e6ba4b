// Auction controller: the single authority over one auction session.
//
// Validates and commits bids (local or simulated), applies the clock bonus,
// and resolves the auction when the countdown reaches zero.

use chrono::{DateTime, Local};
use thiserror::Error;
use tracing::{debug, info};

use super::clock::{ClockTick, CountdownClock};
use super::ledger::{AuctionStats, Bid, BidId, BidLedger};
use super::opponent::{AuctionView, OpponentStrategy};
use super::roster::{Participant, Roster};
use crate::catalog::Player;
use crate::config::AuctionConfig;

// ---------------------------------------------------------------------------
// Errors and outcomes
// ---------------------------------------------------------------------------

/// Why a bid was refused. None of these end the session.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum BidError {
    #[error("bid of {amount} is too low; minimum is {minimum}")]
    BidTooLow { amount: u64, minimum: u64 },

    #[error("bid of {amount} exceeds remaining budget of {remaining}")]
    InsufficientBudget { amount: u64, remaining: u64 },

    #[error("auction is no longer accepting bids")]
    AuctionNotLive,

    #[error("unknown participant `{0}`")]
    UnknownParticipant(String),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AuctionPhase {
    Live,
    Ended,
}

/// How an ended auction resolved.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AuctionResult {
    Sold {
        winner_id: String,
        winner_name: String,
        amount: u64,
        won_by_local: bool,
    },
    Unsold {
        base_price: u64,
    },
}

/// Details of an accepted bid.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BidReceipt {
    pub bid_id: BidId,
    pub participant_id: String,
    pub participant_name: String,
    pub amount: u64,
    pub by_local: bool,
    /// Clock value after the bonus was applied.
    pub time_remaining: u32,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TickOutcome {
    Running { remaining: u32 },
    /// This tick ended the auction.
    Ended(AuctionResult),
    /// The auction had already ended; nothing changed.
    Idle,
}

// ---------------------------------------------------------------------------
// AuctionController
// ---------------------------------------------------------------------------

#[derive(Debug, Clone)]
pub struct AuctionController {
    player: Player,
    roster: Roster,
    ledger: BidLedger,
    clock: CountdownClock,
    phase: AuctionPhase,
    current_price: u64,
    min_increment: u64,
    time_bonus_secs: u32,
}

impl AuctionController {
    /// Open a live auction for `player` with an empty ledger.
    pub fn new(player: Player, roster: Roster, config: &AuctionConfig) -> Self {
        info!(
            "Auction opened: {} (base {}), {} participants",
            player.name,
            player.base_price,
            roster.participants().len()
        );
        AuctionController {
            current_price: player.base_price,
            player,
            roster,
            ledger: BidLedger::new(config.history_limit),
            clock: CountdownClock::new(config.starting_window_secs, config.max_window_secs),
            phase: AuctionPhase::Live,
            min_increment: config.min_increment,
            time_bonus_secs: config.time_bonus_secs,
        }
    }

    /// Validate and commit a bid.
    ///
    /// Checks run in order: liveness, known participant, minimum raise,
    /// budget. A rejected bid leaves every piece of state untouched.
    pub fn submit_bid(&mut self, participant_id: &str, amount: u64) -> Result<BidReceipt, BidError> {
        self.submit_bid_at(participant_id, amount, Local::now())
    }

    pub fn submit_bid_at(
        &mut self,
        participant_id: &str,
        amount: u64,
        placed_at: DateTime<Local>,
    ) -> Result<BidReceipt, BidError> {
        if self.phase != AuctionPhase::Live {
            return Err(BidError::AuctionNotLive);
        }

        let participant = self
            .roster
            .get(participant_id)
            .ok_or_else(|| BidError::UnknownParticipant(participant_id.to_string()))?;

        let minimum = self.minimum_bid();
        if amount < minimum {
            debug!(
                "Rejected bid from {}: {} below minimum {}",
                participant.name, amount, minimum
            );
            return Err(BidError::BidTooLow { amount, minimum });
        }
        if amount > participant.remaining_budget {
            debug!(
                "Rejected bid from {}: {} over budget {}",
                participant.name, amount, participant.remaining_budget
            );
            return Err(BidError::InsufficientBudget {
                amount,
                remaining: participant.remaining_budget,
            });
        }

        let participant_name = participant.name.clone();
        let by_local = participant.is_local;

        let bid_id = self
            .ledger
            .append(participant_id, &participant_name, amount, placed_at)
            .id;
        self.roster.commit(participant_id, amount);
        self.current_price = amount;
        let time_remaining = self.clock.extend(self.time_bonus_secs);

        info!(
            "Bid accepted: {} bid {} on {} ({}s left)",
            participant_name, amount, self.player.name, time_remaining
        );

        Ok(BidReceipt {
            bid_id,
            participant_id: participant_id.to_string(),
            participant_name,
            amount,
            by_local,
            time_remaining,
        })
    }

    /// Local participant bids the current price plus `increment`.
    pub fn quick_bid(&mut self, increment: u64) -> Result<BidReceipt, BidError> {
        let local_id = self.roster.local().id.clone();
        let amount = self.current_price.saturating_add(increment);
        self.submit_bid(&local_id, amount)
    }

    /// Advance the countdown by one second.
    ///
    /// The only operation that ends an auction. Idempotent once ended.
    pub fn tick(&mut self) -> TickOutcome {
        if self.phase == AuctionPhase::Ended {
            return TickOutcome::Idle;
        }
        match self.clock.tick() {
            ClockTick::Running(remaining) => TickOutcome::Running { remaining },
            ClockTick::Expired | ClockTick::AlreadyExpired => {
                self.phase = AuctionPhase::Ended;
                let result = self.build_result();
                match &result {
                    AuctionResult::Sold {
                        winner_name,
                        amount,
                        ..
                    } => info!(
                        "Auction ended: {} sold to {} for {}",
                        self.player.name, winner_name, amount
                    ),
                    AuctionResult::Unsold { base_price } => info!(
                        "Auction ended: {} unsold at {}",
                        self.player.name, base_price
                    ),
                }
                TickOutcome::Ended(result)
            }
        }
    }

    /// Give the rival bidders one chance to raise.
    ///
    /// Returns `None` when the auction has ended, the strategy passes, or
    /// the proposal is unusable (local, offline or unknown bidder, or over
    /// the bidder's budget). Otherwise returns the `submit_bid` result.
    pub fn generate_competing_bid(
        &mut self,
        strategy: &mut dyn OpponentStrategy,
    ) -> Option<Result<BidReceipt, BidError>> {
        if self.phase != AuctionPhase::Live {
            return None;
        }

        let proposal = strategy.propose(&self.view())?;

        let bidder = self.roster.get(&proposal.participant_id)?;
        if bidder.is_local || !bidder.online {
            debug!("Ignoring proposal for non-rival {}", bidder.name);
            return None;
        }
        if proposal.amount > bidder.remaining_budget {
            debug!(
                "{} cannot afford {} (budget {})",
                bidder.name, proposal.amount, bidder.remaining_budget
            );
            return None;
        }

        Some(self.submit_bid(&proposal.participant_id, proposal.amount))
    }

    fn view(&self) -> AuctionView<'_> {
        AuctionView {
            current_price: self.current_price,
            min_increment: self.min_increment,
            time_remaining: self.clock.remaining(),
            leader_id: self.ledger.leader().map(|b| b.participant_id.as_str()),
            roster: &self.roster,
        }
    }

    fn build_result(&self) -> AuctionResult {
        match self.ledger.leader() {
            Some(bid) => AuctionResult::Sold {
                winner_id: bid.participant_id.clone(),
                winner_name: bid.participant_name.clone(),
                amount: bid.amount,
                won_by_local: bid.participant_id == self.roster.local().id,
            },
            None => AuctionResult::Unsold {
                base_price: self.player.base_price,
            },
        }
    }

    // --- Queries ---

    /// The final outcome, once the auction has ended.
    pub fn resolution(&self) -> Option<AuctionResult> {
        match self.phase {
            AuctionPhase::Live => None,
            AuctionPhase::Ended => Some(self.build_result()),
        }
    }

    pub fn phase(&self) -> AuctionPhase {
        self.phase
    }

    pub fn is_live(&self) -> bool {
        self.phase == AuctionPhase::Live
    }

    pub fn current_price(&self) -> u64 {
        self.current_price
    }

    pub fn min_increment(&self) -> u64 {
        self.min_increment
    }

    /// Smallest amount the next bid may be.
    pub fn minimum_bid(&self) -> u64 {
        self.current_price.saturating_add(self.min_increment)
    }

    pub fn time_remaining(&self) -> u32 {
        self.clock.remaining()
    }

    pub fn clock(&self) -> &CountdownClock {
        &self.clock
    }

    pub fn leader(&self) -> Option<&Bid> {
        self.ledger.leader()
    }

    pub fn ledger(&self) -> &BidLedger {
        &self.ledger
    }

    pub fn roster(&self) -> &Roster {
        &self.roster
    }

    pub fn local_participant(&self) -> &Participant {
        self.roster.local()
    }

    pub fn player(&self) -> &Player {
        &self.player
    }

    pub fn stats(&self) -> AuctionStats {
        self.ledger.stats(self.player.base_price)
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
