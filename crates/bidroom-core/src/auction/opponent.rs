// Competing-bid strategies: who else raises the price, and by how much.
//
// The controller asks a strategy for at most one proposal per generator
// run. Strategies only read the auction; the controller validates and
// commits whatever they propose.

use std::collections::VecDeque;

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use super::roster::Roster;
use crate::config::OpponentConfig;

/// Read-only snapshot handed to a strategy.
#[derive(Debug, Clone, Copy)]
pub struct AuctionView<'a> {
    pub current_price: u64,
    pub min_increment: u64,
    pub time_remaining: u32,
    pub leader_id: Option<&'a str>,
    pub roster: &'a Roster,
}

/// A bid a strategy wants placed on a rival's behalf.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BidProposal {
    pub participant_id: String,
    pub amount: u64,
}

impl BidProposal {
    pub fn new(participant_id: &str, amount: u64) -> Self {
        BidProposal {
            participant_id: participant_id.to_string(),
            amount,
        }
    }
}

/// Pluggable rival-bidder behaviour.
pub trait OpponentStrategy: Send {
    fn propose(&mut self, view: &AuctionView<'_>) -> Option<BidProposal>;
}

impl<F> OpponentStrategy for F
where
    F: FnMut(&AuctionView<'_>) -> Option<BidProposal> + Send,
{
    fn propose(&mut self, view: &AuctionView<'_>) -> Option<BidProposal> {
        self(view)
    }
}

// ---------------------------------------------------------------------------
// RandomOpponents
// ---------------------------------------------------------------------------

/// Rivals that bid at random.
///
/// Each run bids with probability `bid_probability`; the bidder is drawn
/// uniformly from the online rivals and raises the current price by one to
/// `max_raise_steps` minimum increments.
pub struct RandomOpponents {
    rng: StdRng,
    bid_probability: f64,
    max_raise_steps: u32,
}

impl RandomOpponents {
    /// Seeded from `config.seed` when set, otherwise from the OS.
    pub fn new(config: &OpponentConfig) -> Self {
        let rng = match config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_os_rng(),
        };
        Self::with_rng(rng, config)
    }

    pub fn with_seed(config: &OpponentConfig, seed: u64) -> Self {
        Self::with_rng(StdRng::seed_from_u64(seed), config)
    }

    fn with_rng(rng: StdRng, config: &OpponentConfig) -> Self {
        let bid_probability = if config.bid_probability.is_nan() {
            0.0
        } else {
            config.bid_probability.clamp(0.0, 1.0)
        };
        RandomOpponents {
            rng,
            bid_probability,
            max_raise_steps: config.max_raise_steps.max(1),
        }
    }
}

impl OpponentStrategy for RandomOpponents {
    fn propose(&mut self, view: &AuctionView<'_>) -> Option<BidProposal> {
        if !self.rng.random_bool(self.bid_probability) {
            return None;
        }

        let rivals = view.roster.online_opponents();
        if rivals.is_empty() {
            return None;
        }
        let bidder = rivals[self.rng.random_range(0..rivals.len())];

        let steps = u64::from(self.rng.random_range(1..=self.max_raise_steps));
        let amount = view
            .current_price
            .saturating_add(steps.saturating_mul(view.min_increment));

        Some(BidProposal::new(&bidder.id, amount))
    }
}

// ---------------------------------------------------------------------------
// ScriptedOpponents
// ---------------------------------------------------------------------------

/// Deterministic rivals replaying a fixed script, one entry per run.
///
/// `None` entries are runs where nobody bids. Once the script is exhausted
/// every run proposes nothing.
#[derive(Debug, Clone, Default)]
pub struct ScriptedOpponents {
    script: VecDeque<Option<BidProposal>>,
}

impl ScriptedOpponents {
    pub fn new(script: impl IntoIterator<Item = Option<BidProposal>>) -> Self {
        ScriptedOpponents {
            script: script.into_iter().collect(),
        }
    }

    pub fn remaining(&self) -> usize {
        self.script.len()
    }
}

impl OpponentStrategy for ScriptedOpponents {
    fn propose(&mut self, _view: &AuctionView<'_>) -> Option<BidProposal> {
        self.script.pop_front().flatten()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn view(roster: &Roster) -> AuctionView<'_> {
        AuctionView {
            current_price: 500_000,
            min_increment: 25_000,
            time_remaining: 120,
            leader_id: None,
            roster,
        }
    }

    fn always_bid() -> OpponentConfig {
        OpponentConfig {
            bid_probability: 1.0,
            ..OpponentConfig::default()
        }
    }

    #[test]
    fn never_bids_with_zero_probability() {
        let roster = Roster::sample();
        let config = OpponentConfig {
            bid_probability: 0.0,
            ..OpponentConfig::default()
        };
        let mut rivals = RandomOpponents::with_seed(&config, 1);
        for _ in 0..100 {
            assert!(rivals.propose(&view(&roster)).is_none());
        }
    }

    #[test]
    fn random_proposals_stay_within_rules() {
        let roster = Roster::sample();
        let mut rivals = RandomOpponents::with_seed(&always_bid(), 42);
        for _ in 0..200 {
            let proposal = rivals.propose(&view(&roster)).expect("probability is 1.0");
            let bidder = roster.get(&proposal.participant_id).unwrap();
            assert!(bidder.online);
            assert!(!bidder.is_local);
            assert!([525_000, 550_000, 575_000].contains(&proposal.amount));
        }
    }

    #[test]
    fn every_online_rival_eventually_bids() {
        let roster = Roster::sample();
        let mut rivals = RandomOpponents::with_seed(&always_bid(), 7);
        let mut seen = std::collections::HashSet::new();
        for _ in 0..300 {
            if let Some(p) = rivals.propose(&view(&roster)) {
                seen.insert(p.participant_id);
            }
        }
        let expected: std::collections::HashSet<String> =
            ["1", "3", "5"].iter().map(|s| s.to_string()).collect();
        assert_eq!(seen, expected);
    }

    #[test]
    fn no_online_rivals_means_no_bid() {
        let roster = Roster::new(vec![
            crate::auction::Participant::local("me", "Me", 1_000_000),
            crate::auction::Participant::rival("r", "Rival", 1_000_000, false),
        ])
        .unwrap();
        let mut rivals = RandomOpponents::with_seed(&always_bid(), 3);
        assert!(rivals.propose(&view(&roster)).is_none());
    }

    #[test]
    fn same_seed_same_sequence() {
        let roster = Roster::sample();
        let mut a = RandomOpponents::with_seed(&OpponentConfig::default(), 99);
        let mut b = RandomOpponents::with_seed(&OpponentConfig::default(), 99);
        for _ in 0..50 {
            assert_eq!(a.propose(&view(&roster)), b.propose(&view(&roster)));
        }
    }

    #[test]
    fn scripted_replays_in_order() {
        let roster = Roster::sample();
        let mut rivals = ScriptedOpponents::new(vec![
            Some(BidProposal::new("1", 525_000)),
            None,
            Some(BidProposal::new("3", 600_000)),
        ]);
        assert_eq!(rivals.propose(&view(&roster)), Some(BidProposal::new("1", 525_000)));
        assert_eq!(rivals.propose(&view(&roster)), None);
        assert_eq!(rivals.propose(&view(&roster)), Some(BidProposal::new("3", 600_000)));
        assert_eq!(rivals.remaining(), 0);
        assert_eq!(rivals.propose(&view(&roster)), None);
    }

    #[test]
    fn closures_are_strategies() {
        let roster = Roster::sample();
        let mut outbid_by_one_step =
            |v: &AuctionView<'_>| Some(BidProposal::new("5", v.current_price + v.min_increment));
        let proposal = outbid_by_one_step.propose(&view(&roster)).unwrap();
        assert_eq!(proposal.amount, 525_000);
    }
}
