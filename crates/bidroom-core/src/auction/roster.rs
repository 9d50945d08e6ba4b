// Participant roster: the bidders seated in one auction room.

use std::collections::HashSet;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// A bidder in the room. Exactly one participant per roster is local.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Participant {
    pub id: String,
    pub name: String,
    pub online: bool,
    /// Budget still available. Only ever decreases.
    pub remaining_budget: u64,
    /// Mirror of everything already taken out of the budget.
    pub total_spent: u64,
    /// Amount of this participant's latest committed bid in the session.
    pub last_bid: Option<u64>,
    /// Whether this participant is the person at the keyboard.
    pub is_local: bool,
}

impl Participant {
    pub fn local(id: &str, name: &str, remaining_budget: u64) -> Self {
        Participant {
            id: id.to_string(),
            name: name.to_string(),
            online: true,
            remaining_budget,
            total_spent: 0,
            last_bid: None,
            is_local: true,
        }
    }

    pub fn rival(id: &str, name: &str, remaining_budget: u64, online: bool) -> Self {
        Participant {
            id: id.to_string(),
            name: name.to_string(),
            online,
            remaining_budget,
            total_spent: 0,
            last_bid: None,
            is_local: false,
        }
    }

    /// Set the spend carried in from earlier auctions.
    pub fn with_spent(mut self, total_spent: u64) -> Self {
        self.total_spent = total_spent;
        self
    }
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum RosterError {
    #[error("roster must contain exactly one local participant, found {0}")]
    LocalCount(usize),

    #[error("duplicate participant id `{0}`")]
    DuplicateId(String),
}

/// Fixed list of bidders for one session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Roster {
    participants: Vec<Participant>,
    local_idx: usize,
}

impl Roster {
    pub fn new(participants: Vec<Participant>) -> Result<Self, RosterError> {
        let mut seen = HashSet::new();
        for p in &participants {
            if !seen.insert(p.id.as_str()) {
                return Err(RosterError::DuplicateId(p.id.clone()));
            }
        }

        let locals: Vec<usize> = participants
            .iter()
            .enumerate()
            .filter(|(_, p)| p.is_local)
            .map(|(i, _)| i)
            .collect();
        match locals.as_slice() {
            [idx] => Ok(Roster {
                local_idx: *idx,
                participants,
            }),
            other => Err(RosterError::LocalCount(other.len())),
        }
    }

    /// The five-seat sample room every auction opens with.
    pub fn sample() -> Self {
        Roster {
            participants: vec![
                Participant::rival("1", "CricketKing", 850_000, true).with_spent(150_000),
                Participant::local("2", "You", 920_000).with_spent(80_000),
                Participant::rival("3", "SportsFan123", 670_000, true).with_spent(330_000),
                Participant::rival("4", "IPLExpert", 780_000, false).with_spent(220_000),
                Participant::rival("5", "CricketPro", 890_000, true).with_spent(110_000),
            ],
            local_idx: 1,
        }
    }

    pub fn get(&self, id: &str) -> Option<&Participant> {
        self.participants.iter().find(|p| p.id == id)
    }

    pub fn local(&self) -> &Participant {
        &self.participants[self.local_idx]
    }

    pub fn participants(&self) -> &[Participant] {
        &self.participants
    }

    /// Online participants other than the local user, in seat order.
    pub fn online_opponents(&self) -> Vec<&Participant> {
        self.participants
            .iter()
            .filter(|p| p.online && !p.is_local)
            .collect()
    }

    pub fn online_count(&self) -> usize {
        self.participants.iter().filter(|p| p.online).count()
    }

    /// Commit a bid against a participant's budget.
    ///
    /// The latest bid sets the participant's spend on this player: only the
    /// difference over their previous committed bid leaves the budget.
    pub(crate) fn commit(&mut self, id: &str, amount: u64) -> Option<&Participant> {
        let participant = self.participants.iter_mut().find(|p| p.id == id)?;
        let delta = amount.saturating_sub(participant.last_bid.unwrap_or(0));
        participant.remaining_budget = participant.remaining_budget.saturating_sub(delta);
        participant.total_spent = participant.total_spent.saturating_add(delta);
        participant.last_bid = Some(amount);
        Some(participant)
    }
}
