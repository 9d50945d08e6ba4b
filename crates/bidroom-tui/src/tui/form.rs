// Create-tournament form state, edited in place while
// `InputMode::CreateTournament` is active.

use bidroom_core::tournament::REAL_LIFE_TOURNAMENTS;

use crate::protocol::TournamentRequest;

/// Seat counts offered by the form.
pub const SEAT_CHOICES: [u32; 6] = [4, 5, 6, 8, 10, 12];

const MAX_NAME_CHARS: usize = 40;
const MAX_BUDGET_DIGITS: usize = 9;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FormField {
    #[default]
    Name,
    Following,
    Seats,
    Budget,
}

impl FormField {
    const ORDER: [FormField; 4] = [
        FormField::Name,
        FormField::Following,
        FormField::Seats,
        FormField::Budget,
    ];

    fn position(self) -> usize {
        Self::ORDER.iter().position(|f| *f == self).unwrap_or(0)
    }

    pub fn next(self) -> Self {
        Self::ORDER[(self.position() + 1) % Self::ORDER.len()]
    }

    pub fn prev(self) -> Self {
        Self::ORDER[(self.position() + Self::ORDER.len() - 1) % Self::ORDER.len()]
    }

    pub fn label(self) -> &'static str {
        match self {
            FormField::Name => "Name",
            FormField::Following => "Following",
            FormField::Seats => "Seats",
            FormField::Budget => "Budget",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TournamentForm {
    pub name: String,
    /// Index into `REAL_LIFE_TOURNAMENTS`.
    pub following: usize,
    /// Index into `SEAT_CHOICES`.
    pub seats: usize,
    pub budget: String,
    pub focus: FormField,
}

impl Default for TournamentForm {
    fn default() -> Self {
        TournamentForm {
            name: String::new(),
            following: 0,
            seats: 3,
            budget: "100000".to_string(),
            focus: FormField::Name,
        }
    }
}

impl TournamentForm {
    pub fn following_name(&self) -> &'static str {
        REAL_LIFE_TOURNAMENTS[self.following % REAL_LIFE_TOURNAMENTS.len()]
    }

    pub fn seat_count(&self) -> u32 {
        SEAT_CHOICES[self.seats % SEAT_CHOICES.len()]
    }

    /// Step the focused choice field left (-1) or right (+1), wrapping.
    pub fn cycle(&mut self, forward: bool) {
        let step = |idx: usize, len: usize| {
            if forward {
                (idx + 1) % len
            } else {
                (idx + len - 1) % len
            }
        };
        match self.focus {
            FormField::Following => {
                self.following = step(self.following, REAL_LIFE_TOURNAMENTS.len());
            }
            FormField::Seats => self.seats = step(self.seats, SEAT_CHOICES.len()),
            FormField::Name | FormField::Budget => {}
        }
    }

    /// Type into the focused text field. Budget takes digits only.
    pub fn push_char(&mut self, c: char) {
        match self.focus {
            FormField::Name if self.name.chars().count() < MAX_NAME_CHARS => self.name.push(c),
            FormField::Budget if c.is_ascii_digit() && self.budget.len() < MAX_BUDGET_DIGITS => {
                self.budget.push(c)
            }
            _ => {}
        }
    }

    pub fn pop_char(&mut self) {
        match self.focus {
            FormField::Name => {
                self.name.pop();
            }
            FormField::Budget => {
                self.budget.pop();
            }
            FormField::Following | FormField::Seats => {}
        }
    }

    pub fn to_request(&self) -> TournamentRequest {
        TournamentRequest {
            name: self.name.trim().to_string(),
            real_life_tournament: self.following_name().to_string(),
            max_participants: self.seat_count(),
            budget: self.budget.parse().unwrap_or(0),
        }
    }
}
