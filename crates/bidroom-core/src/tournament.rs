// Tournament directory: the leagues an auction belongs to, created locally
// and joined by invite code. In-memory only.

use chrono::{Duration, NaiveDate, NaiveDateTime};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::info;

const INVITE_CODE_LEN: usize = 6;
const INVITE_ALPHABET: &[u8] = b"ABCDEFGHIJKLMNOPQRSTUVWXYZ0123456789";

/// Admin name recorded on tournaments created from this seat.
pub const LOCAL_ADMIN: &str = "Current User";

// ---------------------------------------------------------------------------
// Types
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TournamentStatus {
    Setup,
    Draft,
    AuctionScheduled,
    Active,
    Completed,
}

impl TournamentStatus {
    pub const ALL: [TournamentStatus; 5] = [
        TournamentStatus::Setup,
        TournamentStatus::Draft,
        TournamentStatus::AuctionScheduled,
        TournamentStatus::Active,
        TournamentStatus::Completed,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            TournamentStatus::Setup => "Setup",
            TournamentStatus::Draft => "Draft",
            TournamentStatus::AuctionScheduled => "Auction Soon",
            TournamentStatus::Active => "Active",
            TournamentStatus::Completed => "Completed",
        }
    }

    /// New members may still join.
    pub fn is_open(&self) -> bool {
        matches!(
            self,
            TournamentStatus::Setup | TournamentStatus::Draft | TournamentStatus::AuctionScheduled
        )
    }
}

/// Required players per role in each squad.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SquadComposition {
    pub batters: u8,
    pub bowlers: u8,
    pub all_rounders: u8,
    pub wicket_keepers: u8,
}

impl SquadComposition {
    pub fn total(&self) -> u32 {
        u32::from(self.batters)
            + u32::from(self.bowlers)
            + u32::from(self.all_rounders)
            + u32::from(self.wicket_keepers)
    }
}

impl Default for SquadComposition {
    fn default() -> Self {
        SquadComposition {
            batters: 4,
            bowlers: 4,
            all_rounders: 2,
            wicket_keepers: 1,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Tournament {
    pub id: String,
    pub name: String,
    pub real_life_tournament: String,
    pub admin: String,
    pub participants: Vec<String>,
    pub max_participants: u32,
    pub status: TournamentStatus,
    pub budget: u64,
    pub squad: SquadComposition,
    pub auction_date: NaiveDateTime,
    pub auction_duration_hours: f64,
    pub invite_code: String,
    pub created_at: NaiveDateTime,
}

impl Tournament {
    pub fn is_full(&self) -> bool {
        self.participants.len() >= self.max_participants as usize
    }

    pub fn open_slots(&self) -> u32 {
        self.max_participants
            .saturating_sub(self.participants.len() as u32)
    }
}

/// User-supplied fields for a new tournament.
#[derive(Debug, Clone, PartialEq)]
pub struct TournamentDraft {
    pub name: String,
    pub real_life_tournament: String,
    pub max_participants: u32,
    pub budget: u64,
    pub squad: SquadComposition,
    pub auction_date: NaiveDateTime,
    pub auction_duration_hours: f64,
}

impl TournamentDraft {
    /// Blank form with the create dialog's defaults.
    pub fn new(auction_date: NaiveDateTime) -> Self {
        TournamentDraft {
            name: String::new(),
            real_life_tournament: String::new(),
            max_participants: 8,
            budget: 100_000,
            squad: SquadComposition::default(),
            auction_date,
            auction_duration_hours: 2.0,
        }
    }
}

/// Real-world competitions a tournament can follow.
pub const REAL_LIFE_TOURNAMENTS: [&str; 8] = [
    "IPL 2024",
    "BBL 2024",
    "CPL 2024",
    "PSL 2024",
    "England vs India Test Series",
    "Australia vs Pakistan ODI Series",
    "T20 World Cup 2024",
    "Champions Trophy 2025",
];

#[derive(Debug, Error, PartialEq, Eq)]
pub enum TournamentError {
    #[error("missing required field `{0}`")]
    MissingField(&'static str),

    #[error("a tournament needs at least 2 participants, got {0}")]
    TooFewParticipants(u32),

    #[error("no tournament with invite code `{0}`")]
    InviteNotFound(String),

    #[error("tournament `{0}` is full")]
    TournamentFull(String),

    #[error("`{user}` already joined `{tournament}`")]
    AlreadyJoined { user: String, tournament: String },

    #[error("tournament `{0}` is no longer accepting members")]
    Closed(String),
}

// ---------------------------------------------------------------------------
// TournamentDirectory
// ---------------------------------------------------------------------------

pub struct TournamentDirectory {
    tournaments: Vec<Tournament>,
    next_id: u64,
    rng: StdRng,
}

impl TournamentDirectory {
    pub fn new() -> Self {
        Self::with_rng(StdRng::from_os_rng())
    }

    /// Reproducible invite codes.
    pub fn with_seed(seed: u64) -> Self {
        Self::with_rng(StdRng::seed_from_u64(seed))
    }

    fn with_rng(rng: StdRng) -> Self {
        TournamentDirectory {
            tournaments: Vec::new(),
            next_id: 1,
            rng,
        }
    }

    /// Directory pre-filled with the three showcase tournaments.
    pub fn sample() -> Self {
        let mut dir = Self::new();
        let samples = [
            (
                "IPL 2024 Championship",
                "IPL 2024",
                "John Doe",
                10,
                TournamentStatus::AuctionScheduled,
                100_000,
                SquadComposition { batters: 3, bowlers: 3, all_rounders: 1, wicket_keepers: 1 },
                datetime(2024, 3, 15, 18, 0),
                2.0,
                datetime(2024, 3, 1, 0, 0),
            ),
            (
                "Australia vs India Test Series",
                "Border-Gavaskar Trophy 2024",
                "Sarah Smith",
                8,
                TournamentStatus::Draft,
                80_000,
                SquadComposition { batters: 4, bowlers: 4, all_rounders: 1, wicket_keepers: 1 },
                datetime(2024, 3, 20, 19, 30),
                1.5,
                datetime(2024, 3, 2, 0, 0),
            ),
            (
                "Big Bash League Pro",
                "BBL 2024",
                "Mike Johnson",
                12,
                TournamentStatus::Active,
                120_000,
                SquadComposition { batters: 3, bowlers: 3, all_rounders: 2, wicket_keepers: 1 },
                datetime(2024, 3, 10, 17, 0),
                2.0,
                datetime(2024, 2, 28, 0, 0),
            ),
        ];
        for (name, real, admin, max, status, budget, squad, auction_date, hours, created_at) in
            samples
        {
            let id = dir.allocate_id();
            let invite_code = dir.unique_invite_code();
            dir.tournaments.push(Tournament {
                id,
                name: name.to_string(),
                real_life_tournament: real.to_string(),
                admin: admin.to_string(),
                participants: Vec::new(),
                max_participants: max,
                status,
                budget,
                squad,
                auction_date,
                auction_duration_hours: hours,
                invite_code,
                created_at,
            });
        }
        dir
    }

    /// Create a tournament from the full form. Starts in `Draft`.
    pub fn create(
        &mut self,
        draft: TournamentDraft,
        now: NaiveDateTime,
    ) -> Result<&Tournament, TournamentError> {
        let name = draft.name.trim();
        if name.is_empty() {
            return Err(TournamentError::MissingField("name"));
        }
        let real = draft.real_life_tournament.trim();
        if real.is_empty() {
            return Err(TournamentError::MissingField("real_life_tournament"));
        }
        if draft.max_participants < 2 {
            return Err(TournamentError::TooFewParticipants(draft.max_participants));
        }

        let tournament = Tournament {
            id: self.allocate_id(),
            name: name.to_string(),
            real_life_tournament: real.to_string(),
            admin: LOCAL_ADMIN.to_string(),
            participants: Vec::new(),
            max_participants: draft.max_participants,
            status: TournamentStatus::Draft,
            budget: draft.budget,
            squad: draft.squad,
            auction_date: draft.auction_date,
            auction_duration_hours: draft.auction_duration_hours,
            invite_code: self.unique_invite_code(),
            created_at: now,
        };
        Ok(self.insert(tournament))
    }

    /// One-step test tournament: five seats, auction in ten minutes.
    pub fn quick_create(&mut self, name: &str, now: NaiveDateTime) -> &Tournament {
        let name = match name.trim() {
            "" => "Quick Test Tournament",
            n => n,
        };
        let tournament = Tournament {
            id: self.allocate_id(),
            name: name.to_string(),
            real_life_tournament: "IPL 2024".to_string(),
            admin: LOCAL_ADMIN.to_string(),
            participants: Vec::new(),
            max_participants: 5,
            status: TournamentStatus::Setup,
            budget: 100_000,
            squad: SquadComposition {
                batters: 3,
                bowlers: 3,
                all_rounders: 2,
                wicket_keepers: 1,
            },
            auction_date: now + Duration::minutes(10),
            auction_duration_hours: 0.5,
            invite_code: self.unique_invite_code(),
            created_at: now,
        };
        self.insert(tournament)
    }

    /// Add `user` to the tournament holding `code` (trimmed, any case).
    pub fn join(&mut self, code: &str, user: &str) -> Result<&Tournament, TournamentError> {
        let code = code.trim().to_ascii_uppercase();
        let tournament = self
            .tournaments
            .iter_mut()
            .find(|t| t.invite_code == code)
            .ok_or_else(|| TournamentError::InviteNotFound(code.clone()))?;

        if !tournament.status.is_open() {
            return Err(TournamentError::Closed(tournament.name.clone()));
        }
        if tournament.participants.iter().any(|p| p == user) {
            return Err(TournamentError::AlreadyJoined {
                user: user.to_string(),
                tournament: tournament.name.clone(),
            });
        }
        if tournament.is_full() {
            return Err(TournamentError::TournamentFull(tournament.name.clone()));
        }

        tournament.participants.push(user.to_string());
        info!("{} joined tournament {}", user, tournament.name);
        Ok(tournament)
    }

    pub fn tournaments(&self) -> &[Tournament] {
        &self.tournaments
    }

    pub fn len(&self) -> usize {
        self.tournaments.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tournaments.is_empty()
    }

    fn insert(&mut self, tournament: Tournament) -> &Tournament {
        info!(
            "Created tournament {} ({}), invite code {}",
            tournament.name, tournament.id, tournament.invite_code
        );
        self.tournaments.push(tournament);
        let idx = self.tournaments.len() - 1;
        &self.tournaments[idx]
    }

    fn allocate_id(&mut self) -> String {
        let id = self.next_id.to_string();
        self.next_id += 1;
        id
    }

    fn unique_invite_code(&mut self) -> String {
        loop {
            let code: String = (0..INVITE_CODE_LEN)
                .map(|_| {
                    let idx = self.rng.random_range(0..INVITE_ALPHABET.len());
                    char::from(INVITE_ALPHABET[idx])
                })
                .collect();
            if !self.tournaments.iter().any(|t| t.invite_code == code) {
                return code;
            }
        }
    }
}

impl Default for TournamentDirectory {
    fn default() -> Self {
        Self::new()
    }
}

// ---------------------------------------------------------------------------
// Filtering
// ---------------------------------------------------------------------------

/// Case-insensitive match on name, admin or real-life tournament,
/// optionally restricted to one status. Keeps the input order.
pub fn search_tournaments<'a>(
    tournaments: &'a [Tournament],
    term: &str,
    status: Option<TournamentStatus>,
) -> Vec<&'a Tournament> {
    let term = term.trim().to_lowercase();
    tournaments
        .iter()
        .filter(|t| status.map_or(true, |s| t.status == s))
        .filter(|t| {
            term.is_empty()
                || t.name.to_lowercase().contains(&term)
                || t.admin.to_lowercase().contains(&term)
                || t.real_life_tournament.to_lowercase().contains(&term)
        })
        .collect()
}

pub fn count_by_status(tournaments: &[Tournament], status: TournamentStatus) -> usize {
    tournaments.iter().filter(|t| t.status == status).count()
}

fn datetime(year: i32, month: u32, day: u32, hour: u32, minute: u32) -> NaiveDateTime {
    NaiveDate::from_ymd_opt(year, month, day)
        .and_then(|d| d.and_hms_opt(hour, minute, 0))
        .unwrap_or_default()
}
