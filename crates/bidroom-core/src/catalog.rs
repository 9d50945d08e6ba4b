// Player catalog: the static pool of auctionable cricketers.
//
// The sample roster ships as an embedded CSV (one row per player, career
// stats packed into a `key=value;key=value` column) so every auction room
// is seeded from identical data.

use std::collections::{BTreeMap, HashSet};
use std::fmt;
use std::io::Read;

use serde::{Deserialize, Serialize};
use thiserror::Error;

const BUILTIN_PLAYERS_CSV: &str = include_str!("../data/players.csv");

// ---------------------------------------------------------------------------
// Error types
// ---------------------------------------------------------------------------

#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("row {row}: unknown role `{role}`")]
    UnknownRole { row: usize, role: String },

    #[error("row {row}: rating {rating} is outside 0..=100")]
    RatingOutOfRange { row: usize, rating: u8 },

    #[error("row {row}: base price must be positive")]
    ZeroBasePrice { row: usize },

    #[error("row {row}: malformed stat entry `{entry}`")]
    MalformedStat { row: usize, entry: String },

    #[error("duplicate player id `{0}`")]
    DuplicateId(String),
}

// ---------------------------------------------------------------------------
// PlayerRole
// ---------------------------------------------------------------------------

/// Playing role of a cricketer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PlayerRole {
    Batter,
    Bowler,
    AllRounder,
    WicketKeeper,
}

impl PlayerRole {
    /// Parse a role string.
    ///
    /// Accepts the spellings found in sample data and user input:
    /// "Batsman"/"Batter", "Bowler", "All Rounder"/"All-Rounder"/"AR",
    /// "Wicket Keeper"/"Wicket-Keeper"/"WK".
    pub fn from_str_role(s: &str) -> Option<Self> {
        let normalized: String = s
            .chars()
            .filter(|c| c.is_ascii_alphanumeric())
            .collect::<String>()
            .to_ascii_lowercase();
        match normalized.as_str() {
            "batsman" | "batter" | "bat" => Some(PlayerRole::Batter),
            "bowler" | "bowl" => Some(PlayerRole::Bowler),
            "allrounder" | "ar" => Some(PlayerRole::AllRounder),
            "wicketkeeper" | "keeper" | "wk" => Some(PlayerRole::WicketKeeper),
            _ => None,
        }
    }

    /// Display string for this role.
    pub fn display_str(&self) -> &'static str {
        match self {
            PlayerRole::Batter => "Batter",
            PlayerRole::Bowler => "Bowler",
            PlayerRole::AllRounder => "All-Rounder",
            PlayerRole::WicketKeeper => "Wicket-Keeper",
        }
    }
}

impl fmt::Display for PlayerRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.display_str())
    }
}

// ---------------------------------------------------------------------------
// Player
// ---------------------------------------------------------------------------

/// An auctionable player. Immutable once loaded.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Player {
    pub id: String,
    pub name: String,
    pub role: PlayerRole,
    /// Skill rating, 0..=100.
    pub rating: u8,
    /// Opening price of the auction.
    pub base_price: u64,
    /// Career statistics keyed by stat name (e.g. "runs", "economy").
    pub stats: BTreeMap<String, f64>,
}

impl Player {
    /// Initials of the display name ("Virat Kohli" -> "VK").
    pub fn initials(&self) -> String {
        self.name
            .split_whitespace()
            .filter_map(|word| word.chars().next())
            .flat_map(|c| c.to_uppercase())
            .collect()
    }
}

/// CSV row as stored on disk.
#[derive(Debug, Deserialize)]
struct RawPlayerRow {
    id: String,
    name: String,
    role: String,
    rating: u8,
    base_price: u64,
    #[serde(default)]
    stats: String,
}

fn parse_stats(row: usize, raw: &str) -> Result<BTreeMap<String, f64>, CatalogError> {
    let mut stats = BTreeMap::new();
    for entry in raw.split(';').map(str::trim).filter(|e| !e.is_empty()) {
        let malformed = || CatalogError::MalformedStat {
            row,
            entry: entry.to_string(),
        };
        let (key, value) = entry.split_once('=').ok_or_else(malformed)?;
        let key = key.trim();
        if key.is_empty() {
            return Err(malformed());
        }
        let value: f64 = value.trim().parse().map_err(|_| malformed())?;
        stats.insert(key.to_string(), value);
    }
    Ok(stats)
}

// ---------------------------------------------------------------------------
// Catalog
// ---------------------------------------------------------------------------

/// Read-only lookup of auctionable players, in catalog order.
#[derive(Debug, Clone, PartialEq)]
pub struct Catalog {
    players: Vec<Player>,
}

impl Catalog {
    /// The bundled 20-player sample catalog.
    pub fn builtin() -> Result<Self, CatalogError> {
        Self::from_reader(BUILTIN_PLAYERS_CSV.as_bytes())
    }

    /// Parse a catalog CSV (`id,name,role,rating,base_price,stats`).
    pub fn from_reader<R: Read>(reader: R) -> Result<Self, CatalogError> {
        let mut csv_reader = csv::ReaderBuilder::new()
            .trim(csv::Trim::All)
            .from_reader(reader);

        let mut players = Vec::new();
        let mut seen = HashSet::new();

        for (idx, result) in csv_reader.deserialize::<RawPlayerRow>().enumerate() {
            let row = idx + 1;
            let raw = result?;

            let role = PlayerRole::from_str_role(&raw.role).ok_or_else(|| {
                CatalogError::UnknownRole {
                    row,
                    role: raw.role.clone(),
                }
            })?;
            if raw.rating > 100 {
                return Err(CatalogError::RatingOutOfRange {
                    row,
                    rating: raw.rating,
                });
            }
            if raw.base_price == 0 {
                return Err(CatalogError::ZeroBasePrice { row });
            }
            if !seen.insert(raw.id.clone()) {
                return Err(CatalogError::DuplicateId(raw.id));
            }

            players.push(Player {
                stats: parse_stats(row, &raw.stats)?,
                id: raw.id,
                name: raw.name,
                role,
                rating: raw.rating,
                base_price: raw.base_price,
            });
        }

        Ok(Catalog { players })
    }

    /// Build a catalog from already-constructed players (tests, demos).
    pub fn from_players(players: Vec<Player>) -> Self {
        Catalog { players }
    }

    pub fn get(&self, id: &str) -> Option<&Player> {
        self.players.iter().find(|p| p.id == id)
    }

    pub fn players(&self) -> &[Player] {
        &self.players
    }

    pub fn len(&self) -> usize {
        self.players.len()
    }

    pub fn is_empty(&self) -> bool {
        self.players.is_empty()
    }

    /// Case-insensitive substring search over player name and role.
    ///
    /// An empty (or whitespace-only) term matches every player.
    pub fn search(&self, term: &str) -> Vec<&Player> {
        let needle = term.trim().to_lowercase();
        if needle.is_empty() {
            return self.players.iter().collect();
        }
        self.players
            .iter()
            .filter(|p| {
                p.name.to_lowercase().contains(&needle)
                    || p.role.display_str().to_lowercase().contains(&needle)
            })
            .collect()
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
