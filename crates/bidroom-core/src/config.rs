// Configuration loading and parsing (config/auction.toml).

use serde::Deserialize;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::info;

/// Name of the single configuration file under `config/` and `defaults/`.
pub const CONFIG_FILE_NAME: &str = "auction.toml";

// ---------------------------------------------------------------------------
// Error types
// ---------------------------------------------------------------------------

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("config file not found: {path}")]
    FileNotFound { path: PathBuf },

    #[error("failed to parse config file {path}: {source}")]
    ParseError {
        path: PathBuf,
        source: toml::de::Error,
    },

    #[error("validation error for field `{field}`: {message}")]
    ValidationError { field: String, message: String },

    #[error("no config and no shipped defaults at {path}")]
    DefaultsMissing { path: PathBuf },

    #[error("failed to seed {path} from defaults: {source}")]
    SeedError {
        path: PathBuf,
        source: std::io::Error,
    },
}

// ---------------------------------------------------------------------------
// Top-level assembled Config
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct Config {
    pub auction: AuctionConfig,
    pub opponents: OpponentConfig,
    pub notifications: NotificationConfig,
}

// ---------------------------------------------------------------------------
// [auction]
// ---------------------------------------------------------------------------

/// Fixed rules of an auction session.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct AuctionConfig {
    /// Smallest amount a new bid must add on top of the current price.
    pub min_increment: u64,
    /// Seconds added to the clock by every accepted bid.
    pub time_bonus_secs: u32,
    /// Upper bound of the countdown clock.
    pub max_window_secs: u32,
    /// Clock value when a room opens.
    pub starting_window_secs: u32,
    /// Countdown tick period.
    pub tick_interval_ms: u64,
    /// Bids kept in the visible history (newest first).
    pub history_limit: usize,
    /// Preset raises offered as quick bids.
    pub quick_increments: Vec<u64>,
}

impl Default for AuctionConfig {
    fn default() -> Self {
        AuctionConfig {
            min_increment: 25_000,
            time_bonus_secs: 30,
            max_window_secs: 180,
            starting_window_secs: 180,
            tick_interval_ms: 1_000,
            history_limit: 10,
            quick_increments: vec![25_000, 50_000, 100_000],
        }
    }
}

// ---------------------------------------------------------------------------
// [opponents]
// ---------------------------------------------------------------------------

/// Behaviour of the simulated rival bidders.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct OpponentConfig {
    /// How often the competing-bid generator runs.
    pub interval_ms: u64,
    /// Chance (0.0..=1.0) that a generator run produces a bid.
    pub bid_probability: f64,
    /// A rival raises by 1..=max_raise_steps minimum increments.
    pub max_raise_steps: u32,
    /// Fixed RNG seed for reproducible sessions. `None` seeds from the OS.
    pub seed: Option<u64>,
}

impl Default for OpponentConfig {
    fn default() -> Self {
        OpponentConfig {
            interval_ms: 3_000,
            bid_probability: 0.3,
            max_raise_steps: 3,
            seed: None,
        }
    }
}

// ---------------------------------------------------------------------------
// [notifications]
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct NotificationConfig {
    /// How long a notification stays on screen.
    pub ttl_secs: u64,
    /// Maximum notifications shown at once.
    pub capacity: usize,
}

impl Default for NotificationConfig {
    fn default() -> Self {
        NotificationConfig {
            ttl_secs: 4,
            capacity: 5,
        }
    }
}

// ---------------------------------------------------------------------------
// Loading logic
// ---------------------------------------------------------------------------

/// Load and validate `config/auction.toml` relative to `base_dir`.
///
/// Missing keys fall back to their defaults; a missing file is an error.
/// Prefer `load_config()`, which seeds `config/` from `defaults/` first.
pub fn load_config_from(base_dir: &Path) -> Result<Config, ConfigError> {
    let path = base_dir.join("config").join(CONFIG_FILE_NAME);
    let text = read_file(&path)?;
    let config = parse_config(&text).map_err(|source| ConfigError::ParseError {
        path: path.clone(),
        source,
    })?;
    validate(&config)?;
    Ok(config)
}

/// Parse TOML text into a `Config` without validating it.
pub fn parse_config(text: &str) -> Result<Config, toml::de::Error> {
    toml::from_str(text)
}

/// Copy `defaults/auction.toml` into `config/` on first run.
///
/// Returns `true` when the file was seeded, `false` when a config already
/// existed. An existing `config/auction.toml` is never overwritten.
pub fn seed_config(base_dir: &Path) -> Result<bool, ConfigError> {
    let target = base_dir.join("config").join(CONFIG_FILE_NAME);
    if target.is_file() {
        return Ok(false);
    }

    let shipped = base_dir.join("defaults").join(CONFIG_FILE_NAME);
    if !shipped.is_file() {
        return Err(ConfigError::DefaultsMissing { path: shipped });
    }

    let seed_err = |source| ConfigError::SeedError {
        path: target.clone(),
        source,
    };
    if let Some(dir) = target.parent() {
        std::fs::create_dir_all(dir).map_err(seed_err)?;
    }
    std::fs::copy(&shipped, &target).map_err(seed_err)?;
    Ok(true)
}

/// Load config relative to the current working directory, seeding it from
/// `defaults/` when missing.
pub fn load_config() -> Result<Config, ConfigError> {
    let cwd = std::env::current_dir().map_err(|_| ConfigError::FileNotFound {
        path: PathBuf::from("."),
    })?;
    if seed_config(&cwd)? {
        info!("Seeded config/{} from defaults", CONFIG_FILE_NAME);
    }
    load_config_from(&cwd)
}

fn read_file(path: &Path) -> Result<String, ConfigError> {
    std::fs::read_to_string(path).map_err(|_| ConfigError::FileNotFound {
        path: path.to_path_buf(),
    })
}

// ---------------------------------------------------------------------------
// Validation
// ---------------------------------------------------------------------------

fn invalid(field: &str, message: impl Into<String>) -> ConfigError {
    ConfigError::ValidationError {
        field: field.into(),
        message: message.into(),
    }
}

pub fn validate(config: &Config) -> Result<(), ConfigError> {
    let auction = &config.auction;

    if auction.min_increment == 0 {
        return Err(invalid("auction.min_increment", "must be greater than 0"));
    }
    if auction.max_window_secs == 0 {
        return Err(invalid("auction.max_window_secs", "must be greater than 0"));
    }
    if auction.starting_window_secs == 0 || auction.starting_window_secs > auction.max_window_secs
    {
        return Err(invalid(
            "auction.starting_window_secs",
            format!(
                "must be in 1..={}, got {}",
                auction.max_window_secs, auction.starting_window_secs
            ),
        ));
    }
    if auction.tick_interval_ms == 0 {
        return Err(invalid("auction.tick_interval_ms", "must be greater than 0"));
    }
    if auction.history_limit == 0 {
        return Err(invalid("auction.history_limit", "must be at least 1"));
    }
    if auction.quick_increments.is_empty() || auction.quick_increments.len() > 9 {
        return Err(invalid(
            "auction.quick_increments",
            format!(
                "must list between 1 and 9 presets, got {}",
                auction.quick_increments.len()
            ),
        ));
    }
    if let Some(small) = auction
        .quick_increments
        .iter()
        .find(|&&inc| inc < auction.min_increment)
    {
        return Err(invalid(
            "auction.quick_increments",
            format!(
                "preset {small} is below the minimum increment {}",
                auction.min_increment
            ),
        ));
    }

    let opponents = &config.opponents;
    if opponents.interval_ms == 0 {
        return Err(invalid("opponents.interval_ms", "must be greater than 0"));
    }
    let p = opponents.bid_probability;
    if !(0.0..=1.0).contains(&p) {
        return Err(invalid(
            "opponents.bid_probability",
            format!("must be between 0.0 and 1.0 inclusive, got {p}"),
        ));
    }
    if opponents.max_raise_steps == 0 {
        return Err(invalid("opponents.max_raise_steps", "must be at least 1"));
    }

    if config.notifications.capacity == 0 {
        return Err(invalid("notifications.capacity", "must be at least 1"));
    }

    Ok(())
}

// ---------------------------------------------------------------------------
// Unit tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    /// Workspace root holding the shipped `defaults/` directory.
    fn project_root() -> PathBuf {
        Path::new(env!("CARGO_MANIFEST_DIR")).join("../..")
    }

    fn scratch_dir(name: &str) -> PathBuf {
        let tmp = std::env::temp_dir().join(format!("bidroom_{name}_{}", std::process::id()));
        let _ = fs::remove_dir_all(&tmp);
        fs::create_dir_all(tmp.join("config")).unwrap();
        tmp
    }

    fn write_config(dir: &Path, text: &str) {
        fs::write(dir.join("config").join(CONFIG_FILE_NAME), text).unwrap();
    }

    #[test]
    fn shipped_defaults_match_builtin_defaults() {
        let text = fs::read_to_string(project_root().join("defaults").join(CONFIG_FILE_NAME))
            .expect("defaults/auction.toml should exist");
        let config = parse_config(&text).expect("defaults should parse");
        validate(&config).expect("defaults should validate");
        assert_eq!(config.auction, AuctionConfig::default());
        assert_eq!(config.opponents, OpponentConfig::default());
        assert_eq!(config.notifications, NotificationConfig::default());
    }

    #[test]
    fn empty_file_uses_defaults() {
        let config = parse_config("").unwrap();
        assert_eq!(config, Config::default());
        assert_eq!(config.auction.min_increment, 25_000);
        assert_eq!(config.auction.quick_increments, vec![25_000, 50_000, 100_000]);
    }

    #[test]
    fn partial_sections_merge_with_defaults() {
        let config = parse_config(
            "[auction]\nmin_increment = 10000\n\n[opponents]\nseed = 7\n",
        )
        .unwrap();
        assert_eq!(config.auction.min_increment, 10_000);
        assert_eq!(config.auction.max_window_secs, 180);
        assert_eq!(config.opponents.seed, Some(7));
        assert!((config.opponents.bid_probability - 0.3).abs() < f64::EPSILON);
    }

    #[test]
    fn load_from_directory() {
        let tmp = scratch_dir("load_ok");
        write_config(&tmp, "[auction]\ntime_bonus_secs = 15\n");
        let config = load_config_from(&tmp).expect("should load");
        assert_eq!(config.auction.time_bonus_secs, 15);
        let _ = fs::remove_dir_all(&tmp);
    }

    #[test]
    fn file_not_found_for_missing_config() {
        let tmp = scratch_dir("missing");
        let err = load_config_from(&tmp).unwrap_err();
        assert!(matches!(err, ConfigError::FileNotFound { .. }));
        let _ = fs::remove_dir_all(&tmp);
    }

    #[test]
    fn parse_error_for_invalid_toml() {
        let tmp = scratch_dir("invalid_toml");
        write_config(&tmp, "[auction\nmin_increment = ");
        let err = load_config_from(&tmp).unwrap_err();
        assert!(matches!(err, ConfigError::ParseError { .. }));
        let _ = fs::remove_dir_all(&tmp);
    }

    fn assert_rejects(mutate: impl FnOnce(&mut Config), field: &str) {
        let mut config = Config::default();
        mutate(&mut config);
        match validate(&config) {
            Err(ConfigError::ValidationError { field: f, .. }) => assert_eq!(f, field),
            other => panic!("expected validation error on {field}, got {other:?}"),
        }
    }

    #[test]
    fn rejects_zero_increment() {
        assert_rejects(|c| c.auction.min_increment = 0, "auction.min_increment");
    }

    #[test]
    fn rejects_starting_window_above_max() {
        assert_rejects(
            |c| c.auction.starting_window_secs = 200,
            "auction.starting_window_secs",
        );
    }

    #[test]
    fn rejects_zero_history_limit() {
        assert_rejects(|c| c.auction.history_limit = 0, "auction.history_limit");
    }

    #[test]
    fn rejects_quick_increment_below_minimum() {
        assert_rejects(
            |c| c.auction.quick_increments = vec![5_000],
            "auction.quick_increments",
        );
        assert_rejects(|c| c.auction.quick_increments.clear(), "auction.quick_increments");
    }

    #[test]
    fn rejects_probability_out_of_range() {
        assert_rejects(|c| c.opponents.bid_probability = 1.5, "opponents.bid_probability");
        assert_rejects(|c| c.opponents.bid_probability = -0.1, "opponents.bid_probability");
    }

    #[test]
    fn rejects_zero_raise_steps() {
        assert_rejects(|c| c.opponents.max_raise_steps = 0, "opponents.max_raise_steps");
    }

    #[test]
    fn seed_copies_shipped_defaults_once() {
        let tmp = std::env::temp_dir().join(format!("bidroom_seed_{}", std::process::id()));
        let _ = fs::remove_dir_all(&tmp);
        fs::create_dir_all(tmp.join("defaults")).unwrap();
        fs::copy(
            project_root().join("defaults").join(CONFIG_FILE_NAME),
            tmp.join("defaults").join(CONFIG_FILE_NAME),
        )
        .unwrap();

        assert!(seed_config(&tmp).unwrap());
        assert_eq!(load_config_from(&tmp).unwrap(), Config::default());

        fs::write(tmp.join("config").join(CONFIG_FILE_NAME), "[auction]\nhistory_limit = 3\n").unwrap();
        assert!(!seed_config(&tmp).unwrap());
        assert_eq!(load_config_from(&tmp).unwrap().auction.history_limit, 3);

        let _ = fs::remove_dir_all(&tmp);
    }

    #[test]
    fn seed_without_defaults_is_an_error() {
        let tmp = std::env::temp_dir().join(format!("bidroom_bare_{}", std::process::id()));
        let _ = fs::remove_dir_all(&tmp);
        fs::create_dir_all(&tmp).unwrap();

        match seed_config(&tmp).unwrap_err() {
            ConfigError::DefaultsMissing { path } => {
                assert!(path.ends_with("defaults/auction.toml"));
            }
            other => panic!("expected DefaultsMissing, got: {other}"),
        }

        let _ = fs::remove_dir_all(&tmp);
    }

    #[test]
    fn existing_config_needs_no_defaults() {
        let tmp = scratch_dir("no_defaults");
        write_config(&tmp, "");
        assert!(!seed_config(&tmp).unwrap());
        let _ = fs::remove_dir_all(&tmp);
    }
}
