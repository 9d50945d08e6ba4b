// Local preferences that survive restarts. Only the onboarding flag today.

use std::path::{Path, PathBuf};

use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::warn;

const PREFS_FILE_NAME: &str = "preferences.json";

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Preferences {
    /// The welcome walkthrough has been dismissed.
    pub onboarding_complete: bool,
}

#[derive(Debug, Error)]
pub enum PrefsError {
    #[error("failed to write {path}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("failed to serialize preferences: {0}")]
    Serialize(#[from] serde_json::Error),
}

/// JSON-backed preferences file.
#[derive(Debug, Clone)]
pub struct PrefsStore {
    path: PathBuf,
}

impl PrefsStore {
    pub fn at(path: impl Into<PathBuf>) -> Self {
        PrefsStore { path: path.into() }
    }

    /// `<platform data dir>/bidroom/preferences.json`, or `None` when the
    /// platform has no home directory.
    pub fn default_location() -> Option<Self> {
        ProjectDirs::from("", "", "bidroom").map(|dirs| Self::at(dirs.data_dir().join(PREFS_FILE_NAME)))
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Read preferences. A missing or unreadable file yields the defaults.
    pub fn load(&self) -> Preferences {
        let text = match std::fs::read_to_string(&self.path) {
            Ok(text) => text,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Preferences::default(),
            Err(e) => {
                warn!("Could not read {}: {}; using defaults", self.path.display(), e);
                return Preferences::default();
            }
        };
        match serde_json::from_str(&text) {
            Ok(prefs) => prefs,
            Err(e) => {
                warn!("Ignoring corrupt {}: {}", self.path.display(), e);
                Preferences::default()
            }
        }
    }

    pub fn save(&self, prefs: &Preferences) -> Result<(), PrefsError> {
        if let Some(parent) = self.path.parent() {
            std::fs::create_dir_all(parent).map_err(|source| PrefsError::Io {
                path: parent.to_path_buf(),
                source,
            })?;
        }
        let json = serde_json::to_string_pretty(prefs)?;
        std::fs::write(&self.path, json).map_err(|source| PrefsError::Io {
            path: self.path.clone(),
            source,
        })
    }
}
