use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

use livesub_core::shared::constants::MIN_SEGMENT_CHARS;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum SettingsError {
    #[error("failed to read settings from {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("invalid settings in {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub min_segment_chars: usize,
    pub replay_delay_ms: u64,
    pub show_source: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            min_segment_chars: MIN_SEGMENT_CHARS,
            replay_delay_ms: 0,
            show_source: false,
        }
    }
}

impl Settings {
    pub fn config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|d| d.join("LiveSubtitles").join("settings.json"))
    }

    /// Loads from the default location, falling back to defaults when the
    /// file is absent or unreadable.
    pub fn load() -> Self {
        let Some(path) = Self::config_path() else {
            return Self::default();
        };
        if !path.exists() {
            return Self::default();
        }
        Self::load_from(&path).unwrap_or_else(|e| {
            log::warn!("{e}; using default settings");
            Self::default()
        })
    }

    /// Loads from an explicit path; any failure is an error.
    pub fn load_from(path: &Path) -> Result<Self, SettingsError> {
        let json = fs::read_to_string(path).map_err(|e| SettingsError::Read {
            path: path.to_path_buf(),
            source: e,
        })?;
        serde_json::from_str(&json).map_err(|e| SettingsError::Parse {
            path: path.to_path_buf(),
            source: e,
        })
    }
}
