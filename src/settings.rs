//! User settings.
//!
//! Settings are stored as JSON at `<config_dir>/chart-uploader/settings.json`.
//! The `CHART_UPLOADER_SETTINGS` environment variable points at another file.
//! A missing file means defaults. `load` logs and ignores a malformed file;
//! `try_load` hands the error back so the caller can report it once logging is up.

use crate::constants::{
    DEFAULT_MAX_FILE_SIZE_MB, DEFAULT_READ_TIMEOUT_SECS, SETTINGS_DIR_NAME, SETTINGS_PATH_ENV,
};
use anyhow::Context;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;
use tracing::{debug, warn};

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Files above this size are refused before reading
    pub max_file_size_mb: usize,
    /// How long to wait for a pending read
    pub read_timeout_secs: u64,
    /// `tracing` filter used when `RUST_LOG` is not set
    pub log_filter: String,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            max_file_size_mb: DEFAULT_MAX_FILE_SIZE_MB,
            read_timeout_secs: DEFAULT_READ_TIMEOUT_SECS,
            log_filter: "info".to_string(),
        }
    }
}

impl Settings {
    /// Load from the default location, falling back to defaults
    pub fn load() -> Self {
        match default_settings_path() {
            Some(path) => Self::load_from(&path),
            None => Self::default(),
        }
    }

    /// Load from the default location, reporting unreadable or malformed files
    pub fn try_load() -> anyhow::Result<Self> {
        match default_settings_path() {
            Some(path) => Self::try_load_from(&path),
            None => Ok(Self::default()),
        }
    }

    /// Load from a specific file, falling back to defaults
    pub fn load_from(path: &Path) -> Self {
        Self::try_load_from(path).unwrap_or_else(|e| {
            warn!(path = %path.display(), error = %e, "unusable settings, using defaults");
            Self::default()
        })
    }

    /// Load from a specific file. A missing file gives defaults.
    pub fn try_load_from(path: &Path) -> anyhow::Result<Self> {
        let content = match std::fs::read_to_string(path) {
            Ok(content) => content,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                debug!(path = %path.display(), "no settings file, using defaults");
                return Ok(Self::default());
            }
            Err(e) => {
                return Err(e).with_context(|| format!("failed to read {}", path.display()));
            }
        };

        serde_json::from_str(&content)
            .with_context(|| format!("malformed settings in {}", path.display()))
    }

    /// Write settings as pretty JSON, creating parent directories
    pub fn save_to(&self, path: &Path) -> anyhow::Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let json = serde_json::to_string_pretty(self)?;
        std::fs::write(path, json)?;
        Ok(())
    }

    pub fn read_timeout(&self) -> Duration {
        Duration::from_secs(self.read_timeout_secs)
    }
}

/// Where settings are read from by default
pub fn default_settings_path() -> Option<PathBuf> {
    if let Some(path) = std::env::var_os(SETTINGS_PATH_ENV) {
        return Some(PathBuf::from(path));
    }
    dirs::config_dir().map(|dir| dir.join(SETTINGS_DIR_NAME).join("settings.json"))
}
