//! Runtime configuration.
//!
//! Settings are read from `<config dir>/minimail/settings.json` when that
//! file exists; the `MINIMAIL_DATA_DIR` environment variable overrides the
//! data directory.

use std::ffi::OsString;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::{Result, storage};

/// Environment variable overriding the data directory.
pub const DATA_DIR_ENV: &str = "MINIMAIL_DATA_DIR";

/// File holding the account store.
pub const USERS_FILE: &str = "users.json";

/// File holding the mailbox store.
pub const INBOXES_FILE: &str = "inboxes.json";

/// Login attempts allowed before returning to the main menu.
pub const DEFAULT_MAX_LOGIN_ATTEMPTS: u32 = 3;

/// Application configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Directory holding `users.json` and `inboxes.json`.
    pub data_dir: PathBuf,
    /// Login attempts allowed per login.
    pub max_login_attempts: u32,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            // Same place the files have always lived: the working directory
            data_dir: PathBuf::from("."),
            max_login_attempts: DEFAULT_MAX_LOGIN_ATTEMPTS,
        }
    }
}

impl Config {
    /// Configuration using `data_dir` and default settings otherwise.
    #[must_use]
    pub fn with_data_dir(data_dir: impl Into<PathBuf>) -> Self {
        Self {
            data_dir: data_dir.into(),
            ..Self::default()
        }
    }

    /// Loads the settings file (if any) and applies the environment override.
    ///
    /// # Errors
    ///
    /// Returns an error if the settings file exists but cannot be read or
    /// parsed.
    pub fn load() -> Result<Self> {
        let settings = match settings_path() {
            Some(path) => Self::from_file(&path)?,
            None => Self::default(),
        };
        Ok(settings.with_env_override(std::env::var_os(DATA_DIR_ENV)))
    }

    /// Reads settings from a JSON file. A missing file yields defaults.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed.
    pub fn from_file(path: &Path) -> Result<Self> {
        debug!("Reading settings from {}", path.display());
        storage::load(path)
    }

    /// Replaces the data directory with a non-empty override.
    #[must_use]
    pub fn with_env_override(mut self, data_dir: Option<OsString>) -> Self {
        if let Some(dir) = data_dir.filter(|d| !d.is_empty()) {
            self.data_dir = PathBuf::from(dir);
        }
        self
    }

    /// Path of the account store file.
    #[must_use]
    pub fn users_path(&self) -> PathBuf {
        self.data_dir.join(USERS_FILE)
    }

    /// Path of the mailbox store file.
    #[must_use]
    pub fn inboxes_path(&self) -> PathBuf {
        self.data_dir.join(INBOXES_FILE)
    }
}

/// Location of the settings file, if the platform has a config directory.
#[must_use]
pub fn settings_path() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join("minimail").join("settings.json"))
}
