//! Application configuration loaded from the environment.
//!
//! # Responsibility
//! - Resolve the database location and logging settings once per process.
//! - Validate values early so the console never starts half-configured.
//!
//! # Invariants
//! - `log_level` is always one of `trace|debug|info|warn|error`.
//! - `log_dir`, when set, is absolute.

use crate::logging::{default_log_level, normalize_level, normalize_log_dir};
use once_cell::sync::OnceCell;
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::path::PathBuf;

/// SQLite database file path.
pub const DB_PATH_ENV: &str = "CAMPUS_DB_PATH";
/// Log level (`trace|debug|info|warn|error`).
pub const LOG_LEVEL_ENV: &str = "CAMPUS_LOG_LEVEL";
/// Absolute directory for rolling log files; file logging is off when unset.
pub const LOG_DIR_ENV: &str = "CAMPUS_LOG_DIR";

pub const DEFAULT_DB_FILE: &str = "campus.sqlite3";

static GLOBAL_CONFIG: OnceCell<AppConfig> = OnceCell::new();

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    EmptyValue(&'static str),
    InvalidLogLevel(String),
    InvalidLogDir(String),
}

impl Display for ConfigError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::EmptyValue(key) => write!(f, "{key} is set but empty"),
            Self::InvalidLogLevel(message) | Self::InvalidLogDir(message) => {
                write!(f, "{message}")
            }
        }
    }
}

impl Error for ConfigError {}

/// Resolved application settings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
    pub db_path: PathBuf,
    pub log_level: &'static str,
    pub log_dir: Option<PathBuf>,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            db_path: PathBuf::from(DEFAULT_DB_FILE),
            log_level: default_log_level(),
            log_dir: None,
        }
    }
}

impl AppConfig {
    /// Reads settings from process environment variables.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Reads settings through `lookup`, falling back to defaults for unset keys.
    ///
    /// # Errors
    /// - `EmptyValue` when the database path is set to whitespace.
    /// - `InvalidLogLevel` / `InvalidLogDir` for malformed logging values.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();

        if let Some(path) = lookup(DB_PATH_ENV) {
            if path.trim().is_empty() {
                return Err(ConfigError::EmptyValue(DB_PATH_ENV));
            }
            config.db_path = PathBuf::from(path.trim());
        }

        if let Some(level) = lookup(LOG_LEVEL_ENV) {
            config.log_level = normalize_level(&level).map_err(ConfigError::InvalidLogLevel)?;
        }

        if let Some(dir) = lookup(LOG_DIR_ENV) {
            if !dir.trim().is_empty() {
                config.log_dir =
                    Some(normalize_log_dir(&dir).map_err(ConfigError::InvalidLogDir)?);
            }
        }

        Ok(config)
    }

    /// Process-wide configuration, read from the environment on first use.
    pub fn global() -> Result<&'static AppConfig, ConfigError> {
        GLOBAL_CONFIG.get_or_try_init(Self::from_env)
    }
}
