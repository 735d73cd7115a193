//! Runtime configuration for hosts embedding the core.
//!
//! # Responsibility
//! - Resolve database and logging settings from the environment.
//!
//! # Invariants
//! - Blank values are treated as unset.
//! - Resolution never fails; invalid logging values surface later from
//!   `init_logging`.

use crate::logging::default_log_level;
use std::path::PathBuf;

pub const DB_PATH_ENV: &str = "NOTELIST_DB_PATH";
pub const LOG_LEVEL_ENV: &str = "NOTELIST_LOG_LEVEL";
pub const LOG_DIR_ENV: &str = "NOTELIST_LOG_DIR";

const DEFAULT_DB_FILE_NAME: &str = "notelist.sqlite3";

/// Settings shared by the CLI and FFI hosts.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
    /// SQLite file holding the note store.
    pub db_path: PathBuf,
    /// Log level passed to `init_logging`.
    pub log_level: String,
    /// Log directory; logging stays off when `None`.
    pub log_dir: Option<String>,
}

impl AppConfig {
    /// Resolves settings from process environment variables.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Resolves settings through an arbitrary key lookup.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let read = |key: &str| {
            lookup(key)
                .map(|raw| raw.trim().to_string())
                .filter(|value| !value.is_empty())
        };

        Self {
            db_path: read(DB_PATH_ENV)
                .map(PathBuf::from)
                .unwrap_or_else(|| std::env::temp_dir().join(DEFAULT_DB_FILE_NAME)),
            log_level: read(LOG_LEVEL_ENV).unwrap_or_else(|| default_log_level().to_string()),
            log_dir: read(LOG_DIR_ENV),
        }
    }
}
