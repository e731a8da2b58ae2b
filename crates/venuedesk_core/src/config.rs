//! Runtime configuration resolved from the environment.
//!
//! # Invariants
//! - Blank variables count as unset.
//! - Resolution never touches the filesystem; directories are created by
//!   `open_db` and `init_logging`.

use crate::logging::default_log_level;
use std::path::PathBuf;

pub const ENV_DB_PATH: &str = "VENUEDESK_DB_PATH";
pub const ENV_LOG_LEVEL: &str = "VENUEDESK_LOG_LEVEL";
pub const ENV_LOG_DIR: &str = "VENUEDESK_LOG_DIR";

const DEFAULT_DB_FILE_NAME: &str = "venuedesk.sqlite3";

/// Resolved runtime settings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
    /// Catalog database file.
    pub db_path: PathBuf,
    /// One of `trace|debug|info|warn|error`; validated by `init_logging`.
    pub log_level: String,
    /// Rolling log directory. `None` leaves logging uninitialized.
    pub log_dir: Option<PathBuf>,
}

impl AppConfig {
    /// Reads `VENUEDESK_*` variables from the process environment.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Resolves settings through `lookup`, falling back to defaults.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let read = |key: &str| {
            lookup(key)
                .map(|raw| raw.trim().to_string())
                .filter(|value| !value.is_empty())
        };

        Self {
            db_path: read(ENV_DB_PATH)
                .map(PathBuf::from)
                .unwrap_or_else(|| std::env::temp_dir().join(DEFAULT_DB_FILE_NAME)),
            log_level: read(ENV_LOG_LEVEL).unwrap_or_else(|| default_log_level().to_string()),
            log_dir: read(ENV_LOG_DIR).map(PathBuf::from),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{AppConfig, ENV_DB_PATH, ENV_LOG_DIR, ENV_LOG_LEVEL};
    use crate::logging::default_log_level;
    use std::collections::HashMap;
    use std::path::PathBuf;

    #[test]
    fn defaults_apply_when_variables_are_missing_or_blank() {
        let env = HashMap::from([(ENV_LOG_DIR, "   ")]);
        let config = AppConfig::from_lookup(|key| env.get(key).map(|value| value.to_string()));

        assert!(config.db_path.ends_with("venuedesk.sqlite3"));
        assert_eq!(config.log_level, default_log_level());
        assert_eq!(config.log_dir, None);
    }

    #[test]
    fn variables_override_defaults() {
        let env = HashMap::from([
            (ENV_DB_PATH, "/srv/venuedesk/catalog.db"),
            (ENV_LOG_LEVEL, " warn "),
            (ENV_LOG_DIR, "/var/log/venuedesk"),
        ]);
        let config = AppConfig::from_lookup(|key| env.get(key).map(|value| value.to_string()));

        assert_eq!(config.db_path, PathBuf::from("/srv/venuedesk/catalog.db"));
        assert_eq!(config.log_level, "warn");
        assert_eq!(config.log_dir, Some(PathBuf::from("/var/log/venuedesk")));
    }
}
