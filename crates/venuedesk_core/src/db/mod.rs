//! Database bootstrap for the VenueDesk catalog.
//!
//! Every store gateway runs on a connection produced here: foreign keys on
//! (area cascades and `SET NULL` record references depend on it), a busy
//! timeout, and the schema migrated to `migrations::latest_version()`.
//!
//! # See also
//! - `migrations` for the schema history.
//! - `crate::config::AppConfig::db_path` for where the file lives.

use std::error::Error;
use std::fmt::{Display, Formatter};

pub mod migrations;
mod open;

pub use open::{open_db, open_db_in_memory};

pub type DbResult<T> = Result<T, DbError>;

/// Connection bootstrap or migration failure.
#[derive(Debug)]
pub enum DbError {
    /// SQLite failure, including constraint violations raised by store writes.
    Sqlite(rusqlite::Error),
    /// The file was written by a newer VenueDesk build.
    UnsupportedSchemaVersion {
        db_version: u32,
        latest_supported: u32,
    },
}

impl Display for DbError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Sqlite(err) => write!(f, "{err}"),
            Self::UnsupportedSchemaVersion {
                db_version,
                latest_supported,
            } => write!(
                f,
                "venuedesk database is at schema version {db_version}; this build supports up to {latest_supported}"
            ),
        }
    }
}

impl Error for DbError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Sqlite(err) => Some(err),
            Self::UnsupportedSchemaVersion { .. } => None,
        }
    }
}

impl From<rusqlite::Error> for DbError {
    fn from(value: rusqlite::Error) -> Self {
        Self::Sqlite(value)
    }
}
