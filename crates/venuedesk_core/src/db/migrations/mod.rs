//! VenueDesk schema history.
//!
//! Step 1 creates the named catalogs (event, room and work-request types,
//! room areas). Step 2 adds the event and work-request records that the
//! joined tables project over those catalogs.
//!
//! # Invariants
//! - `version` values start at 1 and increase by exactly one.
//! - Pending steps run in one transaction; each step bumps
//!   `PRAGMA user_version` to its own version.
//!
//! # See also
//! - `0001_catalog.sql`, `0002_records.sql`
//! - `crate::repo::store::ensure_connection_ready`, which refuses
//!   connections below `latest_version()`.

use crate::db::{DbError, DbResult};
use log::info;
use rusqlite::Connection;

#[derive(Debug, Clone, Copy)]
struct Migration {
    version: u32,
    /// Short label written to the `db_migrate` log line.
    label: &'static str,
    sql: &'static str,
}

const MIGRATIONS: &[Migration] = &[
    Migration {
        version: 1,
        label: "catalog",
        sql: include_str!("0001_catalog.sql"),
    },
    Migration {
        version: 2,
        label: "records",
        sql: include_str!("0002_records.sql"),
    },
];

/// Returns the latest schema version known by this build.
pub fn latest_version() -> u32 {
    MIGRATIONS.last().map_or(0, |migration| migration.version)
}

/// Applies all pending migrations on the provided connection.
pub fn apply_migrations(conn: &mut Connection) -> DbResult<()> {
    let current_version = current_user_version(conn)?;
    let latest = latest_version();

    if current_version > latest {
        return Err(DbError::UnsupportedSchemaVersion {
            db_version: current_version,
            latest_supported: latest,
        });
    }
    if current_version == latest {
        return Ok(());
    }

    let tx = conn.transaction()?;
    for migration in MIGRATIONS
        .iter()
        .filter(|migration| migration.version > current_version)
    {
        tx.execute_batch(migration.sql)?;
        tx.execute_batch(&format!("PRAGMA user_version = {};", migration.version))?;
        info!(
            "event=db_migrate module=db status=applied version={} step={}",
            migration.version, migration.label
        );
    }
    tx.commit()?;

    info!(
        "event=db_migrate module=db status=ok from_version={current_version} to_version={latest}"
    );
    Ok(())
}

/// Reads the schema version stored in `PRAGMA user_version`.
pub fn current_user_version(conn: &Connection) -> DbResult<u32> {
    let version = conn.query_row("PRAGMA user_version;", [], |row| row.get::<_, u32>(0))?;
    Ok(version)
}

#[cfg(test)]
mod tests {
    use super::{latest_version, MIGRATIONS};

    #[test]
    fn versions_are_contiguous_from_one() {
        for (index, migration) in MIGRATIONS.iter().enumerate() {
            assert_eq!(migration.version as usize, index + 1, "{}", migration.label);
        }
        assert_eq!(latest_version(), 2);
    }

    #[test]
    fn records_step_references_catalog_tables() {
        let records = MIGRATIONS[1].sql;
        for table in ["event_types", "room_types", "work_request_types"] {
            assert!(records.contains(&format!("REFERENCES {table}(id)")), "{table}");
        }
    }
}
