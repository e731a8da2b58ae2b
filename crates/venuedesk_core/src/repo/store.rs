//! Store gateway contract and shared SQLite helpers.

use crate::db::migrations::latest_version;
use crate::db::DbError;
use crate::model::entity::{Entity, EntityId, EntityKind, NamedEntity, ValidationError};
use crate::model::record::{WorkRequest, WorkRequestStatus};
use rusqlite::{Connection, Transaction, TransactionBehavior};
use std::error::Error;
use std::fmt::{Display, Formatter};
use uuid::Uuid;

pub type StoreResult<T> = Result<T, StoreError>;

/// Gateway failure surfaced to view-model callers.
#[derive(Debug)]
pub enum StoreError {
    /// Entity failed write-path validation.
    Validation(ValidationError),
    /// Underlying SQLite/bootstrap error (including constraint failures).
    Db(DbError),
    /// Target row does not exist.
    NotFound { kind: EntityKind, id: EntityId },
    /// Connection schema is not at the expected migrated version.
    UninitializedConnection {
        expected_version: u32,
        actual_version: u32,
    },
    /// Required table is missing.
    MissingRequiredTable(&'static str),
    /// Persisted data cannot be converted to a valid entity.
    InvalidData(String),
}

impl Display for StoreError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Validation(err) => write!(f, "{err}"),
            Self::Db(err) => write!(f, "{err}"),
            Self::NotFound { kind, id } => write!(f, "{kind} not found: {id}"),
            Self::UninitializedConnection {
                expected_version,
                actual_version,
            } => write!(
                f,
                "store requires schema version {expected_version}, got {actual_version}"
            ),
            Self::MissingRequiredTable(table) => write!(f, "store requires table `{table}`"),
            Self::InvalidData(message) => write!(f, "invalid persisted data: {message}"),
        }
    }
}

impl Error for StoreError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Validation(err) => Some(err),
            Self::Db(err) => Some(err),
            _ => None,
        }
    }
}

impl From<ValidationError> for StoreError {
    fn from(value: ValidationError) -> Self {
        Self::Validation(value)
    }
}

impl From<DbError> for StoreError {
    fn from(value: DbError) -> Self {
        Self::Db(value)
    }
}

impl From<rusqlite::Error> for StoreError {
    fn from(value: rusqlite::Error) -> Self {
        Self::Db(DbError::Sqlite(value))
    }
}

/// Synchronous persistence gateway for one entity kind.
pub trait EntityStore<T: Entity> {
    /// All rows of the kind, in insertion order.
    fn get_all(&self) -> StoreResult<Vec<T>>;
    fn get_by_id(&self, id: EntityId) -> StoreResult<T>;
    /// Persists `entity` under a freshly assigned id and returns the stored copy.
    fn create(&self, entity: &T) -> StoreResult<T>;
    fn update(&self, entity: &T) -> StoreResult<()>;
    fn delete(&self, id: EntityId) -> StoreResult<()>;
}

/// Gateway for named catalog kinds.
pub trait CatalogStore<T: NamedEntity>: EntityStore<T> {
    /// Whether `name` is already taken inside the given scope.
    fn name_exists(&self, name: &str, parent_id: Option<EntityId>) -> StoreResult<bool>;
}

/// Gateway for work requests.
pub trait WorkRequestStore: EntityStore<WorkRequest> {
    /// Writes only the status column; every other column keeps its stored value.
    fn set_status(&self, id: EntityId, status: WorkRequestStatus) -> StoreResult<()>;
}

impl<T: Entity, S: EntityStore<T> + ?Sized> EntityStore<T> for &S {
    fn get_all(&self) -> StoreResult<Vec<T>> {
        (**self).get_all()
    }

    fn get_by_id(&self, id: EntityId) -> StoreResult<T> {
        (**self).get_by_id(id)
    }

    fn create(&self, entity: &T) -> StoreResult<T> {
        (**self).create(entity)
    }

    fn update(&self, entity: &T) -> StoreResult<()> {
        (**self).update(entity)
    }

    fn delete(&self, id: EntityId) -> StoreResult<()> {
        (**self).delete(id)
    }
}

impl<T: NamedEntity, S: CatalogStore<T> + ?Sized> CatalogStore<T> for &S {
    fn name_exists(&self, name: &str, parent_id: Option<EntityId>) -> StoreResult<bool> {
        (**self).name_exists(name, parent_id)
    }
}

impl<S: WorkRequestStore + ?Sized> WorkRequestStore for &S {
    fn set_status(&self, id: EntityId, status: WorkRequestStatus) -> StoreResult<()> {
        (**self).set_status(id, status)
    }
}

/// Rejects connections that were not opened through `db::open_*`.
pub(crate) fn ensure_connection_ready(conn: &Connection, table: &'static str) -> StoreResult<()> {
    let expected_version = latest_version();
    let actual_version: u32 = conn.query_row("PRAGMA user_version;", [], |row| row.get(0))?;
    if actual_version != expected_version {
        return Err(StoreError::UninitializedConnection {
            expected_version,
            actual_version,
        });
    }

    let exists: i64 = conn.query_row(
        "SELECT EXISTS(
            SELECT 1
            FROM sqlite_master
            WHERE type = 'table' AND name = ?1
        );",
        [table],
        |row| row.get(0),
    )?;
    if exists == 0 {
        return Err(StoreError::MissingRequiredTable(table));
    }
    Ok(())
}

/// Runs `write` inside an immediate transaction scoped to this one call.
pub(crate) fn with_write_tx<R>(
    conn: &Connection,
    write: impl FnOnce(&Transaction<'_>) -> StoreResult<R>,
) -> StoreResult<R> {
    let tx = Transaction::new_unchecked(conn, TransactionBehavior::Immediate)?;
    let value = write(&tx)?;
    tx.commit()?;
    Ok(value)
}

pub(crate) fn parse_id(value: &str, column: &str) -> StoreResult<EntityId> {
    Uuid::parse_str(value)
        .map_err(|_| StoreError::InvalidData(format!("invalid id `{value}` in {column}")))
}

pub(crate) fn parse_optional_id(value: Option<String>, column: &str) -> StoreResult<Option<EntityId>> {
    value.as_deref().map(|text| parse_id(text, column)).transpose()
}
