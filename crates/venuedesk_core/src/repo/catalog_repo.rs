//! SQLite gateway shared by every catalog kind.
//!
//! # Invariants
//! - Listing order is insertion order (`rowid ASC`).
//! - Scoped kinds (areas) read and write their parent column; unscoped kinds
//!   never do.

use crate::model::catalog::{CatalogEntry, CatalogKind};
use crate::model::entity::{Entity, EntityId, ValidationError};
use crate::repo::store::{
    ensure_connection_ready, parse_id, parse_optional_id, with_write_tx, CatalogStore,
    EntityStore, StoreError, StoreResult,
};
use log::{error, info};
use rusqlite::{params, Connection, OptionalExtension, Row};
use std::marker::PhantomData;
use uuid::Uuid;

/// SQLite-backed gateway for catalog kind `K`.
pub struct SqliteCatalogStore<'conn, K: CatalogKind> {
    conn: &'conn Connection,
    kind: PhantomData<K>,
}

impl<'conn, K: CatalogKind> SqliteCatalogStore<'conn, K> {
    /// Creates a gateway over a migrated connection.
    pub fn try_new(conn: &'conn Connection) -> StoreResult<Self> {
        ensure_connection_ready(conn, K::KIND.table())?;
        Ok(Self {
            conn,
            kind: PhantomData,
        })
    }

    /// Lists the entries belonging to one parent (areas of one room).
    pub fn list_in_scope(&self, parent_id: EntityId) -> StoreResult<Vec<CatalogEntry<K>>> {
        let Some(parent_column) = K::KIND.parent_column() else {
            return Err(ValidationError::UnexpectedParent { kind: K::KIND }.into());
        };
        let sql = format!(
            "{} WHERE {parent_column} = ?1 ORDER BY rowid ASC;",
            select_sql::<K>()
        );
        let mut stmt = self.conn.prepare(&sql)?;
        let mut rows = stmt.query([parent_id.to_string()])?;
        let mut entries = Vec::new();
        while let Some(row) = rows.next()? {
            entries.push(parse_catalog_row(row)?);
        }
        Ok(entries)
    }

    fn log_write(&self, op: &str, result: &StoreResult<EntityId>) {
        match result {
            Ok(id) => info!(
                "event=store_write module=repo status=ok op={op} kind={:?} id={id}",
                K::KIND
            ),
            Err(err) => error!(
                "event=store_write module=repo status=error op={op} kind={:?} error={err}",
                K::KIND
            ),
        }
    }
}

impl<K: CatalogKind> EntityStore<CatalogEntry<K>> for SqliteCatalogStore<'_, K> {
    fn get_all(&self) -> StoreResult<Vec<CatalogEntry<K>>> {
        let sql = format!("{} ORDER BY rowid ASC;", select_sql::<K>());
        let mut stmt = self.conn.prepare(&sql)?;
        let mut rows = stmt.query([])?;
        let mut entries = Vec::new();
        while let Some(row) = rows.next()? {
            entries.push(parse_catalog_row(row)?);
        }
        Ok(entries)
    }

    fn get_by_id(&self, id: EntityId) -> StoreResult<CatalogEntry<K>> {
        let sql = format!("{} WHERE id = ?1;", select_sql::<K>());
        let mut stmt = self.conn.prepare(&sql)?;
        let mut rows = stmt.query([id.to_string()])?;
        match rows.next()? {
            Some(row) => parse_catalog_row(row),
            None => Err(StoreError::NotFound { kind: K::KIND, id }),
        }
    }

    fn create(&self, entry: &CatalogEntry<K>) -> StoreResult<CatalogEntry<K>> {
        entry.validate()?;
        let id = Uuid::new_v4();
        let table = K::KIND.table();

        let result = with_write_tx(self.conn, |tx| {
            match K::KIND.parent_column() {
                Some(parent_column) => tx.execute(
                    &format!("INSERT INTO {table} (id, name, {parent_column}) VALUES (?1, ?2, ?3);"),
                    params![
                        id.to_string(),
                        entry.name.as_str(),
                        entry.parent_id.map(|value| value.to_string()),
                    ],
                )?,
                None => tx.execute(
                    &format!("INSERT INTO {table} (id, name) VALUES (?1, ?2);"),
                    params![id.to_string(), entry.name.as_str()],
                )?,
            };
            Ok(id)
        });
        self.log_write("create", &result);

        result.map(|id| entry.clone().with_id(id))
    }

    fn update(&self, entry: &CatalogEntry<K>) -> StoreResult<()> {
        entry.validate()?;
        let table = K::KIND.table();

        let result = with_write_tx(self.conn, |tx| {
            let changed = match K::KIND.parent_column() {
                Some(parent_column) => tx.execute(
                    &format!("UPDATE {table} SET name = ?1, {parent_column} = ?2 WHERE id = ?3;"),
                    params![
                        entry.name.as_str(),
                        entry.parent_id.map(|value| value.to_string()),
                        entry.id.to_string(),
                    ],
                )?,
                None => tx.execute(
                    &format!("UPDATE {table} SET name = ?1 WHERE id = ?2;"),
                    params![entry.name.as_str(), entry.id.to_string()],
                )?,
            };
            if changed == 0 {
                return Err(StoreError::NotFound {
                    kind: K::KIND,
                    id: entry.id,
                });
            }
            Ok(entry.id)
        });
        self.log_write("update", &result);

        result.map(|_| ())
    }

    fn delete(&self, id: EntityId) -> StoreResult<()> {
        let table = K::KIND.table();

        let result = with_write_tx(self.conn, |tx| {
            let changed = tx.execute(
                &format!("DELETE FROM {table} WHERE id = ?1;"),
                [id.to_string()],
            )?;
            if changed == 0 {
                return Err(StoreError::NotFound { kind: K::KIND, id });
            }
            Ok(id)
        });
        self.log_write("delete", &result);

        result.map(|_| ())
    }
}

impl<K: CatalogKind> CatalogStore<CatalogEntry<K>> for SqliteCatalogStore<'_, K> {
    fn name_exists(&self, name: &str, parent_id: Option<EntityId>) -> StoreResult<bool> {
        let table = K::KIND.table();
        let found = match (K::KIND.parent_column(), parent_id) {
            (Some(parent_column), Some(parent_id)) => self
                .conn
                .query_row(
                    &format!("SELECT 1 FROM {table} WHERE name = ?1 AND {parent_column} = ?2;"),
                    params![name, parent_id.to_string()],
                    |row| row.get::<_, i64>(0),
                )
                .optional()?,
            _ => self
                .conn
                .query_row(
                    &format!("SELECT 1 FROM {table} WHERE name = ?1;"),
                    [name],
                    |row| row.get::<_, i64>(0),
                )
                .optional()?,
        };
        Ok(found.is_some())
    }
}

fn select_sql<K: CatalogKind>() -> String {
    let parent = K::KIND.parent_column().unwrap_or("NULL");
    format!(
        "SELECT id, name, {parent} AS parent_id FROM {}",
        K::KIND.table()
    )
}

fn parse_catalog_row<K: CatalogKind>(row: &Row<'_>) -> StoreResult<CatalogEntry<K>> {
    let table = K::KIND.table();
    let id_text: String = row.get("id")?;
    let id = parse_id(&id_text, &format!("{table}.id"))?;
    let parent_id = parse_optional_id(row.get("parent_id")?, &format!("{table}.parent_id"))?;

    let entry = CatalogEntry::from_parts(id, row.get("name")?, parent_id);
    entry.validate().map_err(|err| {
        StoreError::InvalidData(format!("invalid row {id} in {table}: {err}"))
    })?;
    Ok(entry)
}
