//! Work request gateway and SQLite implementation.
//!
//! # Invariants
//! - `created_at` is written once on create and never updated.

use crate::model::entity::{Entity, EntityId, EntityKind};
use crate::model::record::{WorkRequest, WorkRequestStatus};
use crate::repo::store::{
    ensure_connection_ready, parse_id, parse_optional_id, with_write_tx, EntityStore, StoreError,
    StoreResult, WorkRequestStore,
};
use log::{error, info};
use rusqlite::types::Value;
use rusqlite::{params, params_from_iter, Connection, Row};
use uuid::Uuid;

const WORK_REQUEST_SELECT_SQL: &str = "SELECT
    id,
    room_id,
    type_id,
    event_id,
    status,
    deadline,
    created_at,
    description
FROM work_requests";

/// Filter for work request tables (e.g. the active board filtered by type).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct WorkRequestFilter {
    pub status: Option<WorkRequestStatus>,
    pub type_id: Option<EntityId>,
}

impl WorkRequestFilter {
    /// Active requests only; the board view.
    pub fn active() -> Self {
        Self {
            status: Some(WorkRequestStatus::Active),
            type_id: None,
        }
    }
}

/// SQLite-backed work request gateway.
pub struct SqliteWorkRequestStore<'conn> {
    conn: &'conn Connection,
}

impl<'conn> SqliteWorkRequestStore<'conn> {
    pub fn try_new(conn: &'conn Connection) -> StoreResult<Self> {
        ensure_connection_ready(conn, EntityKind::WorkRequest.table())?;
        Ok(Self { conn })
    }

    /// Lists work requests matching `filter`, in insertion order.
    pub fn list_filtered(&self, filter: &WorkRequestFilter) -> StoreResult<Vec<WorkRequest>> {
        let mut sql = format!("{WORK_REQUEST_SELECT_SQL} WHERE 1 = 1");
        let mut bind_values: Vec<Value> = Vec::new();

        if let Some(status) = filter.status {
            sql.push_str(" AND status = ?");
            bind_values.push(Value::Text(status.as_db().to_string()));
        }
        if let Some(type_id) = filter.type_id {
            sql.push_str(" AND type_id = ?");
            bind_values.push(Value::Text(type_id.to_string()));
        }
        sql.push_str(" ORDER BY rowid ASC");

        let mut stmt = self.conn.prepare(&sql)?;
        let mut rows = stmt.query(params_from_iter(bind_values))?;
        let mut requests = Vec::new();
        while let Some(row) = rows.next()? {
            requests.push(parse_work_request_row(row)?);
        }
        Ok(requests)
    }
}

impl EntityStore<WorkRequest> for SqliteWorkRequestStore<'_> {
    fn get_all(&self) -> StoreResult<Vec<WorkRequest>> {
        self.list_filtered(&WorkRequestFilter::default())
    }

    fn get_by_id(&self, id: EntityId) -> StoreResult<WorkRequest> {
        let mut stmt = self
            .conn
            .prepare(&format!("{WORK_REQUEST_SELECT_SQL} WHERE id = ?1;"))?;
        let mut rows = stmt.query([id.to_string()])?;
        match rows.next()? {
            Some(row) => parse_work_request_row(row),
            None => Err(StoreError::NotFound {
                kind: EntityKind::WorkRequest,
                id,
            }),
        }
    }

    fn create(&self, request: &WorkRequest) -> StoreResult<WorkRequest> {
        request.validate()?;
        let id = Uuid::new_v4();

        let result = with_write_tx(self.conn, |tx| {
            tx.execute(
                "INSERT INTO work_requests (
                    id,
                    room_id,
                    type_id,
                    event_id,
                    status,
                    deadline,
                    created_at,
                    description
                ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8);",
                params![
                    id.to_string(),
                    request.room_id.map(|value| value.to_string()),
                    request.type_id.map(|value| value.to_string()),
                    request.event_id.map(|value| value.to_string()),
                    request.status.as_db(),
                    request.deadline,
                    request.created_at,
                    request.description.as_str(),
                ],
            )?;
            Ok(())
        });
        log_write("create", id, &result);

        result.map(|()| request.clone().with_id(id))
    }

    fn update(&self, request: &WorkRequest) -> StoreResult<()> {
        request.validate()?;

        let result = with_write_tx(self.conn, |tx| {
            let changed = tx.execute(
                "UPDATE work_requests
                 SET
                    room_id = ?1,
                    type_id = ?2,
                    event_id = ?3,
                    status = ?4,
                    deadline = ?5,
                    description = ?6
                 WHERE id = ?7;",
                params![
                    request.room_id.map(|value| value.to_string()),
                    request.type_id.map(|value| value.to_string()),
                    request.event_id.map(|value| value.to_string()),
                    request.status.as_db(),
                    request.deadline,
                    request.description.as_str(),
                    request.id.to_string(),
                ],
            )?;
            if changed == 0 {
                return Err(StoreError::NotFound {
                    kind: EntityKind::WorkRequest,
                    id: request.id,
                });
            }
            Ok(())
        });
        log_write("update", request.id, &result);
        result
    }

    fn delete(&self, id: EntityId) -> StoreResult<()> {
        let result = with_write_tx(self.conn, |tx| {
            let changed =
                tx.execute("DELETE FROM work_requests WHERE id = ?1;", [id.to_string()])?;
            if changed == 0 {
                return Err(StoreError::NotFound {
                    kind: EntityKind::WorkRequest,
                    id,
                });
            }
            Ok(())
        });
        log_write("delete", id, &result);
        result
    }
}

impl WorkRequestStore for SqliteWorkRequestStore<'_> {
    fn set_status(&self, id: EntityId, status: WorkRequestStatus) -> StoreResult<()> {
        let result = with_write_tx(self.conn, |tx| {
            let changed = tx.execute(
                "UPDATE work_requests SET status = ?1 WHERE id = ?2;",
                params![status.as_db(), id.to_string()],
            )?;
            if changed == 0 {
                return Err(StoreError::NotFound {
                    kind: EntityKind::WorkRequest,
                    id,
                });
            }
            Ok(())
        });
        log_write("set_status", id, &result);
        result
    }
}

fn log_write(op: &str, id: EntityId, result: &StoreResult<()>) {
    match result {
        Ok(()) => {
            info!("event=store_write module=repo status=ok op={op} kind=WorkRequest id={id}")
        }
        Err(err) => error!(
            "event=store_write module=repo status=error op={op} kind=WorkRequest id={id} error={err}"
        ),
    }
}

fn parse_work_request_row(row: &Row<'_>) -> StoreResult<WorkRequest> {
    let id_text: String = row.get("id")?;
    let id = parse_id(&id_text, "work_requests.id")?;

    let status_text: String = row.get("status")?;
    let status = WorkRequestStatus::parse_db(&status_text).ok_or_else(|| {
        StoreError::InvalidData(format!(
            "invalid status `{status_text}` in work_requests.status"
        ))
    })?;

    Ok(WorkRequest {
        id,
        room_id: parse_optional_id(row.get("room_id")?, "work_requests.room_id")?,
        type_id: parse_optional_id(row.get("type_id")?, "work_requests.type_id")?,
        event_id: parse_optional_id(row.get("event_id")?, "work_requests.event_id")?,
        status,
        deadline: row.get("deadline")?,
        created_at: row.get("created_at")?,
        description: row.get("description")?,
    })
}
