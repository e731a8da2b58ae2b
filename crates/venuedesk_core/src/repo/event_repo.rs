//! Event gateway and SQLite implementation.

use crate::model::entity::{Entity, EntityId, EntityKind};
use crate::model::record::{Event, Section};
use crate::repo::store::{
    ensure_connection_ready, parse_id, parse_optional_id, with_write_tx, EntityStore, StoreError,
    StoreResult,
};
use log::{error, info};
use rusqlite::types::Value;
use rusqlite::{params, params_from_iter, Connection, Row};
use uuid::Uuid;

const EVENT_SELECT_SQL: &str = "SELECT
    id,
    title,
    section,
    type_id,
    room_id,
    start_at,
    description
FROM events";

/// Filter for the events table view.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct EventFilter {
    pub section: Option<Section>,
}

/// SQLite-backed event gateway.
pub struct SqliteEventStore<'conn> {
    conn: &'conn Connection,
}

impl<'conn> SqliteEventStore<'conn> {
    pub fn try_new(conn: &'conn Connection) -> StoreResult<Self> {
        ensure_connection_ready(conn, EntityKind::Event.table())?;
        Ok(Self { conn })
    }

    /// Lists events matching `filter`, in insertion order.
    pub fn list_filtered(&self, filter: &EventFilter) -> StoreResult<Vec<Event>> {
        let mut sql = format!("{EVENT_SELECT_SQL} WHERE 1 = 1");
        let mut bind_values: Vec<Value> = Vec::new();

        if let Some(section) = filter.section {
            sql.push_str(" AND section = ?");
            bind_values.push(Value::Text(section.as_db().to_string()));
        }
        sql.push_str(" ORDER BY rowid ASC");

        let mut stmt = self.conn.prepare(&sql)?;
        let mut rows = stmt.query(params_from_iter(bind_values))?;
        let mut events = Vec::new();
        while let Some(row) = rows.next()? {
            events.push(parse_event_row(row)?);
        }
        Ok(events)
    }
}

impl EntityStore<Event> for SqliteEventStore<'_> {
    fn get_all(&self) -> StoreResult<Vec<Event>> {
        self.list_filtered(&EventFilter::default())
    }

    fn get_by_id(&self, id: EntityId) -> StoreResult<Event> {
        let mut stmt = self
            .conn
            .prepare(&format!("{EVENT_SELECT_SQL} WHERE id = ?1;"))?;
        let mut rows = stmt.query([id.to_string()])?;
        match rows.next()? {
            Some(row) => parse_event_row(row),
            None => Err(StoreError::NotFound {
                kind: EntityKind::Event,
                id,
            }),
        }
    }

    fn create(&self, event: &Event) -> StoreResult<Event> {
        event.validate()?;
        let id = Uuid::new_v4();

        let result = with_write_tx(self.conn, |tx| {
            tx.execute(
                "INSERT INTO events (
                    id,
                    title,
                    section,
                    type_id,
                    room_id,
                    start_at,
                    description
                ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7);",
                params![
                    id.to_string(),
                    event.title.as_str(),
                    event.section.as_db(),
                    event.type_id.map(|value| value.to_string()),
                    event.room_id.map(|value| value.to_string()),
                    event.start_at,
                    event.description.as_str(),
                ],
            )?;
            Ok(())
        });
        log_write("create", id, &result);

        result.map(|()| event.clone().with_id(id))
    }

    fn update(&self, event: &Event) -> StoreResult<()> {
        event.validate()?;

        let result = with_write_tx(self.conn, |tx| {
            let changed = tx.execute(
                "UPDATE events
                 SET
                    title = ?1,
                    section = ?2,
                    type_id = ?3,
                    room_id = ?4,
                    start_at = ?5,
                    description = ?6
                 WHERE id = ?7;",
                params![
                    event.title.as_str(),
                    event.section.as_db(),
                    event.type_id.map(|value| value.to_string()),
                    event.room_id.map(|value| value.to_string()),
                    event.start_at,
                    event.description.as_str(),
                    event.id.to_string(),
                ],
            )?;
            if changed == 0 {
                return Err(StoreError::NotFound {
                    kind: EntityKind::Event,
                    id: event.id,
                });
            }
            Ok(())
        });
        log_write("update", event.id, &result);
        result
    }

    fn delete(&self, id: EntityId) -> StoreResult<()> {
        let result = with_write_tx(self.conn, |tx| {
            let changed = tx.execute("DELETE FROM events WHERE id = ?1;", [id.to_string()])?;
            if changed == 0 {
                return Err(StoreError::NotFound {
                    kind: EntityKind::Event,
                    id,
                });
            }
            Ok(())
        });
        log_write("delete", id, &result);
        result
    }
}

fn log_write(op: &str, id: EntityId, result: &StoreResult<()>) {
    match result {
        Ok(()) => info!("event=store_write module=repo status=ok op={op} kind=Event id={id}"),
        Err(err) => error!(
            "event=store_write module=repo status=error op={op} kind=Event id={id} error={err}"
        ),
    }
}

fn parse_event_row(row: &Row<'_>) -> StoreResult<Event> {
    let id_text: String = row.get("id")?;
    let id = parse_id(&id_text, "events.id")?;

    let section_text: String = row.get("section")?;
    let section = Section::parse_db(&section_text).ok_or_else(|| {
        StoreError::InvalidData(format!("invalid section `{section_text}` in events.section"))
    })?;

    Ok(Event {
        id,
        title: row.get("title")?,
        section,
        type_id: parse_optional_id(row.get("type_id")?, "events.type_id")?,
        room_id: parse_optional_id(row.get("room_id")?, "events.room_id")?,
        start_at: row.get("start_at")?,
        description: row.get("description")?,
    })
}
