//! Column definitions and cell values for joined tables, plus the standard
//! event and work-request layouts.

use crate::model::entity::EntityId;
use crate::model::record::{Event, WorkRequest};
use crate::repo::store::EntityStore;
use crate::view_model::table_model::{work_request_style, JoinedTableModel};
use chrono::DateTime;
use std::fmt::{Display, Formatter};

/// Display format for timestamp cells (UTC).
pub const TIMESTAMP_FORMAT: &str = "%d.%m.%Y %H:%M";

pub const RELATION_EVENT_TYPES: &str = "event_types";
pub const RELATION_ROOM_TYPES: &str = "room_types";
pub const RELATION_WORK_REQUEST_TYPES: &str = "work_request_types";
pub const RELATION_EVENTS: &str = "events";

/// Displayable cell content.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum CellValue {
    /// Unresolved foreign key or absent value.
    #[default]
    Empty,
    Text(String),
}

impl CellValue {
    pub fn text(value: impl Into<String>) -> Self {
        Self::Text(value.into())
    }

    pub fn as_str(&self) -> &str {
        match self {
            Self::Empty => "",
            Self::Text(value) => value,
        }
    }

    pub fn is_empty(&self) -> bool {
        matches!(self, Self::Empty)
    }
}

impl From<Option<String>> for CellValue {
    fn from(value: Option<String>) -> Self {
        value.map_or(Self::Empty, Self::Text)
    }
}

impl Display for CellValue {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// How a column derives its value from a primary record.
pub enum ColumnSource<R> {
    /// Pure function of the record.
    Direct(fn(&R) -> CellValue),
    /// Foreign key resolved against the named related collection.
    Joined {
        relation: &'static str,
        key: fn(&R) -> Option<EntityId>,
    },
}

/// One read-only table column.
pub struct ColumnDef<R> {
    pub header: &'static str,
    pub source: ColumnSource<R>,
}

impl<R> ColumnDef<R> {
    pub fn direct(header: &'static str, value: fn(&R) -> CellValue) -> Self {
        Self {
            header,
            source: ColumnSource::Direct(value),
        }
    }

    pub fn joined(
        header: &'static str,
        relation: &'static str,
        key: fn(&R) -> Option<EntityId>,
    ) -> Self {
        Self {
            header,
            source: ColumnSource::Joined { relation, key },
        }
    }
}

/// Formats epoch milliseconds with `TIMESTAMP_FORMAT`; out-of-range values
/// render empty.
pub fn format_timestamp(epoch_ms: i64) -> CellValue {
    DateTime::from_timestamp_millis(epoch_ms)
        .map(|at| at.format(TIMESTAMP_FORMAT).to_string())
        .into()
}

/// Title, Section, Type, Room, Starts at, Description.
pub fn event_columns() -> Vec<ColumnDef<Event>> {
    vec![
        ColumnDef::direct("Title", |event: &Event| CellValue::text(&event.title)),
        ColumnDef::direct("Section", |event: &Event| {
            CellValue::text(event.section.label())
        }),
        ColumnDef::joined("Type", RELATION_EVENT_TYPES, |event: &Event| event.type_id),
        ColumnDef::joined("Room", RELATION_ROOM_TYPES, |event: &Event| event.room_id),
        ColumnDef::direct("Starts at", |event: &Event| format_timestamp(event.start_at)),
        ColumnDef::direct("Description", |event: &Event| {
            CellValue::text(&event.description)
        }),
    ]
}

/// Room, Type, Event, Status, Deadline, Created at, Description.
pub fn work_request_columns() -> Vec<ColumnDef<WorkRequest>> {
    vec![
        ColumnDef::joined("Room", RELATION_ROOM_TYPES, |request: &WorkRequest| {
            request.room_id
        }),
        ColumnDef::joined(
            "Type",
            RELATION_WORK_REQUEST_TYPES,
            |request: &WorkRequest| request.type_id,
        ),
        ColumnDef::joined("Event", RELATION_EVENTS, |request: &WorkRequest| {
            request.event_id
        }),
        ColumnDef::direct("Status", |request: &WorkRequest| {
            CellValue::text(request.status.label())
        }),
        ColumnDef::direct("Deadline", |request: &WorkRequest| {
            format_timestamp(request.deadline)
        }),
        ColumnDef::direct("Created at", |request: &WorkRequest| {
            format_timestamp(request.created_at)
        }),
        ColumnDef::direct("Description", |request: &WorkRequest| {
            CellValue::text(&request.description)
        }),
    ]
}

/// Events table with the standard columns. Relations are attached by the caller.
pub fn event_table<'a, S: EntityStore<Event>>(
    store: S,
    rows: Vec<Event>,
) -> JoinedTableModel<'a, Event, S> {
    JoinedTableModel::new(store, rows, event_columns())
}

/// Work request table with the standard columns and status styling.
pub fn work_request_table<'a, S: EntityStore<WorkRequest>>(
    store: S,
    rows: Vec<WorkRequest>,
) -> JoinedTableModel<'a, WorkRequest, S> {
    JoinedTableModel::new(store, rows, work_request_columns()).with_row_style(work_request_style)
}

#[cfg(test)]
mod tests {
    use super::{format_timestamp, CellValue};

    #[test]
    fn timestamps_render_day_first() {
        // 2024-03-05 14:07:00 UTC
        assert_eq!(
            format_timestamp(1_709_647_620_000),
            CellValue::text("05.03.2024 14:07")
        );
    }

    #[test]
    fn empty_cell_displays_as_empty_string() {
        assert_eq!(CellValue::Empty.to_string(), "");
        assert_eq!(CellValue::from(None), CellValue::Empty);
    }
}
