//! Entity identity and the traits store gateways and view-models rely on.

use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fmt::{Display, Formatter};
use uuid::Uuid;

/// Stable identifier assigned by the store gateway on create.
pub type EntityId = Uuid;

/// Every stored entity kind. One kind maps to one table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EntityKind {
    EventType,
    RoomType,
    WorkRequestType,
    /// Part of a room; scoped by `room_id`.
    Area,
    Event,
    WorkRequest,
}

impl EntityKind {
    /// Backing table name.
    pub fn table(self) -> &'static str {
        match self {
            Self::EventType => "event_types",
            Self::RoomType => "room_types",
            Self::WorkRequestType => "work_request_types",
            Self::Area => "areas",
            Self::Event => "events",
            Self::WorkRequest => "work_requests",
        }
    }

    /// Column holding the parent id for scoped kinds.
    pub fn parent_column(self) -> Option<&'static str> {
        match self {
            Self::Area => Some("room_id"),
            _ => None,
        }
    }

    /// Short human-readable label used in logs and messages.
    pub fn label(self) -> &'static str {
        match self {
            Self::EventType => "event type",
            Self::RoomType => "room type",
            Self::WorkRequestType => "work request type",
            Self::Area => "area",
            Self::Event => "event",
            Self::WorkRequest => "work request",
        }
    }
}

impl Display for EntityKind {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

/// Write-path validation failure. Checked by stores before SQL mutations.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    /// Name (or title) is empty after trim.
    BlankName { kind: EntityKind },
    /// Scoped kind written without its parent id.
    MissingParent { kind: EntityKind },
    /// Unscoped kind written with a parent id.
    UnexpectedParent { kind: EntityKind },
}

impl Display for ValidationError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::BlankName { kind } => write!(f, "{kind} name must not be blank"),
            Self::MissingParent { kind } => write!(f, "{kind} requires a parent id"),
            Self::UnexpectedParent { kind } => write!(f, "{kind} does not accept a parent id"),
        }
    }
}

impl Error for ValidationError {}

/// Anything a store gateway can persist.
pub trait Entity: Clone {
    /// Kind fixed at compile time; no runtime type recovery.
    const KIND: EntityKind;

    fn id(&self) -> EntityId;

    /// Returns a copy carrying the id assigned by the store.
    fn with_id(self, id: EntityId) -> Self;

    fn validate(&self) -> Result<(), ValidationError> {
        Ok(())
    }
}

/// Entity that can be shown by name in a joined column.
pub trait Labelled {
    fn label(&self) -> &str;
}

/// Extra fields merged into a freshly synthesized catalog entry.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct InsertFields {
    /// Parent foreign key for scoped collections.
    pub parent_id: Option<EntityId>,
}

impl InsertFields {
    pub fn scoped(parent_id: EntityId) -> Self {
        Self {
            parent_id: Some(parent_id),
        }
    }
}

/// Catalog entity whose only semantic content is a unique display name.
pub trait NamedEntity: Entity {
    fn name(&self) -> &str;

    fn set_name(&mut self, name: String);

    fn parent_id(&self) -> Option<EntityId>;

    /// Builds an unsaved entity; the store assigns the id on create.
    fn draft(name: String, fields: InsertFields) -> Self;
}
