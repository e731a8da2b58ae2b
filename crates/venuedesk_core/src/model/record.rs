//! Event and work-request records.
//!
//! Records reference catalog entries (and work requests reference events) by
//! optional foreign keys. An unresolved key is valid data, not an error.

use super::entity::{Entity, EntityId, EntityKind, Labelled, ValidationError};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Audience section an event belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Section {
    Entertainment,
    Enlightenment,
    Education,
}

impl Section {
    pub const ALL: [Section; 3] = [
        Section::Entertainment,
        Section::Enlightenment,
        Section::Education,
    ];

    /// Table cell label.
    pub fn label(self) -> &'static str {
        match self {
            Self::Entertainment => "Entertainment",
            Self::Enlightenment => "Enlightenment",
            Self::Education => "Education",
        }
    }

    pub(crate) fn as_db(self) -> &'static str {
        match self {
            Self::Entertainment => "entertainment",
            Self::Enlightenment => "enlightenment",
            Self::Education => "education",
        }
    }

    pub(crate) fn parse_db(value: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|section| section.as_db() == value)
    }
}

/// Work request lifecycle state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WorkRequestStatus {
    Draft,
    Active,
    Completed,
}

impl WorkRequestStatus {
    pub const ALL: [WorkRequestStatus; 3] = [
        WorkRequestStatus::Draft,
        WorkRequestStatus::Active,
        WorkRequestStatus::Completed,
    ];

    pub fn label(self) -> &'static str {
        match self {
            Self::Draft => "Draft",
            Self::Active => "Active",
            Self::Completed => "Completed",
        }
    }

    pub(crate) fn as_db(self) -> &'static str {
        match self {
            Self::Draft => "draft",
            Self::Active => "active",
            Self::Completed => "completed",
        }
    }

    pub(crate) fn parse_db(value: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|status| status.as_db() == value)
    }
}

/// Scheduled event.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Event {
    pub id: EntityId,
    pub title: String,
    pub section: Section,
    pub type_id: Option<EntityId>,
    pub room_id: Option<EntityId>,
    /// Unix epoch milliseconds.
    pub start_at: i64,
    pub description: String,
}

impl Event {
    /// Creates an unsaved event with no catalog references.
    pub fn new(title: impl Into<String>, section: Section, start_at: i64) -> Self {
        Self {
            id: Uuid::nil(),
            title: title.into(),
            section,
            type_id: None,
            room_id: None,
            start_at,
            description: String::new(),
        }
    }
}

impl Entity for Event {
    const KIND: EntityKind = EntityKind::Event;

    fn id(&self) -> EntityId {
        self.id
    }

    fn with_id(mut self, id: EntityId) -> Self {
        self.id = id;
        self
    }

    fn validate(&self) -> Result<(), ValidationError> {
        if self.title.trim().is_empty() {
            return Err(ValidationError::BlankName {
                kind: EntityKind::Event,
            });
        }
        Ok(())
    }
}

impl Labelled for Event {
    fn label(&self) -> &str {
        &self.title
    }
}

/// Maintenance or preparation request, optionally tied to an event.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WorkRequest {
    pub id: EntityId,
    pub room_id: Option<EntityId>,
    pub type_id: Option<EntityId>,
    pub event_id: Option<EntityId>,
    pub status: WorkRequestStatus,
    /// Unix epoch milliseconds.
    pub deadline: i64,
    /// Unix epoch milliseconds.
    pub created_at: i64,
    pub description: String,
}

impl WorkRequest {
    /// Creates an unsaved work request with no references.
    pub fn new(status: WorkRequestStatus, deadline: i64, created_at: i64) -> Self {
        Self {
            id: Uuid::nil(),
            room_id: None,
            type_id: None,
            event_id: None,
            status,
            deadline,
            created_at,
            description: String::new(),
        }
    }

    /// Active and past its deadline at `now_ms`.
    pub fn is_overdue(&self, now_ms: i64) -> bool {
        self.status == WorkRequestStatus::Active && self.deadline < now_ms
    }
}

impl Entity for WorkRequest {
    const KIND: EntityKind = EntityKind::WorkRequest;

    fn id(&self) -> EntityId {
        self.id
    }

    fn with_id(mut self, id: EntityId) -> Self {
        self.id = id;
        self
    }
}
