//! Named catalog entries (event types, room types, work request types, areas).
//!
//! # Invariants
//! - `name` is non-blank.
//! - `parent_id` is set iff the kind is scoped (`Area` → room).

use super::entity::{Entity, EntityId, EntityKind, InsertFields, Labelled, NamedEntity, ValidationError};
use serde::{Deserialize, Serialize};
use std::fmt::Debug;
use std::marker::PhantomData;
use uuid::Uuid;

/// Compile-time marker selecting one catalog kind.
pub trait CatalogKind: Debug + Clone + Copy + PartialEq + Eq {
    const KIND: EntityKind;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EventTypeKind;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RoomTypeKind;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WorkRequestTypeKind;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AreaKind;

impl CatalogKind for EventTypeKind {
    const KIND: EntityKind = EntityKind::EventType;
}

impl CatalogKind for RoomTypeKind {
    const KIND: EntityKind = EntityKind::RoomType;
}

impl CatalogKind for WorkRequestTypeKind {
    const KIND: EntityKind = EntityKind::WorkRequestType;
}

impl CatalogKind for AreaKind {
    const KIND: EntityKind = EntityKind::Area;
}

/// One named catalog row of kind `K`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CatalogEntry<K: CatalogKind> {
    pub id: EntityId,
    pub name: String,
    /// Owning room for areas; `None` for unscoped kinds.
    pub parent_id: Option<EntityId>,
    #[serde(skip)]
    kind: PhantomData<K>,
}

pub type EventType = CatalogEntry<EventTypeKind>;
pub type RoomType = CatalogEntry<RoomTypeKind>;
pub type WorkRequestType = CatalogEntry<WorkRequestTypeKind>;
pub type Area = CatalogEntry<AreaKind>;

impl<K: CatalogKind> CatalogEntry<K> {
    /// Creates an unsaved, unscoped entry.
    pub fn new(name: impl Into<String>) -> Self {
        Self::from_parts(Uuid::nil(), name.into(), None)
    }

    /// Rebuilds an entry from persisted columns.
    pub fn from_parts(id: EntityId, name: String, parent_id: Option<EntityId>) -> Self {
        Self {
            id,
            name,
            parent_id,
            kind: PhantomData,
        }
    }
}

impl Area {
    /// Creates an unsaved area inside `room_id`.
    pub fn in_room(room_id: EntityId, name: impl Into<String>) -> Self {
        Self::from_parts(Uuid::nil(), name.into(), Some(room_id))
    }
}

impl<K: CatalogKind> Entity for CatalogEntry<K> {
    const KIND: EntityKind = K::KIND;

    fn id(&self) -> EntityId {
        self.id
    }

    fn with_id(mut self, id: EntityId) -> Self {
        self.id = id;
        self
    }

    fn validate(&self) -> Result<(), ValidationError> {
        if self.name.trim().is_empty() {
            return Err(ValidationError::BlankName { kind: K::KIND });
        }
        match (K::KIND.parent_column(), self.parent_id) {
            (Some(_), None) => Err(ValidationError::MissingParent { kind: K::KIND }),
            (None, Some(_)) => Err(ValidationError::UnexpectedParent { kind: K::KIND }),
            _ => Ok(()),
        }
    }
}

impl<K: CatalogKind> Labelled for CatalogEntry<K> {
    fn label(&self) -> &str {
        &self.name
    }
}

impl<K: CatalogKind> NamedEntity for CatalogEntry<K> {
    fn name(&self) -> &str {
        &self.name
    }

    fn set_name(&mut self, name: String) {
        self.name = name;
    }

    fn parent_id(&self) -> Option<EntityId> {
        self.parent_id
    }

    fn draft(name: String, fields: InsertFields) -> Self {
        Self::from_parts(Uuid::nil(), name, fields.parent_id)
    }
}

#[cfg(test)]
mod tests {
    use super::{Area, EventType, RoomType};
    use crate::model::entity::{Entity, EntityKind, ValidationError};
    use uuid::Uuid;

    #[test]
    fn blank_name_is_rejected() {
        let entry = EventType::new("   ");
        assert_eq!(
            entry.validate(),
            Err(ValidationError::BlankName {
                kind: EntityKind::EventType
            })
        );
    }

    #[test]
    fn area_requires_parent_and_room_rejects_one() {
        let orphan = Area::new("Stage");
        assert!(matches!(
            orphan.validate(),
            Err(ValidationError::MissingParent { .. })
        ));
        assert!(Area::in_room(Uuid::new_v4(), "Stage").validate().is_ok());

        let mut room = RoomType::new("Hall");
        room.parent_id = Some(Uuid::new_v4());
        assert!(matches!(
            room.validate(),
            Err(ValidationError::UnexpectedParent { .. })
        ));
    }
}
