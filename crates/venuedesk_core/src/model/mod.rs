//! Domain model for the catalog and the records projected from it.
//!
//! # Responsibility
//! - Define entity identity (`EntityId`, `EntityKind`) shared by stores and
//!   view-models.
//! - Define named catalog entries and the richer event/work-request records.
//!
//! # Invariants
//! - Every persisted entity is identified by a stable `EntityId`.
//! - Catalog names are never blank; scoped kinds always carry a parent id.

pub mod catalog;
pub mod entity;
pub mod record;

pub use entity::{Entity, EntityId, EntityKind, InsertFields, Labelled, NamedEntity, ValidationError};
