//! View-model synchronization layer.
//!
//! # Responsibility
//! - Hold in-memory ordered projections (cursors) of persisted collections.
//! - Persist every mutation through an injected `EntityStore` before the
//!   cursor changes, then notify observers.
//! - Derive joined table cells, row styles and command enablement.
//!
//! # Invariants
//! - A cursor never reflects a mutation whose store call failed.
//! - Validation outcomes (duplicate name, cancel, no-op) never escape as
//!   errors; store failures always do.
//! - All calls are synchronous and single-threaded.

pub mod columns;
pub mod error;
pub mod list_model;
pub mod notify;
pub mod prompt;
pub mod relation;
pub mod selection;
pub mod table_model;
