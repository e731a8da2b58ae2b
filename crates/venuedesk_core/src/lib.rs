//! Core of VenueDesk: catalog storage and the view-models that keep list and
//! table widgets in sync with it.

pub mod config;
pub mod db;
pub mod logging;
pub mod model;
pub mod repo;
pub mod view_model;

pub use config::AppConfig;
pub use logging::{default_log_level, init_from_config, init_logging, logging_status, LoggingError};
pub use model::catalog::{
    Area, AreaKind, CatalogEntry, CatalogKind, EventType, EventTypeKind, RoomType, RoomTypeKind,
    WorkRequestType, WorkRequestTypeKind,
};
pub use model::entity::{Entity, EntityId, EntityKind, InsertFields, Labelled, NamedEntity, ValidationError};
pub use model::record::{Event, Section, WorkRequest, WorkRequestStatus};
pub use repo::catalog_repo::SqliteCatalogStore;
pub use repo::event_repo::{EventFilter, SqliteEventStore};
pub use repo::store::{CatalogStore, EntityStore, StoreError, StoreResult, WorkRequestStore};
pub use repo::work_request_repo::{SqliteWorkRequestStore, WorkRequestFilter};
pub use view_model::columns::{
    event_columns, event_table, format_timestamp, work_request_columns, work_request_table,
    CellValue, ColumnDef, ColumnSource,
};
pub use view_model::error::{
    InsertOutcome, ItemFlags, RemoveOutcome, RenameOutcome, ViewModelError, ViewModelResult,
};
pub use view_model::list_model::{InsertPosition, OrderedListModel};
pub use view_model::notify::{ChangeNotifier, ModelEvent, SubscriptionId};
pub use view_model::prompt::{
    Confirmation, ConfirmationPrompt, FixedConfirmation, LogNotifier, WarningNotifier,
};
pub use view_model::relation::{CachedRelation, LazyRelation, Relation};
pub use view_model::selection::{command_state, CommandSet, CommandState, Selection, SelectionController};
pub use view_model::table_model::{work_request_style, JoinedTableModel, RowStyle, RowStyler};

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
