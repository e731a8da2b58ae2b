//! View-model errors and operation outcomes.

use crate::repo::store::StoreError;
use std::error::Error;
use std::fmt::{Display, Formatter};

pub type ViewModelResult<T> = Result<T, ViewModelError>;

/// Failures that escape a view-model operation.
///
/// Out-of-range indices are contract violations by the presentation layer;
/// store errors leave the cursor as it was before the failing call, and
/// callers should reload rather than trust it.
#[derive(Debug)]
pub enum ViewModelError {
    Store(StoreError),
    RowOutOfRange { row: usize, row_count: usize },
    ColumnOutOfRange { column: usize, column_count: usize },
}

impl Display for ViewModelError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Store(err) => write!(f, "{err}"),
            Self::RowOutOfRange { row, row_count } => {
                write!(f, "row {row} out of range (row count {row_count})")
            }
            Self::ColumnOutOfRange {
                column,
                column_count,
            } => write!(f, "column {column} out of range (column count {column_count})"),
        }
    }
}

impl Error for ViewModelError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Store(err) => Some(err),
            _ => None,
        }
    }
}

impl From<StoreError> for ViewModelError {
    fn from(value: StoreError) -> Self {
        Self::Store(value)
    }
}

/// Result of `insert_row`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InsertOutcome {
    Inserted { row: usize },
    /// Synthesized name already taken; nothing was persisted.
    UniquenessViolation(String),
}

/// Result of a confirmed removal.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RemoveOutcome {
    Removed,
    Cancelled,
}

/// Result of `rename`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RenameOutcome {
    Renamed,
    /// New name equals the current one.
    NoOp,
    UniquenessViolation(String),
    /// New name is blank.
    InvalidName,
}

/// Per-row capabilities reported to the presentation layer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ItemFlags {
    pub selectable: bool,
    pub enabled: bool,
    pub editable: bool,
}

impl ItemFlags {
    pub const EDITABLE: ItemFlags = ItemFlags {
        selectable: true,
        enabled: true,
        editable: true,
    };

    pub const READ_ONLY: ItemFlags = ItemFlags {
        selectable: true,
        enabled: true,
        editable: false,
    };
}
