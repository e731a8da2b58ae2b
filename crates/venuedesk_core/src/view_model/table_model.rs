//! Read-only joined table over a primary record collection.
//!
//! # Responsibility
//! - Compute cells directly from the record or through a foreign-key relation.
//! - Derive row styles from record status.
//! - Remove rows from the projection, optionally deleting the record too.
//!
//! # Invariants
//! - Cells never fail on an unresolved key or an unknown relation; they render
//!   `CellValue::Empty`.
//! - A row is dropped from the cursor only after its store call succeeded.

use crate::model::entity::Entity;
use crate::model::record::{WorkRequest, WorkRequestStatus};
use crate::repo::store::{EntityStore, WorkRequestStore};
use crate::view_model::columns::{CellValue, ColumnDef, ColumnSource};
use crate::view_model::error::{ItemFlags, RemoveOutcome, ViewModelError, ViewModelResult};
use crate::view_model::notify::{ChangeNotifier, ModelEvent, SubscriptionId};
use crate::view_model::prompt::{Confirmation, ConfirmationPrompt};
use crate::view_model::relation::Relation;
use crate::view_model::selection::Selection;
use chrono::Utc;
use log::info;
use std::collections::HashMap;

/// Visual hint for a whole row.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RowStyle {
    Active,
    Overdue,
    Completed,
}

/// Derives a row style from a record and the table's reference time (epoch ms).
pub type RowStyler<R> = fn(&R, i64) -> Option<RowStyle>;

/// Active → `Active` (or `Overdue` past its deadline), completed →
/// `Completed`, drafts unstyled.
pub fn work_request_style(request: &WorkRequest, now_ms: i64) -> Option<RowStyle> {
    match request.status {
        WorkRequestStatus::Active if request.is_overdue(now_ms) => Some(RowStyle::Overdue),
        WorkRequestStatus::Active => Some(RowStyle::Active),
        WorkRequestStatus::Completed => Some(RowStyle::Completed),
        WorkRequestStatus::Draft => None,
    }
}

/// Joined, read-only table of records `R` backed by store `S`.
pub struct JoinedTableModel<'a, R, S> {
    store: S,
    rows: Vec<R>,
    columns: Vec<ColumnDef<R>>,
    relations: HashMap<&'static str, Box<dyn Relation + 'a>>,
    styler: Option<RowStyler<R>>,
    reference_time_ms: i64,
    notifier: ChangeNotifier,
}

impl<'a, R: Entity, S: EntityStore<R>> JoinedTableModel<'a, R, S> {
    /// Creates a table whose reference time for styling is "now".
    pub fn new(store: S, rows: Vec<R>, columns: Vec<ColumnDef<R>>) -> Self {
        Self {
            store,
            rows,
            columns,
            relations: HashMap::new(),
            styler: None,
            reference_time_ms: Utc::now().timestamp_millis(),
            notifier: ChangeNotifier::new(),
        }
    }

    /// Registers (or replaces) the related collection a joined column names.
    pub fn with_relation(mut self, name: &'static str, relation: impl Relation + 'a) -> Self {
        self.set_relation(name, relation);
        self
    }

    pub fn with_row_style(mut self, styler: RowStyler<R>) -> Self {
        self.styler = Some(styler);
        self
    }

    pub fn with_reference_time(mut self, now_ms: i64) -> Self {
        self.reference_time_ms = now_ms;
        self
    }

    /// Swaps a relation, e.g. after reloading its cache for a new refresh cycle.
    pub fn set_relation(&mut self, name: &'static str, relation: impl Relation + 'a) {
        self.relations.insert(name, Box::new(relation));
    }

    /// Replaces the cursor after an external change and emits `Reset`.
    pub fn reload(&mut self, rows: Vec<R>) {
        self.rows = rows;
        self.notifier.emit(ModelEvent::Reset);
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn rows(&self) -> &[R] {
        &self.rows
    }

    pub fn row(&self, row: usize) -> ViewModelResult<&R> {
        self.rows.get(row).ok_or(ViewModelError::RowOutOfRange {
            row,
            row_count: self.rows.len(),
        })
    }

    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    pub fn column_count(&self) -> usize {
        self.columns.len()
    }

    pub fn column_header(&self, column: usize) -> ViewModelResult<&'static str> {
        self.column(column).map(|def| def.header)
    }

    /// Value of one cell. Joined cells resolve lazily through their relation.
    pub fn cell_value(&self, row: usize, column: usize) -> ViewModelResult<CellValue> {
        let record = self.row(row)?;
        let value = match &self.column(column)?.source {
            ColumnSource::Direct(value) => value(record),
            ColumnSource::Joined { relation, key } => key(record)
                .and_then(|id| {
                    self.relations
                        .get(relation)
                        .and_then(|resolver| resolver.resolve(id))
                })
                .into(),
        };
        Ok(value)
    }

    pub fn row_style(&self, row: usize) -> ViewModelResult<Option<RowStyle>> {
        let record = self.row(row)?;
        Ok(self
            .styler
            .and_then(|styler| styler(record, self.reference_time_ms)))
    }

    /// Cells are selectable and enabled, never editable.
    pub fn flags(&self, row: usize) -> ViewModelResult<ItemFlags> {
        self.row(row).map(|_| ItemFlags::READ_ONLY)
    }

    pub fn subscribe(&mut self, observer: impl FnMut(&ModelEvent) + 'static) -> SubscriptionId {
        self.notifier.subscribe(observer)
    }

    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        self.notifier.unsubscribe(id)
    }

    /// Drops `row` from the projection, deleting the record first when
    /// `also_delete` is set.
    ///
    /// Projection-only removal is for records that left the view's filter
    /// (e.g. a work request completed on the active board).
    ///
    /// # Errors
    /// - `RowOutOfRange` for an invalid row.
    /// - `Store` when delete fails; the row stays in the cursor.
    pub fn remove_row(&mut self, row: usize, also_delete: bool) -> ViewModelResult<()> {
        let id = self.row(row)?.id();
        if also_delete {
            self.store.delete(id)?;
        }
        self.rows.remove(row);
        info!(
            "event=table_remove module=view_model status=ok kind={:?} row={row} id={id} deleted={also_delete}",
            R::KIND
        );
        self.notifier.emit(ModelEvent::Removed { row });
        Ok(())
    }

    /// Deletes every selected record after one confirmation. An empty
    /// selection returns `Cancelled` without prompting.
    ///
    /// # Errors
    /// - `RowOutOfRange` when any selected row is invalid; nothing is removed.
    /// - `Store` on the first failing delete; rows handled before it stay removed.
    pub fn remove_selected(
        &mut self,
        selection: &Selection,
        prompt: &dyn ConfirmationPrompt,
    ) -> ViewModelResult<RemoveOutcome> {
        self.ensure_selection_in_range(selection)?;
        if selection.is_empty() {
            return Ok(RemoveOutcome::Cancelled);
        }
        if prompt.confirm("Do you really want to delete the selected objects?")
            == Confirmation::Cancelled
        {
            return Ok(RemoveOutcome::Cancelled);
        }

        for row in selection.descending() {
            self.remove_row(row, true)?;
        }
        Ok(RemoveOutcome::Removed)
    }

    fn column(&self, column: usize) -> ViewModelResult<&ColumnDef<R>> {
        self.columns
            .get(column)
            .ok_or(ViewModelError::ColumnOutOfRange {
                column,
                column_count: self.columns.len(),
            })
    }

    fn ensure_selection_in_range(&self, selection: &Selection) -> ViewModelResult<()> {
        match selection.max() {
            Some(row) if row >= self.rows.len() => Err(ViewModelError::RowOutOfRange {
                row,
                row_count: self.rows.len(),
            }),
            _ => Ok(()),
        }
    }
}

impl<'a, S: WorkRequestStore> JoinedTableModel<'a, WorkRequest, S> {
    /// Marks every selected request completed, then drops it from the
    /// projection without deleting it. Returns the number of rows completed.
    ///
    /// Only the status column is written, so edits committed after the table
    /// was loaded survive.
    ///
    /// # Errors
    /// - `RowOutOfRange` when any selected row is invalid; nothing changes.
    /// - `Store` on the first failing write; rows handled before it stay
    ///   completed and removed.
    pub fn complete_selected(&mut self, selection: &Selection) -> ViewModelResult<usize> {
        self.ensure_selection_in_range(selection)?;

        let mut completed = 0;
        for row in selection.descending() {
            let id = self.rows[row].id;
            self.store.set_status(id, WorkRequestStatus::Completed)?;
            self.remove_row(row, false)?;
            completed += 1;
        }
        Ok(completed)
    }
}
