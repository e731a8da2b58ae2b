//! Ordered list view-model over one named catalog kind.
//!
//! # Responsibility
//! - Present catalog entries of kind `T` as an editable list.
//! - Synthesize default names on insert, rename in place, and remove behind
//!   confirmation.
//!
//! # Invariants
//! - Names in the cursor are unique (exact, case-sensitive match).
//! - Every mutation hits the store first; the cursor changes only after the
//!   store call succeeded.
//! - Uniqueness is checked by scanning the cursor, which is treated as
//!   authoritative between notifications.

use crate::model::entity::{InsertFields, NamedEntity};
use crate::repo::store::{EntityStore, StoreResult};
use crate::view_model::error::{
    InsertOutcome, ItemFlags, RemoveOutcome, RenameOutcome, ViewModelError, ViewModelResult,
};
use crate::view_model::notify::{ChangeNotifier, ModelEvent, SubscriptionId};
use crate::view_model::prompt::{Confirmation, ConfirmationPrompt, WarningNotifier};
use log::{info, warn};
use std::marker::PhantomData;

/// Prefix of synthesized names: `"Object (<n>)"`.
pub const DEFAULT_NAME_PREFIX: &str = "Object";

const WARNING_TITLE: &str = "Error";

/// Where `insert_row` places the new entry.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum InsertPosition {
    #[default]
    End,
    Start,
}

/// Editable list adapter for catalog kind `T` backed by store `S`.
pub struct OrderedListModel<T, S> {
    store: S,
    rows: Vec<T>,
    prompt: Box<dyn ConfirmationPrompt>,
    warnings: Box<dyn WarningNotifier>,
    notifier: ChangeNotifier,
    kind: PhantomData<T>,
}

impl<T: NamedEntity, S: EntityStore<T>> OrderedListModel<T, S> {
    /// Wraps already loaded rows (e.g. the areas of one room).
    pub fn new(
        store: S,
        rows: Vec<T>,
        prompt: impl ConfirmationPrompt + 'static,
        warnings: impl WarningNotifier + 'static,
    ) -> Self {
        Self {
            store,
            rows,
            prompt: Box::new(prompt),
            warnings: Box::new(warnings),
            notifier: ChangeNotifier::new(),
            kind: PhantomData,
        }
    }

    /// Loads every row of the kind through `store.get_all()`.
    pub fn load(
        store: S,
        prompt: impl ConfirmationPrompt + 'static,
        warnings: impl WarningNotifier + 'static,
    ) -> StoreResult<Self> {
        let rows = store.get_all()?;
        Ok(Self::new(store, rows, prompt, warnings))
    }

    /// Replaces the cursor after an external change and emits `Reset`.
    pub fn reload(&mut self, rows: Vec<T>) {
        self.rows = rows;
        self.notifier.emit(ModelEvent::Reset);
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn rows(&self) -> &[T] {
        &self.rows
    }

    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    pub fn row(&self, row: usize) -> ViewModelResult<&T> {
        self.rows.get(row).ok_or(ViewModelError::RowOutOfRange {
            row,
            row_count: self.rows.len(),
        })
    }

    pub fn display_name(&self, row: usize) -> ViewModelResult<&str> {
        self.row(row).map(|entry| entry.name())
    }

    /// Every existing row is editable, selectable and enabled.
    pub fn flags(&self, row: usize) -> ViewModelResult<ItemFlags> {
        self.row(row).map(|_| ItemFlags::EDITABLE)
    }

    pub fn subscribe(&mut self, observer: impl FnMut(&ModelEvent) + 'static) -> SubscriptionId {
        self.notifier.subscribe(observer)
    }

    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        self.notifier.unsubscribe(id)
    }

    /// Creates a new entry named `"Object (<row_count>)"`.
    ///
    /// A name collision is reported through the warning notifier and returned
    /// as `UniquenessViolation`; the store is not called in that case.
    ///
    /// # Errors
    /// - `Store` when create fails; the cursor is unchanged.
    pub fn insert_row(
        &mut self,
        position: InsertPosition,
        fields: InsertFields,
    ) -> ViewModelResult<InsertOutcome> {
        let name = default_name(self.rows.len());
        if self.name_taken(&name, None) {
            self.report_duplicate(&name);
            warn!(
                "event=list_insert module=view_model status=skipped reason=duplicate_name kind={:?}",
                T::KIND
            );
            return Ok(InsertOutcome::UniquenessViolation(name));
        }

        let created = self.store.create(&T::draft(name, fields))?;
        let row = match position {
            InsertPosition::End => self.rows.len(),
            InsertPosition::Start => 0,
        };
        info!(
            "event=list_insert module=view_model status=ok kind={:?} row={row} id={}",
            T::KIND,
            created.id()
        );
        self.rows.insert(row, created);
        self.notifier.emit(ModelEvent::Inserted { row });

        Ok(InsertOutcome::Inserted { row })
    }

    /// Deletes the entry at `row` after the user confirms.
    ///
    /// The store delete runs first; the cursor entry is dropped only after it
    /// succeeded.
    ///
    /// # Errors
    /// - `RowOutOfRange` before any prompt is shown.
    /// - `Store` when delete fails; the cursor still holds the entry.
    pub fn remove_row(&mut self, row: usize) -> ViewModelResult<RemoveOutcome> {
        let entry = self.row(row)?;
        let message = format!("Do you really want to delete '{}'?", entry.name());
        if self.prompt.confirm(&message) == Confirmation::Cancelled {
            info!(
                "event=list_remove module=view_model status=cancelled kind={:?} row={row}",
                T::KIND
            );
            return Ok(RemoveOutcome::Cancelled);
        }

        let id = entry.id();
        self.store.delete(id)?;
        self.rows.remove(row);
        info!(
            "event=list_remove module=view_model status=ok kind={:?} row={row} id={id}",
            T::KIND
        );
        self.notifier.emit(ModelEvent::Removed { row });

        Ok(RemoveOutcome::Removed)
    }

    /// Renames the entry at `row`.
    ///
    /// # Errors
    /// - `RowOutOfRange` for an invalid row.
    /// - `Store` when update fails; the cursor keeps the old name.
    pub fn rename(
        &mut self,
        row: usize,
        new_name: impl Into<String>,
    ) -> ViewModelResult<RenameOutcome> {
        let new_name = new_name.into();
        let current = self.row(row)?;
        if current.name() == new_name {
            return Ok(RenameOutcome::NoOp);
        }
        if new_name.trim().is_empty() {
            self.warnings.notify(WARNING_TITLE, "Name must not be empty.");
            return Ok(RenameOutcome::InvalidName);
        }
        if self.name_taken(&new_name, Some(row)) {
            self.report_duplicate(&new_name);
            return Ok(RenameOutcome::UniquenessViolation(new_name));
        }

        let mut renamed = current.clone();
        renamed.set_name(new_name);
        self.store.update(&renamed)?;
        info!(
            "event=list_rename module=view_model status=ok kind={:?} row={row} id={}",
            T::KIND,
            renamed.id()
        );
        self.rows[row] = renamed;
        self.notifier.emit(ModelEvent::Changed { row });

        Ok(RenameOutcome::Renamed)
    }

    fn name_taken(&self, name: &str, except: Option<usize>) -> bool {
        self.rows
            .iter()
            .enumerate()
            .any(|(index, entry)| Some(index) != except && entry.name() == name)
    }

    fn report_duplicate(&self, name: &str) {
        self.warnings.notify(
            WARNING_TITLE,
            &format!("An object named '{name}' already exists."),
        );
    }
}

fn default_name(index: usize) -> String {
    format!("{DEFAULT_NAME_PREFIX} ({index})")
}

#[cfg(test)]
mod tests {
    use super::default_name;

    #[test]
    fn default_name_embeds_row_count() {
        assert_eq!(default_name(0), "Object (0)");
        assert_eq!(default_name(12), "Object (12)");
    }
}
