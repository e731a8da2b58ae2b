//! Selection-driven command enablement.
//!
//! `command_state` is a pure function of `(selected, total)`;
//! `SelectionController` only tracks which rows are selected and keeps the
//! indices aligned with model change events.

use crate::view_model::notify::ModelEvent;
use std::collections::BTreeSet;

/// Enabled state of a view's dependent commands plus the counter label.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandState {
    /// Edit-like command; needs exactly one selected row.
    pub act_on_one: bool,
    /// Delete/complete-like command; needs at least one selected row.
    pub act_on_many: bool,
    /// `"<selected> of <total> selected"`.
    pub label: String,
}

/// Computes command enablement for a selection of `selected` rows out of `total`.
pub fn command_state(selected: usize, total: usize) -> CommandState {
    CommandState {
        act_on_one: selected == 1,
        act_on_many: selected >= 1,
        label: format!("{selected} of {total} selected"),
    }
}

/// Commands a view exposes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CommandSet {
    /// Board views only offer the bulk command.
    pub has_act_on_one: bool,
}

impl Default for CommandSet {
    fn default() -> Self {
        Self {
            has_act_on_one: true,
        }
    }
}

/// Ordered set of selected row indices.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Selection {
    rows: BTreeSet<usize>,
}

impl Selection {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_rows(rows: impl IntoIterator<Item = usize>) -> Self {
        Self {
            rows: rows.into_iter().collect(),
        }
    }

    pub fn insert(&mut self, row: usize) -> bool {
        self.rows.insert(row)
    }

    pub fn remove(&mut self, row: usize) -> bool {
        self.rows.remove(&row)
    }

    pub fn contains(&self, row: usize) -> bool {
        self.rows.contains(&row)
    }

    pub fn clear(&mut self) {
        self.rows.clear();
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Highest index first, so removing rows in this order never shifts a
    /// row that is still pending.
    pub fn descending(&self) -> impl Iterator<Item = usize> + '_ {
        self.rows.iter().rev().copied()
    }

    pub fn iter(&self) -> impl Iterator<Item = usize> + '_ {
        self.rows.iter().copied()
    }

    pub fn max(&self) -> Option<usize> {
        self.rows.last().copied()
    }
}

/// Tracks one view's selection and recomputes its `CommandState`.
#[derive(Debug, Clone)]
pub struct SelectionController {
    commands: CommandSet,
    selection: Selection,
    total_rows: usize,
    state: CommandState,
}

impl SelectionController {
    pub fn new(commands: CommandSet, total_rows: usize) -> Self {
        let mut controller = Self {
            commands,
            selection: Selection::new(),
            total_rows,
            state: command_state(0, total_rows),
        };
        controller.recompute();
        controller
    }

    pub fn state(&self) -> &CommandState {
        &self.state
    }

    pub fn selection(&self) -> &Selection {
        &self.selection
    }

    pub fn total_rows(&self) -> usize {
        self.total_rows
    }

    /// Replaces the selection; indices outside the current rows are dropped.
    pub fn set_selection(&mut self, selection: Selection) {
        let total = self.total_rows;
        self.selection = Selection::from_rows(selection.iter().filter(|row| *row < total));
        self.recompute();
    }

    pub fn select(&mut self, row: usize) {
        if row < self.total_rows {
            self.selection.insert(row);
            self.recompute();
        }
    }

    pub fn deselect(&mut self, row: usize) {
        self.selection.remove(row);
        self.recompute();
    }

    pub fn clear(&mut self) {
        self.selection.clear();
        self.recompute();
    }

    /// Sets the row count after a reload and clears the selection.
    pub fn reset(&mut self, total_rows: usize) {
        self.total_rows = total_rows;
        self.selection.clear();
        self.recompute();
    }

    /// Keeps selected indices pointing at the same rows after a model change.
    ///
    /// `Reset` clears the selection; the caller follows up with `reset` once
    /// the new row count is known.
    pub fn apply(&mut self, event: &ModelEvent) {
        match *event {
            ModelEvent::Inserted { row } => {
                self.total_rows += 1;
                self.selection = Selection::from_rows(
                    self.selection
                        .iter()
                        .map(|selected| if selected >= row { selected + 1 } else { selected }),
                );
            }
            ModelEvent::Removed { row } => {
                self.total_rows = self.total_rows.saturating_sub(1);
                self.selection = Selection::from_rows(self.selection.iter().filter_map(
                    |selected| match selected.cmp(&row) {
                        std::cmp::Ordering::Less => Some(selected),
                        std::cmp::Ordering::Equal => None,
                        std::cmp::Ordering::Greater => Some(selected - 1),
                    },
                ));
            }
            ModelEvent::Changed { .. } => {}
            ModelEvent::Reset => self.selection.clear(),
        }
        self.recompute();
    }

    fn recompute(&mut self) {
        let mut state = command_state(self.selection.len(), self.total_rows);
        if !self.commands.has_act_on_one {
            state.act_on_one = false;
        }
        self.state = state;
    }
}
