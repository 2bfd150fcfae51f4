//! Row selection state.
//!
//! Selection uses [`RowId`]s so it stays stable while the pipeline re-sorts,
//! re-filters and re-pages the rows. "Select all" and the aggregate flags
//! are always computed against the ids of the current filtered view, which
//! callers pass in.

use std::collections::HashSet;

use crate::model::RowId;

/// Selection mode for a table.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum SelectionMode {
    /// No selection allowed
    None,
    /// At most one row selected
    Single,
    /// Any number of rows selected
    #[default]
    Multiple,
}

/// ID-based selection state.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Selection {
    mode: SelectionMode,
    selected: HashSet<RowId>,
}

impl Selection {
    /// Create a new empty selection.
    pub fn new(mode: SelectionMode) -> Self {
        Self {
            mode,
            selected: HashSet::new(),
        }
    }

    /// Get the selection mode.
    pub fn mode(&self) -> SelectionMode {
        self.mode
    }

    /// Change the selection mode.
    ///
    /// Switching to `None` clears the selection; switching to `Single`
    /// keeps at most the smallest selected id.
    pub fn set_mode(&mut self, mode: SelectionMode) {
        self.mode = mode;
        match mode {
            SelectionMode::None => self.selected.clear(),
            SelectionMode::Single if self.selected.len() > 1 => {
                let keep = self.selected().into_iter().next();
                self.selected.clear();
                self.selected.extend(keep);
            }
            _ => {}
        }
    }

    /// Get all selected IDs (sorted for deterministic ordering).
    pub fn selected(&self) -> Vec<RowId> {
        let mut ids: Vec<_> = self.selected.iter().cloned().collect();
        ids.sort();
        ids
    }

    /// Check if an ID is selected.
    pub fn is_selected(&self, id: &str) -> bool {
        self.selected.contains(id)
    }

    /// Get the number of selected items.
    pub fn len(&self) -> usize {
        self.selected.len()
    }

    /// Check if nothing is selected.
    pub fn is_empty(&self) -> bool {
        self.selected.is_empty()
    }

    /// Check or uncheck one row.
    ///
    /// In `Single` mode checking a row replaces the whole selection.
    /// Returns `true` if the selection changed.
    pub fn select(&mut self, id: &RowId, checked: bool) -> bool {
        match (self.mode, checked) {
            (SelectionMode::None, _) => false,
            (_, false) => self.selected.remove(id.as_str()),
            (SelectionMode::Single, true) => {
                if self.selected.len() == 1 && self.selected.contains(id.as_str()) {
                    return false;
                }
                self.selected.clear();
                self.selected.insert(id.clone());
                true
            }
            (SelectionMode::Multiple, true) => self.selected.insert(id.clone()),
        }
    }

    /// Toggle selection of an ID.
    /// Returns the new checked state.
    pub fn toggle(&mut self, id: &RowId) -> bool {
        let checked = !self.is_selected(id.as_str());
        self.select(id, checked);
        self.is_selected(id.as_str())
    }

    /// Check or uncheck every row of the filtered view.
    ///
    /// Checking sets the selection to exactly `filtered`. Only meaningful
    /// in `Multiple` mode; a no-op otherwise. Unchecking clears.
    pub fn select_all(&mut self, checked: bool, filtered: &[RowId]) {
        if self.mode != SelectionMode::Multiple {
            return;
        }
        self.selected.clear();
        if checked {
            self.selected.extend(filtered.iter().cloned());
        }
    }

    /// Clear all selection.
    /// Returns the IDs that were deselected.
    pub fn clear(&mut self) -> Vec<RowId> {
        self.selected.drain().collect()
    }

    /// Selected ids still present in `filtered`, in view order.
    pub fn visible_selected(&self, filtered: &[RowId]) -> Vec<RowId> {
        filtered
            .iter()
            .filter(|id| self.selected.contains(id.as_str()))
            .cloned()
            .collect()
    }

    /// `true` iff the selection is exactly the filtered id set.
    ///
    /// Rows selected earlier but hidden by the current filter make this
    /// `false`. Repeated ids in `filtered` count once.
    pub fn all_selected(&self, filtered: &[RowId]) -> bool {
        if filtered.is_empty() {
            return false;
        }
        let distinct: HashSet<&str> = filtered.iter().map(RowId::as_str).collect();
        distinct.len() == self.selected.len()
            && distinct.iter().all(|id| self.selected.contains(*id))
    }

    /// `true` when some, but not all, of the filtered rows are selected.
    pub fn some_selected(&self, filtered: &[RowId]) -> bool {
        !self.all_selected(filtered)
            && filtered.iter().any(|id| self.selected.contains(id.as_str()))
    }
}
