//! Expanded-row state.

use std::collections::HashSet;

use crate::model::RowId;

/// Set of rows whose detail row is open.
///
/// Pure membership; independent of sort, filter and page. The view only
/// reports expansion for the rows it renders.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Expansion {
    expanded: HashSet<RowId>,
}

impl Expansion {
    /// Create a new state with nothing expanded.
    pub fn new() -> Self {
        Self::default()
    }

    /// Check if a row is expanded.
    pub fn is_expanded(&self, id: &str) -> bool {
        self.expanded.contains(id)
    }

    /// Toggle one row. Returns the new expanded state.
    pub fn toggle(&mut self, id: &RowId) -> bool {
        if self.expanded.remove(id.as_str()) {
            false
        } else {
            self.expanded.insert(id.clone());
            true
        }
    }

    /// Open or close one row.
    pub fn set(&mut self, id: &RowId, expanded: bool) {
        if expanded {
            self.expanded.insert(id.clone());
        } else {
            self.expanded.remove(id.as_str());
        }
    }

    /// Expand every given row.
    pub fn expand_all(&mut self, ids: &[RowId]) {
        self.expanded.extend(ids.iter().cloned());
    }

    /// Collapse everything.
    pub fn collapse_all(&mut self) {
        self.expanded.clear();
    }

    /// Get all expanded IDs, sorted.
    pub fn expanded(&self) -> Vec<RowId> {
        let mut ids: Vec<_> = self.expanded.iter().cloned().collect();
        ids.sort();
        ids
    }

    /// Number of expanded rows.
    pub fn len(&self) -> usize {
        self.expanded.len()
    }

    /// Check if nothing is expanded.
    pub fn is_empty(&self) -> bool {
        self.expanded.is_empty()
    }
}
