//! Table engine entry point.
//!
//! [`Table`] binds a row collection to its columns and options. All view
//! state lives in a caller-owned [`TableState`]; [`Table::view`] derives the
//! rendered page from it and [`Table::apply`] returns the next state for a
//! [`Mutation`]. Neither call mutates the rows or the state passed in.
//!
//! # Example
//!
//! ```
//! use datagrid_lib::{Mutation, Table, TableOptions};
//! use datagrid_lib::filter::FilterRule;
//! use datagrid_lib::model::{Column, Row};
//!
//! let rows: Vec<Row> = (1..=30i64)
//!     .map(|i| Row::new().set("id", i).set("suite", if i % 2 == 0 { "api" } else { "ui" }))
//!     .collect();
//! let columns = vec![
//!     Column::new("id", "ID").sortable(),
//!     Column::new("suite", "Suite").filterable(),
//! ];
//!
//! let table = Table::configure(&rows, columns, TableOptions::default());
//! let state = table.initial_state();
//! let state = table.apply(&state, Mutation::AddRule(FilterRule::eq("suite", "api")));
//! let state = table.apply(&state, Mutation::ToggleSort("id".into()));
//!
//! let view = table.view(&state);
//! assert_eq!(view.stats.filtered, 15);
//! assert_eq!(view.rows.len(), 10);
//! assert_eq!(view.rows[0].id.as_str(), "2");
//! ```

use std::collections::HashSet;

use log::debug;
use log::warn;

use crate::config::TableOptions;
use crate::expansion::Expansion;
use crate::filter::FilterFault;
use crate::filter::FilterRule;
use crate::filter::FilterSet;
use crate::filter::Logic;
use crate::model::Column;
use crate::model::RowId;
use crate::model::TableRow;
use crate::pipeline::Pagination;
use crate::pipeline::SortConfig;
use crate::pipeline::filter_indices;
use crate::pipeline::paginate;
use crate::pipeline::sort_indices;
use crate::selection::Selection;

/// Caller-owned view state of one mounted table.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct TableState {
    /// Active sort, if any.
    pub sort: Option<SortConfig>,
    /// Committed filter set.
    pub filters: FilterSet,
    /// Requested page.
    pub pagination: Pagination,
    /// Selected rows.
    pub selection: Selection,
    /// Expanded rows.
    pub expansion: Expansion,
}

impl TableState {
    /// Seeds a state from options.
    pub fn new(options: &TableOptions) -> Self {
        Self {
            sort: options.sort.clone(),
            filters: options.filters.clone(),
            pagination: Pagination::new(options.page, options.page_size),
            selection: Selection::new(options.selection_mode),
            expansion: Expansion::new(),
        }
    }
}

/// A state change requested by the rendering layer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Mutation {
    /// Header click: cycles asc → desc → unset on a sortable column.
    ToggleSort(String),
    /// Replace the sort outright.
    SetSort(Option<SortConfig>),
    /// Append a rule.
    AddRule(FilterRule),
    /// Append a rule seeded from a column's defaults.
    AddRuleFor(String),
    /// Replace the rule at `index`.
    UpdateRule { index: usize, rule: FilterRule },
    /// Remove the rule at `index`.
    RemoveRule(usize),
    /// Remove every rule.
    ClearRules,
    /// Change the combination mode.
    SetLogic(Logic),
    /// Replace the whole filter set (e.g. after loading a saved one).
    ReplaceFilters(FilterSet),
    /// Jump to a page (clamped).
    SetPage(usize),
    /// Next page (clamped).
    NextPage,
    /// Previous page (clamped).
    PrevPage,
    /// First page.
    FirstPage,
    /// Last page.
    LastPage,
    /// Change the page size; resets to page 1.
    SetPageSize(usize),
    /// Check or uncheck one row.
    Select { id: RowId, checked: bool },
    /// Check or uncheck every row of the filtered view.
    SelectAll(bool),
    /// Drop the whole selection.
    ClearSelection,
    /// Toggle one row's detail row.
    ToggleExpanded(RowId),
    /// Open or close one row's detail row.
    SetExpanded { id: RowId, expanded: bool },
    /// Expand every row of the filtered view.
    ExpandAll,
    /// Collapse every row.
    CollapseAll,
}

impl Mutation {
    /// Returns `true` if the mutation changes the committed filter set.
    ///
    /// Hosts persisting filters save after these.
    pub fn is_filter_change(&self) -> bool {
        matches!(
            self,
            Mutation::AddRule(_)
                | Mutation::AddRuleFor(_)
                | Mutation::UpdateRule { .. }
                | Mutation::RemoveRule(_)
                | Mutation::ClearRules
                | Mutation::SetLogic(_)
                | Mutation::ReplaceFilters(_)
        )
    }

    fn moves_page(&self) -> bool {
        self.is_filter_change()
            || matches!(
                self,
                Mutation::SetPage(_)
                    | Mutation::NextPage
                    | Mutation::PrevPage
                    | Mutation::FirstPage
                    | Mutation::LastPage
                    | Mutation::SetPageSize(_)
            )
    }
}

/// Counts shown next to the table controls.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct TableStats {
    /// Rows before filtering.
    pub total: usize,
    /// Rows after filtering.
    pub filtered: usize,
    /// Selected rows (including rows hidden by the filter).
    pub selected: usize,
    /// Expanded rows.
    pub expanded: usize,
    /// Current 1-based page.
    pub page: usize,
    /// Number of pages.
    pub total_pages: usize,
    /// Rows per page.
    pub page_size: usize,
    /// 1-based index of the first row shown, 0 when empty.
    pub start_index: usize,
    /// 1-based inclusive index of the last row shown, 0 when empty.
    pub end_index: usize,
}

/// One rendered row.
#[derive(Debug)]
pub struct ViewRow<'a, R> {
    /// Row identifier.
    pub id: &'a RowId,
    /// The row itself.
    pub row: &'a R,
    /// Position in the caller's collection.
    pub index: usize,
    /// Whether the row is selected.
    pub selected: bool,
    /// Whether the row's detail row is open.
    pub expanded: bool,
}

impl<R> Clone for ViewRow<'_, R> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<R> Copy for ViewRow<'_, R> {}

/// Output of one pipeline run.
#[derive(Debug)]
pub struct TableView<'a, R> {
    /// Rows of the current page, in display order.
    pub rows: Vec<ViewRow<'a, R>>,
    /// Counts and page bounds.
    pub stats: TableStats,
    /// Header checkbox: every filtered row selected.
    pub all_selected: bool,
    /// Header checkbox: indeterminate.
    pub some_selected: bool,
    /// Comparator failures of this pass, for display.
    pub fault: Option<FilterFault>,
}

impl<R> TableView<'_, R> {
    /// Whether a row on this page has its detail row open.
    ///
    /// Rows not on the page always report `false`.
    pub fn is_expanded(&self, id: &str) -> bool {
        self.rows.iter().any(|r| r.expanded && r.id.as_str() == id)
    }

    /// Returns the identifiers on this page.
    pub fn ids(&self) -> Vec<&RowId> {
        self.rows.iter().map(|r| r.id).collect()
    }

    /// Returns `true` if the page is empty.
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

/// A row collection bound to its columns and options.
#[derive(Debug)]
pub struct Table<'a, R> {
    rows: &'a [R],
    ids: Vec<RowId>,
    columns: Vec<Column>,
    options: TableOptions,
}

impl<'a, R: TableRow> Table<'a, R> {
    /// Binds rows to columns and options.
    ///
    /// Row identifiers are derived here, once: the `key_field` value, or the
    /// row's position when that field is missing or blank.
    pub fn configure(rows: &'a [R], columns: Vec<Column>, options: TableOptions) -> Self {
        let ids = ingest_ids(rows, &options.key_field);
        debug!(
            "[table] configured {} rows, {} columns (key field '{}')",
            rows.len(),
            columns.len(),
            options.key_field
        );
        Self {
            rows,
            ids,
            columns,
            options,
        }
    }

    /// Returns the bound rows.
    pub fn rows(&self) -> &'a [R] {
        self.rows
    }

    /// Returns the column definitions.
    pub fn columns(&self) -> &[Column] {
        &self.columns
    }

    /// Looks up a column by key.
    pub fn column(&self, key: &str) -> Option<&Column> {
        self.columns.iter().find(|c| c.key == key)
    }

    /// Returns the options.
    pub fn options(&self) -> &TableOptions {
        &self.options
    }

    /// Returns the identifiers of all rows, in input order.
    pub fn ids(&self) -> &[RowId] {
        &self.ids
    }

    /// Returns the row with the given identifier.
    pub fn row(&self, id: &str) -> Option<&'a R> {
        self.ids
            .iter()
            .position(|i| i.as_str() == id)
            .map(|index| &self.rows[index])
    }

    /// Builds the starting state from the options, page clamped.
    pub fn initial_state(&self) -> TableState {
        let mut state = TableState::new(&self.options);
        let filtered = self.filtered_order(&state).0.len();
        state.pagination = state.pagination.clamp(filtered);
        state
    }

    /// Sort then filter. Returns row indices in display order.
    fn filtered_order(&self, state: &TableState) -> (Vec<usize>, Option<FilterFault>) {
        let order = sort_indices(self.rows, state.sort.as_ref());
        let outcome = filter_indices(self.rows, &order, &state.filters, &self.columns);
        (outcome.indices, outcome.fault)
    }

    /// Identifiers of the filtered rows, in display order.
    pub fn filtered_ids(&self, state: &TableState) -> Vec<RowId> {
        self.filtered_order(state)
            .0
            .into_iter()
            .map(|i| self.ids[i].clone())
            .collect()
    }

    /// Runs Sort → Filter → Paginate for `state`.
    pub fn view(&self, state: &TableState) -> TableView<'_, R> {
        let (order, fault) = self.filtered_order(state);
        let filtered_ids: Vec<RowId> = order.iter().map(|&i| self.ids[i].clone()).collect();

        let pagination = state.pagination.clamp(order.len());
        let page = paginate(&order, self.rows.len(), &pagination);
        let page_stats = page.stats();

        let rows: Vec<ViewRow<'_, R>> = page
            .items()
            .iter()
            .map(|&index| {
                let id = &self.ids[index];
                ViewRow {
                    id,
                    row: &self.rows[index],
                    index,
                    selected: state.selection.is_selected(id.as_str()),
                    expanded: state.expansion.is_expanded(id.as_str()),
                }
            })
            .collect();

        let stats = TableStats {
            total: page_stats.total,
            filtered: page_stats.filtered,
            selected: state.selection.len(),
            expanded: state.expansion.len(),
            page: page_stats.page,
            total_pages: page_stats.total_pages,
            page_size: page_stats.page_size,
            start_index: page_stats.start_index,
            end_index: page_stats.end_index,
        };
        debug!(
            "[table] view: {} total, {} filtered, page {}/{} ({} rows)",
            stats.total,
            stats.filtered,
            stats.page,
            stats.total_pages,
            rows.len()
        );

        TableView {
            rows,
            stats,
            all_selected: state.selection.all_selected(&filtered_ids),
            some_selected: state.selection.some_selected(&filtered_ids),
            fault,
        }
    }

    /// Returns the state after applying `mutation`.
    pub fn apply(&self, state: &TableState, mutation: Mutation) -> TableState {
        debug!("[table] apply {:?}", mutation);
        let mut next = state.clone();
        let moves_page = mutation.moves_page();

        match mutation {
            Mutation::ToggleSort(key) => match self.column(&key) {
                Some(column) if column.sortable => {
                    next.sort = SortConfig::cycle(next.sort.as_ref(), &key);
                }
                _ => debug!("[table] ignoring sort on non-sortable column '{}'", key),
            },
            Mutation::SetSort(sort) => next.sort = sort,
            Mutation::AddRule(rule) => next.filters.rules.push(rule),
            Mutation::AddRuleFor(key) => match self.column(&key) {
                Some(column) => next.filters.rules.push(column.initial_rule()),
                None => debug!("[table] ignoring rule for unknown column '{}'", key),
            },
            Mutation::UpdateRule { index, rule } => {
                if let Some(slot) = next.filters.rules.get_mut(index) {
                    *slot = rule;
                }
            }
            Mutation::RemoveRule(index) => {
                if index < next.filters.rules.len() {
                    next.filters.rules.remove(index);
                }
            }
            Mutation::ClearRules => next.filters.rules.clear(),
            Mutation::SetLogic(logic) => next.filters.logic = logic,
            Mutation::ReplaceFilters(filters) => next.filters = filters,
            Mutation::SetPage(page) => next.pagination = next.pagination.with_page(page),
            Mutation::NextPage => {
                next.pagination = next.pagination.with_page(next.pagination.page.saturating_add(1));
            }
            Mutation::PrevPage => {
                next.pagination = next.pagination.with_page(next.pagination.page.saturating_sub(1));
            }
            Mutation::FirstPage => next.pagination = next.pagination.with_page(1),
            Mutation::LastPage => next.pagination = next.pagination.with_page(usize::MAX),
            Mutation::SetPageSize(size) => next.pagination = next.pagination.with_page_size(size),
            Mutation::Select { id, checked } => {
                next.selection.select(&id, checked);
            }
            Mutation::SelectAll(checked) => {
                let filtered = self.filtered_ids(&next);
                next.selection.select_all(checked, &filtered);
            }
            Mutation::ClearSelection => {
                next.selection.clear();
            }
            Mutation::ToggleExpanded(id) => {
                next.expansion.toggle(&id);
            }
            Mutation::SetExpanded { id, expanded } => next.expansion.set(&id, expanded),
            Mutation::ExpandAll => {
                let filtered = self.filtered_ids(&next);
                next.expansion.expand_all(&filtered);
            }
            Mutation::CollapseAll => next.expansion.collapse_all(),
        }

        if moves_page {
            let filtered = self.filtered_order(&next).0.len();
            next.pagination = next.pagination.clamp(filtered);
        }
        next
    }
}

fn ingest_ids<R: TableRow>(rows: &[R], key_field: &str) -> Vec<RowId> {
    let ids: Vec<RowId> = rows
        .iter()
        .enumerate()
        .map(|(index, row)| {
            row.value(key_field)
                .and_then(|v| RowId::from_value(&v))
                .unwrap_or_else(|| RowId::from(index))
        })
        .collect();

    let mut seen = HashSet::with_capacity(ids.len());
    let duplicates = ids.iter().filter(|id| !seen.insert(id.as_str())).count();
    if duplicates > 0 {
        warn!(
            "[table] {} duplicate row id(s) for key field '{}'",
            duplicates, key_field
        );
    }
    ids
}
