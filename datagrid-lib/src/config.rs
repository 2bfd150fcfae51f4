//! Table configuration

use crate::filter::FilterSet;
use crate::pipeline::DEFAULT_PAGE_SIZE;
use crate::pipeline::SortConfig;
use crate::selection::SelectionMode;

/// Field read for row identifiers unless configured otherwise.
pub const DEFAULT_KEY_FIELD: &str = "id";

/// Options for one mounted table.
///
/// Options seed the initial [`TableState`](crate::TableState); after that
/// the state evolves through mutations and the options only supply the key
/// field.
///
/// # Example
///
/// ```
/// use datagrid_lib::TableOptions;
/// use datagrid_lib::pipeline::SortConfig;
/// use datagrid_lib::selection::SelectionMode;
///
/// let options = TableOptions::default()
///     .with_key_field("case_id")
///     .with_page_size(25)
///     .with_selection_mode(SelectionMode::Single)
///     .with_sort(SortConfig::desc("updated_at"));
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct TableOptions {
    /// Row field holding the identifier.
    ///
    /// Default: `"id"`. Rows without it fall back to their position.
    pub key_field: String,

    /// Rows per page.
    ///
    /// Default: 10
    pub page_size: usize,

    /// Initial page (1-based).
    ///
    /// Default: 1
    pub page: usize,

    /// Selection mode.
    ///
    /// Default: multiple
    pub selection_mode: SelectionMode,

    /// Initial sort, if any.
    pub sort: Option<SortConfig>,

    /// Initial filters (before any persisted set is applied).
    pub filters: FilterSet,
}

impl Default for TableOptions {
    fn default() -> Self {
        Self {
            key_field: DEFAULT_KEY_FIELD.to_string(),
            page_size: DEFAULT_PAGE_SIZE,
            page: 1,
            selection_mode: SelectionMode::Multiple,
            sort: None,
            filters: FilterSet::default(),
        }
    }
}

impl TableOptions {
    /// Creates options with default values.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the identifier field.
    pub fn with_key_field(mut self, key_field: impl Into<String>) -> Self {
        self.key_field = key_field.into();
        self
    }

    /// Sets the page size. Zero is treated as one.
    pub fn with_page_size(mut self, page_size: usize) -> Self {
        self.page_size = page_size.max(1);
        self
    }

    /// Sets the initial page.
    pub fn with_page(mut self, page: usize) -> Self {
        self.page = page.max(1);
        self
    }

    /// Sets the selection mode.
    pub fn with_selection_mode(mut self, mode: SelectionMode) -> Self {
        self.selection_mode = mode;
        self
    }

    /// Sets the initial sort.
    pub fn with_sort(mut self, sort: SortConfig) -> Self {
        self.sort = Some(sort);
        self
    }

    /// Sets the initial filters.
    pub fn with_filters(mut self, filters: FilterSet) -> Self {
        self.filters = filters;
        self
    }

    /// Uses a previously saved filter set when one was found.
    ///
    /// Pairs with [`FilterPersistence::load`](crate::persist::FilterPersistence::load):
    /// `None` keeps the configured initial filters.
    pub fn with_saved_filters(mut self, saved: Option<FilterSet>) -> Self {
        if let Some(filters) = saved {
            self.filters = filters;
        }
        self
    }
}
