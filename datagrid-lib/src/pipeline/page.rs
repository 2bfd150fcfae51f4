//! Pagination stage

use std::ops::Range;

use serde::Deserialize;
use serde::Serialize;

/// Default number of rows per page.
pub const DEFAULT_PAGE_SIZE: usize = 10;

/// Requested page (1-based) and page size.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Pagination {
    /// 1-based page number.
    pub page: usize,
    /// Rows per page. Never zero after [`Pagination::new`].
    pub page_size: usize,
}

impl Default for Pagination {
    fn default() -> Self {
        Self {
            page: 1,
            page_size: DEFAULT_PAGE_SIZE,
        }
    }
}

impl Pagination {
    /// Creates a pagination request. A page size of zero becomes one.
    pub fn new(page: usize, page_size: usize) -> Self {
        Self {
            page: page.max(1),
            page_size: page_size.max(1),
        }
    }

    /// Returns a copy with a new page size, reset to page 1.
    pub fn with_page_size(self, page_size: usize) -> Self {
        Self::new(1, page_size)
    }

    /// Returns a copy on another page (not yet clamped).
    pub fn with_page(self, page: usize) -> Self {
        Self::new(page, self.page_size)
    }

    /// Number of pages needed for `filtered` rows.
    pub fn total_pages(&self, filtered: usize) -> usize {
        filtered.div_ceil(self.page_size.max(1))
    }

    /// Clamps the page to `[1, max(1, total_pages)]`.
    pub fn clamp(self, filtered: usize) -> Self {
        let last = self.total_pages(filtered).max(1);
        Self::new(self.page.clamp(1, last), self.page_size)
    }

    /// Index range of the current page within `filtered` rows.
    ///
    /// Empty when the page lies past the end.
    pub fn range(&self, filtered: usize) -> Range<usize> {
        let page_size = self.page_size.max(1);
        let start = self.page.max(1).saturating_sub(1).saturating_mul(page_size);
        let start = start.min(filtered);
        let end = start.saturating_add(page_size).min(filtered);
        start..end
    }
}

/// Counts and bounds of the current page.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct PageStats {
    /// Rows before filtering.
    pub total: usize,
    /// Rows after filtering.
    pub filtered: usize,
    /// Current 1-based page.
    pub page: usize,
    /// Rows per page.
    pub page_size: usize,
    /// `ceil(filtered / page_size)`.
    pub total_pages: usize,
    /// 1-based index of the first row shown, 0 when nothing is shown.
    pub start_index: usize,
    /// 1-based inclusive index of the last row shown, 0 when nothing is shown.
    pub end_index: usize,
}

/// One page of items plus its statistics.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Page<'a, T> {
    items: &'a [T],
    stats: PageStats,
}

impl<'a, T> Page<'a, T> {
    /// Returns the items on this page.
    pub fn items(&self) -> &'a [T] {
        self.items
    }

    /// Returns the page statistics.
    pub fn stats(&self) -> PageStats {
        self.stats
    }

    /// Returns `true` if this page has no items.
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Returns the number of items on this page.
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Returns `true` if there are pages after this one.
    pub fn has_more(&self) -> bool {
        self.stats.page < self.stats.total_pages
    }
}

/// Slices `filtered` to the requested page.
///
/// `total` is the unfiltered row count, reported in the stats only. The
/// page is used as given; callers clamp beforehand.
pub fn paginate<'a, T>(filtered: &'a [T], total: usize, pagination: &Pagination) -> Page<'a, T> {
    let range = pagination.range(filtered.len());
    let shown = !range.is_empty();
    let stats = PageStats {
        total,
        filtered: filtered.len(),
        page: pagination.page.max(1),
        page_size: pagination.page_size.max(1),
        total_pages: pagination.total_pages(filtered.len()),
        start_index: if shown { range.start + 1 } else { 0 },
        end_index: if shown { range.end } else { 0 },
    };
    Page {
        items: &filtered[range],
        stats,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_middle_page_bounds() {
        let items: Vec<usize> = (0..25).collect();
        let page = paginate(&items, 30, &Pagination::new(2, 10));
        assert_eq!(page.items(), &items[10..20]);
        let stats = page.stats();
        assert_eq!(stats.total, 30);
        assert_eq!(stats.filtered, 25);
        assert_eq!(stats.total_pages, 3);
        assert_eq!((stats.start_index, stats.end_index), (11, 20));
        assert!(page.has_more());
    }

    #[test]
    fn test_last_page_is_partial() {
        let items: Vec<usize> = (0..25).collect();
        let page = paginate(&items, 25, &Pagination::new(3, 10));
        assert_eq!(page.len(), 5);
        assert_eq!((page.stats().start_index, page.stats().end_index), (21, 25));
        assert!(!page.has_more());
    }

    #[test]
    fn test_empty_input() {
        let items: Vec<usize> = Vec::new();
        let page = paginate(&items, 4, &Pagination::default());
        assert!(page.is_empty());
        let stats = page.stats();
        assert_eq!(stats.total_pages, 0);
        assert_eq!((stats.start_index, stats.end_index), (0, 0));
    }

    #[test]
    fn test_clamp_bounds() {
        assert_eq!(Pagination::new(9, 10).clamp(25).page, 3);
        assert_eq!(Pagination::new(9, 10).clamp(0).page, 1);
        assert_eq!(Pagination::new(0, 0).page_size, 1);
    }

    #[test]
    fn test_page_past_end_is_empty() {
        let items: Vec<usize> = (0..5).collect();
        let page = paginate(&items, 5, &Pagination::new(4, 2));
        assert!(page.is_empty());
        assert_eq!(page.stats().start_index, 0);
    }
}
