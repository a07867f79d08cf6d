//! Pagination state

/// Current page of a table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PaginationState {
    /// Zero-based page index.
    pub page_index: usize,
    /// Rows per page; always positive.
    pub page_size: usize,
}

impl Default for PaginationState {
    fn default() -> Self {
        Self {
            page_index: 0,
            page_size: crate::config::DEFAULT_PAGE_SIZES[0],
        }
    }
}

impl PaginationState {
    /// Creates a pagination state. A zero page size is raised to one.
    pub fn new(page_index: usize, page_size: usize) -> Self {
        Self {
            page_index,
            page_size: page_size.max(1),
        }
    }

    /// Returns the number of pages needed for `row_count` rows.
    pub fn page_count(&self, row_count: usize) -> usize {
        row_count.div_ceil(self.page_size.max(1))
    }

    /// Returns the last valid page index for `row_count` rows.
    ///
    /// An empty table still has page 0.
    pub fn last_page_index(&self, row_count: usize) -> usize {
        self.page_count(row_count).saturating_sub(1)
    }

    /// Returns the row range covered by the current page, clipped to `row_count`.
    pub fn row_range(&self, row_count: usize) -> std::ops::Range<usize> {
        let start = self.page_index.saturating_mul(self.page_size).min(row_count);
        let end = start.saturating_add(self.page_size).min(row_count);
        start..end
    }

    /// Returns `true` if there is a page before this one.
    pub fn can_previous_page(&self) -> bool {
        self.page_index > 0
    }

    /// Returns `true` if there is a page after this one.
    pub fn can_next_page(&self, page_count: usize) -> bool {
        self.page_index + 1 < page_count
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_page_count() {
        let page = PaginationState::new(0, 10);
        assert_eq!(page.page_count(0), 0);
        assert_eq!(page.page_count(10), 1);
        assert_eq!(page.page_count(11), 2);
        assert_eq!(page.last_page_index(0), 0);
        assert_eq!(page.last_page_index(25), 2);
    }

    #[test]
    fn test_row_range() {
        assert_eq!(PaginationState::new(1, 10).row_range(25), 10..20);
        assert_eq!(PaginationState::new(2, 10).row_range(25), 20..25);
        assert_eq!(PaginationState::new(9, 10).row_range(25), 25..25);
    }

    #[test]
    fn test_navigation_flags() {
        let page = PaginationState::new(0, 10);
        assert!(!page.can_previous_page());
        assert!(page.can_next_page(2));
        assert!(!PaginationState::new(1, 10).can_next_page(2));
    }
}
