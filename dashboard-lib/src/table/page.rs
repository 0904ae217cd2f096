//! Pagination state and helpers.

use std::ops::Range;

/// Default number of rows per page.
pub const DEFAULT_PAGE_SIZE: usize = 10;

/// Default page-size menu.
pub const DEFAULT_PAGE_SIZE_OPTIONS: [usize; 4] = [5, 10, 20, 50];

/// Who slices rows into pages.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PaginationMode {
    /// The engine slices the sorted rows.
    #[default]
    Client,
    /// The caller slices; the engine returns every sorted row and reports
    /// `total_items` (falling back to the row count when absent).
    Manual { total_items: Option<usize> },
}

/// Page size and zero-based current page.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Pagination {
    pub page_size: usize,
    pub current_page: usize,
}

impl Default for Pagination {
    fn default() -> Self {
        Self::new(DEFAULT_PAGE_SIZE)
    }
}

impl Pagination {
    /// Start on the first page. A zero page size is raised to 1.
    pub fn new(page_size: usize) -> Self {
        Self {
            page_size: page_size.max(1),
            current_page: 0,
        }
    }

    /// Set the current page (unclamped).
    pub fn with_page(mut self, page: usize) -> Self {
        self.current_page = page;
        self
    }

    /// Copy of this state with the page clamped for `total_items`.
    pub fn clamped(self, total_items: usize) -> Self {
        let pages = total_pages(total_items, self.page_size);
        Self {
            page_size: self.page_size.max(1),
            current_page: clamp_page(self.current_page, pages),
        }
    }

    /// Index range of the current page within `total_items` rows.
    pub fn range(&self, total_items: usize) -> Range<usize> {
        let size = self.page_size.max(1);
        let start = self.current_page.saturating_mul(size).min(total_items);
        let end = start.saturating_add(size).min(total_items);
        start..end
    }
}

/// `max(1, ceil(total_items / page_size))`.
pub fn total_pages(total_items: usize, page_size: usize) -> usize {
    total_items.div_ceil(page_size.max(1)).max(1)
}

/// Clamps `page` into `[0, total_pages - 1]`.
pub fn clamp_page(page: usize, total_pages: usize) -> usize {
    page.min(total_pages.saturating_sub(1))
}

/// The user-facing page-size menu.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageSizeMenu {
    options: Vec<usize>,
}

impl Default for PageSizeMenu {
    fn default() -> Self {
        Self::new(DEFAULT_PAGE_SIZE_OPTIONS)
    }
}

impl PageSizeMenu {
    /// Build a menu; non-positive sizes are dropped.
    pub fn new(options: impl IntoIterator<Item = usize>) -> Self {
        Self {
            options: options.into_iter().filter(|size| *size > 0).collect(),
        }
    }

    pub fn options(&self) -> &[usize] {
        &self.options
    }

    /// The menu is inert with at most one choice.
    pub fn is_disabled(&self) -> bool {
        self.options.len() <= 1
    }

    /// `(size, label)` pairs for display.
    pub fn labels(&self) -> Vec<(usize, String)> {
        self.options
            .iter()
            .map(|size| (*size, format!("{} per page", size)))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_total_pages_minimum_one() {
        assert_eq!(total_pages(0, 10), 1);
        assert_eq!(total_pages(10, 10), 1);
        assert_eq!(total_pages(11, 10), 2);
        assert_eq!(total_pages(5, 0), 5);
    }

    #[test]
    fn test_range_past_end_is_empty() {
        let page = Pagination::new(10).with_page(5);
        assert_eq!(page.range(12), 12..12);
        assert_eq!(page.clamped(12).range(12), 10..12);
    }

    #[test]
    fn test_menu_drops_zero_sizes() {
        let menu = PageSizeMenu::new([0, 25]);
        assert_eq!(menu.options(), &[25]);
        assert!(menu.is_disabled());
    }
}
