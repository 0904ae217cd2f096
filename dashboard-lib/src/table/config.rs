//! Table configuration

use serde::{Deserialize, Serialize};

use super::page::{DEFAULT_PAGE_SIZE, DEFAULT_PAGE_SIZE_OPTIONS};

/// Configuration for a [`TableState`](super::TableState).
///
/// # Example
///
/// ```
/// use dashboard_lib::table::TableConfig;
///
/// let config = TableConfig::default()
///     .with_page_size(20)
///     .with_page_size_options(vec![20, 50, 100]);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TableConfig {
    /// Rows per page.
    ///
    /// Default: 10
    pub page_size: usize,

    /// Choices offered by the page-size menu.
    ///
    /// Default: `[5, 10, 20, 50]`
    pub page_size_options: Vec<usize>,

    /// Zero-based page shown first.
    ///
    /// Default: 0
    pub initial_page: usize,
}

impl Default for TableConfig {
    fn default() -> Self {
        Self {
            page_size: DEFAULT_PAGE_SIZE,
            page_size_options: DEFAULT_PAGE_SIZE_OPTIONS.to_vec(),
            initial_page: 0,
        }
    }
}

impl TableConfig {
    /// Creates a new table config with default values.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the page size.
    pub fn with_page_size(mut self, page_size: usize) -> Self {
        self.page_size = page_size;
        self
    }

    /// Sets the page-size menu.
    pub fn with_page_size_options(mut self, options: Vec<usize>) -> Self {
        self.page_size_options = options;
        self
    }

    /// Sets the first page shown.
    pub fn with_initial_page(mut self, page: usize) -> Self {
        self.initial_page = page;
        self
    }
}
