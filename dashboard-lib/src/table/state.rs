//! Table interaction state.

use std::io::Write;

use log::{debug, warn};

use crate::error::ExportError;
use crate::value::TableRow;

use super::column::{Column, duplicate_keys};
use super::config::TableConfig;
use super::export::export_csv;
use super::page::{PageSizeMenu, Pagination, PaginationMode, clamp_page, total_pages};
use super::render::{RenderOptions, render_table};
use super::search::filter_rows;
use super::sort::{SortDirection, SortDirective, SortIndicator};
use super::view::{TableView, ViewQuery, compute_view};

/// Notifications produced by state transitions, drained by the owner.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TableEvent {
    /// The current page changed (or was re-requested).
    PageChanged(usize),
    /// The search term changed.
    SearchChanged(String),
    /// The sort directive changed.
    Sorted { key: String, direction: SortDirection },
}

/// Interaction state around [`compute_view`].
///
/// `TableState<T>` owns:
/// - Rows and column definitions
/// - Search term and sort directive
/// - Page size and current page, kept within the valid page range
/// - Pending [`TableEvent`]s and a dirty flag for re-rendering
#[derive(Debug)]
pub struct TableState<T> {
    columns: Vec<Column<T>>,
    rows: Vec<T>,
    search_term: String,
    sort: Option<SortDirective<T>>,
    pagination: Pagination,
    searchable_keys: Option<Vec<String>>,
    mode: PaginationMode,
    page_size_menu: PageSizeMenu,
    events: Vec<TableEvent>,
    dirty: bool,
}

impl<T: TableRow> TableState<T> {
    /// Create a table with default configuration.
    pub fn new(columns: Vec<Column<T>>, rows: Vec<T>) -> Self {
        Self::with_config(columns, rows, TableConfig::default())
    }

    /// Create a table from a [`TableConfig`].
    pub fn with_config(columns: Vec<Column<T>>, rows: Vec<T>, config: TableConfig) -> Self {
        let duplicates = duplicate_keys(&columns);
        if !duplicates.is_empty() {
            warn!("Table columns share keys: {:?}", duplicates);
        }

        let mut state = Self {
            columns,
            rows,
            search_term: String::new(),
            sort: None,
            pagination: Pagination::new(config.page_size),
            searchable_keys: None,
            mode: PaginationMode::Client,
            page_size_menu: PageSizeMenu::new(config.page_size_options),
            events: Vec::new(),
            dirty: true,
        };
        state.pagination.current_page = config.initial_page;
        state.clamp_page();
        state
    }

    /// Restrict search to these keys (an empty list means "all searchable").
    pub fn with_searchable_keys(mut self, keys: Vec<String>) -> Self {
        self.searchable_keys = Some(keys);
        self.clamp_page();
        self
    }

    /// Delegate slicing to the caller, optionally reporting an external total.
    pub fn with_manual_pagination(mut self, total_items: Option<usize>) -> Self {
        self.mode = PaginationMode::Manual { total_items };
        self.clamp_page();
        self
    }

    // -------------------------------------------------------------------------
    // Accessors
    // -------------------------------------------------------------------------

    pub fn columns(&self) -> &[Column<T>] {
        &self.columns
    }

    pub fn rows(&self) -> &[T] {
        &self.rows
    }

    pub fn search_term(&self) -> &str {
        &self.search_term
    }

    pub fn sort(&self) -> Option<&SortDirective<T>> {
        self.sort.as_ref()
    }

    pub fn pagination(&self) -> Pagination {
        self.pagination
    }

    pub fn current_page(&self) -> usize {
        self.pagination.current_page
    }

    pub fn page_size(&self) -> usize {
        self.pagination.page_size
    }

    pub fn page_size_menu(&self) -> &PageSizeMenu {
        &self.page_size_menu
    }

    pub fn mode(&self) -> PaginationMode {
        self.mode
    }

    /// Whether a search box should be shown at all.
    pub fn is_searchable(&self) -> bool {
        !super::search::searchable_keys(&self.columns, self.searchable_keys.as_deref()).is_empty()
    }

    /// Header indicator for the column `key`.
    pub fn sort_indicator(&self, key: &str) -> SortIndicator {
        self.columns
            .iter()
            .find(|column| column.key == key)
            .map(|column| SortIndicator::for_column(column, self.sort.as_ref()))
            .unwrap_or(SortIndicator::None)
    }

    // -------------------------------------------------------------------------
    // Rows and columns
    // -------------------------------------------------------------------------

    /// Replace the rows. A change in row count returns to the first page.
    pub fn set_rows(&mut self, rows: Vec<T>) {
        let count_changed = rows.len() != self.rows.len();
        self.rows = rows;
        if count_changed {
            self.reset_page();
        }
        self.clamp_page();
        self.dirty = true;
    }

    /// Replace the column definitions. A sort on a vanished key is dropped.
    pub fn set_columns(&mut self, columns: Vec<Column<T>>) {
        self.columns = columns;
        if let Some(sort) = &self.sort
            && !self.columns.iter().any(|column| column.key == sort.key)
        {
            self.sort = None;
        }
        self.clamp_page();
        self.dirty = true;
    }

    // -------------------------------------------------------------------------
    // Search
    // -------------------------------------------------------------------------

    /// Set the search term. A changed term returns to the first page.
    pub fn set_search(&mut self, term: impl Into<String>) {
        let term = term.into();
        if term == self.search_term {
            return;
        }
        self.search_term = term.clone();
        self.events.push(TableEvent::SearchChanged(term));
        self.reset_page();
        self.clamp_page();
        self.dirty = true;
    }

    // -------------------------------------------------------------------------
    // Sorting
    // -------------------------------------------------------------------------

    /// Toggle sorting on the column `key`.
    ///
    /// Returns the new directive, or `None` if the column is unknown or not
    /// sortable (the current sort is left untouched).
    pub fn toggle_sort(&mut self, key: &str) -> Option<&SortDirective<T>> {
        let column = self.columns.iter().find(|column| column.key == key)?;
        let next = SortDirective::toggle(self.sort.as_ref(), column)?;

        debug!("Sorting by {} {}", next.key, next.direction.as_str());
        self.events.push(TableEvent::Sorted {
            key: next.key.clone(),
            direction: next.direction,
        });
        self.sort = Some(next);
        self.dirty = true;
        self.sort.as_ref()
    }

    /// Install a directive directly.
    pub fn set_sort(&mut self, sort: Option<SortDirective<T>>) {
        if let Some(directive) = &sort {
            self.events.push(TableEvent::Sorted {
                key: directive.key.clone(),
                direction: directive.direction,
            });
        }
        self.sort = sort;
        self.dirty = true;
    }

    /// Return to source order.
    pub fn clear_sort(&mut self) {
        self.sort = None;
        self.dirty = true;
    }

    // -------------------------------------------------------------------------
    // Pagination
    // -------------------------------------------------------------------------

    /// Change the page size (at least 1) and return to the first page.
    pub fn set_page_size(&mut self, size: usize) {
        self.pagination.page_size = size.max(1);
        self.pagination.current_page = 0;
        self.events.push(TableEvent::PageChanged(0));
        self.dirty = true;
    }

    /// Request a page; the result is clamped into the valid range.
    ///
    /// Returns the page actually selected.
    pub fn go_to_page(&mut self, page: usize) -> usize {
        let clamped = clamp_page(page, self.total_pages());
        self.pagination.current_page = clamped;
        self.events.push(TableEvent::PageChanged(clamped));
        self.dirty = true;
        clamped
    }

    pub fn next_page(&mut self) -> usize {
        self.go_to_page(self.pagination.current_page.saturating_add(1))
    }

    pub fn previous_page(&mut self) -> usize {
        self.go_to_page(self.pagination.current_page.saturating_sub(1))
    }

    /// Follow a page chosen outside the table (no event unless clamped).
    pub fn set_external_page(&mut self, page: usize) {
        self.pagination.current_page = page;
        self.clamp_page();
        self.dirty = true;
    }

    /// Update the external total used by manual pagination.
    pub fn set_total_items(&mut self, total_items: Option<usize>) {
        if let PaginationMode::Manual { .. } = self.mode {
            self.mode = PaginationMode::Manual { total_items };
            self.clamp_page();
            self.dirty = true;
        }
    }

    pub fn total_items(&self) -> usize {
        match self.mode {
            PaginationMode::Client => self.filtered_len(),
            PaginationMode::Manual { total_items } => {
                total_items.unwrap_or_else(|| self.filtered_len())
            }
        }
    }

    pub fn total_pages(&self) -> usize {
        total_pages(self.total_items(), self.pagination.page_size)
    }

    // -------------------------------------------------------------------------
    // Output
    // -------------------------------------------------------------------------

    /// Compute the rows and metadata to display.
    pub fn view(&self) -> TableView<'_, T> {
        let query = ViewQuery::new(self.pagination)
            .search(&self.search_term)
            .sort(self.sort.as_ref())
            .searchable_keys(self.searchable_keys.as_deref())
            .mode(self.mode);
        compute_view(&self.rows, &self.columns, &query)
    }

    /// The row at `index` on the current page (for row activation).
    pub fn visible_row(&self, index: usize) -> Option<&T> {
        self.view().visible_rows().get(index).copied()
    }

    /// Export the filtered and sorted rows (all pages) as CSV.
    pub fn export_csv<W: Write>(&self, writer: W) -> Result<usize, ExportError> {
        let view = self.view();
        export_csv(&view.rows, &self.columns, writer)
    }

    /// Render the current page as plain text.
    pub fn render(&self, options: &RenderOptions) -> String {
        render_table(&self.view(), &self.columns, self.sort.as_ref(), options)
    }

    /// Take pending events.
    pub fn drain_events(&mut self) -> Vec<TableEvent> {
        std::mem::take(&mut self.events)
    }

    /// Returns and clears the dirty flag.
    pub fn take_dirty(&mut self) -> bool {
        std::mem::replace(&mut self.dirty, false)
    }

    // -------------------------------------------------------------------------
    // Internal
    // -------------------------------------------------------------------------

    fn filtered_len(&self) -> usize {
        filter_rows(
            &self.rows,
            &self.columns,
            &self.search_term,
            self.searchable_keys.as_deref(),
        )
        .len()
    }

    fn reset_page(&mut self) {
        if self.pagination.current_page != 0 {
            self.pagination.current_page = 0;
            self.events.push(TableEvent::PageChanged(0));
        }
    }

    fn clamp_page(&mut self) {
        let clamped = clamp_page(self.pagination.current_page, self.total_pages());
        if clamped != self.pagination.current_page {
            self.pagination.current_page = clamped;
            self.events.push(TableEvent::PageChanged(clamped));
        }
    }
}
