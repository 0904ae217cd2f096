//! The search → sort → paginate pipeline.

use std::ops::Range;

use crate::value::TableRow;

use super::column::Column;
use super::page::{Pagination, PaginationMode, clamp_page, total_pages};
use super::search::filter_rows;
use super::sort::SortDirective;

/// Inputs to [`compute_view`] besides the rows and columns.
#[derive(Debug)]
pub struct ViewQuery<'q, T> {
    pub search_term: &'q str,
    pub sort: Option<&'q SortDirective<T>>,
    pub pagination: Pagination,
    /// Explicit searchable keys; ignored when empty.
    pub searchable_keys: Option<&'q [String]>,
    pub mode: PaginationMode,
}

impl<'q, T> ViewQuery<'q, T> {
    /// No search, no sort, client-side pagination.
    pub fn new(pagination: Pagination) -> Self {
        Self {
            search_term: "",
            sort: None,
            pagination,
            searchable_keys: None,
            mode: PaginationMode::Client,
        }
    }

    pub fn search(mut self, term: &'q str) -> Self {
        self.search_term = term;
        self
    }

    pub fn sort(mut self, sort: Option<&'q SortDirective<T>>) -> Self {
        self.sort = sort;
        self
    }

    pub fn searchable_keys(mut self, keys: Option<&'q [String]>) -> Self {
        self.searchable_keys = keys;
        self
    }

    pub fn mode(mut self, mode: PaginationMode) -> Self {
        self.mode = mode;
        self
    }
}

impl<T> Clone for ViewQuery<'_, T> {
    fn clone(&self) -> Self {
        Self {
            search_term: self.search_term,
            sort: self.sort,
            pagination: self.pagination,
            searchable_keys: self.searchable_keys,
            mode: self.mode,
        }
    }
}

/// The rows to display plus pagination metadata.
#[derive(Debug)]
pub struct TableView<'a, T> {
    /// Every filtered and sorted row, in display order.
    pub rows: Vec<&'a T>,
    /// Slice of `rows` shown on the current page.
    pub visible: Range<usize>,
    pub total_items: usize,
    pub total_pages: usize,
    /// Current page after clamping.
    pub current_page: usize,
    pub page_size: usize,
    /// One-based index of the first displayed item, 0 when there are none.
    pub start_index: usize,
    /// One-based index of the last displayed item.
    pub end_index: usize,
}

impl<'a, T> TableView<'a, T> {
    /// Rows on the current page.
    pub fn visible_rows(&self) -> &[&'a T] {
        &self.rows[self.visible.clone()]
    }

    /// `true` when no row survived the search filter.
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// `"<start>–<end> of <total>"`.
    pub fn range_label(&self) -> String {
        format!("{}–{} of {}", self.start_index, self.end_index, self.total_items)
    }

    /// `"Page <n> of <total>"`; the page reads 0 when there are no items.
    pub fn page_label(&self) -> String {
        let page = if self.total_items == 0 {
            0
        } else {
            self.current_page + 1
        };
        format!("Page {} of {}", page, self.total_pages)
    }

    pub fn has_previous(&self) -> bool {
        self.current_page > 0
    }

    pub fn has_next(&self) -> bool {
        self.total_items > 0 && self.current_page + 1 < self.total_pages
    }
}

/// Runs the table pipeline: search filter, then sort, then paginate.
///
/// All inputs are handled permissively; nothing here fails.
pub fn compute_view<'a, T: TableRow>(
    rows: &'a [T],
    columns: &[Column<T>],
    query: &ViewQuery<'_, T>,
) -> TableView<'a, T> {
    let mut filtered = filter_rows(rows, columns, query.search_term, query.searchable_keys);

    if let Some(sort) = query.sort {
        sort.apply(&mut filtered);
    }

    let page_size = query.pagination.page_size.max(1);
    let total_items = match query.mode {
        PaginationMode::Client => filtered.len(),
        PaginationMode::Manual { total_items } => total_items.unwrap_or(filtered.len()),
    };
    let total_pages = total_pages(total_items, page_size);
    let current_page = clamp_page(query.pagination.current_page, total_pages);

    let visible = match query.mode {
        PaginationMode::Client => Pagination {
            page_size,
            current_page,
        }
        .range(filtered.len()),
        PaginationMode::Manual { .. } => 0..filtered.len(),
    };

    let start_index = if total_items == 0 {
        0
    } else {
        current_page * page_size + 1
    };
    let end_index = ((current_page + 1) * page_size).min(total_items);

    TableView {
        rows: filtered,
        visible,
        total_items,
        total_pages,
        current_page,
        page_size,
        start_index,
        end_index,
    }
}
