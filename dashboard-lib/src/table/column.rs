//! Column definitions for the tabular data engine.

use std::collections::HashSet;
use std::fmt;
use std::sync::Arc;

use crate::value::{CellValue, TableRow};

/// Custom value accessor used for sorting or searching.
pub type Accessor<T> = Arc<dyn Fn(&T) -> CellValue + Send + Sync>;

/// Custom cell renderer.
pub type CellRenderer<T> = Arc<dyn Fn(&T) -> String + Send + Sync>;

/// Horizontal alignment for column content.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Alignment {
    #[default]
    Left,
    Center,
    Right,
}

/// Column configuration.
///
/// A column reads its value through the raw field lookup
/// ([`TableRow::field`]) unless a custom accessor or renderer is installed.
/// Sorting and searching are enabled by default.
///
/// # Examples
///
/// ```ignore
/// let columns = vec![
///     Column::new("name", "Name"),
///     Column::new("score", "Score").align(Alignment::Right),
///     Column::new("notes", "Notes").unsortable().unsearchable(),
/// ];
/// ```
pub struct Column<T> {
    /// Field accessor; unique within a column set.
    pub key: String,
    /// Header text.
    pub header: String,
    /// Horizontal alignment
    pub align: Alignment,
    /// Whether header activation toggles sorting on this column.
    pub sortable: bool,
    /// Whether the column takes part in free-text search.
    pub searchable: bool,
    render: Option<CellRenderer<T>>,
    sort_accessor: Option<Accessor<T>>,
    search_accessor: Option<Accessor<T>>,
}

impl<T> Column<T> {
    /// Create a column reading the field `key`.
    pub fn new(key: impl Into<String>, header: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            header: header.into(),
            align: Alignment::Left,
            sortable: true,
            searchable: true,
            render: None,
            sort_accessor: None,
            search_accessor: None,
        }
    }

    /// Set the column alignment.
    pub fn align(mut self, align: Alignment) -> Self {
        self.align = align;
        self
    }

    /// Disable sorting on this column.
    pub fn unsortable(mut self) -> Self {
        self.sortable = false;
        self
    }

    /// Exclude this column from search.
    pub fn unsearchable(mut self) -> Self {
        self.searchable = false;
        self
    }

    /// Install a custom cell renderer.
    pub fn render(mut self, render: impl Fn(&T) -> String + Send + Sync + 'static) -> Self {
        self.render = Some(Arc::new(render));
        self
    }

    /// Sort by a derived value instead of the raw field.
    pub fn sort_by(mut self, accessor: impl Fn(&T) -> CellValue + Send + Sync + 'static) -> Self {
        self.sort_accessor = Some(Arc::new(accessor));
        self
    }

    /// Search against a derived value instead of the raw field.
    pub fn search_by(mut self, accessor: impl Fn(&T) -> CellValue + Send + Sync + 'static) -> Self {
        self.search_accessor = Some(Arc::new(accessor));
        self
    }

    /// The custom sort accessor, if any.
    pub fn sort_accessor(&self) -> Option<&Accessor<T>> {
        self.sort_accessor.as_ref()
    }

    /// Whether a custom renderer is installed.
    pub fn has_renderer(&self) -> bool {
        self.render.is_some()
    }
}

impl<T: TableRow> Column<T> {
    /// Value matched against the search term.
    pub fn search_value(&self, row: &T) -> CellValue {
        match &self.search_accessor {
            Some(accessor) => accessor(row),
            None => row.field(&self.key),
        }
    }

    /// Value used for ordering.
    pub fn sort_value(&self, row: &T) -> CellValue {
        match &self.sort_accessor {
            Some(accessor) => accessor(row),
            None => row.field(&self.key),
        }
    }

    /// Rendered cell text; falls back to the raw field value.
    pub fn render_cell(&self, row: &T) -> String {
        match &self.render {
            Some(render) => render(row),
            None => row.field(&self.key).to_string(),
        }
    }
}

impl<T> Clone for Column<T> {
    fn clone(&self) -> Self {
        Self {
            key: self.key.clone(),
            header: self.header.clone(),
            align: self.align,
            sortable: self.sortable,
            searchable: self.searchable,
            render: self.render.clone(),
            sort_accessor: self.sort_accessor.clone(),
            search_accessor: self.search_accessor.clone(),
        }
    }
}

impl<T> fmt::Debug for Column<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Column")
            .field("key", &self.key)
            .field("header", &self.header)
            .field("align", &self.align)
            .field("sortable", &self.sortable)
            .field("searchable", &self.searchable)
            .field("render", &self.render.is_some())
            .field("sort_accessor", &self.sort_accessor.is_some())
            .field("search_accessor", &self.search_accessor.is_some())
            .finish()
    }
}

/// Keys that appear more than once in a column set.
pub fn duplicate_keys<T>(columns: &[Column<T>]) -> Vec<String> {
    let mut seen = HashSet::new();
    let mut duplicates = Vec::new();
    for column in columns {
        if !seen.insert(column.key.as_str()) && !duplicates.contains(&column.key) {
            duplicates.push(column.key.clone());
        }
    }
    duplicates
}
