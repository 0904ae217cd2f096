//! Sort directives and row ordering.

use std::cmp::Ordering;
use std::fmt;

use crate::value::{CellValue, SortKey, TableRow};

use super::column::{Accessor, Column};

/// Sort direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortDirection {
    #[default]
    Ascending,
    Descending,
}

impl SortDirection {
    /// The opposite direction.
    pub fn toggled(self) -> Self {
        match self {
            SortDirection::Ascending => SortDirection::Descending,
            SortDirection::Descending => SortDirection::Ascending,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            SortDirection::Ascending => "asc",
            SortDirection::Descending => "desc",
        }
    }
}

/// The active sort: column key, direction and optional custom accessor.
pub struct SortDirective<T> {
    pub key: String,
    pub direction: SortDirection,
    accessor: Option<Accessor<T>>,
}

impl<T> SortDirective<T> {
    /// Sort by the raw field `key`.
    pub fn new(key: impl Into<String>, direction: SortDirection) -> Self {
        Self {
            key: key.into(),
            direction,
            accessor: None,
        }
    }

    /// Sort ascending by the raw field `key`.
    pub fn ascending(key: impl Into<String>) -> Self {
        Self::new(key, SortDirection::Ascending)
    }

    /// Sort descending by the raw field `key`.
    pub fn descending(key: impl Into<String>) -> Self {
        Self::new(key, SortDirection::Descending)
    }

    /// Sort using a custom accessor instead of the raw field.
    pub fn with_accessor(mut self, accessor: Accessor<T>) -> Self {
        self.accessor = Some(accessor);
        self
    }

    /// Next directive after activating `column`'s header.
    ///
    /// Returns `None` for unsortable columns. Re-activating the current key
    /// flips the direction; switching keys starts ascending.
    pub fn toggle(current: Option<&SortDirective<T>>, column: &Column<T>) -> Option<Self> {
        if !column.sortable {
            return None;
        }

        let direction = match current {
            Some(prev) if prev.key == column.key => prev.direction.toggled(),
            _ => SortDirection::Ascending,
        };

        Some(Self {
            key: column.key.clone(),
            direction,
            accessor: column.sort_accessor().cloned(),
        })
    }
}

impl<T: TableRow> SortDirective<T> {
    fn value(&self, row: &T) -> CellValue {
        match &self.accessor {
            Some(accessor) => accessor(row),
            None => row.field(&self.key),
        }
    }

    /// Orders `rows` in place. The sort is stable.
    pub fn apply(&self, rows: &mut Vec<&T>) {
        let mut keyed: Vec<(SortKey, &T)> = rows
            .drain(..)
            .map(|row| (self.value(row).sort_key(), row))
            .collect();

        keyed.sort_by(|(a, _), (b, _)| match self.direction {
            SortDirection::Ascending => a.compare(b),
            SortDirection::Descending => b.compare(a),
        });

        rows.extend(keyed.into_iter().map(|(_, row)| row));
    }
}

/// Compares two cell values with the same rules the table sort uses.
pub fn compare_values(a: &CellValue, b: &CellValue) -> Ordering {
    a.sort_key().compare(&b.sort_key())
}

impl<T> Clone for SortDirective<T> {
    fn clone(&self) -> Self {
        Self {
            key: self.key.clone(),
            direction: self.direction,
            accessor: self.accessor.clone(),
        }
    }
}

impl<T> fmt::Debug for SortDirective<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SortDirective")
            .field("key", &self.key)
            .field("direction", &self.direction)
            .field("accessor", &self.accessor.is_some())
            .finish()
    }
}

/// Header indicator for a column.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortIndicator {
    /// Column cannot be sorted.
    None,
    Unsorted,
    Ascending,
    Descending,
}

impl SortIndicator {
    /// Indicator for `column` given the active directive.
    pub fn for_column<T>(column: &Column<T>, sort: Option<&SortDirective<T>>) -> Self {
        if !column.sortable {
            return SortIndicator::None;
        }
        match sort {
            Some(directive) if directive.key == column.key => match directive.direction {
                SortDirection::Ascending => SortIndicator::Ascending,
                SortDirection::Descending => SortIndicator::Descending,
            },
            _ => SortIndicator::Unsorted,
        }
    }

    /// Glyph drawn next to the header text.
    pub fn glyph(self) -> &'static str {
        match self {
            SortIndicator::None => "",
            SortIndicator::Unsorted => "↕",
            SortIndicator::Ascending => "▲",
            SortIndicator::Descending => "▼",
        }
    }
}
