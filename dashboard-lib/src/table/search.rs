//! Free-text search over searchable columns.

use crate::value::TableRow;

use super::column::Column;

/// The effective set of searchable column keys.
///
/// A non-empty `overrides` list wins; otherwise every column that has not
/// opted out of search is used.
pub fn searchable_keys<T>(columns: &[Column<T>], overrides: Option<&[String]>) -> Vec<String> {
    match overrides {
        Some(keys) if !keys.is_empty() => keys.to_vec(),
        _ => columns
            .iter()
            .filter(|column| column.searchable)
            .map(|column| column.key.clone())
            .collect(),
    }
}

/// Normalizes a raw search term: trimmed and lowercased.
pub fn normalize_term(term: &str) -> String {
    term.trim().to_lowercase()
}

/// Returns `true` if any searchable column of `row` contains `term`.
///
/// `term` must already be normalized with [`normalize_term`]. Columns whose
/// key is not in `keys` are skipped, and keys naming no column match nothing.
pub fn row_matches<T: TableRow>(row: &T, columns: &[Column<T>], keys: &[String], term: &str) -> bool {
    columns
        .iter()
        .filter(|column| keys.contains(&column.key))
        .any(|column| {
            column
                .search_value(row)
                .search_text()
                .is_some_and(|text| text.to_lowercase().contains(term))
        })
}

/// Keeps the rows that match `term`, preserving source order.
///
/// An empty (or whitespace-only) term keeps every row.
pub fn filter_rows<'a, T: TableRow>(
    rows: &'a [T],
    columns: &[Column<T>],
    term: &str,
    overrides: Option<&[String]>,
) -> Vec<&'a T> {
    let term = normalize_term(term);
    if term.is_empty() {
        return rows.iter().collect();
    }

    let keys = searchable_keys(columns, overrides);
    rows.iter()
        .filter(|row| row_matches(*row, columns, &keys, &term))
        .collect()
}
