//! Plain-text rendering of a table view.

use unicode_width::UnicodeWidthStr;

use crate::value::TableRow;

use super::column::{Alignment, Column};
use super::sort::{SortDirective, SortIndicator};
use super::view::TableView;

/// Message shown when no row survives the search filter.
pub const EMPTY_STATE: &str = "No data found.";

/// Options for [`render_table`].
#[derive(Debug, Clone, Default)]
pub struct RenderOptions {
    /// Title printed above the table.
    pub title: Option<String>,
    /// Cells wider than this are truncated with an ellipsis.
    pub max_cell_width: Option<usize>,
}

impl RenderOptions {
    pub fn title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    pub fn max_cell_width(mut self, width: usize) -> Self {
        self.max_cell_width = Some(width);
        self
    }
}

/// Render the current page of `view` as text.
///
/// Layout: optional title, header row with sort indicators, a rule, one
/// line per visible row (or the empty-state line) and a footer with the
/// range and page labels.
pub fn render_table<T: TableRow>(
    view: &TableView<'_, T>,
    columns: &[Column<T>],
    sort: Option<&SortDirective<T>>,
    options: &RenderOptions,
) -> String {
    let headers: Vec<String> = columns
        .iter()
        .map(|column| {
            let glyph = SortIndicator::for_column(column, sort).glyph();
            if glyph.is_empty() {
                column.header.clone()
            } else {
                format!("{} {}", column.header, glyph)
            }
        })
        .collect();

    let body: Vec<Vec<String>> = view
        .visible_rows()
        .iter()
        .map(|row| {
            columns
                .iter()
                .map(|column| truncate(&column.render_cell(row), options.max_cell_width))
                .collect()
        })
        .collect();

    let widths: Vec<usize> = headers
        .iter()
        .enumerate()
        .map(|(i, header)| {
            body.iter()
                .map(|cells| cells[i].width())
                .chain(std::iter::once(header.width()))
                .max()
                .unwrap_or(0)
        })
        .collect();

    let mut out = String::new();
    if let Some(title) = &options.title {
        out.push_str(title);
        out.push('\n');
    }

    let header_cells: Vec<String> = headers
        .iter()
        .zip(&widths)
        .map(|(header, width)| pad(header, *width, Alignment::Left))
        .collect();
    out.push_str(header_cells.join(" | ").trim_end());
    out.push('\n');

    let rule: Vec<String> = widths.iter().map(|width| "-".repeat(*width)).collect();
    out.push_str(&rule.join("-+-"));
    out.push('\n');

    if view.is_empty() {
        out.push_str(EMPTY_STATE);
        out.push('\n');
    }

    for cells in &body {
        let line: Vec<String> = cells
            .iter()
            .zip(columns.iter().zip(&widths))
            .map(|(cell, (column, width))| pad(cell, *width, column.align))
            .collect();
        out.push_str(line.join(" | ").trim_end());
        out.push('\n');
    }

    out.push('\n');
    out.push_str(&format!("{} · {}", view.range_label(), view.page_label()));
    out.push('\n');
    out
}

fn pad(text: &str, width: usize, align: Alignment) -> String {
    let fill = width.saturating_sub(text.width());
    match align {
        Alignment::Left => format!("{}{}", text, " ".repeat(fill)),
        Alignment::Right => format!("{}{}", " ".repeat(fill), text),
        Alignment::Center => {
            let left = fill / 2;
            format!("{}{}{}", " ".repeat(left), text, " ".repeat(fill - left))
        }
    }
}

fn truncate(text: &str, max: Option<usize>) -> String {
    let Some(max) = max else {
        return text.to_string();
    };
    if text.width() <= max {
        return text.to_string();
    }

    let mut out = String::new();
    let mut used = 0;
    for ch in text.chars() {
        let w = unicode_width::UnicodeWidthChar::width(ch).unwrap_or(0);
        if used + w + 1 > max {
            break;
        }
        out.push(ch);
        used += w;
    }
    out.push('…');
    out
}
