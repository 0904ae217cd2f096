//! Spreadsheet export.

use std::io::Write;

use log::{debug, warn};

use crate::error::ExportError;
use crate::value::TableRow;

use super::column::Column;

/// Writes `rows` as CSV: one header record of column headers, then one
/// record per row using each column's rendered cell text.
///
/// An empty dataset writes nothing. Returns the number of rows written.
pub fn export_csv<T: TableRow, W: Write>(
    rows: &[&T],
    columns: &[Column<T>],
    writer: W,
) -> Result<usize, ExportError> {
    if rows.is_empty() {
        warn!("export_csv: empty dataset");
        return Ok(0);
    }

    let mut csv = csv::Writer::from_writer(writer);
    csv.write_record(columns.iter().map(|column| column.header.as_str()))?;
    for row in rows {
        csv.write_record(columns.iter().map(|column| column.render_cell(row)))?;
    }
    csv.flush()?;

    debug!("Exported {} rows across {} columns", rows.len(), columns.len());
    Ok(rows.len())
}
