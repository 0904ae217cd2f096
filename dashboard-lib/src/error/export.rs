//! Export error types

use thiserror::Error;

/// Errors raised while exporting rows to a spreadsheet format.
#[derive(Debug, Error)]
pub enum ExportError {
    #[error("csv error: {0}")]
    Csv(#[from] csv::Error),
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}
