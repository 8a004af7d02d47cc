//! Error types for CSV operations.

use std::path::PathBuf;
use thiserror::Error;

use m720_model::ModelError;
use m720_validate::ValidationError;

/// Errors that can occur when reading or writing the two-section CSV.
#[derive(Debug, Error)]
pub enum CsvError {
    /// File not found.
    #[error("file not found: {path}")]
    FileNotFound { path: PathBuf },

    /// A section marker row is absent or out of order.
    #[error("missing __SECTION__ markers for HEADER/DETALLES")]
    MissingSection,

    /// The header section holds no rows.
    #[error("empty header section")]
    EmptyHeaderSection,

    /// The detail column row differs from the layout names.
    #[error("detalles header row does not match expected columns")]
    DetailHeaderMismatch {
        expected: Vec<String>,
        found: Vec<String>,
    },

    /// A cell could not be converted. `row` is the 1-based CSV record.
    #[error("row {row}: field '{field}' {message}")]
    InvalidField {
        row: usize,
        field: &'static str,
        message: String,
    },

    /// Converted cells did not assemble into a record.
    #[error("row {row}: {source}")]
    Record {
        row: usize,
        #[source]
        source: ModelError,
    },

    /// The declaration was read but breaks validation rules.
    #[error("{0}")]
    Validation(#[from] ValidationError),

    /// Malformed CSV.
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type alias for CSV operations.
pub type Result<T> = std::result::Result<T, CsvError>;

impl CsvError {
    /// Violation messages when the error is a validation failure.
    pub fn violations(&self) -> Option<&[String]> {
        match self {
            Self::Validation(err) => Some(&err.violations),
            _ => None,
        }
    }
}
