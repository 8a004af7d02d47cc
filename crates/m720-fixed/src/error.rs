//! Error types for fixed-width file operations.

use std::path::PathBuf;
use thiserror::Error;

use m720_model::ModelError;

/// Errors that can occur when reading or writing fixed-width files.
#[derive(Debug, Error)]
pub enum FormatError {
    /// File not found.
    #[error("file not found: {path}")]
    FileNotFound { path: PathBuf },

    /// The input holds no non-blank line.
    #[error("missing header line")]
    MissingHeader,

    /// A field could not be decoded or encoded.
    #[error("line {line}: invalid value for field '{field}': {message}")]
    InvalidField {
        line: usize,
        field: &'static str,
        message: String,
    },

    /// Decoded values did not assemble into a record.
    #[error("line {line}: {source}")]
    Record {
        line: usize,
        #[source]
        source: ModelError,
    },

    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type alias for fixed-width operations.
pub type Result<T> = std::result::Result<T, FormatError>;

impl FormatError {
    /// Create an InvalidField error.
    pub fn invalid_field(line: usize, field: &'static str, message: impl Into<String>) -> Self {
        Self::InvalidField {
            line,
            field,
            message: message.into(),
        }
    }

    /// Name of the offending field, when the error concerns one.
    pub fn field(&self) -> Option<&'static str> {
        match self {
            Self::InvalidField { field, .. } => Some(field),
            Self::Record {
                source:
                    ModelError::MissingField { field }
                    | ModelError::UnexpectedKind { field, .. }
                    | ModelError::OutOfRange { field, .. },
                ..
            } => Some(field),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invalid_field_display() {
        let err = FormatError::invalid_field(2, "ejercicio", "expected digits, found '20X4'");
        assert_eq!(
            err.to_string(),
            "line 2: invalid value for field 'ejercicio': expected digits, found '20X4'"
        );
        assert_eq!(err.field(), Some("ejercicio"));
    }

    #[test]
    fn test_record_error_field() {
        let err = FormatError::Record {
            line: 1,
            source: ModelError::MissingField { field: "modelo" },
        };
        assert_eq!(err.field(), Some("modelo"));
        assert!(FormatError::MissingHeader.field().is_none());
    }
}
