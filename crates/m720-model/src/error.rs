//! Error types for record assembly.

use thiserror::Error;

use crate::schema::FieldKind;

/// Errors raised while assembling a record from schema field values.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ModelError {
    /// A schema field had no value in the input set.
    #[error("missing value for field '{field}'")]
    MissingField { field: &'static str },

    /// The value kind does not match the record field.
    #[error("field '{field}' expected {expected} value")]
    UnexpectedKind {
        field: &'static str,
        expected: FieldKind,
    },

    /// An integer does not fit the record field type.
    #[error("field '{field}' value {value} is out of range")]
    OutOfRange { field: &'static str, value: u64 },
}

/// Result type for model operations.
pub type Result<T> = std::result::Result<T, ModelError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = ModelError::MissingField { field: "modelo" };
        assert_eq!(err.to_string(), "missing value for field 'modelo'");

        let err = ModelError::OutOfRange {
            field: "subclave",
            value: 300,
        };
        assert_eq!(err.to_string(), "field 'subclave' value 300 is out of range");
    }
}
