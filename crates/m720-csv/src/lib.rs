//! Modelo 720 two-section CSV reader and writer.
//!
//! The CSV form keeps every fixed-width field under its layout name so the
//! declaration can be edited in a spreadsheet:
//!
//! ```text
//! __SECTION__,HEADER
//! field,value
//! tipo_registro,1
//! ...
//! __SECTION__,DETALLES
//! tipo_registro,modelo,ejercicio,...
//! 2,720,2024,...
//! ```
//!
//! Reading validates: a CSV declaration that breaks any rule is reported as
//! [`CsvError::Validation`] with every violation.

mod cells;
mod error;
mod reader;
mod writer;

pub use cells::{cell_to_value, value_to_cell};
pub use error::{CsvError, Result};
pub use reader::{CsvReader, decode_csv, read_csv};
pub use writer::{CsvWriter, encode_csv, write_csv};

/// First cell of a section marker row.
pub const SECTION_MARKER: &str = "__SECTION__";
/// Second cell of the header section marker.
pub const HEADER_SECTION: &str = "HEADER";
/// Second cell of the detail section marker.
pub const DETAIL_SECTION: &str = "DETALLES";
/// Optional label row opening the header section.
pub const FIELD_VALUE_LABELS: [&str; 2] = ["field", "value"];
