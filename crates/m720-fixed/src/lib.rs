//! Modelo 720 fixed-width file reader and writer.
//!
//! The authority format is one 500-column header line followed by one
//! 500-column line per detail record, in a single-byte Western European
//! encoding (ISO-8859-15 by default). Column positions come from
//! [`m720_model::schema`].
//!
//! Decoding never validates. A file whose declared record count disagrees
//! with its detail lines decodes fine; reconciliation is the validator's job.
//!
//! # Example
//!
//! ```no_run
//! use std::path::Path;
//! use m720_fixed::{read_fixed_width, write_fixed_width};
//!
//! let declaration = read_fixed_width(Path::new("2024.720")).unwrap();
//! println!("{} details", declaration.detalles.len());
//! write_fixed_width(Path::new("copy.720"), &declaration).unwrap();
//! ```

mod error;
mod options;
pub mod record;
mod reader;
pub mod value;
mod writer;

pub use error::{FormatError, Result};
pub use options::FixedWidthOptions;
pub use reader::{
    FixedWidthReader, decode_fixed_width, decode_fixed_width_with_options, read_fixed_width,
    read_fixed_width_with_options,
};
pub use writer::{
    FixedWidthWriter, encode_fixed_width, encode_fixed_width_with_options, write_fixed_width,
    write_fixed_width_with_options,
};
