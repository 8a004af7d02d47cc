//! Reader and writer options.

use encoding_rs::{Encoding, ISO_8859_15};

/// Options shared by the fixed-width reader and writer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FixedWidthOptions {
    /// Byte encoding of the file. Defaults to ISO-8859-15.
    pub encoding: &'static Encoding,
}

impl Default for FixedWidthOptions {
    fn default() -> Self {
        Self {
            encoding: ISO_8859_15,
        }
    }
}

impl FixedWidthOptions {
    pub fn with_encoding(encoding: &'static Encoding) -> Self {
        Self { encoding }
    }

    /// Resolve a WHATWG encoding label such as `latin1` or `utf-8`.
    pub fn from_label(label: &str) -> Option<Self> {
        Encoding::for_label(label.trim().as_bytes()).map(Self::with_encoding)
    }
}
