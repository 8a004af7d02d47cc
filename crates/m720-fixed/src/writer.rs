//! Fixed-width declaration writer.

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use encoding_rs::Encoding;
use m720_model::Declaration;

use crate::error::Result;
use crate::options::FixedWidthOptions;
use crate::record::encode_record;

/// Substitute for characters the target encoding cannot represent.
const REPLACEMENT: char = '?';

/// Fixed-width declaration writer.
///
/// Writes the header line then each detail line, every one padded to 500
/// columns and newline-terminated.
pub struct FixedWidthWriter<W: Write> {
    writer: BufWriter<W>,
    options: FixedWidthOptions,
}

impl<W: Write> FixedWidthWriter<W> {
    /// Create a new writer.
    pub fn new(writer: W) -> Self {
        Self::with_options(writer, FixedWidthOptions::default())
    }

    /// Create a new writer with options.
    pub fn with_options(writer: W, options: FixedWidthOptions) -> Self {
        Self {
            writer: BufWriter::new(writer),
            options,
        }
    }

    /// Encode and write a whole declaration.
    pub fn write_declaration(mut self, declaration: &Declaration) -> Result<()> {
        let bytes = encode_fixed_width_with_options(declaration, &self.options)?;
        self.writer.write_all(&bytes)?;
        self.writer.flush()?;
        Ok(())
    }
}

impl FixedWidthWriter<File> {
    /// Create a fixed-width file for writing.
    pub fn create(path: &Path) -> Result<Self> {
        Self::create_with_options(path, FixedWidthOptions::default())
    }

    /// Create a fixed-width file with options.
    pub fn create_with_options(path: &Path, options: FixedWidthOptions) -> Result<Self> {
        let file = File::create(path)?;
        Ok(Self::with_options(file, options))
    }
}

/// Write a declaration to a fixed-width file.
pub fn write_fixed_width(path: &Path, declaration: &Declaration) -> Result<()> {
    FixedWidthWriter::create(path)?.write_declaration(declaration)
}

/// Write a declaration to a fixed-width file with options.
pub fn write_fixed_width_with_options(
    path: &Path,
    declaration: &Declaration,
    options: FixedWidthOptions,
) -> Result<()> {
    FixedWidthWriter::create_with_options(path, options)?.write_declaration(declaration)
}

/// Encode a declaration in the default encoding.
pub fn encode_fixed_width(declaration: &Declaration) -> Result<Vec<u8>> {
    encode_fixed_width_with_options(declaration, &FixedWidthOptions::default())
}

/// Encode a declaration to bytes.
pub fn encode_fixed_width_with_options(
    declaration: &Declaration,
    options: &FixedWidthOptions,
) -> Result<Vec<u8>> {
    let mut text = encode_record(&declaration.header, 1)?;
    text.push('\n');
    for (idx, detail) in declaration.detalles.iter().enumerate() {
        text.push_str(&encode_record(detail, idx + 2)?);
        text.push('\n');
    }
    Ok(encode_text(&text, options.encoding))
}

fn encode_text(text: &str, encoding: &'static Encoding) -> Vec<u8> {
    let (bytes, _, unmappable) = encoding.encode(text);
    if !unmappable {
        return bytes.into_owned();
    }

    let mut buf = [0u8; 4];
    let mut replaced = 0usize;
    let sanitized: String = text
        .chars()
        .map(|ch| {
            let (_, _, bad) = encoding.encode(ch.encode_utf8(&mut buf));
            if bad {
                replaced += 1;
                REPLACEMENT
            } else {
                ch
            }
        })
        .collect();
    tracing::warn!(
        encoding = encoding.name(),
        replaced,
        "characters not representable in the target encoding were replaced"
    );
    encoding.encode(&sanitized).0.into_owned()
}

#[cfg(test)]
mod tests {
    use super::*;
    use encoding_rs::ISO_8859_15;

    #[test]
    fn test_encode_latin() {
        assert_eq!(encode_text("Ñ€", ISO_8859_15), vec![0xD1, 0xA4]);
    }

    #[test]
    fn test_unmappable_replaced() {
        assert_eq!(encode_text("a✓b", ISO_8859_15), b"a?b".to_vec());
    }
}
