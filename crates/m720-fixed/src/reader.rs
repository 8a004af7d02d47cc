//! Fixed-width declaration reader.

use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;

use m720_model::{Declaration, Detail, Header};

use crate::error::{FormatError, Result};
use crate::options::FixedWidthOptions;
use crate::record::decode_record;

/// Fixed-width declaration reader.
///
/// The first non-blank line is the header, every later non-blank line a
/// detail. The declared record count is not checked here.
pub struct FixedWidthReader<R: Read> {
    reader: BufReader<R>,
    options: FixedWidthOptions,
}

impl<R: Read> FixedWidthReader<R> {
    /// Create a new reader.
    pub fn new(reader: R) -> Self {
        Self::with_options(reader, FixedWidthOptions::default())
    }

    /// Create a new reader with options.
    pub fn with_options(reader: R, options: FixedWidthOptions) -> Self {
        Self {
            reader: BufReader::new(reader),
            options,
        }
    }

    /// Read and decode the whole input.
    pub fn read_declaration(mut self) -> Result<Declaration> {
        let mut data = Vec::new();
        self.reader.read_to_end(&mut data)?;
        decode_fixed_width_with_options(&data, &self.options)
    }
}

impl FixedWidthReader<File> {
    /// Open a fixed-width file for reading.
    pub fn open(path: &Path) -> Result<Self> {
        Self::open_with_options(path, FixedWidthOptions::default())
    }

    /// Open a fixed-width file with options.
    pub fn open_with_options(path: &Path, options: FixedWidthOptions) -> Result<Self> {
        let file = File::open(path).map_err(|e| {
            if e.kind() == std::io::ErrorKind::NotFound {
                FormatError::FileNotFound {
                    path: path.to_path_buf(),
                }
            } else {
                FormatError::Io(e)
            }
        })?;
        Ok(Self::with_options(file, options))
    }
}

/// Read a fixed-width file from a path.
pub fn read_fixed_width(path: &Path) -> Result<Declaration> {
    FixedWidthReader::open(path)?.read_declaration()
}

/// Read a fixed-width file with options.
pub fn read_fixed_width_with_options(
    path: &Path,
    options: FixedWidthOptions,
) -> Result<Declaration> {
    FixedWidthReader::open_with_options(path, options)?.read_declaration()
}

/// Decode fixed-width bytes in the default encoding.
pub fn decode_fixed_width(bytes: &[u8]) -> Result<Declaration> {
    decode_fixed_width_with_options(bytes, &FixedWidthOptions::default())
}

/// Decode fixed-width bytes.
pub fn decode_fixed_width_with_options(
    bytes: &[u8],
    options: &FixedWidthOptions,
) -> Result<Declaration> {
    let (text, had_errors) = options.encoding.decode_without_bom_handling(bytes);
    if had_errors {
        tracing::warn!(
            encoding = options.encoding.name(),
            "input contains byte sequences invalid for the encoding"
        );
    }

    // Line numbers are 1-based positions in the input, blank lines included.
    let mut lines = text
        .lines()
        .enumerate()
        .map(|(idx, line)| (idx + 1, line))
        .filter(|(_, line)| !line.trim().is_empty());

    let (header_line, first) = lines.next().ok_or(FormatError::MissingHeader)?;
    let header: Header = decode_record(first, header_line)?;

    let detalles = lines
        .map(|(line_no, line)| decode_record::<Detail>(line, line_no))
        .collect::<Result<Vec<_>>>()?;

    tracing::debug!(
        ejercicio = header.ejercicio,
        details = detalles.len(),
        "decoded fixed-width declaration"
    );
    Ok(Declaration::new(header, detalles))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_input() {
        assert!(matches!(
            decode_fixed_width(b"\n   \n"),
            Err(FormatError::MissingHeader)
        ));
    }

    #[test]
    fn test_missing_file() {
        let err = read_fixed_width(Path::new("/nonexistent/m720.txt")).expect_err("missing");
        assert!(matches!(err, FormatError::FileNotFound { .. }));
    }
}
