//! Two-section CSV writer.

use std::fs::File;
use std::io::Write;
use std::path::Path;

use csv::WriterBuilder;

use m720_model::schema::field_names;
use m720_model::{Declaration, Detail, SchemaRecord};

use crate::cells::value_to_cell;
use crate::error::Result;
use crate::{DETAIL_SECTION, FIELD_VALUE_LABELS, HEADER_SECTION, SECTION_MARKER};

/// Two-section CSV writer.
///
/// The header section has one `name,value` row per header field; the detail
/// section has the column row followed by one row per detail.
pub struct CsvWriter<W: Write> {
    writer: csv::Writer<W>,
}

impl<W: Write> CsvWriter<W> {
    /// Create a new CSV writer.
    pub fn new(writer: W) -> Self {
        Self {
            writer: WriterBuilder::new().flexible(true).from_writer(writer),
        }
    }

    /// Write a whole declaration.
    pub fn write_declaration(mut self, declaration: &Declaration) -> Result<()> {
        self.writer.write_record([SECTION_MARKER, HEADER_SECTION])?;
        self.writer.write_record(FIELD_VALUE_LABELS)?;
        for (name, value) in declaration.header.to_values().iter() {
            self.writer.write_record([name, value_to_cell(value).as_str()])?;
        }

        self.writer.write_record([SECTION_MARKER, DETAIL_SECTION])?;
        self.writer.write_record(field_names(Detail::fields()))?;
        for detail in &declaration.detalles {
            let values = detail.to_values();
            self.writer
                .write_record(values.iter().map(|(_, value)| value_to_cell(value)))?;
        }

        self.writer.flush()?;
        tracing::debug!(
            details = declaration.detalles.len(),
            "encoded CSV declaration"
        );
        Ok(())
    }
}

impl CsvWriter<File> {
    /// Create a CSV file for writing.
    pub fn create(path: &Path) -> Result<Self> {
        Ok(Self::new(File::create(path)?))
    }
}

/// Write a declaration to a CSV file.
pub fn write_csv(path: &Path, declaration: &Declaration) -> Result<()> {
    CsvWriter::create(path)?.write_declaration(declaration)
}

/// Encode a declaration as CSV bytes.
pub fn encode_csv(declaration: &Declaration) -> Result<Vec<u8>> {
    let mut out = Vec::new();
    CsvWriter::new(&mut out).write_declaration(declaration)?;
    Ok(out)
}
