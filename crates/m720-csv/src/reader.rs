//! Two-section CSV reader.

use std::collections::HashMap;
use std::fs::File;
use std::io::Read;
use std::path::Path;

use csv::{ReaderBuilder, StringRecord};

use m720_model::schema::field_names;
use m720_model::{Declaration, Detail, FieldValues, Header, SchemaRecord};

use crate::cells::cell_to_value;
use crate::error::{CsvError, Result};
use crate::{DETAIL_SECTION, FIELD_VALUE_LABELS, HEADER_SECTION, SECTION_MARKER};

/// Two-section CSV reader.
///
/// A declaration counts as read only once it also passes validation.
pub struct CsvReader<R: Read> {
    reader: R,
}

impl<R: Read> CsvReader<R> {
    /// Create a new CSV reader.
    pub fn new(reader: R) -> Self {
        Self { reader }
    }

    /// Read, decode and validate the whole input.
    pub fn read_declaration(self) -> Result<Declaration> {
        let rows = read_rows(self.reader)?;
        let declaration = parse_rows(&rows)?;
        m720_validate::ensure_valid(&declaration)?;
        Ok(declaration)
    }
}

impl CsvReader<File> {
    /// Open a CSV file for reading.
    pub fn open(path: &Path) -> Result<Self> {
        let file = File::open(path).map_err(|e| {
            if e.kind() == std::io::ErrorKind::NotFound {
                CsvError::FileNotFound {
                    path: path.to_path_buf(),
                }
            } else {
                CsvError::Io(e)
            }
        })?;
        Ok(Self::new(file))
    }
}

/// Read a CSV declaration from a path.
pub fn read_csv(path: &Path) -> Result<Declaration> {
    CsvReader::open(path)?.read_declaration()
}

/// Decode and validate CSV bytes.
pub fn decode_csv(bytes: &[u8]) -> Result<Declaration> {
    CsvReader::new(bytes).read_declaration()
}

/// A CSV record with its 1-based position.
struct Row {
    number: usize,
    cells: StringRecord,
}

impl Row {
    fn cell(&self, idx: usize) -> &str {
        self.cells.get(idx).unwrap_or("")
    }

    fn is_blank(&self) -> bool {
        self.cells.iter().all(|cell| cell.trim().is_empty())
    }

    fn is_marker(&self, section: &str) -> bool {
        self.cell(0) == SECTION_MARKER && self.cell(1) == section
    }
}

fn read_rows(reader: impl Read) -> Result<Vec<Row>> {
    let mut reader = ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .from_reader(reader);
    let mut rows = Vec::new();
    for (idx, record) in reader.records().enumerate() {
        rows.push(Row {
            number: idx + 1,
            cells: record?,
        });
    }
    Ok(rows)
}

fn parse_rows(rows: &[Row]) -> Result<Declaration> {
    let header_at = rows
        .iter()
        .position(|row| row.is_marker(HEADER_SECTION))
        .ok_or(CsvError::MissingSection)?;
    let detail_at = rows
        .iter()
        .position(|row| row.is_marker(DETAIL_SECTION))
        .filter(|at| *at > header_at)
        .ok_or(CsvError::MissingSection)?;

    let header = parse_header(&rows[header_at + 1..detail_at], &rows[header_at])?;
    let detalles = parse_details(&rows[detail_at + 1..])?;
    tracing::debug!(
        header_rows = detail_at - header_at - 1,
        details = detalles.len(),
        "decoded CSV declaration"
    );
    Ok(Declaration::new(header, detalles))
}

fn parse_header(section: &[Row], marker: &Row) -> Result<Header> {
    let mut rows: Vec<&Row> = section.iter().filter(|row| !row.is_blank()).collect();
    if rows.is_empty() {
        return Err(CsvError::EmptyHeaderSection);
    }
    if rows[0].cell(0) == FIELD_VALUE_LABELS[0] && rows[0].cell(1) == FIELD_VALUE_LABELS[1] {
        rows.remove(0);
    }

    let mut cells: HashMap<&str, &Row> = HashMap::new();
    for row in rows {
        let name = row.cell(0).trim();
        if Header::fields().iter().any(|spec| spec.name == name) {
            if let Some(earlier) = cells.insert(name, row) {
                tracing::warn!(
                    row = row.number,
                    earlier = earlier.number,
                    name,
                    "repeated header field, keeping the later value"
                );
            }
        } else {
            tracing::warn!(row = row.number, name, "ignoring unknown header field");
        }
    }

    let fields = Header::fields();
    let mut values = FieldValues::with_capacity(fields.len());
    for spec in fields {
        let (row, cell) = match cells.get(spec.name) {
            Some(row) => (row.number, row.cell(1)),
            None => (marker.number, spec.csv_default.unwrap_or("")),
        };
        let value = cell_to_value(cell, spec).map_err(|message| CsvError::InvalidField {
            row,
            field: spec.name,
            message,
        })?;
        values.push(spec.name, value);
    }
    Header::from_values(values).map_err(|source| CsvError::Record {
        row: marker.number,
        source,
    })
}

fn parse_details(section: &[Row]) -> Result<Vec<Detail>> {
    let expected = field_names(Detail::fields());
    let Some((columns, data)) = section.split_first() else {
        return Err(CsvError::DetailHeaderMismatch {
            expected: expected.iter().map(ToString::to_string).collect(),
            found: Vec::new(),
        });
    };
    if !columns.cells.iter().eq(expected.iter().copied()) {
        return Err(CsvError::DetailHeaderMismatch {
            expected: expected.iter().map(ToString::to_string).collect(),
            found: columns.cells.iter().map(ToString::to_string).collect(),
        });
    }

    let mut detalles = Vec::new();
    for row in data {
        if row.is_blank() {
            tracing::debug!(row = row.number, "skipping blank detail row");
            continue;
        }
        if row.cells.len() > expected.len() {
            tracing::warn!(
                row = row.number,
                cells = row.cells.len(),
                "ignoring cells past the last detail column"
            );
        }
        detalles.push(parse_detail(row)?);
    }
    Ok(detalles)
}

fn parse_detail(row: &Row) -> Result<Detail> {
    let fields = Detail::fields();
    let mut values = FieldValues::with_capacity(fields.len());
    for (idx, spec) in fields.iter().enumerate() {
        let value = cell_to_value(row.cell(idx), spec).map_err(|message| {
            CsvError::InvalidField {
                row: row.number,
                field: spec.name,
                message,
            }
        })?;
        values.push(spec.name, value);
    }
    Detail::from_values(values).map_err(|source| CsvError::Record {
        row: row.number,
        source,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rows(text: &str) -> Vec<Row> {
        read_rows(text.as_bytes()).expect("rows")
    }

    #[test]
    fn test_missing_markers() {
        let err = parse_rows(&rows("field,value\nmodelo,720\n")).expect_err("no markers");
        assert!(matches!(err, CsvError::MissingSection));
    }

    #[test]
    fn test_markers_out_of_order() {
        let text = "__SECTION__,DETALLES\n__SECTION__,HEADER\nmodelo,720\n";
        let err = parse_rows(&rows(text)).expect_err("wrong order");
        assert!(matches!(err, CsvError::MissingSection));
    }

    #[test]
    fn test_empty_header_section() {
        let text = "__SECTION__,HEADER\n,\n__SECTION__,DETALLES\n";
        let err = parse_rows(&rows(text)).expect_err("empty header");
        assert!(matches!(err, CsvError::EmptyHeaderSection));
    }

    #[test]
    fn test_detail_header_mismatch() {
        let text = "__SECTION__,HEADER\nejercicio,2024\n__SECTION__,DETALLES\ntipo_registro,modelo\n";
        let err = parse_rows(&rows(text)).expect_err("bad columns");
        match err {
            CsvError::DetailHeaderMismatch { expected, found } => {
                assert_eq!(expected.len(), 37);
                assert_eq!(found, vec!["tipo_registro", "modelo"]);
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_header_defaults() {
        let mut text = String::from("__SECTION__,HEADER\nfield,value\nejercicio,2024\n");
        text.push_str("__SECTION__,DETALLES\n");
        text.push_str(&field_names(Detail::fields()).join(","));
        text.push('\n');
        let declaration = parse_rows(&rows(&text)).expect("parse");
        assert_eq!(declaration.header.tipo_registro, 1);
        assert_eq!(declaration.header.modelo, "720");
        assert_eq!(declaration.header.ejercicio, 2024);
        assert!(declaration.detalles.is_empty());
    }

    #[test]
    fn test_repeated_header_field_keeps_later_value() {
        let mut text = String::from("__SECTION__,HEADER
ejercicio,2023
ejercicio,2024
");
        text.push_str("__SECTION__,DETALLES
");
        text.push_str(&field_names(Detail::fields()).join(","));
        text.push('\n');
        let declaration = parse_rows(&rows(&text)).expect("parse");
        assert_eq!(declaration.header.ejercicio, 2024);

        let text = "__SECTION__,HEADER
ejercicio,2024
ejercicio,20x4
__SECTION__,DETALLES
";
        let err = parse_rows(&rows(text)).expect_err("later value is read");
        assert!(matches!(
            err,
            CsvError::InvalidField {
                row: 3,
                field: "ejercicio",
                ..
            }
        ));
    }

    #[test]
    fn test_header_bad_integer_names_row() {
        let text = "__SECTION__,HEADER\nfield,value\nejercicio,20x4\n__SECTION__,DETALLES\n";
        let err = parse_rows(&rows(text)).expect_err("bad year");
        assert!(matches!(
            err,
            CsvError::InvalidField {
                row: 3,
                field: "ejercicio",
                ..
            }
        ));
    }
}
