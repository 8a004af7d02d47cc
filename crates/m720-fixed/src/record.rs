//! Schema-driven decoding and encoding of one 500-column line.

use m720_model::{FieldValues, LINE_LEN, SchemaRecord};

use crate::error::{FormatError, Result};
use crate::value::{decode_value, encode_value};

/// Decode one line into a record.
///
/// Columns are counted in characters. A short line reads as if padded with
/// spaces.
pub fn decode_record<T: SchemaRecord>(line: &str, line_no: usize) -> Result<T> {
    let chars: Vec<char> = line.chars().collect();
    let fields = T::fields();
    let mut values = FieldValues::with_capacity(fields.len());
    for spec in fields {
        let start = (spec.start - 1).min(chars.len());
        let end = spec.end.min(chars.len());
        let raw: String = chars[start..end].iter().collect();
        let value = decode_value(&raw, spec)
            .map_err(|message| FormatError::invalid_field(line_no, spec.name, message))?;
        values.push(spec.name, value);
    }
    T::from_values(values).map_err(|source| FormatError::Record {
        line: line_no,
        source,
    })
}

/// Encode a record as one line of exactly [`LINE_LEN`] characters, without
/// a terminator.
pub fn encode_record<T: SchemaRecord>(record: &T, line_no: usize) -> Result<String> {
    let values = record.to_values();
    let mut line = String::with_capacity(LINE_LEN);
    let mut column = 0;
    for spec in T::fields() {
        let value = values.get(spec.name).ok_or_else(|| {
            FormatError::invalid_field(line_no, spec.name, "record provides no value")
        })?;
        let encoded = encode_value(value, spec)
            .map_err(|message| FormatError::invalid_field(line_no, spec.name, message))?;
        line.extend(std::iter::repeat_n(' ', spec.start - 1 - column));
        line.push_str(&encoded);
        column = spec.end;
    }
    line.extend(std::iter::repeat_n(' ', LINE_LEN.saturating_sub(column)));
    Ok(line)
}

#[cfg(test)]
mod tests {
    use super::*;
    use m720_model::{AssetType, Detail, Header, Origin, Valoracion};

    fn header() -> Header {
        let mut header = Header::new(2024, "12345678Z", "GARCIA LOPEZ JUAN", "7200000000001");
        header.numero_total_registros = 1;
        header.suma_valoracion_1 = Valoracion::positive(100_000);
        header
    }

    #[test]
    fn test_header_columns() {
        let line = encode_record(&header(), 1).expect("encode header");
        assert_eq!(line.chars().count(), LINE_LEN);
        assert_eq!(&line[0..8], "17202024");
        assert_eq!(&line[8..17], "12345678Z");
        assert_eq!(&line[57..58], "T");
        assert_eq!(&line[107..120], "7200000000001");
        assert_eq!(&line[135..144], "000000001");
        assert_eq!(&line[144..162], " 00000000000100000");
        assert!(line[180..].trim().is_empty());
    }

    #[test]
    fn test_header_roundtrip() {
        let header = header();
        let line = encode_record(&header, 1).expect("encode");
        let back: Header = decode_record(&line, 1).expect("decode");
        assert_eq!(back, header);
    }

    #[test]
    fn test_short_line_decodes() {
        let detail = Detail::new(
            2024,
            "12345678Z",
            "X1234567L",
            "SMITH JOHN",
            AssetType::Insurance,
            2,
            Origin::Modified,
        );
        let line = encode_record(&detail, 2).expect("encode");
        let trimmed = line.trim_end();
        let back: Detail = decode_record(trimmed, 2).expect("decode trimmed");
        assert_eq!(back, detail);
    }

    #[test]
    fn test_bad_field_is_named() {
        let mut line = encode_record(&header(), 1).expect("encode");
        line.replace_range(4..8, "20X4");
        let err = decode_record::<Header>(&line, 7).expect_err("bad year");
        assert!(matches!(
            err,
            FormatError::InvalidField {
                line: 7,
                field: "ejercicio",
                ..
            }
        ));
    }
}
