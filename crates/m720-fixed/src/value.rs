//! Per-kind encoding of a single fixed-width field.
//!
//! Errors are plain messages; the record layer attaches line and field.

use chrono::NaiveDate;

use m720_model::{EnumCode, FieldKind, FieldSpec, FieldValue, Sign, Valoracion};

const NO_DATE: &str = "00000000";

/// Decode the raw column slice of a field.
pub fn decode_value(raw: &str, spec: &FieldSpec) -> Result<FieldValue, String> {
    match spec.kind {
        FieldKind::Integer => parse_digits(raw.trim()).map(FieldValue::Integer),
        FieldKind::Text => Ok(FieldValue::Text(raw.trim_end().to_string())),
        FieldKind::Date8 => decode_date(raw.trim()).map(FieldValue::Date),
        FieldKind::Flag(ch) => Ok(FieldValue::Flag(raw.starts_with(ch))),
        FieldKind::Enum(kind) => {
            let code = raw.trim();
            if code.is_empty() {
                if spec.required {
                    return Err(format!(
                        "required code is blank, expected one of {}",
                        kind.codes().join(", ")
                    ));
                }
                return Ok(FieldValue::Enum(None));
            }
            kind.parse(code).map(|code| FieldValue::Enum(Some(code)))
        }
        FieldKind::Amount => decode_amount(raw),
    }
}

/// Encode a value to exactly `spec.width()` characters.
pub fn encode_value(value: &FieldValue, spec: &FieldSpec) -> Result<String, String> {
    let width = spec.width();
    let encoded = match (value, spec.kind) {
        (FieldValue::Integer(n), FieldKind::Integer) => pad_digits(*n, width)?,
        (FieldValue::Text(text), FieldKind::Text) => pad_text(text, width),
        (FieldValue::Date(date), FieldKind::Date8) => pad_text(&encode_date(*date)?, width),
        (FieldValue::Flag(set), FieldKind::Flag(ch)) => {
            let mark = if *set { ch } else { ' ' };
            pad_text(mark.encode_utf8(&mut [0; 4]), width)
        }
        (FieldValue::Enum(code), FieldKind::Enum(_)) => {
            pad_text(code.map_or(" ", EnumCode::code), width)
        }
        (FieldValue::Amount(amount), FieldKind::Amount) => {
            let digits = pad_digits(amount.cents, width.saturating_sub(1))?;
            format!("{}{digits}", amount.sign.as_char())
        }
        _ => return Err(format!("value does not match {} field", spec.kind)),
    };
    Ok(encoded)
}

/// Empty means zero; anything else must be ASCII digits.
fn parse_digits(digits: &str) -> Result<u64, String> {
    if digits.is_empty() {
        return Ok(0);
    }
    if !digits.bytes().all(|b| b.is_ascii_digit()) {
        return Err(format!("expected digits, found '{digits}'"));
    }
    digits
        .parse()
        .map_err(|_| format!("number '{digits}' is too large"))
}

fn decode_date(raw: &str) -> Result<Option<NaiveDate>, String> {
    if raw.is_empty() || raw == NO_DATE {
        return Ok(None);
    }
    if raw.len() != 8 || !raw.bytes().all(|b| b.is_ascii_digit()) {
        return Err(format!("expected YYYYMMDD, found '{raw}'"));
    }
    NaiveDate::parse_from_str(raw, "%Y%m%d")
        .map(Some)
        .map_err(|e| format!("invalid date '{raw}': {e}"))
}

fn encode_date(date: Option<NaiveDate>) -> Result<String, String> {
    match date {
        None => Ok(NO_DATE.to_string()),
        Some(date) => {
            let text = date.format("%Y%m%d").to_string();
            if text.len() == 8 {
                Ok(text)
            } else {
                Err(format!("date {date} does not fit YYYYMMDD"))
            }
        }
    }
}

fn decode_amount(raw: &str) -> Result<FieldValue, String> {
    let mut chars = raw.chars();
    let sign = chars.next().map_or(Sign::Positive, Sign::from_char);
    let cents = parse_digits(chars.as_str().trim())?;
    Ok(FieldValue::Amount(Valoracion::new(sign, cents)))
}

fn pad_digits(value: u64, width: usize) -> Result<String, String> {
    let digits = format!("{value:0>width$}");
    if digits.len() > width {
        return Err(format!("{value} does not fit in {width} digits"));
    }
    Ok(digits)
}

/// Left-justify, space-padding or truncating by characters.
fn pad_text(text: &str, width: usize) -> String {
    let mut out: String = text.chars().take(width).collect();
    let len = out.chars().count();
    out.extend(std::iter::repeat_n(' ', width - len));
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use m720_model::schema::find_field;
    use m720_model::{AssetType, DETAIL_FIELDS, HEADER_FIELDS, Origin};

    fn header(name: &str) -> &'static FieldSpec {
        find_field(&HEADER_FIELDS, name).expect("header field")
    }

    fn detail(name: &str) -> &'static FieldSpec {
        find_field(&DETAIL_FIELDS, name).expect("detail field")
    }

    #[test]
    fn test_integer() {
        let spec = header("ejercicio");
        assert_eq!(decode_value("2024", spec), Ok(FieldValue::Integer(2024)));
        assert_eq!(decode_value("    ", spec), Ok(FieldValue::Integer(0)));
        assert!(decode_value("20X4", spec).is_err());
        assert_eq!(
            encode_value(&FieldValue::Integer(7), spec).as_deref(),
            Ok("0007")
        );
        assert!(encode_value(&FieldValue::Integer(12_345), spec).is_err());
    }

    #[test]
    fn test_text() {
        let spec = header("nif_declarante");
        assert_eq!(
            decode_value("1234Z    ", spec),
            Ok(FieldValue::Text("1234Z".to_string()))
        );
        assert_eq!(
            encode_value(&FieldValue::Text("ABC".to_string()), spec).as_deref(),
            Ok("ABC      ")
        );
        assert_eq!(
            encode_value(&FieldValue::Text("0123456789AB".to_string()), spec).as_deref(),
            Ok("012345678")
        );
    }

    #[test]
    fn test_text_counts_characters() {
        let spec = header("nif_declarante");
        let encoded = encode_value(&FieldValue::Text("ÑÁÉ".to_string()), spec).expect("encode");
        assert_eq!(encoded.chars().count(), 9);
        assert!(encoded.starts_with("ÑÁÉ"));
    }

    #[test]
    fn test_date() {
        let spec = detail("fecha_incorporacion");
        let date = NaiveDate::from_ymd_opt(2024, 2, 29);
        assert_eq!(decode_value("20240229", spec), Ok(FieldValue::Date(date)));
        assert_eq!(decode_value("00000000", spec), Ok(FieldValue::Date(None)));
        assert_eq!(decode_value("        ", spec), Ok(FieldValue::Date(None)));
        assert!(decode_value("2024022", spec).is_err());
        assert!(decode_value("20230229", spec).is_err());
        assert_eq!(
            encode_value(&FieldValue::Date(None), spec).as_deref(),
            Ok("00000000")
        );
        assert_eq!(
            encode_value(&FieldValue::Date(date), spec).as_deref(),
            Ok("20240229")
        );
    }

    #[test]
    fn test_flag() {
        let spec = header("declaracion_complementaria");
        assert_eq!(decode_value("C", spec), Ok(FieldValue::Flag(true)));
        assert_eq!(decode_value(" ", spec), Ok(FieldValue::Flag(false)));
        assert_eq!(decode_value("S", spec), Ok(FieldValue::Flag(false)));
        assert_eq!(
            encode_value(&FieldValue::Flag(false), spec).as_deref(),
            Ok(" ")
        );
        assert_eq!(
            encode_value(&FieldValue::Flag(true), spec).as_deref(),
            Ok("C")
        );
    }

    #[test]
    fn test_enum() {
        let spec = detail("clave_tipo_bien");
        assert_eq!(
            decode_value("V", spec),
            Ok(FieldValue::Enum(Some(EnumCode::AssetType(
                AssetType::Securities
            ))))
        );
        assert!(decode_value("X", spec).is_err());
        assert!(decode_value(" ", spec).is_err());
        let origin = detail("origen");
        assert_eq!(
            encode_value(
                &FieldValue::Enum(Some(EnumCode::Origin(Origin::Extinguished))),
                origin
            )
            .as_deref(),
            Ok("C")
        );
    }

    #[test]
    fn test_amount() {
        let spec = detail("valoracion_1");
        assert_eq!(
            decode_value("N00000000025000", spec),
            Ok(FieldValue::Amount(Valoracion::negative(25_000)))
        );
        assert_eq!(
            decode_value(" 00000000100000", spec),
            Ok(FieldValue::Amount(Valoracion::positive(100_000)))
        );
        assert!(decode_value(" 0000000001,000", spec).is_err());
        assert_eq!(
            encode_value(&FieldValue::Amount(Valoracion::negative(25_000)), spec).as_deref(),
            Ok("N00000000025000")
        );
        assert_eq!(
            encode_value(&FieldValue::Amount(Valoracion::ZERO), spec).as_deref(),
            Ok(" 00000000000000")
        );
    }

    #[test]
    fn test_kind_mismatch() {
        let spec = header("ejercicio");
        assert!(encode_value(&FieldValue::Text("2024".to_string()), spec).is_err());
    }
}
