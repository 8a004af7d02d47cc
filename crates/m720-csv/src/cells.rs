//! Conversion between CSV cells and field values.
//!
//! Cells are human-editable: dates are ISO `YYYY-MM-DD`, amounts are plain
//! decimals in units, flags are `1`/`0`. Every cell must still fit the
//! column span of its fixed-width field.

use std::str::FromStr;

use chrono::NaiveDate;
use rust_decimal::Decimal;
use rust_decimal::prelude::ToPrimitive;

use m720_model::{EnumCode, FieldKind, FieldSpec, FieldValue, Sign, Valoracion};

const DATE_FORMAT: &str = "%Y-%m-%d";

/// Tokens read as a set flag, compared case-insensitively.
const TRUTHY: [&str; 7] = ["1", "true", "t", "yes", "y", "si", "sí"];

/// Render a value as its cell text.
pub fn value_to_cell(value: &FieldValue) -> String {
    match value {
        FieldValue::Integer(n) => n.to_string(),
        FieldValue::Text(text) => text.clone(),
        FieldValue::Date(date) => date
            .map(|d| d.format(DATE_FORMAT).to_string())
            .unwrap_or_default(),
        FieldValue::Flag(set) => String::from(if *set { "1" } else { "0" }),
        FieldValue::Enum(code) => code.map(EnumCode::code).unwrap_or_default().to_string(),
        FieldValue::Amount(amount) => amount.to_string(),
    }
}

/// Parse a cell for the given field.
pub fn cell_to_value(cell: &str, spec: &FieldSpec) -> Result<FieldValue, String> {
    let cell = cell.trim();
    match spec.kind {
        FieldKind::Integer => parse_integer(cell, spec.width()).map(FieldValue::Integer),
        FieldKind::Text => {
            let width = spec.width();
            if cell.chars().count() > width {
                return Err(format!("exceeds max length {width}"));
            }
            Ok(FieldValue::Text(cell.to_string()))
        }
        FieldKind::Date8 => parse_date(cell).map(FieldValue::Date),
        FieldKind::Flag(_) => Ok(FieldValue::Flag(is_truthy(cell))),
        FieldKind::Enum(kind) => {
            if cell.is_empty() {
                if spec.required {
                    return Err("is required".to_string());
                }
                return Ok(FieldValue::Enum(None));
            }
            kind.parse(cell)
                .map(|code| FieldValue::Enum(Some(code)))
                .map_err(|_| format!("invalid value '{cell}'"))
        }
        FieldKind::Amount => parse_amount(cell, spec.width() - 1).map(FieldValue::Amount),
    }
}

fn parse_integer(cell: &str, width: usize) -> Result<u64, String> {
    if cell.is_empty() {
        return Ok(0);
    }
    if !cell.bytes().all(|b| b.is_ascii_digit()) {
        return Err("must be integer".to_string());
    }
    let digits = cell.trim_start_matches('0');
    if digits.len() > width {
        return Err(format!("exceeds max length {width}"));
    }
    if digits.is_empty() {
        return Ok(0);
    }
    digits
        .parse()
        .map_err(|_| format!("exceeds max length {width}"))
}

fn parse_date(cell: &str) -> Result<Option<NaiveDate>, String> {
    if cell.is_empty() {
        return Ok(None);
    }
    NaiveDate::parse_from_str(cell, DATE_FORMAT)
        .map(Some)
        .map_err(|_| "must be YYYY-MM-DD".to_string())
}

fn is_truthy(cell: &str) -> bool {
    let cell = cell.to_lowercase();
    TRUTHY.contains(&cell.as_str())
}

/// Decimal units to [`Valoracion`]. The magnitude is truncated toward zero
/// to whole cents. The sign follows the numeric value, so a zero amount is
/// always positive.
fn parse_amount(cell: &str, digits: usize) -> Result<Valoracion, String> {
    if cell.is_empty() {
        return Ok(Valoracion::ZERO);
    }
    let value = Decimal::from_str(cell).map_err(|_| format!("invalid amount '{cell}'"))?;
    let cents = (value.abs() * Decimal::ONE_HUNDRED)
        .trunc()
        .to_u64()
        .ok_or_else(|| format!("amount '{cell}' is out of range"))?;
    let sign = if value.is_sign_negative() && cents > 0 {
        Sign::Negative
    } else {
        Sign::Positive
    };
    if cents.to_string().len() > digits {
        return Err(format!("amount '{cell}' exceeds {digits} digits in cents"));
    }
    Ok(Valoracion::new(sign, cents))
}
