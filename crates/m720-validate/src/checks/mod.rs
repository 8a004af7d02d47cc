//! Validation check modules.
//!
//! Each module covers one part of the declaration. All checks run; none
//! stops at the first failure.

mod detail;
mod header;
mod totals;

use m720_model::{Declaration, FieldValue, SchemaRecord};

use crate::issue::ValidationReport;

/// Run every check on a declaration.
pub fn run_all(declaration: &Declaration) -> ValidationReport {
    let mut report = ValidationReport::new();

    // 1. Header constants, identifiers and amendment flags
    report.extend(header::check(&declaration.header));

    // 2. Declared record count
    report.extend(totals::check_count(declaration));

    // 3. Per-detail constants, identities and asset rules
    for (idx, detail) in declaration.detalles.iter().enumerate() {
        report.extend(detail::check(idx + 1, detail));
    }

    // 4. Aggregate amounts
    report.extend(totals::check_sums(declaration));

    report
}

fn is_blank(value: &str) -> bool {
    value.trim().is_empty()
}

fn is_blank_opt(value: Option<&str>) -> bool {
    value.is_none_or(is_blank)
}

fn is_digits(value: &str, len: usize) -> bool {
    value.len() == len && value.bytes().all(|b| b.is_ascii_digit())
}

/// Text fields longer than their column span, with that span.
fn overlong_text<T: SchemaRecord>(record: &T) -> Vec<(&'static str, usize)> {
    let values = record.to_values();
    T::fields()
        .iter()
        .zip(values.iter())
        .filter_map(|(spec, (_, value))| match value {
            FieldValue::Text(text) if text.chars().count() > spec.width() => {
                Some((spec.name, spec.width()))
            }
            _ => None,
        })
        .collect()
}
