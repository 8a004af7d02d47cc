//! Modelo 720 validation.
//!
//! Two tiers of rules run over a decoded [`Declaration`]: structural
//! (constants, identifiers, record count, exact totals) and business rules
//! that depend on each detail's asset type. NIF/NIE fields are checked with
//! the control-letter algorithm in [`nif`]. Every rule is evaluated and all
//! violations are reported in one pass; the declaration is never modified.
//!
//! # Example
//!
//! ```
//! use m720_model::{Declaration, Header};
//! use m720_validate::validate;
//!
//! let mut header = Header::new(2024, "12345678Z", "GARCIA LOPEZ JUAN", "7200000000001");
//! header.numero_total_registros = 3;
//! let problems = validate(&Declaration::new(header, Vec::new()));
//! assert_eq!(problems, vec!["Número total de registros 3 does not match detail count 0"]);
//! ```

mod checks;
mod issue;
pub mod nif;

use m720_model::Declaration;

pub use issue::{Tier, ValidationError, ValidationReport, Violation};
pub use nif::is_valid_nif;

/// Validate a declaration and return the full report.
pub fn validate_report(declaration: &Declaration) -> ValidationReport {
    let report = checks::run_all(declaration);
    tracing::debug!(
        details = declaration.detalles.len(),
        violations = report.len(),
        "validated declaration"
    );
    report
}

/// Validate a declaration and return every violation message, in order.
pub fn validate(declaration: &Declaration) -> Vec<String> {
    validate_report(declaration).messages()
}

/// `Ok` when the declaration has no violations.
pub fn ensure_valid(declaration: &Declaration) -> Result<(), ValidationError> {
    validate_report(declaration).into_result()
}
