//! Record count and aggregate amount reconciliation.
//!
//! Sums are exact, in signed cents. There is no tolerance: one cent off is
//! a mismatch.

use m720_model::{Declaration, Valoracion};

use crate::issue::{Tier, Violation};

pub fn check_count(declaration: &Declaration) -> Option<Violation> {
    let declared = declaration.header.numero_total_registros;
    let actual = declaration.detalles.len();
    (usize::try_from(declared).ok() != Some(actual)).then(|| {
        Violation::header(
            Tier::Structural,
            format!("Número total de registros {declared} does not match detail count {actual}"),
        )
    })
}

pub fn check_sums(declaration: &Declaration) -> Vec<Violation> {
    let header = &declaration.header;
    [
        (1, header.suma_valoracion_1, declaration.total_valoracion_1()),
        (2, header.suma_valoracion_2, declaration.total_valoracion_2()),
    ]
    .into_iter()
    .filter(|(_, declared, actual)| declared.signed_cents() != actual.signed_cents())
    .map(|(n, declared, actual)| mismatch(n, declared, actual))
    .collect()
}

fn mismatch(n: u8, declared: Valoracion, actual: Valoracion) -> Violation {
    Violation::header(
        Tier::Structural,
        format!("SUMA VALORACIÓN {n} mismatch: header {declared} vs sum {actual}"),
    )
}
