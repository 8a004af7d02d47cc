//! Header record checks.

use m720_model::Header;
use m720_model::schema::{HEADER_RECORD_TYPE, MODEL_CODE, SUPPORT_TYPE};

use super::{is_blank, is_digits, overlong_text};
use crate::issue::{Tier, Violation};
use crate::nif::is_valid_nif;

const IDENTIFIER_LEN: usize = 13;

pub fn check(header: &Header) -> Vec<Violation> {
    let mut issues = Vec::new();
    let mut structural = |message: String| {
        issues.push(Violation::header(Tier::Structural, message));
    };

    if header.tipo_registro != HEADER_RECORD_TYPE {
        structural(format!("Header tipo_registro must be {HEADER_RECORD_TYPE}"));
    }
    if header.modelo != MODEL_CODE {
        structural(format!("Modelo must be {MODEL_CODE}"));
    }
    if header.tipo_soporte != SUPPORT_TYPE {
        structural(format!("Header tipo_soporte must be '{SUPPORT_TYPE}'"));
    }
    if is_blank(&header.nif_declarante) {
        structural("Header nif_declarante is required".to_string());
    }
    if is_blank(&header.nombre_razon) {
        structural("Header nombre_razon is required".to_string());
    }
    for (field, width) in overlong_text(header) {
        structural(format!("Header {field} exceeds max length {width}"));
    }

    if !is_digits(&header.numero_identificativo, IDENTIFIER_LEN) {
        structural("Header numero_identificativo must be 13 digits".to_string());
    } else if !header.numero_identificativo.starts_with(MODEL_CODE) {
        structural(format!(
            "Header numero_identificativo must start with {MODEL_CODE}"
        ));
    }

    if header.declaracion_complementaria && header.declaracion_sustitutiva {
        structural(
            "Header declaracion_complementaria and declaracion_sustitutiva are mutually exclusive"
                .to_string(),
        );
    }
    let anterior = header.numero_identificativo_anterior.as_deref();
    match (header.is_amendment(), anterior) {
        (true, None) => structural(
            "Header numero_identificativo_anterior is required for complementary or substitutive declarations"
                .to_string(),
        ),
        (true, Some(value)) if is_blank(value) => structural(
            "Header numero_identificativo_anterior is required for complementary or substitutive declarations"
                .to_string(),
        ),
        (true, Some(value)) if !is_digits(value, IDENTIFIER_LEN) => structural(
            "Header numero_identificativo_anterior must be 13 digits".to_string(),
        ),
        _ => {}
    }

    if !is_blank(&header.nif_declarante) && !is_valid_nif(&header.nif_declarante) {
        issues.push(Violation::header(
            Tier::Identity,
            format!(
                "Header nif_declarante '{}' is not a valid NIF/NIE",
                header.nif_declarante
            ),
        ));
    }

    issues
}
