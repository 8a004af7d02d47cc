//! Detail record checks.
//!
//! Which asset fields are legal, required or forbidden depends on
//! `clave_tipo_bien` (and for one field on `subclave`).

use m720_model::schema::{DETAIL_RECORD_TYPE, MODEL_CODE};
use m720_model::{AssetType, Detail, Origin};

use super::{is_blank, is_blank_opt, overlong_text};
use crate::issue::{Tier, Violation};
use crate::nif::is_valid_nif;

/// Largest participation percentage, in hundredths.
const MAX_PERCENTAGE: u32 = 10_000;

/// `subclave` of movable property that denotes a real right on real estate.
const REAL_RIGHT_SUBCLAVE: u8 = 5;

const ACCOUNT_ID_CODES: [&str; 2] = ["I", "O"];
const PROPERTY_TYPE_CODES: [&str; 2] = ["U", "R"];

pub fn check(index: usize, detail: &Detail) -> Vec<Violation> {
    let mut issues = structural(index, detail);
    issues.extend(identity(index, detail));
    issues.extend(business(index, detail));
    issues
}

fn structural(index: usize, detail: &Detail) -> Vec<Violation> {
    let mut issues = Vec::new();
    let mut push = |message: String| {
        issues.push(Violation::detail(Tier::Structural, index, message));
    };

    if detail.tipo_registro != DETAIL_RECORD_TYPE {
        push(format!("tipo_registro must be {DETAIL_RECORD_TYPE}"));
    }
    if detail.modelo != MODEL_CODE {
        push(format!("modelo must be {MODEL_CODE}"));
    }
    for (field, value) in [
        ("nif_declarante", &detail.nif_declarante),
        ("nif_declarado", &detail.nif_declarado),
        ("nombre_razon_declarado", &detail.nombre_razon_declarado),
    ] {
        if is_blank(value) {
            push(format!("{field} is required"));
        }
    }
    for (field, width) in overlong_text(detail) {
        push(format!("{field} exceeds max length {width}"));
    }
    issues
}

fn identity(index: usize, detail: &Detail) -> Vec<Violation> {
    [
        ("nif_declarante", Some(detail.nif_declarante.as_str())),
        ("nif_declarado", Some(detail.nif_declarado.as_str())),
        ("nif_representante", detail.nif_representante.as_deref()),
    ]
    .into_iter()
    .filter_map(|(field, value)| {
        let value = value.filter(|v| !is_blank(v))?;
        (!is_valid_nif(value)).then(|| {
            Violation::detail(
                Tier::Identity,
                index,
                format!("{field} '{value}' is not a valid NIF/NIE"),
            )
        })
    })
    .collect()
}

fn business(index: usize, detail: &Detail) -> Vec<Violation> {
    let mut issues = Vec::new();
    let mut push = |message: String| {
        issues.push(Violation::detail(Tier::Business, index, message));
    };
    let asset = detail.clave_tipo_bien;
    let code = asset.code();

    if !(1..=8).contains(&detail.clave_condicion) {
        push("clave_condicion must be between 1 and 8".to_string());
    }

    let (low, high) = asset.subtype_range();
    if !(low..=high).contains(&detail.subclave) {
        if low == high {
            push(format!("subclave must be {low} for clave '{code}'"));
        } else {
            push(format!(
                "subclave must be between {low} and {high} for clave '{code}'"
            ));
        }
    }

    if asset == AssetType::MovableProperty
        && detail.subclave == REAL_RIGHT_SUBCLAVE
        && is_blank_opt(detail.tipo_derecho_real_inmueble.as_deref())
    {
        push(format!(
            "tipo_derecho_real_inmueble is required for clave '{code}' subclave {REAL_RIGHT_SUBCLAVE}"
        ));
    }

    if detail.origen == Origin::Extinguished && detail.fecha_extincion.is_none() {
        push("origen 'C' requires fecha_extincion".to_string());
    }

    let ident_cuenta = trimmed(detail.clave_ident_cuenta.as_deref());
    if asset == AssetType::BankAccount
        && !ident_cuenta.is_empty()
        && !ACCOUNT_ID_CODES.contains(&ident_cuenta)
    {
        push("clave_ident_cuenta must be I/O".to_string());
    }

    let tipo_inmueble = trimmed(detail.clave_tipo_bien_inmueble.as_deref());
    if asset == AssetType::MovableProperty && !PROPERTY_TYPE_CODES.contains(&tipo_inmueble) {
        push("tipo inmueble must be U/R".to_string());
    }

    if asset.carries_securities() {
        if asset == AssetType::Securities
            && is_blank_opt(detail.identificacion_valores.as_deref())
        {
            push(format!("identificacion_valores is required for clave '{code}'"));
        }
    } else {
        let filled = [
            ("clave_identificacion", detail.clave_identificacion != 0),
            (
                "identificacion_valores",
                !is_blank_opt(detail.identificacion_valores.as_deref()),
            ),
            (
                "clave_repr_valores",
                !is_blank_opt(detail.clave_repr_valores.as_deref()),
            ),
            (
                "numero_valores",
                detail.numero_valores_entera != 0 || detail.numero_valores_decimal != 0,
            ),
        ];
        for (field, _) in filled.into_iter().filter(|(_, filled)| *filled) {
            push(format!("{field} only applies to clave 'V' or 'I'"));
        }
    }

    if asset == AssetType::MovableProperty {
        for (field, value) in [
            ("identificacion_entidad", &detail.identificacion_entidad),
            (
                "nif_entidad_pais_residencia",
                &detail.nif_entidad_pais_residencia,
            ),
        ] {
            if !is_blank_opt(value.as_deref()) {
                push(format!("{field} must be blank for clave '{code}'"));
            }
        }
    }

    if detail.porcentaje_participacion_decimal > 99
        || detail.porcentaje_centesimas() > MAX_PERCENTAGE
    {
        push("porcentaje_participacion must not exceed 100.00".to_string());
    }

    issues
}

fn trimmed(value: Option<&str>) -> &str {
    value.map_or("", str::trim)
}
