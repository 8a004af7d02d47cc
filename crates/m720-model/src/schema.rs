//! Field schema for the header and detail records.
//!
//! Column positions are 1-based and inclusive, exactly as printed in the
//! authority's record layout. Both tables are shared by the fixed-width and
//! CSV codecs: the fixed-width codec uses the column ranges, the CSV codec
//! uses `name` as the literal cell text and the table order as column order.
//!
//! # Header record (type 1)
//!
//! | Columns | Field                            | Kind   |
//! |---------|----------------------------------|--------|
//! | 1       | tipo_registro                    | int    |
//! | 2-4     | modelo                           | text   |
//! | 5-8     | ejercicio                        | int    |
//! | 9-17    | nif_declarante                   | text   |
//! | 18-57   | nombre_razon                     | text   |
//! | 58      | tipo_soporte                     | text   |
//! | 59-67   | telefono_contacto                | text   |
//! | 68-107  | persona_contacto                 | text   |
//! | 108-120 | numero_identificativo            | text   |
//! | 121     | declaracion_complementaria       | flag C |
//! | 122     | declaracion_sustitutiva          | flag S |
//! | 123-135 | numero_identificativo_anterior   | text   |
//! | 136-144 | numero_total_registros           | int    |
//! | 145-162 | suma_valoracion_1                | amount |
//! | 163-180 | suma_valoracion_2                | amount |

use std::fmt;

use crate::enums::EnumKind;

use self::FieldKind::{Amount, Date8, Integer, Text};

/// Length of every record line.
pub const LINE_LEN: usize = 500;

/// Form code carried by every record.
pub const MODEL_CODE: &str = "720";

/// Record type of the header line.
pub const HEADER_RECORD_TYPE: u8 = 1;

/// Record type of a detail line.
pub const DETAIL_RECORD_TYPE: u8 = 2;

/// Support type for telematic filing.
pub const SUPPORT_TYPE: &str = "T";

/// How a field's raw text maps to a value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FieldKind {
    /// Zero-padded unsigned digits.
    Integer,
    /// Space-padded text, right-trimmed on decode.
    Text,
    /// `YYYYMMDD`, with blank or `00000000` meaning no date.
    Date8,
    /// One column; the given character means true.
    Flag(char),
    /// Literal code of an enumeration.
    Enum(EnumKind),
    /// Sign column followed by the amount in cents.
    Amount,
}

impl fmt::Display for FieldKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FieldKind::Integer => f.write_str("integer"),
            FieldKind::Text => f.write_str("text"),
            FieldKind::Date8 => f.write_str("date"),
            FieldKind::Flag(ch) => write!(f, "flag '{ch}'"),
            FieldKind::Enum(EnumKind::AssetType) => f.write_str("asset type"),
            FieldKind::Enum(EnumKind::Origin) => f.write_str("origin"),
            FieldKind::Amount => f.write_str("amount"),
        }
    }
}

/// One entry of a record layout.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldSpec {
    pub name: &'static str,
    /// First column (1-based, inclusive).
    pub start: usize,
    /// Last column (1-based, inclusive).
    pub end: usize,
    pub kind: FieldKind,
    pub required: bool,
    /// Value assumed when a CSV header section omits the row.
    pub csv_default: Option<&'static str>,
}

impl FieldSpec {
    const fn new(name: &'static str, start: usize, end: usize, kind: FieldKind) -> Self {
        Self {
            name,
            start,
            end,
            kind,
            required: true,
            csv_default: None,
        }
    }

    const fn optional(self) -> Self {
        Self {
            required: false,
            ..self
        }
    }

    const fn csv_default(self, value: &'static str) -> Self {
        Self {
            csv_default: Some(value),
            ..self
        }
    }

    /// Number of columns the field occupies.
    pub const fn width(&self) -> usize {
        self.end - self.start + 1
    }

    /// Whether the column ranges of two fields intersect.
    pub const fn overlaps(&self, other: &FieldSpec) -> bool {
        self.start <= other.end && other.start <= self.end
    }
}

pub static HEADER_FIELDS: [FieldSpec; 15] = [
    FieldSpec::new("tipo_registro", 1, 1, Integer).csv_default("1"),
    FieldSpec::new("modelo", 2, 4, Text).csv_default(MODEL_CODE),
    FieldSpec::new("ejercicio", 5, 8, Integer),
    FieldSpec::new("nif_declarante", 9, 17, Text),
    FieldSpec::new("nombre_razon", 18, 57, Text),
    FieldSpec::new("tipo_soporte", 58, 58, Text),
    FieldSpec::new("telefono_contacto", 59, 67, Text).optional(),
    FieldSpec::new("persona_contacto", 68, 107, Text).optional(),
    FieldSpec::new("numero_identificativo", 108, 120, Text),
    FieldSpec::new("declaracion_complementaria", 121, 121, FieldKind::Flag('C')),
    FieldSpec::new("declaracion_sustitutiva", 122, 122, FieldKind::Flag('S')),
    FieldSpec::new("numero_identificativo_anterior", 123, 135, Text).optional(),
    FieldSpec::new("numero_total_registros", 136, 144, Integer),
    FieldSpec::new("suma_valoracion_1", 145, 162, Amount),
    FieldSpec::new("suma_valoracion_2", 163, 180, Amount),
];

pub static DETAIL_FIELDS: [FieldSpec; 37] = [
    FieldSpec::new("tipo_registro", 1, 1, Integer),
    FieldSpec::new("modelo", 2, 4, Text),
    FieldSpec::new("ejercicio", 5, 8, Integer),
    FieldSpec::new("nif_declarante", 9, 17, Text),
    FieldSpec::new("nif_declarado", 18, 26, Text),
    FieldSpec::new("nif_representante", 27, 35, Text).optional(),
    FieldSpec::new("nombre_razon_declarado", 36, 75, Text),
    FieldSpec::new("clave_condicion", 76, 76, Integer),
    FieldSpec::new("tipo_titularidad_texto", 77, 101, Text).optional(),
    FieldSpec::new(
        "clave_tipo_bien",
        102,
        102,
        FieldKind::Enum(EnumKind::AssetType),
    ),
    FieldSpec::new("subclave", 103, 103, Integer),
    FieldSpec::new("tipo_derecho_real_inmueble", 104, 128, Text).optional(),
    FieldSpec::new("codigo_pais", 129, 130, Text).optional(),
    FieldSpec::new("clave_identificacion", 131, 131, Integer).optional(),
    FieldSpec::new("identificacion_valores", 132, 143, Text).optional(),
    FieldSpec::new("clave_ident_cuenta", 144, 144, Text).optional(),
    FieldSpec::new("codigo_bic", 145, 155, Text).optional(),
    FieldSpec::new("codigo_cuenta", 156, 189, Text).optional(),
    FieldSpec::new("identificacion_entidad", 190, 230, Text).optional(),
    FieldSpec::new("nif_entidad_pais_residencia", 231, 250, Text).optional(),
    FieldSpec::new("domicilio_via_num", 251, 302, Text).optional(),
    FieldSpec::new("domicilio_complemento", 303, 342, Text).optional(),
    FieldSpec::new("domicilio_poblacion", 343, 372, Text).optional(),
    FieldSpec::new("domicilio_region", 373, 402, Text).optional(),
    FieldSpec::new("domicilio_cp", 403, 412, Text).optional(),
    FieldSpec::new("domicilio_pais", 413, 414, Text).optional(),
    FieldSpec::new("fecha_incorporacion", 415, 422, Date8).optional(),
    FieldSpec::new("origen", 423, 423, FieldKind::Enum(EnumKind::Origin)),
    FieldSpec::new("fecha_extincion", 424, 431, Date8).optional(),
    FieldSpec::new("valoracion_1", 432, 446, Amount),
    FieldSpec::new("valoracion_2", 447, 461, Amount),
    FieldSpec::new("clave_repr_valores", 462, 462, Text).optional(),
    FieldSpec::new("numero_valores_entera", 463, 472, Integer).optional(),
    FieldSpec::new("numero_valores_decimal", 473, 474, Integer).optional(),
    FieldSpec::new("clave_tipo_bien_inmueble", 475, 475, Text).optional(),
    FieldSpec::new("porcentaje_participacion_entera", 476, 478, Integer),
    FieldSpec::new("porcentaje_participacion_decimal", 479, 480, Integer),
];

/// Look up a field by name in a layout.
pub fn find_field(fields: &'static [FieldSpec], name: &str) -> Option<&'static FieldSpec> {
    fields.iter().find(|field| field.name == name)
}

/// Literal names of a layout, in order.
pub fn field_names(fields: &[FieldSpec]) -> Vec<&'static str> {
    fields.iter().map(|field| field.name).collect()
}
