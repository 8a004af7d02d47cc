//! Header, detail and declaration records.
//!
//! Field names follow the layout names so the same identifiers appear in the
//! fixed-width schema, the CSV cells and the JSON export.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::enums::{AssetType, EnumCode, Origin};
use crate::error::Result;
use crate::schema::{
    DETAIL_FIELDS, DETAIL_RECORD_TYPE, FieldSpec, HEADER_FIELDS, HEADER_RECORD_TYPE, MODEL_CODE,
    SUPPORT_TYPE,
};
use crate::valoracion::{Valoracion, sum_signed_cents};
use crate::values::{FieldValue, FieldValues, SchemaRecord};

/// Summary record of a declaration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Header {
    pub tipo_registro: u8,
    pub modelo: String,
    pub ejercicio: u16,
    pub nif_declarante: String,
    pub nombre_razon: String,
    pub tipo_soporte: String,
    pub telefono_contacto: Option<String>,
    pub persona_contacto: Option<String>,
    /// 13-digit filing identifier, starting with the form code.
    pub numero_identificativo: String,
    pub declaracion_complementaria: bool,
    pub declaracion_sustitutiva: bool,
    pub numero_identificativo_anterior: Option<String>,
    pub numero_total_registros: u32,
    pub suma_valoracion_1: Valoracion,
    pub suma_valoracion_2: Valoracion,
}

impl Header {
    /// A first-time filing header with zero totals.
    pub fn new(
        ejercicio: u16,
        nif_declarante: impl Into<String>,
        nombre_razon: impl Into<String>,
        numero_identificativo: impl Into<String>,
    ) -> Self {
        Self {
            tipo_registro: HEADER_RECORD_TYPE,
            modelo: MODEL_CODE.to_string(),
            ejercicio,
            nif_declarante: nif_declarante.into(),
            nombre_razon: nombre_razon.into(),
            tipo_soporte: SUPPORT_TYPE.to_string(),
            telefono_contacto: None,
            persona_contacto: None,
            numero_identificativo: numero_identificativo.into(),
            declaracion_complementaria: false,
            declaracion_sustitutiva: false,
            numero_identificativo_anterior: None,
            numero_total_registros: 0,
            suma_valoracion_1: Valoracion::ZERO,
            suma_valoracion_2: Valoracion::ZERO,
        }
    }

    /// Whether either amendment flag is set.
    pub fn is_amendment(&self) -> bool {
        self.declaracion_complementaria || self.declaracion_sustitutiva
    }

    /// Replace blank optional text with `None`.
    pub fn normalize(&mut self) {
        for value in [
            &mut self.telefono_contacto,
            &mut self.persona_contacto,
            &mut self.numero_identificativo_anterior,
        ] {
            blank_to_none(value);
        }
    }
}

impl SchemaRecord for Header {
    fn fields() -> &'static [FieldSpec] {
        &HEADER_FIELDS
    }

    fn to_values(&self) -> FieldValues {
        let mut values = FieldValues::with_capacity(HEADER_FIELDS.len());
        values.push("tipo_registro", int(self.tipo_registro));
        values.push("modelo", text(&self.modelo));
        values.push("ejercicio", int(self.ejercicio));
        values.push("nif_declarante", text(&self.nif_declarante));
        values.push("nombre_razon", text(&self.nombre_razon));
        values.push("tipo_soporte", text(&self.tipo_soporte));
        values.push("telefono_contacto", opt_text(&self.telefono_contacto));
        values.push("persona_contacto", opt_text(&self.persona_contacto));
        values.push("numero_identificativo", text(&self.numero_identificativo));
        values.push(
            "declaracion_complementaria",
            FieldValue::Flag(self.declaracion_complementaria),
        );
        values.push(
            "declaracion_sustitutiva",
            FieldValue::Flag(self.declaracion_sustitutiva),
        );
        values.push(
            "numero_identificativo_anterior",
            opt_text(&self.numero_identificativo_anterior),
        );
        values.push("numero_total_registros", int(self.numero_total_registros));
        values.push("suma_valoracion_1", FieldValue::Amount(self.suma_valoracion_1));
        values.push("suma_valoracion_2", FieldValue::Amount(self.suma_valoracion_2));
        values
    }

    fn from_values(mut values: FieldValues) -> Result<Self> {
        Ok(Self {
            tipo_registro: values.take_int("tipo_registro")?,
            modelo: values.take_text("modelo")?,
            ejercicio: values.take_int("ejercicio")?,
            nif_declarante: values.take_text("nif_declarante")?,
            nombre_razon: values.take_text("nombre_razon")?,
            tipo_soporte: values.take_text("tipo_soporte")?,
            telefono_contacto: values.take_opt_text("telefono_contacto")?,
            persona_contacto: values.take_opt_text("persona_contacto")?,
            numero_identificativo: values.take_text("numero_identificativo")?,
            declaracion_complementaria: values.take_flag("declaracion_complementaria")?,
            declaracion_sustitutiva: values.take_flag("declaracion_sustitutiva")?,
            numero_identificativo_anterior: values
                .take_opt_text("numero_identificativo_anterior")?,
            numero_total_registros: values.take_int("numero_total_registros")?,
            suma_valoracion_1: values.take_amount("suma_valoracion_1")?,
            suma_valoracion_2: values.take_amount("suma_valoracion_2")?,
        })
    }
}

/// One declared asset or right.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Detail {
    pub tipo_registro: u8,
    pub modelo: String,
    pub ejercicio: u16,
    pub nif_declarante: String,
    pub nif_declarado: String,
    pub nif_representante: Option<String>,
    pub nombre_razon_declarado: String,
    /// Holder condition, 1 to 8.
    pub clave_condicion: u8,
    pub tipo_titularidad_texto: Option<String>,
    pub clave_tipo_bien: AssetType,
    pub subclave: u8,
    pub tipo_derecho_real_inmueble: Option<String>,
    pub codigo_pais: Option<String>,
    pub clave_identificacion: u8,
    pub identificacion_valores: Option<String>,
    pub clave_ident_cuenta: Option<String>,
    pub codigo_bic: Option<String>,
    pub codigo_cuenta: Option<String>,
    pub identificacion_entidad: Option<String>,
    pub nif_entidad_pais_residencia: Option<String>,
    pub domicilio_via_num: Option<String>,
    pub domicilio_complemento: Option<String>,
    pub domicilio_poblacion: Option<String>,
    pub domicilio_region: Option<String>,
    pub domicilio_cp: Option<String>,
    pub domicilio_pais: Option<String>,
    pub fecha_incorporacion: Option<NaiveDate>,
    pub origen: Origin,
    pub fecha_extincion: Option<NaiveDate>,
    pub valoracion_1: Valoracion,
    pub valoracion_2: Valoracion,
    pub clave_repr_valores: Option<String>,
    pub numero_valores_entera: u64,
    pub numero_valores_decimal: u8,
    pub clave_tipo_bien_inmueble: Option<String>,
    pub porcentaje_participacion_entera: u16,
    pub porcentaje_participacion_decimal: u8,
}

impl Detail {
    /// A detail with full ownership, zero amounts and an empty asset block.
    pub fn new(
        ejercicio: u16,
        nif_declarante: impl Into<String>,
        nif_declarado: impl Into<String>,
        nombre_razon_declarado: impl Into<String>,
        clave_tipo_bien: AssetType,
        subclave: u8,
        origen: Origin,
    ) -> Self {
        Self {
            tipo_registro: DETAIL_RECORD_TYPE,
            modelo: MODEL_CODE.to_string(),
            ejercicio,
            nif_declarante: nif_declarante.into(),
            nif_declarado: nif_declarado.into(),
            nif_representante: None,
            nombre_razon_declarado: nombre_razon_declarado.into(),
            clave_condicion: 1,
            tipo_titularidad_texto: None,
            clave_tipo_bien,
            subclave,
            tipo_derecho_real_inmueble: None,
            codigo_pais: None,
            clave_identificacion: 0,
            identificacion_valores: None,
            clave_ident_cuenta: None,
            codigo_bic: None,
            codigo_cuenta: None,
            identificacion_entidad: None,
            nif_entidad_pais_residencia: None,
            domicilio_via_num: None,
            domicilio_complemento: None,
            domicilio_poblacion: None,
            domicilio_region: None,
            domicilio_cp: None,
            domicilio_pais: None,
            fecha_incorporacion: None,
            origen,
            fecha_extincion: None,
            valoracion_1: Valoracion::ZERO,
            valoracion_2: Valoracion::ZERO,
            clave_repr_valores: None,
            numero_valores_entera: 0,
            numero_valores_decimal: 0,
            clave_tipo_bien_inmueble: None,
            porcentaje_participacion_entera: 100,
            porcentaje_participacion_decimal: 0,
        }
    }

    /// Replace blank optional text with `None`.
    pub fn normalize(&mut self) {
        for value in [
            &mut self.nif_representante,
            &mut self.tipo_titularidad_texto,
            &mut self.tipo_derecho_real_inmueble,
            &mut self.codigo_pais,
            &mut self.identificacion_valores,
            &mut self.clave_ident_cuenta,
            &mut self.codigo_bic,
            &mut self.codigo_cuenta,
            &mut self.identificacion_entidad,
            &mut self.nif_entidad_pais_residencia,
            &mut self.domicilio_via_num,
            &mut self.domicilio_complemento,
            &mut self.domicilio_poblacion,
            &mut self.domicilio_region,
            &mut self.domicilio_cp,
            &mut self.domicilio_pais,
            &mut self.clave_repr_valores,
            &mut self.clave_tipo_bien_inmueble,
        ] {
            blank_to_none(value);
        }
    }

    /// Participation percentage in hundredths (10000 = 100.00%).
    pub fn porcentaje_centesimas(&self) -> u32 {
        u32::from(self.porcentaje_participacion_entera) * 100
            + u32::from(self.porcentaje_participacion_decimal)
    }
}

impl SchemaRecord for Detail {
    fn fields() -> &'static [FieldSpec] {
        &DETAIL_FIELDS
    }

    fn to_values(&self) -> FieldValues {
        let mut v = FieldValues::with_capacity(DETAIL_FIELDS.len());
        v.push("tipo_registro", int(self.tipo_registro));
        v.push("modelo", text(&self.modelo));
        v.push("ejercicio", int(self.ejercicio));
        v.push("nif_declarante", text(&self.nif_declarante));
        v.push("nif_declarado", text(&self.nif_declarado));
        v.push("nif_representante", opt_text(&self.nif_representante));
        v.push("nombre_razon_declarado", text(&self.nombre_razon_declarado));
        v.push("clave_condicion", int(self.clave_condicion));
        v.push("tipo_titularidad_texto", opt_text(&self.tipo_titularidad_texto));
        v.push(
            "clave_tipo_bien",
            FieldValue::Enum(Some(EnumCode::AssetType(self.clave_tipo_bien))),
        );
        v.push("subclave", int(self.subclave));
        v.push(
            "tipo_derecho_real_inmueble",
            opt_text(&self.tipo_derecho_real_inmueble),
        );
        v.push("codigo_pais", opt_text(&self.codigo_pais));
        v.push("clave_identificacion", int(self.clave_identificacion));
        v.push("identificacion_valores", opt_text(&self.identificacion_valores));
        v.push("clave_ident_cuenta", opt_text(&self.clave_ident_cuenta));
        v.push("codigo_bic", opt_text(&self.codigo_bic));
        v.push("codigo_cuenta", opt_text(&self.codigo_cuenta));
        v.push("identificacion_entidad", opt_text(&self.identificacion_entidad));
        v.push(
            "nif_entidad_pais_residencia",
            opt_text(&self.nif_entidad_pais_residencia),
        );
        v.push("domicilio_via_num", opt_text(&self.domicilio_via_num));
        v.push("domicilio_complemento", opt_text(&self.domicilio_complemento));
        v.push("domicilio_poblacion", opt_text(&self.domicilio_poblacion));
        v.push("domicilio_region", opt_text(&self.domicilio_region));
        v.push("domicilio_cp", opt_text(&self.domicilio_cp));
        v.push("domicilio_pais", opt_text(&self.domicilio_pais));
        v.push("fecha_incorporacion", FieldValue::Date(self.fecha_incorporacion));
        v.push(
            "origen",
            FieldValue::Enum(Some(EnumCode::Origin(self.origen))),
        );
        v.push("fecha_extincion", FieldValue::Date(self.fecha_extincion));
        v.push("valoracion_1", FieldValue::Amount(self.valoracion_1));
        v.push("valoracion_2", FieldValue::Amount(self.valoracion_2));
        v.push("clave_repr_valores", opt_text(&self.clave_repr_valores));
        v.push("numero_valores_entera", int(self.numero_valores_entera));
        v.push("numero_valores_decimal", int(self.numero_valores_decimal));
        v.push(
            "clave_tipo_bien_inmueble",
            opt_text(&self.clave_tipo_bien_inmueble),
        );
        v.push(
            "porcentaje_participacion_entera",
            int(self.porcentaje_participacion_entera),
        );
        v.push(
            "porcentaje_participacion_decimal",
            int(self.porcentaje_participacion_decimal),
        );
        v
    }

    fn from_values(mut v: FieldValues) -> Result<Self> {
        Ok(Self {
            tipo_registro: v.take_int("tipo_registro")?,
            modelo: v.take_text("modelo")?,
            ejercicio: v.take_int("ejercicio")?,
            nif_declarante: v.take_text("nif_declarante")?,
            nif_declarado: v.take_text("nif_declarado")?,
            nif_representante: v.take_opt_text("nif_representante")?,
            nombre_razon_declarado: v.take_text("nombre_razon_declarado")?,
            clave_condicion: v.take_int("clave_condicion")?,
            tipo_titularidad_texto: v.take_opt_text("tipo_titularidad_texto")?,
            clave_tipo_bien: v.take_asset_type("clave_tipo_bien")?,
            subclave: v.take_int("subclave")?,
            tipo_derecho_real_inmueble: v.take_opt_text("tipo_derecho_real_inmueble")?,
            codigo_pais: v.take_opt_text("codigo_pais")?,
            clave_identificacion: v.take_int("clave_identificacion")?,
            identificacion_valores: v.take_opt_text("identificacion_valores")?,
            clave_ident_cuenta: v.take_opt_text("clave_ident_cuenta")?,
            codigo_bic: v.take_opt_text("codigo_bic")?,
            codigo_cuenta: v.take_opt_text("codigo_cuenta")?,
            identificacion_entidad: v.take_opt_text("identificacion_entidad")?,
            nif_entidad_pais_residencia: v.take_opt_text("nif_entidad_pais_residencia")?,
            domicilio_via_num: v.take_opt_text("domicilio_via_num")?,
            domicilio_complemento: v.take_opt_text("domicilio_complemento")?,
            domicilio_poblacion: v.take_opt_text("domicilio_poblacion")?,
            domicilio_region: v.take_opt_text("domicilio_region")?,
            domicilio_cp: v.take_opt_text("domicilio_cp")?,
            domicilio_pais: v.take_opt_text("domicilio_pais")?,
            fecha_incorporacion: v.take_date("fecha_incorporacion")?,
            origen: v.take_origin("origen")?,
            fecha_extincion: v.take_date("fecha_extincion")?,
            valoracion_1: v.take_amount("valoracion_1")?,
            valoracion_2: v.take_amount("valoracion_2")?,
            clave_repr_valores: v.take_opt_text("clave_repr_valores")?,
            numero_valores_entera: v.take_int("numero_valores_entera")?,
            numero_valores_decimal: v.take_int("numero_valores_decimal")?,
            clave_tipo_bien_inmueble: v.take_opt_text("clave_tipo_bien_inmueble")?,
            porcentaje_participacion_entera: v.take_int("porcentaje_participacion_entera")?,
            porcentaje_participacion_decimal: v.take_int("porcentaje_participacion_decimal")?,
        })
    }
}

/// A complete filing: one header and its details in filing order.
///
/// Blank optional text has a single form, `None`: both codecs write a blank
/// column for it and read a blank column back as `None`. [`Declaration::new`]
/// normalizes; call [`Declaration::normalize`] after editing fields directly.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Declaration {
    pub header: Header,
    pub detalles: Vec<Detail>,
}

impl Declaration {
    pub fn new(header: Header, detalles: Vec<Detail>) -> Self {
        let mut declaration = Self { header, detalles };
        declaration.normalize();
        declaration
    }

    /// Replace blank optional text with `None` in every record.
    pub fn normalize(&mut self) {
        self.header.normalize();
        for detail in &mut self.detalles {
            detail.normalize();
        }
    }

    /// Exact sum of `valoracion_1` over all details.
    pub fn total_valoracion_1(&self) -> Valoracion {
        Valoracion::from_signed_cents(sum_signed_cents(
            self.detalles.iter().map(|d| &d.valoracion_1),
        ))
    }

    /// Exact sum of `valoracion_2` over all details.
    pub fn total_valoracion_2(&self) -> Valoracion {
        Valoracion::from_signed_cents(sum_signed_cents(
            self.detalles.iter().map(|d| &d.valoracion_2),
        ))
    }

    /// Set the header count and aggregate amounts from the details.
    pub fn refresh_totals(&mut self) {
        self.header.numero_total_registros =
            u32::try_from(self.detalles.len()).unwrap_or(u32::MAX);
        self.header.suma_valoracion_1 = self.total_valoracion_1();
        self.header.suma_valoracion_2 = self.total_valoracion_2();
    }
}

fn int(value: impl Into<u64>) -> FieldValue {
    FieldValue::Integer(value.into())
}

fn text(value: &str) -> FieldValue {
    FieldValue::Text(value.to_string())
}

fn blank_to_none(value: &mut Option<String>) {
    if value.as_deref().is_some_and(|v| v.trim().is_empty()) {
        *value = None;
    }
}

fn opt_text(value: &Option<String>) -> FieldValue {
    FieldValue::Text(value.clone().unwrap_or_default())
}
