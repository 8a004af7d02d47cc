//! Schema-driven bridge between typed records and codecs.
//!
//! Codecs never touch record fields directly. They walk a layout
//! ([`FieldSpec`] list), produce or consume one [`FieldValue`] per entry and
//! hand the ordered set to [`SchemaRecord`], which owns the mapping onto the
//! typed struct.

use chrono::NaiveDate;

use crate::enums::{AssetType, EnumCode, EnumKind, Origin};
use crate::error::{ModelError, Result};
use crate::schema::{FieldKind, FieldSpec};
use crate::valoracion::Valoracion;

/// A single decoded field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FieldValue {
    Integer(u64),
    Text(String),
    Date(Option<NaiveDate>),
    Flag(bool),
    Enum(Option<EnumCode>),
    Amount(Valoracion),
}

impl FieldValue {
    /// Whether this value can be stored in a field of the given kind.
    pub fn matches(&self, kind: FieldKind) -> bool {
        match (self, kind) {
            (FieldValue::Integer(_), FieldKind::Integer)
            | (FieldValue::Text(_), FieldKind::Text)
            | (FieldValue::Date(_), FieldKind::Date8)
            | (FieldValue::Flag(_), FieldKind::Flag(_))
            | (FieldValue::Amount(_), FieldKind::Amount) => true,
            (FieldValue::Enum(None), FieldKind::Enum(_)) => true,
            (FieldValue::Enum(Some(EnumCode::AssetType(_))), FieldKind::Enum(kind)) => {
                kind == EnumKind::AssetType
            }
            (FieldValue::Enum(Some(EnumCode::Origin(_))), FieldKind::Enum(kind)) => {
                kind == EnumKind::Origin
            }
            _ => false,
        }
    }
}

/// Ordered field values of one record.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FieldValues {
    entries: Vec<(&'static str, FieldValue)>,
}

impl FieldValues {
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            entries: Vec::with_capacity(capacity),
        }
    }

    pub fn push(&mut self, name: &'static str, value: FieldValue) {
        self.entries.push((name, value));
    }

    pub fn get(&self, name: &str) -> Option<&FieldValue> {
        self.entries
            .iter()
            .find(|(entry, _)| *entry == name)
            .map(|(_, value)| value)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&'static str, &FieldValue)> {
        self.entries.iter().map(|(name, value)| (*name, value))
    }

    fn take(&mut self, field: &'static str) -> Result<FieldValue> {
        let idx = self
            .entries
            .iter()
            .position(|(name, _)| *name == field)
            .ok_or(ModelError::MissingField { field })?;
        Ok(self.entries.remove(idx).1)
    }

    pub fn take_int<T: TryFrom<u64>>(&mut self, field: &'static str) -> Result<T> {
        match self.take(field)? {
            FieldValue::Integer(value) => {
                T::try_from(value).map_err(|_| ModelError::OutOfRange { field, value })
            }
            _ => Err(unexpected(field, FieldKind::Integer)),
        }
    }

    pub fn take_text(&mut self, field: &'static str) -> Result<String> {
        match self.take(field)? {
            FieldValue::Text(value) => Ok(value),
            _ => Err(unexpected(field, FieldKind::Text)),
        }
    }

    /// Blank text becomes `None`.
    pub fn take_opt_text(&mut self, field: &'static str) -> Result<Option<String>> {
        let value = self.take_text(field)?;
        Ok(if value.is_empty() { None } else { Some(value) })
    }

    pub fn take_date(&mut self, field: &'static str) -> Result<Option<NaiveDate>> {
        match self.take(field)? {
            FieldValue::Date(value) => Ok(value),
            _ => Err(unexpected(field, FieldKind::Date8)),
        }
    }

    pub fn take_flag(&mut self, field: &'static str) -> Result<bool> {
        match self.take(field)? {
            FieldValue::Flag(value) => Ok(value),
            _ => Err(unexpected(field, FieldKind::Flag(' '))),
        }
    }

    pub fn take_amount(&mut self, field: &'static str) -> Result<Valoracion> {
        match self.take(field)? {
            FieldValue::Amount(value) => Ok(value),
            _ => Err(unexpected(field, FieldKind::Amount)),
        }
    }

    pub fn take_asset_type(&mut self, field: &'static str) -> Result<AssetType> {
        match self.take(field)? {
            FieldValue::Enum(Some(EnumCode::AssetType(value))) => Ok(value),
            FieldValue::Enum(None) => Err(ModelError::MissingField { field }),
            _ => Err(unexpected(field, FieldKind::Enum(EnumKind::AssetType))),
        }
    }

    pub fn take_origin(&mut self, field: &'static str) -> Result<Origin> {
        match self.take(field)? {
            FieldValue::Enum(Some(EnumCode::Origin(value))) => Ok(value),
            FieldValue::Enum(None) => Err(ModelError::MissingField { field }),
            _ => Err(unexpected(field, FieldKind::Enum(EnumKind::Origin))),
        }
    }
}

fn unexpected(field: &'static str, expected: FieldKind) -> ModelError {
    ModelError::UnexpectedKind { field, expected }
}

/// A record whose layout is described by a field schema.
pub trait SchemaRecord: Sized {
    /// The ordered layout of this record.
    fn fields() -> &'static [FieldSpec];

    /// Values of every layout field, in layout order.
    fn to_values(&self) -> FieldValues;

    /// Assemble the record from decoded values.
    fn from_values(values: FieldValues) -> Result<Self>;
}
