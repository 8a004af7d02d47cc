//! Data model of the Modelo 720 informative declaration.
//!
//! A [`Declaration`] owns one [`Header`] and its [`Detail`] records in filing
//! order. The layout of both record types lives in [`schema`], which the
//! fixed-width and CSV codecs share. Records are bridged to the codecs
//! through [`SchemaRecord`].
//!
//! # Example
//!
//! ```
//! use m720_model::{AssetType, Declaration, Detail, Header, Origin, Valoracion};
//!
//! let header = Header::new(2024, "12345678Z", "GARCIA LOPEZ JUAN", "7200000000001");
//! let mut detail = Detail::new(
//!     2024,
//!     "12345678Z",
//!     "12345678Z",
//!     "GARCIA LOPEZ JUAN",
//!     AssetType::BankAccount,
//!     1,
//!     Origin::Acquired,
//! );
//! detail.valoracion_1 = Valoracion::positive(100_000);
//!
//! let mut declaration = Declaration::new(header, vec![detail]);
//! declaration.refresh_totals();
//! assert_eq!(declaration.header.suma_valoracion_1.to_string(), "1000.00");
//! ```

pub mod declaration;
pub mod enums;
pub mod error;
pub mod schema;
pub mod valoracion;
pub mod values;

pub use declaration::{Declaration, Detail, Header};
pub use enums::{AssetType, EnumCode, EnumKind, Origin, Sign};
pub use error::{ModelError, Result};
pub use schema::{DETAIL_FIELDS, FieldKind, FieldSpec, HEADER_FIELDS, LINE_LEN};
pub use valoracion::{Valoracion, sum_signed_cents};
pub use values::{FieldValue, FieldValues, SchemaRecord};
