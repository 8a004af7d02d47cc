//! Closed discriminants of the Modelo 720 layout.
//!
//! Each enum maps one-to-one onto the single-letter codes used by the
//! authority layout. Codes are parsed exactly (no trimming or case folding);
//! callers strip padding before lookup.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Sign indicator of a [`Valoracion`](crate::Valoracion).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Sign {
    /// Encoded as a blank column.
    #[default]
    Positive,
    /// Encoded as `N`.
    Negative,
}

impl Sign {
    /// Character written in the sign column.
    pub const fn as_char(self) -> char {
        match self {
            Sign::Positive => ' ',
            Sign::Negative => 'N',
        }
    }

    /// Only `N` denotes a negative amount; every other character is positive.
    pub const fn from_char(ch: char) -> Self {
        if ch == 'N' {
            Sign::Negative
        } else {
            Sign::Positive
        }
    }
}

/// Asset category of a detail record (`clave_tipo_bien`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AssetType {
    /// `C`: bank or credit accounts.
    #[serde(rename = "C")]
    BankAccount,
    /// `V`: securities and rights.
    #[serde(rename = "V")]
    Securities,
    /// `I`: real estate.
    #[serde(rename = "I")]
    RealEstate,
    /// `S`: insurance and annuities.
    #[serde(rename = "S")]
    Insurance,
    /// `B`: movable property.
    #[serde(rename = "B")]
    MovableProperty,
}

impl AssetType {
    pub const ALL: [AssetType; 5] = [
        AssetType::BankAccount,
        AssetType::Securities,
        AssetType::RealEstate,
        AssetType::Insurance,
        AssetType::MovableProperty,
    ];

    /// Literal layout code.
    pub const fn code(self) -> &'static str {
        match self {
            AssetType::BankAccount => "C",
            AssetType::Securities => "V",
            AssetType::RealEstate => "I",
            AssetType::Insurance => "S",
            AssetType::MovableProperty => "B",
        }
    }

    /// Human-readable category name.
    pub const fn label(self) -> &'static str {
        match self {
            AssetType::BankAccount => "bank account",
            AssetType::Securities => "securities",
            AssetType::RealEstate => "real estate",
            AssetType::Insurance => "insurance",
            AssetType::MovableProperty => "movable property",
        }
    }

    /// Inclusive range of legal `subclave` values for this category.
    pub const fn subtype_range(self) -> (u8, u8) {
        match self {
            AssetType::RealEstate => (0, 0),
            AssetType::BankAccount => (1, 5),
            AssetType::Securities => (1, 3),
            AssetType::Insurance => (1, 2),
            AssetType::MovableProperty => (1, 5),
        }
    }

    /// Whether the securities identification block may be filled in.
    pub const fn carries_securities(self) -> bool {
        matches!(self, AssetType::Securities | AssetType::RealEstate)
    }
}

impl fmt::Display for AssetType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

impl FromStr for AssetType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        AssetType::ALL
            .into_iter()
            .find(|asset| asset.code() == s)
            .ok_or_else(|| format!("unknown asset type code '{s}'"))
    }
}

/// Origin of a detail record (`origen`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Origin {
    /// `A`: asset declared for the first time.
    #[serde(rename = "A")]
    Acquired,
    /// `M`: asset already declared in a previous year.
    #[serde(rename = "M")]
    Modified,
    /// `C`: ownership extinguished during the year.
    #[serde(rename = "C")]
    Extinguished,
}

impl Origin {
    pub const ALL: [Origin; 3] = [Origin::Acquired, Origin::Modified, Origin::Extinguished];

    /// Literal layout code.
    pub const fn code(self) -> &'static str {
        match self {
            Origin::Acquired => "A",
            Origin::Modified => "M",
            Origin::Extinguished => "C",
        }
    }
}

impl fmt::Display for Origin {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

impl FromStr for Origin {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Origin::ALL
            .into_iter()
            .find(|origin| origin.code() == s)
            .ok_or_else(|| format!("unknown origin code '{s}'"))
    }
}

/// Enumeration referenced by an enum-kind schema field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EnumKind {
    AssetType,
    Origin,
}

impl EnumKind {
    /// Resolve a literal code against this enumeration.
    pub fn parse(self, code: &str) -> Result<EnumCode, String> {
        match self {
            EnumKind::AssetType => code.parse().map(EnumCode::AssetType),
            EnumKind::Origin => code.parse().map(EnumCode::Origin),
        }
    }

    /// All literal codes of this enumeration, in declaration order.
    pub fn codes(self) -> Vec<&'static str> {
        match self {
            EnumKind::AssetType => AssetType::ALL.iter().map(|a| a.code()).collect(),
            EnumKind::Origin => Origin::ALL.iter().map(|o| o.code()).collect(),
        }
    }
}

/// A decoded enum value, tagged with its enumeration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EnumCode {
    AssetType(AssetType),
    Origin(Origin),
}

impl EnumCode {
    pub const fn code(self) -> &'static str {
        match self {
            EnumCode::AssetType(asset) => asset.code(),
            EnumCode::Origin(origin) => origin.code(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sign_chars() {
        assert_eq!(Sign::from_char('N'), Sign::Negative);
        assert_eq!(Sign::from_char(' '), Sign::Positive);
        assert_eq!(Sign::from_char('X'), Sign::Positive);
        assert_eq!(Sign::Negative.as_char(), 'N');
    }

    #[test]
    fn test_asset_type_codes() {
        for asset in AssetType::ALL {
            assert_eq!(asset.code().parse::<AssetType>(), Ok(asset));
        }
        assert!("X".parse::<AssetType>().is_err());
        assert!(" C".parse::<AssetType>().is_err());
    }

    #[test]
    fn test_enum_kind_parse() {
        assert_eq!(
            EnumKind::Origin.parse("C"),
            Ok(EnumCode::Origin(Origin::Extinguished))
        );
        assert!(EnumKind::Origin.parse("Z").is_err());
        assert_eq!(EnumKind::AssetType.codes(), vec!["C", "V", "I", "S", "B"]);
    }
}
