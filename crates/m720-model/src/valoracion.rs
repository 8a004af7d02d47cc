//! Signed monetary amounts.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::enums::Sign;

/// A signed amount with two decimal digits.
///
/// Sign and magnitude are stored separately, mirroring the layout (one sign
/// column followed by unsigned digits in cents). The magnitude is always an
/// exact number of cents; anything finer is truncated toward zero before it
/// reaches this type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct Valoracion {
    pub sign: Sign,
    pub cents: u64,
}

impl Valoracion {
    pub const ZERO: Valoracion = Valoracion {
        sign: Sign::Positive,
        cents: 0,
    };

    pub const fn new(sign: Sign, cents: u64) -> Self {
        Self { sign, cents }
    }

    pub const fn positive(cents: u64) -> Self {
        Self::new(Sign::Positive, cents)
    }

    pub const fn negative(cents: u64) -> Self {
        Self::new(Sign::Negative, cents)
    }

    /// Build from a signed cent count.
    pub fn from_signed_cents(cents: i128) -> Self {
        let sign = if cents < 0 {
            Sign::Negative
        } else {
            Sign::Positive
        };
        let magnitude = u64::try_from(cents.unsigned_abs()).unwrap_or(u64::MAX);
        Self::new(sign, magnitude)
    }

    /// Signed value in cents.
    pub fn signed_cents(&self) -> i128 {
        let magnitude = i128::from(self.cents);
        match self.sign {
            Sign::Positive => magnitude,
            Sign::Negative => -magnitude,
        }
    }

    /// Whole units of the magnitude.
    pub const fn units(&self) -> u64 {
        self.cents / 100
    }

    /// Fractional cents of the magnitude (0..=99).
    pub const fn fraction(&self) -> u64 {
        self.cents % 100
    }
}

impl fmt::Display for Valoracion {
    /// Plain decimal in units, e.g. `1234.56` or `-7890.00`.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.sign == Sign::Negative {
            f.write_str("-")?;
        }
        write!(f, "{}.{:02}", self.units(), self.fraction())
    }
}

/// Sum a sequence of amounts exactly, in signed cents.
pub fn sum_signed_cents<'a>(amounts: impl IntoIterator<Item = &'a Valoracion>) -> i128 {
    amounts.into_iter().map(Valoracion::signed_cents).sum()
}
