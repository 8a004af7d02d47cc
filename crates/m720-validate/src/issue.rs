//! Violations and the validation report.

use std::fmt;

use serde::Serialize;
use thiserror::Error;

/// Which family of rules a violation comes from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Tier {
    /// Constants, counts and totals.
    Structural,
    /// Asset-type dependent field rules.
    Business,
    /// NIF/NIE control letters.
    Identity,
}

impl fmt::Display for Tier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Tier::Structural => "structural",
            Tier::Business => "business",
            Tier::Identity => "identity",
        })
    }
}

/// A single broken rule.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Violation {
    pub tier: Tier,
    /// 1-based detail position, `None` for header and totals.
    pub detail: Option<usize>,
    pub message: String,
}

impl Violation {
    pub(crate) fn header(tier: Tier, message: impl Into<String>) -> Self {
        Self {
            tier,
            detail: None,
            message: message.into(),
        }
    }

    pub(crate) fn detail(tier: Tier, index: usize, message: impl fmt::Display) -> Self {
        Self {
            tier,
            detail: Some(index),
            message: format!("Detail {index}: {message}"),
        }
    }
}

impl fmt::Display for Violation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.message)
    }
}

/// Every violation found in one declaration, in evaluation order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ValidationReport {
    pub violations: Vec<Violation>,
}

impl ValidationReport {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, violation: Violation) {
        self.violations.push(violation);
    }

    pub fn extend(&mut self, violations: impl IntoIterator<Item = Violation>) {
        self.violations.extend(violations);
    }

    pub fn is_valid(&self) -> bool {
        self.violations.is_empty()
    }

    pub fn len(&self) -> usize {
        self.violations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.violations.is_empty()
    }

    pub fn count(&self, tier: Tier) -> usize {
        self.violations.iter().filter(|v| v.tier == tier).count()
    }

    /// Human-readable messages.
    pub fn messages(&self) -> Vec<String> {
        self.violations.iter().map(|v| v.message.clone()).collect()
    }

    /// `Ok` when there is nothing to report.
    pub fn into_result(self) -> Result<(), ValidationError> {
        if self.is_valid() {
            Ok(())
        } else {
            Err(ValidationError {
                violations: self.messages(),
            })
        }
    }
}

/// A declaration failed validation.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("{}", violations.join("; "))]
pub struct ValidationError {
    pub violations: Vec<String>,
}
