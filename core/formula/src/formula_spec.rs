//! FILENAME: core/formula/src/formula_spec.rs
//! PURPOSE: How a unit or class combines its children.
//! CONTEXT: Built once at the data-access boundary. The engine never
//! infers simple vs personalized from whether a string is empty.

use serde::{Deserialize, Serialize};

use crate::error::FormulaError;
use crate::validator::validate;

/// Averaging strategy for one level of the hierarchy.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(tag = "kind", content = "expression", rename_all = "snake_case")]
pub enum FormulaSpec {
    /// Arithmetic mean of the children.
    #[default]
    Simple,
    /// User-authored expression over N1..Nk.
    Personalized(String),
}

impl FormulaSpec {
    /// Maps a stored, possibly blank, formula column onto a spec.
    pub fn from_stored(stored: Option<String>) -> Self {
        match stored {
            Some(expression) if !expression.trim().is_empty() => {
                FormulaSpec::Personalized(expression)
            }
            _ => FormulaSpec::Simple,
        }
    }

    /// Authoring-time constructor: the expression must be valid for `child_count`.
    pub fn personalized(
        expression: impl Into<String>,
        child_count: usize,
    ) -> Result<Self, FormulaError> {
        let expression = expression.into();
        validate(&expression, child_count)?;
        Ok(FormulaSpec::Personalized(expression))
    }

    /// Re-checks the spec after the child count changed. Simple is always valid.
    pub fn validate_for(&self, child_count: usize) -> Result<(), FormulaError> {
        match self {
            FormulaSpec::Simple => Ok(()),
            FormulaSpec::Personalized(expression) => validate(expression, child_count),
        }
    }

    pub fn is_personalized(&self) -> bool {
        matches!(self, FormulaSpec::Personalized(_))
    }

    pub fn expression(&self) -> Option<&str> {
        match self {
            FormulaSpec::Simple => None,
            FormulaSpec::Personalized(expression) => Some(expression),
        }
    }
}
