//! FILENAME: core/averaging/src/audit.rs
//! PURPOSE: Finds personalized formulas that no longer fit their children.
//! CONTEXT: Adding or removing an item or unit changes k without touching
//! the stored formula text. Run after such a change to list the formulas
//! that will fall back (or fail) at the next aggregation.

use formula::FormulaError;
use serde::{Deserialize, Serialize};

use crate::model::{Class, FormulaLevel};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FormulaIssue {
    pub level: FormulaLevel,
    /// Number of children the formula is checked against.
    pub child_count: usize,
    pub error: FormulaError,
}

/// Re-validates every personalized formula in the class, units first in
/// ordinal order, then the class formula.
pub fn audit_formulas(class: &Class) -> Vec<FormulaIssue> {
    let mut issues = Vec::new();

    for unit in class.ordered_units() {
        let child_count = unit.items.len();
        if let Err(error) = unit.formula.validate_for(child_count) {
            issues.push(FormulaIssue {
                level: FormulaLevel::Unit(unit.id),
                child_count,
                error,
            });
        }
    }

    let child_count = class.units.len();
    if let Err(error) = class.formula.validate_for(child_count) {
        issues.push(FormulaIssue {
            level: FormulaLevel::Class(class.id),
            child_count,
            error,
        });
    }

    issues
}
