//! FILENAME: core/formula/src/compiled.rs
//! PURPOSE: A validated, parsed formula ready for repeated evaluation.
//! CONTEXT: `Formula` keeps the validated tree for callers that evaluate one
//! formula against many binding sets of the same length. The free
//! `evaluate` validates and parses on every call, which the averaging
//! engine relies on because k varies with each student's present scores.

use crate::ast::Expression;
use crate::error::FormulaError;
use crate::evaluator::Evaluator;
use crate::validator::{references, validate_and_parse};

#[derive(Debug, Clone, PartialEq)]
pub struct Formula {
    source: String,
    expression: Expression,
    child_count: usize,
}

impl Formula {
    /// Validates `source` for exactly `child_count` bindings and parses it.
    pub fn compile(source: &str, child_count: usize) -> Result<Self, FormulaError> {
        let expression = validate_and_parse(source, child_count)?;
        Ok(Formula {
            source: source.to_string(),
            expression,
            child_count,
        })
    }

    /// Evaluates with `bindings[i - 1]` standing in for `N<i>`.
    pub fn evaluate(&self, bindings: &[f64]) -> Result<f64, FormulaError> {
        if bindings.len() != self.child_count {
            return Err(FormulaError::FormulaChildCountMismatch {
                expected: self.child_count,
                actual: bindings.len(),
            });
        }
        Evaluator::new(bindings).evaluate(&self.expression)
    }

    pub fn source(&self) -> &str {
        &self.source
    }

    pub fn child_count(&self) -> usize {
        self.child_count
    }

    pub fn expression(&self) -> &Expression {
        &self.expression
    }
}

/// Validates against `bindings.len()` and evaluates in one step.
///
/// A formula whose references no longer line up with the number of
/// bindings (an item was added or removed after it was written) is
/// reported as `FormulaChildCountMismatch` rather than as a bare
/// reference error, so callers can apply their fallback policy.
pub fn evaluate(expression: &str, bindings: &[f64]) -> Result<f64, FormulaError> {
    let formula = Formula::compile(expression, bindings.len())
        .map_err(|e| as_count_mismatch(e, expression, bindings.len()))?;
    formula.evaluate(bindings)
}

fn as_count_mismatch(error: FormulaError, expression: &str, actual: usize) -> FormulaError {
    match error {
        FormulaError::ReferenceOutOfRange(_) | FormulaError::MissingReference(_) => {
            let expected = references(expression).last().copied().unwrap_or(0);
            if expected == actual {
                error
            } else {
                FormulaError::FormulaChildCountMismatch { expected, actual }
            }
        }
        other => other,
    }
}
