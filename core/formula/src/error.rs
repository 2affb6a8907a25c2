//! FILENAME: core/formula/src/error.rs

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Everything that can go wrong authoring or evaluating a personalized formula.
/// Validation variants are listed in the order the checks run.
#[derive(Error, Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum FormulaError {
    #[error("Formula is empty")]
    EmptyExpression,

    #[error("Formula contains an invalid character: '{0}'")]
    InvalidCharacters(char),

    #[error("Formula contains consecutive operators")]
    ConsecutiveOperators,

    #[error("Formula ends with an operator")]
    TrailingOperator,

    #[error("Formula cannot start with '+', '*' or '/'")]
    LeadingOperator,

    #[error("Formula has unbalanced parentheses")]
    UnbalancedParentheses,

    #[error("Reference N{0} is out of range")]
    ReferenceOutOfRange(usize),

    #[error("Formula must reference {}", list_references(.0))]
    MissingReference(Vec<usize>),

    #[error("Formula divides by a literal zero")]
    ExplicitDivisionByZero,

    #[error("Division by zero while evaluating formula")]
    RuntimeDivisionByZero,

    #[error("Formula produced a value that is not a finite number")]
    NonFiniteResult,

    #[error("Formula references {expected} values but {actual} are available")]
    FormulaChildCountMismatch { expected: usize, actual: usize },

    #[error("Syntax error: {0}")]
    Syntax(String),
}

fn list_references(indices: &[usize]) -> String {
    indices
        .iter()
        .map(|i| format!("N{}", i))
        .collect::<Vec<_>>()
        .join(", ")
}
