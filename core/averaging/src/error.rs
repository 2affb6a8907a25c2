//! FILENAME: core/averaging/src/error.rs

use formula::FormulaError;
use thiserror::Error;

use crate::model::FormulaLevel;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum AveragingError {
    #[error("Formula for {level} could not be evaluated: {source}")]
    Formula {
        level: FormulaLevel,
        #[source]
        source: FormulaError,
    },
}

#[derive(Error, Debug, Clone, PartialEq)]
pub enum ModelError {
    #[error("Reorder must list each of the {expected} children exactly once")]
    NotAPermutation { expected: usize },

    #[error("Invalid formula for {level}: {source}")]
    InvalidFormula {
        level: FormulaLevel,
        #[source]
        source: FormulaError,
    },
}
