//! FILENAME: core/averaging/src/lib.rs
//! PURPOSE: Library root for the grade averaging pipeline.
//! CONTEXT: Turns a class structure plus pre-fetched scores into one
//! `StudentAverage` per student. Data access happens before this crate is
//! called; everything here is pure computation over in-memory records.
//!
//! PIPELINE: Score rows --> ScoreIndex --> unit averages --> class average
//!
//! At every level the parent's `FormulaSpec` decides how children combine:
//! the simple mean, or a personalized formula with children bound to N1..Nk
//! by ordinal.

pub mod audit;
pub mod engine;
pub mod error;
pub mod model;
pub mod policy;
pub mod rollup;
pub mod scores;

pub use audit::{audit_formulas, FormulaIssue};
pub use engine::{simple_mean, AveragingEngine, LevelAverage};
pub use error::{AveragingError, ModelError};
pub use model::{
    Class, ClassId, EvaluationItem, FallbackNotice, FormulaLevel, ItemId, Score, Student,
    StudentAverage, StudentId, Unit, UnitAverage, UnitId,
};
pub use policy::FallbackPolicy;
pub use rollup::{class_rollup, unit_rollup};
pub use scores::{Bindings, ScoreIndex, StudentScores};

// Re-exported so callers can build classes without a direct formula dependency.
pub use formula::{FormulaError, FormulaSpec};
