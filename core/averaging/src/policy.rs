//! FILENAME: core/averaging/src/policy.rs
//! PURPOSE: What to do when a personalized formula fails while averaging.
//! CONTEXT: Authoring errors are always surfaced by `set_formula`. At report
//! time the usual cause is a child count that changed after the formula was
//! written (an item added, a score missing). The caller picks the policy.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FallbackPolicy {
    /// Use the simple mean for that one unit or class, log it and flag it
    /// on the student's result.
    #[default]
    FallbackToSimple,
    /// Fail the whole computation with `AveragingError::Formula`.
    Propagate,
}
