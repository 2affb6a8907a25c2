//! FILENAME: core/averaging/src/rollup.rs
//! PURPOSE: Unit and class averages derived from computed student averages.
//! CONTEXT: A derived average is always the plain mean of the students'
//! averages, never a recomputation from raw scores, so the numbers on a
//! report agree with the per-student numbers shown beside them.

use crate::engine::simple_mean;
use crate::model::{StudentAverage, UnitId};

/// Mean of every student's average for `unit_id`.
/// Students without an entry for the unit are not counted; 0.0 when none have one.
pub fn unit_rollup(averages: &[StudentAverage], unit_id: UnitId) -> f64 {
    let values: Vec<f64> = averages
        .iter()
        .filter_map(|average| average.unit_average(unit_id))
        .collect();
    simple_mean(&values)
}

/// Mean of the students' class averages; 0.0 for an empty class.
pub fn class_rollup(averages: &[StudentAverage]) -> f64 {
    let values: Vec<f64> = averages.iter().map(|average| average.average).collect();
    simple_mean(&values)
}
