//! FILENAME: core/averaging/src/engine.rs
//! PURPOSE: Walks the class hierarchy to compute each student's final grade.
//! CONTEXT: Evaluation item scores -> unit averages -> class average.
//! At each level the parent's FormulaSpec decides between the simple mean
//! and a personalized formula whose N1..Nk are the children in ordinal order.
//!
//! Nothing is rounded here. Rounding to 2 decimals belongs to the
//! statistics layer, so error does not compound across levels.

use formula::{FormulaError, FormulaSpec};
use log::{debug, warn};

use crate::error::AveragingError;
use crate::model::{
    Class, FallbackNotice, FormulaLevel, Score, Student, StudentAverage, StudentId, Unit,
    UnitAverage,
};
use crate::policy::FallbackPolicy;
use crate::scores::{Bindings, ScoreIndex, StudentScores};

/// The value computed for one unit or class, and the formula error that
/// was replaced by the simple mean, if any.
#[derive(Debug, Clone, PartialEq)]
pub struct LevelAverage {
    pub value: f64,
    pub fallback: Option<FormulaError>,
}

/// A stateless calculator; the only setting is the fallback policy.
#[derive(Debug, Clone, Copy, Default)]
pub struct AveragingEngine {
    policy: FallbackPolicy,
}

impl AveragingEngine {
    pub fn new(policy: FallbackPolicy) -> Self {
        AveragingEngine { policy }
    }

    pub fn policy(&self) -> FallbackPolicy {
        self.policy
    }

    /// Averages one student's scores for a unit.
    ///
    /// Items without a score are left out entirely: they are not zeros and
    /// they shift later items down, so a personalized formula sees
    /// `k = number of present scores`.
    pub fn compute_unit_average(
        &self,
        unit: &Unit,
        scores: &StudentScores,
    ) -> Result<LevelAverage, AveragingError> {
        let present = scores.present_scores(unit);
        self.resolve(&unit.formula, FormulaLevel::Unit(unit.id), &present)
    }

    /// Combines unit averages (in unit ordinal order) into the class average.
    pub fn compute_class_average(
        &self,
        class: &Class,
        unit_averages: &[f64],
    ) -> Result<LevelAverage, AveragingError> {
        self.resolve(&class.formula, FormulaLevel::Class(class.id), unit_averages)
    }

    /// Computes every unit average for one student, then the class average.
    pub fn compute_student_average(
        &self,
        class: &Class,
        scores: &StudentScores,
    ) -> Result<StudentAverage, AveragingError> {
        let student_id = scores.student_id();
        let units = class.ordered_units();
        if units.is_empty() {
            return Ok(StudentAverage::empty(student_id));
        }

        let mut unit_averages = Vec::with_capacity(units.len());
        let mut fallbacks = Vec::new();

        for unit in units {
            let level = self.compute_unit_average(unit, scores)?;
            if let Some(error) = level.fallback {
                fallbacks.push(notice(FormulaLevel::Unit(unit.id), student_id, error));
            }
            unit_averages.push(UnitAverage {
                unit_id: unit.id,
                average: level.value,
            });
        }

        let bindings: Bindings = unit_averages.iter().map(|entry| entry.average).collect();
        let class_level = self.compute_class_average(class, &bindings)?;
        if let Some(error) = class_level.fallback {
            fallbacks.push(notice(FormulaLevel::Class(class.id), student_id, error));
        }

        Ok(StudentAverage {
            student_id,
            average: class_level.value,
            unit_averages,
            fallbacks,
        })
    }

    /// Computes the averages of every student in `students`, in input order.
    ///
    /// Students are independent; with the `parallel` feature they are
    /// computed on the rayon pool and the result is identical.
    pub fn compute_all_student_averages(
        &self,
        class: &Class,
        students: &[Student],
        scores: &[Score],
    ) -> Result<Vec<StudentAverage>, AveragingError> {
        let index = ScoreIndex::build(scores);
        debug!(
            "class {}: averaging {} students over {} units",
            class.id,
            students.len(),
            class.units.len()
        );

        let averages = self.map_students(class, students, &index)?;

        debug!("class {}: averaged {} students", class.id, averages.len());
        Ok(averages)
    }

    #[cfg(not(feature = "parallel"))]
    fn map_students(
        &self,
        class: &Class,
        students: &[Student],
        index: &ScoreIndex,
    ) -> Result<Vec<StudentAverage>, AveragingError> {
        students
            .iter()
            .map(|student| self.compute_student_average(class, &index.for_student(student.id)))
            .collect()
    }

    #[cfg(feature = "parallel")]
    fn map_students(
        &self,
        class: &Class,
        students: &[Student],
        index: &ScoreIndex,
    ) -> Result<Vec<StudentAverage>, AveragingError> {
        use rayon::prelude::*;

        students
            .par_iter()
            .map(|student| self.compute_student_average(class, &index.for_student(student.id)))
            .collect()
    }

    /// Applies a FormulaSpec to ordered child values, honoring the fallback policy.
    fn resolve(
        &self,
        spec: &FormulaSpec,
        level: FormulaLevel,
        values: &[f64],
    ) -> Result<LevelAverage, AveragingError> {
        let expression = match spec {
            FormulaSpec::Simple => {
                return Ok(LevelAverage {
                    value: simple_mean(values),
                    fallback: None,
                });
            }
            FormulaSpec::Personalized(expression) => expression,
        };

        // No children to bind: even a constant formula no longer applies
        let evaluated = if values.is_empty() {
            let expected = formula::references(expression).last().copied().unwrap_or(0);
            Err(FormulaError::FormulaChildCountMismatch {
                expected,
                actual: 0,
            })
        } else {
            formula::evaluate(expression, values)
        };

        match evaluated {
            Ok(value) => Ok(LevelAverage {
                value,
                fallback: None,
            }),
            Err(source) => match self.policy {
                FallbackPolicy::Propagate => Err(AveragingError::Formula { level, source }),
                FallbackPolicy::FallbackToSimple => {
                    debug!(
                        "{}: formula '{}' not usable with {} values ({})",
                        level,
                        expression,
                        values.len(),
                        source
                    );
                    Ok(LevelAverage {
                        value: simple_mean(values),
                        fallback: Some(source),
                    })
                }
            },
        }
    }
}

fn notice(level: FormulaLevel, student_id: StudentId, error: FormulaError) -> FallbackNotice {
    warn!(
        "{}: student {}: {}; using simple mean",
        level, student_id, error
    );
    FallbackNotice {
        level,
        student_id,
        error,
    }
}

/// Arithmetic mean; 0.0 for an empty set.
pub fn simple_mean(values: &[f64]) -> f64 {
    if values.is_empty() {
        return 0.0;
    }
    values.iter().sum::<f64>() / values.len() as f64
}
