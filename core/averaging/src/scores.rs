//! FILENAME: core/averaging/src/scores.rs
//! PURPOSE: Per-student lookup over the flat score rows fetched by the caller.
//! CONTEXT: Built once per aggregation request. Each student's computation
//! reads only its own `StudentScores`, which is what makes students
//! independent of each other.

use std::borrow::Cow;

use log::debug;
use rustc_hash::FxHashMap;
use smallvec::SmallVec;

use crate::model::{EvaluationItem, ItemId, Score, StudentId, Unit};

/// Scores bound to N1..Nk; most units have a handful of items.
pub type Bindings = SmallVec<[f64; 8]>;

/// One student's scores, keyed by evaluation item.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct StudentScores {
    student_id: StudentId,
    values: FxHashMap<ItemId, f64>,
}

impl StudentScores {
    pub fn new(student_id: StudentId) -> Self {
        StudentScores {
            student_id,
            values: FxHashMap::default(),
        }
    }

    pub fn student_id(&self) -> StudentId {
        self.student_id
    }

    /// Records a score. Returns the value it replaced, if any.
    pub fn insert(&mut self, item_id: ItemId, value: f64) -> Option<f64> {
        self.values.insert(item_id, value)
    }

    pub fn with_score(mut self, item_id: ItemId, value: f64) -> Self {
        self.insert(item_id, value);
        self
    }

    pub fn get(&self, item_id: ItemId) -> Option<f64> {
        self.values.get(&item_id).copied()
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// The unit's items in ordinal order, each paired with this student's
    /// score when one exists.
    pub fn item_scores<'u>(&self, unit: &'u Unit) -> Vec<(&'u EvaluationItem, Option<f64>)> {
        unit.ordered_items()
            .into_iter()
            .map(|item| (item, self.get(item.id)))
            .collect()
    }

    /// Present scores in ordinal order. Missing items are skipped, not zeroed,
    /// so the k-th present score binds to Nk.
    pub fn present_scores(&self, unit: &Unit) -> Bindings {
        unit.ordered_items()
            .into_iter()
            .filter_map(|item| self.get(item.id))
            .collect()
    }
}

/// All fetched scores, grouped by student.
#[derive(Debug, Clone, Default)]
pub struct ScoreIndex {
    by_student: FxHashMap<StudentId, StudentScores>,
}

impl ScoreIndex {
    /// Groups score rows per student. A repeated (student, item) row
    /// replaces the earlier one.
    pub fn build(scores: &[Score]) -> Self {
        let mut by_student: FxHashMap<StudentId, StudentScores> = FxHashMap::default();

        for score in scores {
            let entry = by_student
                .entry(score.student_id)
                .or_insert_with(|| StudentScores::new(score.student_id));
            if let Some(previous) = entry.insert(score.item_id, score.value) {
                debug!(
                    "duplicate score for student {} item {}: {} replaced by {}",
                    score.student_id, score.item_id, previous, score.value
                );
            }
        }

        ScoreIndex { by_student }
    }

    /// The student's scores; an empty set when the student has none.
    pub fn for_student(&self, student_id: StudentId) -> Cow<'_, StudentScores> {
        match self.by_student.get(&student_id) {
            Some(scores) => Cow::Borrowed(scores),
            None => Cow::Owned(StudentScores::new(student_id)),
        }
    }

    pub fn student_count(&self) -> usize {
        self.by_student.len()
    }
}
