//! FILENAME: tests/common/mod.rs
//! Test harness and fixtures for report engine integration tests.

#![allow(dead_code)]

use averaging::{Class, EvaluationItem, FormulaSpec, Score, Student, Unit};

/// Test harness holding one class, its students and their score rows.
pub struct GradebookHarness {
    pub class: Class,
    pub students: Vec<Student>,
    pub scores: Vec<Score>,
}

impl GradebookHarness {
    /// Create a harness with an empty class and no students.
    pub fn new() -> Self {
        GradebookHarness {
            class: Class::new(1, "Mathematics"),
            students: Vec::new(),
            scores: Vec::new(),
        }
    }

    /// Two bimesters with two items each, simple averages everywhere,
    /// and four students with complete scores.
    ///
    /// | student | B1 (items 11, 12) | B2 (items 21, 22) | class |
    /// |---------|-------------------|-------------------|-------|
    /// | 1 Ana   | 8, 7   -> 7.5     | 9, 9   -> 9.0     | 8.25  |
    /// | 2 Bruno | 4, 5   -> 4.5     | 3, 4   -> 3.5     | 4.0   |
    /// | 3 Carla | 10, 10 -> 10.0    | 9, 10  -> 9.5     | 9.75  |
    /// | 4 Diego | 6, 5   -> 5.5     | 6, 6   -> 6.0     | 5.75  |
    pub fn with_sample_class() -> Self {
        let mut harness = Self::new();
        harness.class = harness
            .class
            .with_unit(two_item_unit(1, "Bimester 1", 1))
            .with_unit(two_item_unit(2, "Bimester 2", 2));

        let rows = [
            (1, "Ana", [8.0, 7.0, 9.0, 9.0]),
            (2, "Bruno", [4.0, 5.0, 3.0, 4.0]),
            (3, "Carla", [10.0, 10.0, 9.0, 10.0]),
            (4, "Diego", [6.0, 5.0, 6.0, 6.0]),
        ];
        for (id, name, values) in rows {
            harness.add_student(
                id,
                name,
                &[(11, values[0]), (12, values[1]), (21, values[2]), (22, values[3])],
            );
        }
        harness
    }

    /// A class with `students` students and `units` units of `items` items,
    /// every score present. Used for benchmarks.
    pub fn with_large_class(students: u64, units: u64, items: u64) -> Self {
        let mut harness = Self::new();
        for u in 1..=units {
            let mut unit = Unit::new(u, format!("Unit {}", u), u as u32);
            for i in 1..=items {
                let item = EvaluationItem::new(u * 100 + i, format!("Item {}", i), i as u32);
                unit = unit.with_item(item);
            }
            harness.class.units.push(unit);
        }

        for s in 1..=students {
            harness.students.push(Student::new(s, format!("Student {}", s)));
            for u in 1..=units {
                for i in 1..=items {
                    let value = ((s * 7 + u * 3 + i) % 101) as f64 / 10.0;
                    harness.scores.push(Score::new(s, u * 100 + i, value));
                }
            }
        }
        harness
    }

    pub fn add_student(&mut self, id: u64, name: &str, scores: &[(u64, f64)]) {
        self.students.push(Student::new(id, name));
        for &(item_id, value) in scores {
            self.scores.push(Score::new(id, item_id, value));
        }
    }

    pub fn set_unit_formula(&mut self, unit_id: u64, formula: &str) {
        if let Some(unit) = self.class.unit_mut(unit_id) {
            unit.formula = FormulaSpec::Personalized(formula.to_string());
        }
    }

    pub fn set_class_formula(&mut self, formula: &str) {
        self.class.formula = FormulaSpec::Personalized(formula.to_string());
    }
}

/// Unit `id` with items `id*10 + 1` (ordinal 1) and `id*10 + 2` (ordinal 2).
pub fn two_item_unit(id: u64, name: &str, ordinal: u32) -> Unit {
    Unit::new(id, name, ordinal)
        .with_item(EvaluationItem::new(id * 10 + 1, "Test", 1))
        .with_item(EvaluationItem::new(id * 10 + 2, "Project", 2))
}

pub fn assert_close(actual: f64, expected: f64) {
    assert!(
        (actual - expected).abs() < 1e-9,
        "expected {}, got {}",
        expected,
        actual
    );
}
