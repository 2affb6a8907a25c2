//! FILENAME: core/averaging/src/model.rs
//! PURPOSE: Read-only views of the gradebook hierarchy and the computed averages.
//! CONTEXT: Classes own ordered units, units own ordered evaluation items.
//! The ordinal of a child is what binds it to `N<i>` in its parent's
//! personalized formula, so ordering is always explicit and stable.

use std::fmt;

use formula::{FormulaError, FormulaSpec};
use log::warn;
use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};

use crate::error::ModelError;

pub type StudentId = u64;
pub type ClassId = u64;
pub type UnitId = u64;
pub type ItemId = u64;

// ============================================================================
// INPUT RECORDS
// ============================================================================

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Student {
    pub id: StudentId,
    pub name: String,
}

impl Student {
    pub fn new(id: StudentId, name: impl Into<String>) -> Self {
        Student {
            id,
            name: name.into(),
        }
    }
}

/// One grade (0-10 scale) for one student on one evaluation item.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Score {
    pub student_id: StudentId,
    pub item_id: ItemId,
    pub value: f64,
}

impl Score {
    pub fn new(student_id: StudentId, item_id: ItemId, value: f64) -> Self {
        Score {
            student_id,
            item_id,
            value,
        }
    }
}

/// A gradable component (test, assignment) inside a unit.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EvaluationItem {
    pub id: ItemId,
    pub name: String,
    /// Position within the unit; item at ordinal 1 binds to N1.
    pub ordinal: u32,
}

impl EvaluationItem {
    pub fn new(id: ItemId, name: impl Into<String>, ordinal: u32) -> Self {
        EvaluationItem {
            id,
            name: name.into(),
            ordinal,
        }
    }
}

/// An academic sub-period (bimester, term) grouping evaluation items.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Unit {
    pub id: UnitId,
    pub name: String,
    /// Position within the class; unit at ordinal 1 binds to N1.
    pub ordinal: u32,
    #[serde(default)]
    pub formula: FormulaSpec,
    #[serde(default)]
    pub items: Vec<EvaluationItem>,
}

impl Unit {
    pub fn new(id: UnitId, name: impl Into<String>, ordinal: u32) -> Self {
        Unit {
            id,
            name: name.into(),
            ordinal,
            formula: FormulaSpec::Simple,
            items: Vec::new(),
        }
    }

    pub fn with_item(mut self, item: EvaluationItem) -> Self {
        self.items.push(item);
        self
    }

    /// Attaches a stored formula as-is. Use `set_formula` when authoring.
    pub fn with_formula(mut self, formula: FormulaSpec) -> Self {
        self.formula = formula;
        self
    }

    /// Items sorted by (ordinal, id). This order defines N1..Nk.
    pub fn ordered_items(&self) -> Vec<&EvaluationItem> {
        let mut items: Vec<&EvaluationItem> = self.items.iter().collect();
        items.sort_by_key(|item| (item.ordinal, item.id));
        items
    }

    fn item_ids(&self) -> Vec<ItemId> {
        self.ordered_items().iter().map(|item| item.id).collect()
    }

    /// Replaces the formula after validating it against the current item count.
    pub fn set_formula(&mut self, formula: FormulaSpec) -> Result<(), ModelError> {
        formula
            .validate_for(self.items.len())
            .map_err(|source| ModelError::InvalidFormula {
                level: FormulaLevel::Unit(self.id),
                source,
            })?;
        self.formula = formula;
        Ok(())
    }

    /// Renumbers items 1..=n in the given order.
    ///
    /// Returns true when the order actually changed under a personalized
    /// formula, whose N<i> bindings now point at different items.
    pub fn reorder_items(&mut self, order: &[ItemId]) -> Result<bool, ModelError> {
        let positions = positions_for(order, self.items.iter().map(|item| item.id))?;
        let before = self.item_ids();
        for item in &mut self.items {
            if let Some(&ordinal) = positions.get(&item.id) {
                item.ordinal = ordinal;
            }
        }

        let shifted = self.formula.is_personalized() && before != self.item_ids();
        if shifted {
            warn!(
                "unit {}: items reordered, personalized formula now binds N1..N{} to the new order",
                self.id,
                self.items.len()
            );
        }
        Ok(shifted)
    }
}

/// A class: an ordered sequence of units plus the formula combining them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Class {
    pub id: ClassId,
    pub name: String,
    #[serde(default)]
    pub formula: FormulaSpec,
    #[serde(default)]
    pub units: Vec<Unit>,
}

impl Class {
    pub fn new(id: ClassId, name: impl Into<String>) -> Self {
        Class {
            id,
            name: name.into(),
            formula: FormulaSpec::Simple,
            units: Vec::new(),
        }
    }

    pub fn with_unit(mut self, unit: Unit) -> Self {
        self.units.push(unit);
        self
    }

    /// Attaches a stored formula as-is. Use `set_formula` when authoring.
    pub fn with_formula(mut self, formula: FormulaSpec) -> Self {
        self.formula = formula;
        self
    }

    /// Units sorted by (ordinal, id). This order defines N1..Nk.
    pub fn ordered_units(&self) -> Vec<&Unit> {
        let mut units: Vec<&Unit> = self.units.iter().collect();
        units.sort_by_key(|unit| (unit.ordinal, unit.id));
        units
    }

    fn unit_ids(&self) -> Vec<UnitId> {
        self.ordered_units().iter().map(|unit| unit.id).collect()
    }

    pub fn unit(&self, unit_id: UnitId) -> Option<&Unit> {
        self.units.iter().find(|unit| unit.id == unit_id)
    }

    pub fn unit_mut(&mut self, unit_id: UnitId) -> Option<&mut Unit> {
        self.units.iter_mut().find(|unit| unit.id == unit_id)
    }

    /// Replaces the class formula after validating it against the current unit count.
    pub fn set_formula(&mut self, formula: FormulaSpec) -> Result<(), ModelError> {
        formula
            .validate_for(self.units.len())
            .map_err(|source| ModelError::InvalidFormula {
                level: FormulaLevel::Class(self.id),
                source,
            })?;
        self.formula = formula;
        Ok(())
    }

    /// Renumbers units 1..=n in the given order. See `Unit::reorder_items`.
    pub fn reorder_units(&mut self, order: &[UnitId]) -> Result<bool, ModelError> {
        let positions = positions_for(order, self.units.iter().map(|unit| unit.id))?;
        let before = self.unit_ids();
        for unit in &mut self.units {
            if let Some(&ordinal) = positions.get(&unit.id) {
                unit.ordinal = ordinal;
            }
        }

        let shifted = self.formula.is_personalized() && before != self.unit_ids();
        if shifted {
            warn!(
                "class {}: units reordered, personalized formula now binds N1..N{} to the new order",
                self.id,
                self.units.len()
            );
        }
        Ok(shifted)
    }
}

/// Maps each id in `order` to its 1-based position, provided `order` is a
/// permutation of `current`.
fn positions_for(
    order: &[u64],
    current: impl Iterator<Item = u64>,
) -> Result<FxHashMap<u64, u32>, ModelError> {
    let current: Vec<u64> = current.collect();
    let not_a_permutation = || ModelError::NotAPermutation {
        expected: current.len(),
    };

    if order.len() != current.len() {
        return Err(not_a_permutation());
    }

    let mut positions = FxHashMap::default();
    for (index, &id) in order.iter().enumerate() {
        let ordinal = u32::try_from(index + 1).map_err(|_| not_a_permutation())?;
        if positions.insert(id, ordinal).is_some() {
            return Err(not_a_permutation());
        }
    }

    if current.iter().any(|id| !positions.contains_key(id)) {
        return Err(not_a_permutation());
    }

    Ok(positions)
}

// ============================================================================
// COMPUTED RESULTS
// ============================================================================

/// Which level of the hierarchy a formula belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "level", content = "id", rename_all = "snake_case")]
pub enum FormulaLevel {
    Unit(UnitId),
    Class(ClassId),
}

impl fmt::Display for FormulaLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FormulaLevel::Unit(id) => write!(f, "unit {}", id),
            FormulaLevel::Class(id) => write!(f, "class {}", id),
        }
    }
}

/// Records that a personalized formula could not be used and the simple
/// mean was reported in its place.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FallbackNotice {
    pub level: FormulaLevel,
    pub student_id: StudentId,
    pub error: FormulaError,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct UnitAverage {
    pub unit_id: UnitId,
    pub average: f64,
}

/// One student's final grade and the unit averages it was built from.
/// Computed per request; never stored.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StudentAverage {
    pub student_id: StudentId,
    pub average: f64,
    pub unit_averages: Vec<UnitAverage>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub fallbacks: Vec<FallbackNotice>,
}

impl StudentAverage {
    /// The result for a student in a class without units.
    pub fn empty(student_id: StudentId) -> Self {
        StudentAverage {
            student_id,
            average: 0.0,
            unit_averages: Vec::new(),
            fallbacks: Vec::new(),
        }
    }

    pub fn unit_average(&self, unit_id: UnitId) -> Option<f64> {
        self.unit_averages
            .iter()
            .find(|entry| entry.unit_id == unit_id)
            .map(|entry| entry.average)
    }
}
