//! FILENAME: core/report-engine/src/view.rs
//! PURPOSE: Report output structures returned to the HTTP layer.
//! CONTEXT: Every figure here is rounded to 2 decimals for display. These
//! structs are derived per request and never stored.

use averaging::{ClassId, FallbackNotice, StudentId, UnitId};
use serde::{Deserialize, Serialize};

/// One grade range and how many values fell in it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GradeRangeBucket {
    pub min: f64,
    pub max: f64,
    pub count: usize,
    /// Share of all input values, 0-100.
    pub percentage: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RankedStudent {
    pub student_id: StudentId,
    /// 1-based position after sorting by average, descending.
    pub rank: usize,
    pub average: f64,
}

/// Headline figures over the students' class averages.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClassSummary {
    pub student_count: usize,
    pub class_average: f64,
    pub median: f64,
    pub highest: f64,
    pub lowest: f64,
    pub std_dev: f64,
    pub approved_count: usize,
    pub failed_count: usize,
    pub approval_rate: f64,
}

/// Figures over the students' averages for one unit.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UnitStatistics {
    pub unit_id: UnitId,
    pub name: String,
    pub ordinal: u32,
    /// Students with an average for this unit.
    pub student_count: usize,
    pub average: f64,
    pub median: f64,
    pub highest: f64,
    pub lowest: f64,
    pub approval_rate: f64,
    pub distribution: Vec<GradeRangeBucket>,
}

/// Everything the class report screen shows, computed in one pass.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClassReport {
    pub class_id: ClassId,
    pub summary: ClassSummary,
    pub distribution: Vec<GradeRangeBucket>,
    pub top_students: Vec<RankedStudent>,
    pub units: Vec<UnitStatistics>,
    /// Formulas replaced by the simple mean while computing this report.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub fallbacks: Vec<FallbackNotice>,
}
