//! FILENAME: core/report-engine/src/reports.rs
//! PURPOSE: Report builders composing the averaging pipeline and statistics.
//! CONTEXT: Builders take already-computed student averages, so one
//! aggregation run can feed every section of a report. Class and unit
//! averages are roll-ups (mean of the student averages), never recomputed
//! from raw scores.

use averaging::{
    class_rollup, unit_rollup, AveragingEngine, Class, Score, Student, StudentAverage, StudentId,
};
use log::{debug, info};

use crate::error::ReportError;
use crate::settings::ReportSettings;
use crate::statistics::{
    approval_rate, distribute, max, median, min, rank_top, round2, std_dev,
};
use crate::view::{ClassReport, ClassSummary, GradeRangeBucket, RankedStudent, UnitStatistics};

fn class_averages(averages: &[StudentAverage]) -> Vec<f64> {
    averages.iter().map(|average| average.average).collect()
}

pub fn class_summary(averages: &[StudentAverage], pass_mark: f64) -> ClassSummary {
    let values = class_averages(averages);
    let approved_count = values.iter().filter(|&&v| v >= pass_mark).count();

    ClassSummary {
        student_count: values.len(),
        class_average: round2(class_rollup(averages)),
        median: median(&values),
        highest: max(&values),
        lowest: min(&values),
        std_dev: std_dev(&values),
        approved_count,
        failed_count: values.len() - approved_count,
        approval_rate: approval_rate(&values, pass_mark),
    }
}

/// Distribution of the students' class averages over `ranges`.
pub fn grade_distribution(
    averages: &[StudentAverage],
    ranges: &[(f64, f64)],
) -> Vec<GradeRangeBucket> {
    distribute(&class_averages(averages), ranges)
}

/// The `count` best class averages; ties keep the order of `averages`.
pub fn top_students(averages: &[StudentAverage], count: usize) -> Vec<RankedStudent> {
    let ranked: Vec<(StudentId, f64)> = averages
        .iter()
        .map(|average| (average.student_id, average.average))
        .collect();
    rank_top(&ranked, count)
}

/// Per-unit figures, in unit ordinal order.
pub fn unit_statistics(
    class: &Class,
    averages: &[StudentAverage],
    pass_mark: f64,
    ranges: &[(f64, f64)],
) -> Vec<UnitStatistics> {
    class
        .ordered_units()
        .into_iter()
        .map(|unit| {
            let values: Vec<f64> = averages
                .iter()
                .filter_map(|average| average.unit_average(unit.id))
                .collect();

            UnitStatistics {
                unit_id: unit.id,
                name: unit.name.clone(),
                ordinal: unit.ordinal,
                student_count: values.len(),
                average: round2(unit_rollup(averages, unit.id)),
                median: median(&values),
                highest: max(&values),
                lowest: min(&values),
                approval_rate: approval_rate(&values, pass_mark),
                distribution: distribute(&values, ranges),
            }
        })
        .collect()
}

/// Runs the averaging pipeline for every student and builds the full report.
pub fn build_class_report(
    class: &Class,
    students: &[Student],
    scores: &[Score],
    settings: &ReportSettings,
) -> Result<ClassReport, ReportError> {
    settings.validate()?;

    let engine = AveragingEngine::new(settings.fallback_policy);
    let averages = engine.compute_all_student_averages(class, students, scores)?;
    debug!(
        "class {}: building report for {} students",
        class.id,
        averages.len()
    );

    let fallbacks: Vec<_> = averages
        .iter()
        .flat_map(|average| average.fallbacks.iter().cloned())
        .collect();
    if !fallbacks.is_empty() {
        info!(
            "class {}: report used the simple mean in place of {} formula evaluations",
            class.id,
            fallbacks.len()
        );
    }

    Ok(ClassReport {
        class_id: class.id,
        summary: class_summary(&averages, settings.pass_mark),
        distribution: grade_distribution(&averages, &settings.ranges),
        top_students: top_students(&averages, settings.top_count),
        units: unit_statistics(class, &averages, settings.pass_mark, &settings.ranges),
        fallbacks,
    })
}
