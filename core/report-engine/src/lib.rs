//! FILENAME: core/report-engine/src/lib.rs
//! Grade report subsystem.
//!
//! This crate turns computed student averages into the statistics shown on
//! class reports. It depends on `averaging` for the shared result types and,
//! in `build_class_report`, to run the aggregation itself.
//!
//! Layers:
//! - `settings`: JSON-loaded configuration (pass mark, ranges, ranking size)
//! - `statistics`: Pure functions over flat lists of grades
//! - `view`: Serializable report output
//! - `reports`: Builders composing averages and statistics

pub mod error;
pub mod reports;
pub mod settings;
pub mod statistics;
pub mod view;

pub use error::ReportError;
pub use reports::{
    build_class_report, class_summary, grade_distribution, top_students, unit_statistics,
};
pub use settings::{ReportSettings, DEFAULT_PASS_MARK, DEFAULT_RANGES, DEFAULT_TOP_COUNT};
pub use statistics::{
    approval_rate, distribute, max, mean, median, min, rank_top, round2, std_dev,
};
pub use view::*;
