//! FILENAME: tests/test_settings.rs
//! Integration tests for loading report settings from disk.

mod common;

use std::fs;

use averaging::FallbackPolicy;
use common::GradebookHarness;
use report_engine::{build_class_report, ReportError, ReportSettings};
use tempfile::tempdir;

#[test]
fn test_load_settings_file() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("report.json");
    fs::write(
        &path,
        r#"{ "pass_mark": 6.0, "top_count": 2, "fallback_policy": "propagate" }"#,
    )
    .unwrap();

    let settings = ReportSettings::load(&path).unwrap();
    assert_eq!(settings.pass_mark, 6.0);
    assert_eq!(settings.top_count, 2);
    assert_eq!(settings.fallback_policy, FallbackPolicy::Propagate);
    assert_eq!(settings.ranges, ReportSettings::default().ranges);
}

#[test]
fn test_saved_settings_load_back() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("report.json");
    let settings = ReportSettings {
        pass_mark: 7.0,
        ranges: vec![(0.0, 7.0), (7.0, 10.0)],
        ..ReportSettings::default()
    };
    fs::write(&path, settings.to_json_string().unwrap()).unwrap();

    assert_eq!(ReportSettings::load(&path).unwrap(), settings);
}

#[test]
fn test_missing_file_is_io_error() {
    let dir = tempdir().unwrap();
    let result = ReportSettings::load(dir.path().join("absent.json"));
    assert!(matches!(result, Err(ReportError::Io(_))));
}

#[test]
fn test_invalid_file_is_rejected() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("report.json");
    fs::write(&path, r#"{ "ranges": [[10, 0]] }"#).unwrap();

    assert!(matches!(
        ReportSettings::load(&path),
        Err(ReportError::InvalidSettings(_))
    ));
}

#[test]
fn test_loaded_settings_drive_the_report() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("report.json");
    fs::write(&path, r#"{ "pass_mark": 8.0, "top_count": 1 }"#).unwrap();
    let settings = ReportSettings::load(&path).unwrap();

    let harness = GradebookHarness::with_sample_class();
    let report =
        build_class_report(&harness.class, &harness.students, &harness.scores, &settings).unwrap();

    // Only Ana (8.25) and Carla (9.75) reach 8.0
    assert_eq!(report.summary.approved_count, 2);
    assert_eq!(report.summary.approval_rate, 50.0);
    assert_eq!(report.top_students.len(), 1);
    assert_eq!(report.top_students[0].student_id, 3);
}
