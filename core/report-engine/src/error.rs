//! FILENAME: core/report-engine/src/error.rs

use averaging::AveragingError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ReportError {
    #[error("Averaging failed: {0}")]
    Averaging(#[from] AveragingError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Settings are not valid JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Invalid report settings: {0}")]
    InvalidSettings(String),
}
