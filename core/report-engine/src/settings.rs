//! FILENAME: core/report-engine/src/settings.rs
//! PURPOSE: Tunable knobs for report generation, loaded from JSON.
//! CONTEXT: Every field is optional in the document; a missing field takes
//! its default. Decoding always ends with `validate()`.

use std::fs;
use std::path::Path;

use averaging::FallbackPolicy;
use log::debug;
use serde::{Deserialize, Serialize};

use crate::error::ReportError;

/// Grade ranges shown on distribution charts: [0,4), [4,6), [6,8), [8,10].
pub const DEFAULT_RANGES: [(f64, f64); 4] = [(0.0, 4.0), (4.0, 6.0), (6.0, 8.0), (8.0, 10.0)];
pub const DEFAULT_PASS_MARK: f64 = 5.0;
pub const DEFAULT_TOP_COUNT: usize = 10;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ReportSettings {
    /// Minimum average counted as approved.
    pub pass_mark: f64,
    /// Length of the top students ranking.
    pub top_count: usize,
    /// Distribution ranges as `[min, max]` pairs; the last one is closed.
    pub ranges: Vec<(f64, f64)>,
    pub fallback_policy: FallbackPolicy,
}

impl Default for ReportSettings {
    fn default() -> Self {
        ReportSettings {
            pass_mark: DEFAULT_PASS_MARK,
            top_count: DEFAULT_TOP_COUNT,
            ranges: DEFAULT_RANGES.to_vec(),
            fallback_policy: FallbackPolicy::default(),
        }
    }
}

impl ReportSettings {
    pub fn from_json_str(json: &str) -> Result<Self, ReportError> {
        let settings: ReportSettings = serde_json::from_str(json)?;
        settings.validate()?;
        Ok(settings)
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self, ReportError> {
        let path = path.as_ref();
        debug!("loading report settings from {}", path.display());
        let json = fs::read_to_string(path)?;
        Self::from_json_str(&json)
    }

    pub fn to_json_string(&self) -> Result<String, ReportError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    pub fn validate(&self) -> Result<(), ReportError> {
        if !self.pass_mark.is_finite() {
            return Err(ReportError::InvalidSettings(
                "pass_mark must be a finite number".to_string(),
            ));
        }
        if self.top_count == 0 {
            return Err(ReportError::InvalidSettings(
                "top_count must be at least 1".to_string(),
            ));
        }
        if self.ranges.is_empty() {
            return Err(ReportError::InvalidSettings(
                "at least one grade range is required".to_string(),
            ));
        }
        for (index, &(min, max)) in self.ranges.iter().enumerate() {
            if !(min.is_finite() && max.is_finite() && min < max) {
                return Err(ReportError::InvalidSettings(format!(
                    "range {} is [{}, {}]; min must be below max",
                    index + 1,
                    min,
                    max
                )));
            }
        }
        Ok(())
    }
}
