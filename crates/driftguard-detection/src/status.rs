//! Point-in-time drift status report.

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::Serialize;

use driftguard_core::models::DriftKind;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SampleCounts {
    pub responses: usize,
    pub inputs: usize,
    pub quality_scores: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BaselineStatus {
    pub present: bool,
    pub response_samples: usize,
    pub input_samples: usize,
    pub dimensions: usize,
    pub created_at: Option<DateTime<Utc>>,
    pub age_seconds: Option<f64>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DriftStatus {
    /// Latched per-type flags: true once drift was detected since the last reset.
    pub flags: BTreeMap<DriftKind, bool>,
    /// Distance from the most recent completed check of each type.
    pub last_distances: BTreeMap<DriftKind, f64>,
    pub detected_total: u64,
    /// Detected events among the most recent history entries.
    pub recent_detected: usize,
    pub history_len: usize,
    pub unavailable_checks: u64,
    pub sample_counts: SampleCounts,
    pub baseline: BaselineStatus,
}
