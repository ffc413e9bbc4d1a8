use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// The axis a drift check measures.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DriftKind {
    /// Model outputs vs. baseline responses.
    Response,
    /// User inputs vs. baseline inputs.
    Data,
    /// Short-term vs. long-term quality score average.
    Quality,
}

impl DriftKind {
    pub const ALL: [DriftKind; 3] = [DriftKind::Response, DriftKind::Data, DriftKind::Quality];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Response => "response",
            Self::Data => "data",
            Self::Quality => "quality",
        }
    }

    /// Metric name used in alerts and readouts.
    pub fn metric_name(&self) -> &'static str {
        match self {
            Self::Response => "response_drift",
            Self::Data => "data_drift",
            Self::Quality => "quality_drift",
        }
    }
}

impl fmt::Display for DriftKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Whether a check actually ran, and if not, why.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CheckStatus {
    Checked,
    /// No baseline has been set; the check short-circuited.
    NoBaseline,
    /// The embedding collaborator failed or timed out.
    EmbeddingUnavailable,
    /// Not enough quality history for a meaningful comparison.
    InsufficientHistory,
    /// The quality score was NaN or infinite and was not recorded.
    InvalidScore,
}

impl CheckStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Checked => "checked",
            Self::NoBaseline => "no_baseline",
            Self::EmbeddingUnavailable => "embedding_unavailable",
            Self::InsufficientHistory => "insufficient_history",
            Self::InvalidScore => "invalid_score",
        }
    }
}

/// A single drift verdict. Immutable once created.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DriftEvent {
    pub kind: DriftKind,
    pub distance: f64,
    pub threshold: f64,
    pub detected: bool,
    pub status: CheckStatus,
    /// Samples the verdict was computed over (baseline size or score history length).
    pub sample_count: usize,
    pub timestamp: DateTime<Utc>,
}

impl DriftEvent {
    /// A verdict from a check that ran. `detected` is `distance > threshold`.
    pub fn checked(
        kind: DriftKind,
        distance: f64,
        threshold: f64,
        sample_count: usize,
        timestamp: DateTime<Utc>,
    ) -> Self {
        Self {
            kind,
            distance,
            threshold,
            detected: distance > threshold,
            status: CheckStatus::Checked,
            sample_count,
            timestamp,
        }
    }

    /// A soft-failed verdict: never detected, distance zero.
    pub fn skipped(
        kind: DriftKind,
        status: CheckStatus,
        threshold: f64,
        sample_count: usize,
        timestamp: DateTime<Utc>,
    ) -> Self {
        Self {
            kind,
            distance: 0.0,
            threshold,
            detected: false,
            status,
            sample_count,
            timestamp,
        }
    }

    /// True when the check could not run because a dependency was missing.
    pub fn is_unavailable(&self) -> bool {
        matches!(
            self.status,
            CheckStatus::NoBaseline | CheckStatus::EmbeddingUnavailable
        )
    }
}

/// All drift verdicts for one exchange.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DriftReport {
    pub response: DriftEvent,
    pub data: DriftEvent,
    /// Present only when a quality score was supplied.
    pub quality: Option<DriftEvent>,
    pub any_drift_detected: bool,
    pub timestamp: DateTime<Utc>,
}

impl DriftReport {
    pub fn new(response: DriftEvent, data: DriftEvent, quality: Option<DriftEvent>) -> Self {
        let any_drift_detected = response.detected
            || data.detected
            || quality.as_ref().is_some_and(|q| q.detected);
        Self {
            response,
            data,
            quality,
            any_drift_detected,
            timestamp: Utc::now(),
        }
    }

    pub fn events(&self) -> impl Iterator<Item = &DriftEvent> {
        [Some(&self.response), Some(&self.data), self.quality.as_ref()]
            .into_iter()
            .flatten()
    }
}
