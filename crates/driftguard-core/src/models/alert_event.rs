use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::drift_event::DriftKind;
use crate::constants::{HIGH_SEVERITY_RATIO, MEDIUM_SEVERITY_RATIO};

/// Alert severity, ordered low → high.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AlertSeverity {
    Low,
    Medium,
    High,
}

impl AlertSeverity {
    pub const ALL: [AlertSeverity; 3] = [Self::Low, Self::Medium, Self::High];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Low => "low",
            Self::Medium => "medium",
            Self::High => "high",
        }
    }

    /// Severity for a value where higher is worse (distances).
    pub fn for_distance(value: f64, threshold: f64) -> Self {
        if threshold <= 0.0 {
            return Self::High;
        }
        Self::from_ratio(value / threshold)
    }

    /// Severity for a value where lower is worse (quality scores).
    pub fn for_score(value: f64, threshold: f64) -> Self {
        if value <= 0.0 {
            return Self::High;
        }
        Self::from_ratio(threshold / value)
    }

    fn from_ratio(ratio: f64) -> Self {
        if ratio > HIGH_SEVERITY_RATIO {
            Self::High
        } else if ratio > MEDIUM_SEVERITY_RATIO {
            Self::Medium
        } else {
            Self::Low
        }
    }
}

impl fmt::Display for AlertSeverity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// What kind of condition raised the alert.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AlertKind {
    /// A quality score stayed under its threshold for N consecutive requests.
    QualityDegradation,
    ResponseDrift,
    DataDrift,
    QualityDrift,
    Toxicity,
    Hallucination,
}

impl AlertKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::QualityDegradation => "quality_degradation",
            Self::ResponseDrift => "response_drift",
            Self::DataDrift => "data_drift",
            Self::QualityDrift => "quality_drift",
            Self::Toxicity => "toxicity",
            Self::Hallucination => "hallucination",
        }
    }
}

impl From<DriftKind> for AlertKind {
    fn from(kind: DriftKind) -> Self {
        match kind {
            DriftKind::Response => Self::ResponseDrift,
            DriftKind::Data => Self::DataDrift,
            DriftKind::Quality => Self::QualityDrift,
        }
    }
}

impl fmt::Display for AlertKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// An emitted alert. Immutable; appended to history and the durable alert log.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AlertEvent {
    pub id: String,
    pub kind: AlertKind,
    pub severity: AlertSeverity,
    pub metric: String,
    pub value: f64,
    pub threshold: f64,
    pub message: String,
    /// Length of the breach streak that fired the alert, for gated metrics.
    pub consecutive_failures: Option<u32>,
    pub timestamp: DateTime<Utc>,
}

impl AlertEvent {
    pub fn new(
        kind: AlertKind,
        severity: AlertSeverity,
        metric: impl Into<String>,
        value: f64,
        threshold: f64,
        message: impl Into<String>,
        timestamp: DateTime<Utc>,
    ) -> Self {
        Self {
            id: uuid::Uuid::new_v4().to_string(),
            kind,
            severity,
            metric: metric.into(),
            value,
            threshold,
            message: message.into(),
            consecutive_failures: None,
            timestamp,
        }
    }

    pub fn with_consecutive_failures(mut self, count: u32) -> Self {
        self.consecutive_failures = Some(count);
        self
    }
}
