use std::fmt;

use serde::{Deserialize, Serialize};

use crate::errors::ThresholdError;

/// Every named threshold the subsystem reads.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ThresholdKey {
    Relevance,
    Coherence,
    Quality,
    /// Input-side (data) drift distance.
    DataDrift,
    /// Response-side drift distance.
    ResponseDrift,
    QualityDriftDelta,
    Toxicity,
    Hallucination,
}

/// How a threshold's value is interpreted, which determines its sane range.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ThresholdClass {
    /// A 0..1 score; breach when the observed score is below it (or above, for risks).
    Score,
    /// A cosine distance; breach when the observed distance is above it.
    Distance,
    /// A difference of averages.
    Delta,
}

impl ThresholdKey {
    pub const ALL: [ThresholdKey; 8] = [
        Self::Relevance,
        Self::Coherence,
        Self::Quality,
        Self::DataDrift,
        Self::ResponseDrift,
        Self::QualityDriftDelta,
        Self::Toxicity,
        Self::Hallucination,
    ];

    /// Persisted name.
    pub fn name(&self) -> &'static str {
        match self {
            Self::Relevance => "relevance_threshold",
            Self::Coherence => "coherence_threshold",
            Self::Quality => "quality_threshold",
            Self::DataDrift => "drift_threshold",
            Self::ResponseDrift => "embedding_distance_threshold",
            Self::QualityDriftDelta => "quality_drift_delta",
            Self::Toxicity => "toxicity_threshold",
            Self::Hallucination => "hallucination_threshold",
        }
    }

    pub fn from_name(name: &str) -> Result<Self, ThresholdError> {
        Self::ALL
            .into_iter()
            .find(|k| k.name() == name)
            .ok_or_else(|| ThresholdError::UnknownThreshold {
                name: name.to_string(),
            })
    }

    pub fn class(&self) -> ThresholdClass {
        match self {
            Self::Relevance | Self::Coherence | Self::Quality | Self::Toxicity | Self::Hallucination => {
                ThresholdClass::Score
            }
            Self::DataDrift | Self::ResponseDrift => ThresholdClass::Distance,
            Self::QualityDriftDelta => ThresholdClass::Delta,
        }
    }

    /// The threshold a feedback category tunes, if any.
    pub fn for_feedback_type(feedback_type: &str) -> Option<Self> {
        match feedback_type {
            "relevance" => Some(Self::Relevance),
            "coherence" => Some(Self::Coherence),
            "quality" => Some(Self::Quality),
            _ => None,
        }
    }

    /// The threshold a monitored quality metric is compared against, if any.
    pub fn for_metric(metric: &str) -> Option<Self> {
        match metric {
            "relevance" => Some(Self::Relevance),
            "coherence" => Some(Self::Coherence),
            "quality" | "overall_quality" => Some(Self::Quality),
            _ => None,
        }
    }
}

impl fmt::Display for ThresholdKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Inclusive `[floor, ceiling]` range a threshold may occupy.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ThresholdBounds {
    pub floor: f64,
    pub ceiling: f64,
}

impl ThresholdBounds {
    pub const fn new(floor: f64, ceiling: f64) -> Self {
        Self { floor, ceiling }
    }

    pub fn contains(&self, value: f64) -> bool {
        value >= self.floor && value <= self.ceiling
    }

    pub fn clamp(&self, value: f64) -> f64 {
        if value.is_nan() {
            return self.floor;
        }
        value.max(self.floor).min(self.ceiling)
    }

    pub fn is_valid(&self) -> bool {
        self.floor.is_finite() && self.ceiling.is_finite() && self.floor <= self.ceiling
    }
}

/// A complete snapshot of all thresholds.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ThresholdSet {
    pub relevance_threshold: f64,
    pub coherence_threshold: f64,
    pub quality_threshold: f64,
    pub drift_threshold: f64,
    pub embedding_distance_threshold: f64,
    pub quality_drift_delta: f64,
    pub toxicity_threshold: f64,
    pub hallucination_threshold: f64,
}

impl Default for ThresholdSet {
    fn default() -> Self {
        Self {
            relevance_threshold: 0.7,
            coherence_threshold: 0.7,
            quality_threshold: 0.6,
            drift_threshold: 0.3,
            embedding_distance_threshold: 0.4,
            quality_drift_delta: 0.1,
            toxicity_threshold: 0.3,
            hallucination_threshold: 0.4,
        }
    }
}

impl ThresholdSet {
    pub fn get(&self, key: ThresholdKey) -> f64 {
        match key {
            ThresholdKey::Relevance => self.relevance_threshold,
            ThresholdKey::Coherence => self.coherence_threshold,
            ThresholdKey::Quality => self.quality_threshold,
            ThresholdKey::DataDrift => self.drift_threshold,
            ThresholdKey::ResponseDrift => self.embedding_distance_threshold,
            ThresholdKey::QualityDriftDelta => self.quality_drift_delta,
            ThresholdKey::Toxicity => self.toxicity_threshold,
            ThresholdKey::Hallucination => self.hallucination_threshold,
        }
    }

    pub fn set(&mut self, key: ThresholdKey, value: f64) {
        let slot = match key {
            ThresholdKey::Relevance => &mut self.relevance_threshold,
            ThresholdKey::Coherence => &mut self.coherence_threshold,
            ThresholdKey::Quality => &mut self.quality_threshold,
            ThresholdKey::DataDrift => &mut self.drift_threshold,
            ThresholdKey::ResponseDrift => &mut self.embedding_distance_threshold,
            ThresholdKey::QualityDriftDelta => &mut self.quality_drift_delta,
            ThresholdKey::Toxicity => &mut self.toxicity_threshold,
            ThresholdKey::Hallucination => &mut self.hallucination_threshold,
        };
        *slot = value;
    }

    /// `(key, value)` for every threshold, in a stable order.
    pub fn iter(&self) -> impl Iterator<Item = (ThresholdKey, f64)> + '_ {
        ThresholdKey::ALL.into_iter().map(|k| (k, self.get(k)))
    }
}
