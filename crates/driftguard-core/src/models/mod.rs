//! Data model: immutable event records, baselines, thresholds, feedback.

pub mod alert_event;
pub mod baseline;
pub mod drift_event;
pub mod feedback;
pub mod quality_scores;
pub mod thresholds;

pub use alert_event::{AlertEvent, AlertKind, AlertSeverity};
pub use baseline::{Baseline, BaselineSample, SampleKind};
pub use drift_event::{CheckStatus, DriftEvent, DriftKind, DriftReport};
pub use feedback::{FeedbackRecord, ReferenceExample};
pub use quality_scores::QualityScores;
pub use thresholds::{ThresholdBounds, ThresholdClass, ThresholdKey, ThresholdSet};
