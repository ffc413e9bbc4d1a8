use chrono::{DateTime, Utc};

use crate::errors::DriftGuardResult;
use crate::models::{AlertEvent, Baseline, FeedbackRecord, ReferenceExample, ThresholdSet};

/// Durable state: thresholds, baseline, feedback, reference dataset, alert log.
pub trait IMonitorStorage: Send + Sync {
    // --- Thresholds ---
    /// Persisted thresholds layered over `defaults`. Unknown names are skipped.
    fn load_thresholds(&self, defaults: &ThresholdSet) -> DriftGuardResult<ThresholdSet>;
    fn save_threshold(&self, name: &str, value: f64, at: DateTime<Utc>) -> DriftGuardResult<()>;

    // --- Baseline ---
    fn load_baseline(&self) -> DriftGuardResult<Option<Baseline>>;
    /// Replace the stored baseline atomically.
    fn save_baseline(&self, baseline: &Baseline) -> DriftGuardResult<()>;
    fn clear_baseline(&self) -> DriftGuardResult<()>;

    // --- Feedback ---
    fn append_feedback(&self, record: &FeedbackRecord) -> DriftGuardResult<()>;
    /// Newest `limit` records, in chronological order.
    fn recent_feedback(&self, limit: usize) -> DriftGuardResult<Vec<FeedbackRecord>>;
    fn feedback_count(&self) -> DriftGuardResult<u64>;

    // --- Reference dataset ---
    /// Insert or replace by `session_id`.
    fn upsert_reference(&self, example: &ReferenceExample) -> DriftGuardResult<()>;
    /// All examples, ordered by `session_id`.
    fn reference_dataset(&self) -> DriftGuardResult<Vec<ReferenceExample>>;

    // --- Alerts ---
    fn append_alert(&self, alert: &AlertEvent) -> DriftGuardResult<()>;
    /// Newest `limit` alerts, in chronological order.
    fn alert_log(&self, limit: usize) -> DriftGuardResult<Vec<AlertEvent>>;
}
