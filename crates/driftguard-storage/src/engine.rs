//! StorageEngine: owns the DatabaseManager and implements IMonitorStorage.

use std::path::Path;

use chrono::{DateTime, Utc};

use driftguard_core::config::StorageConfig;
use driftguard_core::errors::DriftGuardResult;
use driftguard_core::models::{
    AlertEvent, Baseline, FeedbackRecord, ReferenceExample, ThresholdKey, ThresholdSet,
};
use driftguard_core::traits::IMonitorStorage;

use crate::connection::DatabaseManager;
use crate::queries::{alert_ops, baseline_ops, feedback_ops, threshold_ops};

/// SQLite-backed monitor storage.
pub struct StorageEngine {
    db: DatabaseManager,
}

impl StorageEngine {
    /// Open a storage engine backed by a file on disk.
    pub fn open(path: &Path, busy_timeout_ms: u32) -> DriftGuardResult<Self> {
        Ok(Self {
            db: DatabaseManager::open(path, busy_timeout_ms)?,
        })
    }

    /// Open an in-memory storage engine. Nothing survives the process.
    pub fn open_in_memory() -> DriftGuardResult<Self> {
        Ok(Self {
            db: DatabaseManager::open_in_memory()?,
        })
    }

    /// Open according to config: file-backed when `db_path` is set.
    pub fn from_config(config: &StorageConfig) -> DriftGuardResult<Self> {
        match &config.db_path {
            Some(path) => Self::open(Path::new(path), config.busy_timeout_ms),
            None => Self::open_in_memory(),
        }
    }

    pub fn path(&self) -> Option<&Path> {
        self.db.path()
    }
}

impl IMonitorStorage for StorageEngine {
    fn load_thresholds(&self, defaults: &ThresholdSet) -> DriftGuardResult<ThresholdSet> {
        let rows = self.db.with_conn(threshold_ops::load_thresholds)?;
        let mut set = defaults.clone();
        for (name, value) in rows {
            match ThresholdKey::from_name(&name) {
                Ok(key) if value.is_finite() => set.set(key, value),
                _ => tracing::warn!(threshold = %name, "ignoring unknown persisted threshold"),
            }
        }
        Ok(set)
    }

    fn save_threshold(&self, name: &str, value: f64, at: DateTime<Utc>) -> DriftGuardResult<()> {
        Ok(self
            .db
            .with_conn(|conn| threshold_ops::upsert_threshold(conn, name, value, at))?)
    }

    fn load_baseline(&self) -> DriftGuardResult<Option<Baseline>> {
        Ok(self.db.with_conn(baseline_ops::load_baseline)?)
    }

    fn save_baseline(&self, baseline: &Baseline) -> DriftGuardResult<()> {
        Ok(self
            .db
            .with_conn(|conn| baseline_ops::replace_baseline(conn, baseline))?)
    }

    fn clear_baseline(&self) -> DriftGuardResult<()> {
        Ok(self.db.with_conn(baseline_ops::delete_baseline)?)
    }

    fn append_feedback(&self, record: &FeedbackRecord) -> DriftGuardResult<()> {
        Ok(self
            .db
            .with_conn(|conn| feedback_ops::insert_feedback(conn, record))?)
    }

    fn recent_feedback(&self, limit: usize) -> DriftGuardResult<Vec<FeedbackRecord>> {
        Ok(self
            .db
            .with_conn(|conn| feedback_ops::recent_feedback(conn, limit))?)
    }

    fn feedback_count(&self) -> DriftGuardResult<u64> {
        Ok(self.db.with_conn(feedback_ops::count_feedback)?)
    }

    fn upsert_reference(&self, example: &ReferenceExample) -> DriftGuardResult<()> {
        Ok(self
            .db
            .with_conn(|conn| feedback_ops::upsert_reference(conn, example))?)
    }

    fn reference_dataset(&self) -> DriftGuardResult<Vec<ReferenceExample>> {
        Ok(self.db.with_conn(feedback_ops::reference_dataset)?)
    }

    fn append_alert(&self, alert: &AlertEvent) -> DriftGuardResult<()> {
        Ok(self.db.with_conn(|conn| alert_ops::insert_alert(conn, alert))?)
    }

    fn alert_log(&self, limit: usize) -> DriftGuardResult<Vec<AlertEvent>> {
        Ok(self
            .db
            .with_conn(|conn| alert_ops::recent_alerts(conn, limit))?)
    }
}
