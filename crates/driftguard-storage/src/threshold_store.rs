//! ThresholdStore: persisted, snapshot-readable thresholds with a single writer.
//!
//! Readers take an `Arc<ThresholdSet>` snapshot and never block the writer
//! for longer than a pointer swap. Exactly one `ThresholdWriter` exists per
//! store; it is handed out by `open` and is not `Clone`.

use std::sync::{Arc, RwLock};

use chrono::{DateTime, Utc};

use driftguard_core::config::ThresholdConfig;
use driftguard_core::errors::{DriftGuardErrorCode, DriftGuardResult, ThresholdError};
use driftguard_core::models::{ThresholdBounds, ThresholdKey, ThresholdSet};
use driftguard_core::traits::IMonitorStorage;
use driftguard_observability::tracing_setup::events;
use driftguard_observability::{GaugeReadout, MetricSample};

/// Thresholds are stored at this precision so repeated steps don't accumulate float noise.
const PRECISION: f64 = 1e9;

/// Result of one proposed threshold change.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ThresholdUpdate {
    pub key: ThresholdKey,
    pub previous: f64,
    pub proposed: f64,
    pub applied: f64,
    /// The proposal was outside `[floor, ceiling]`.
    pub clamped: bool,
}

impl ThresholdUpdate {
    pub fn changed(&self) -> bool {
        (self.applied - self.previous).abs() > f64::EPSILON
    }
}

/// Read side of the threshold set.
#[derive(Debug)]
pub struct ThresholdStore {
    current: RwLock<Arc<ThresholdSet>>,
    config: ThresholdConfig,
}

impl ThresholdStore {
    /// Load persisted thresholds over the configured initial values and
    /// return the store together with its only writer.
    ///
    /// Persisted values that fall outside their bounds (e.g. after the bounds
    /// were tightened in config) are clamped on load.
    pub fn open(
        storage: Arc<dyn IMonitorStorage>,
        config: ThresholdConfig,
    ) -> DriftGuardResult<(Arc<Self>, ThresholdWriter)> {
        let mut loaded = storage.load_thresholds(&config.initial)?;
        for key in ThresholdKey::ALL {
            let value = loaded.get(key);
            let bounds = config.bounds_for(key);
            if !bounds.contains(value) {
                let applied = bounds.clamp(value);
                events::threshold_clamped(key.name(), value, applied);
                loaded.set(key, applied);
            }
        }

        let store = Arc::new(Self {
            current: RwLock::new(Arc::new(loaded)),
            config,
        });
        let writer = ThresholdWriter {
            store: Arc::clone(&store),
            storage,
        };
        Ok((store, writer))
    }

    /// Consistent snapshot of every threshold.
    pub fn snapshot(&self) -> Arc<ThresholdSet> {
        let guard = self.current.read().unwrap_or_else(|e| e.into_inner());
        Arc::clone(&guard)
    }

    pub fn get(&self, key: ThresholdKey) -> f64 {
        self.snapshot().get(key)
    }

    pub fn bounds(&self, key: ThresholdKey) -> ThresholdBounds {
        self.config.bounds_for(key)
    }

    fn swap(&self, next: ThresholdSet) {
        let mut guard = self.current.write().unwrap_or_else(|e| e.into_inner());
        *guard = Arc::new(next);
    }
}

impl GaugeReadout for ThresholdStore {
    fn readouts(&self) -> Vec<MetricSample> {
        self.snapshot()
            .iter()
            .map(|(key, value)| MetricSample::new("threshold", value).with_label("name", key.name()))
            .collect()
    }
}

/// The exclusive write handle. Persists first, then publishes.
pub struct ThresholdWriter {
    store: Arc<ThresholdStore>,
    storage: Arc<dyn IMonitorStorage>,
}

impl std::fmt::Debug for ThresholdWriter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ThresholdWriter")
            .field("store", &self.store)
            .finish_non_exhaustive()
    }
}

impl ThresholdWriter {
    pub fn store(&self) -> &Arc<ThresholdStore> {
        &self.store
    }

    /// Set `key` to `proposed`, clamped to its bounds.
    ///
    /// A no-op (including a clamp back onto the current value) is neither
    /// persisted nor published.
    pub fn propose(
        &mut self,
        key: ThresholdKey,
        proposed: f64,
        at: DateTime<Utc>,
    ) -> DriftGuardResult<ThresholdUpdate> {
        let current = self.store.snapshot();
        let previous = current.get(key);
        let bounds = self.store.bounds(key);

        let clamped = !bounds.contains(proposed);
        let applied = round(bounds.clamp(proposed));
        if clamped {
            let err = ThresholdError::OutOfBounds {
                name: key.name().to_string(),
                proposed,
                floor: bounds.floor,
                ceiling: bounds.ceiling,
            };
            tracing::debug!(code = err.error_code(), error = %err, "clamping threshold");
            events::threshold_clamped(key.name(), proposed, applied);
        }

        let update = ThresholdUpdate {
            key,
            previous,
            proposed,
            applied,
            clamped,
        };
        if !update.changed() {
            return Ok(update);
        }

        self.storage.save_threshold(key.name(), applied, at)?;
        let mut next = (*current).clone();
        next.set(key, applied);
        self.store.swap(next);
        Ok(update)
    }

    /// Move `key` by `delta` from its current value.
    pub fn adjust(
        &mut self,
        key: ThresholdKey,
        delta: f64,
        at: DateTime<Utc>,
    ) -> DriftGuardResult<ThresholdUpdate> {
        let proposed = self.store.get(key) + delta;
        self.propose(key, proposed, at)
    }
}

fn round(value: f64) -> f64 {
    (value * PRECISION).round() / PRECISION
}
