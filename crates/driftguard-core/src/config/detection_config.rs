use serde::{Deserialize, Serialize};

use super::defaults;

/// Drift detection configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DetectionConfig {
    /// Capacity of each sample window (responses, inputs, quality scores).
    pub window_capacity: usize,
    /// Number of most recent quality scores in the short moving average.
    pub quality_short_window: usize,
    /// Minimum quality history before quality drift can be detected.
    pub quality_min_history: usize,
    /// Retention cap for the drift event history.
    pub drift_history_capacity: usize,
    /// Upper bound on one embedding call.
    pub embed_timeout_ms: u64,
    /// Minimum texts per side when setting a baseline.
    pub min_baseline_samples: usize,
    /// Output dimension of the fallback embedder.
    pub embedding_dimensions: usize,
    /// Max entries in the embedding cache. Zero disables caching.
    pub embedding_cache_size: u64,
}

impl Default for DetectionConfig {
    fn default() -> Self {
        Self {
            window_capacity: defaults::DEFAULT_WINDOW_CAPACITY,
            quality_short_window: defaults::DEFAULT_QUALITY_SHORT_WINDOW,
            quality_min_history: defaults::DEFAULT_QUALITY_MIN_HISTORY,
            drift_history_capacity: defaults::DEFAULT_DRIFT_HISTORY_CAPACITY,
            embed_timeout_ms: defaults::DEFAULT_EMBED_TIMEOUT_MS,
            min_baseline_samples: defaults::DEFAULT_MIN_BASELINE_SAMPLES,
            embedding_dimensions: defaults::DEFAULT_EMBEDDING_DIMENSIONS,
            embedding_cache_size: defaults::DEFAULT_EMBEDDING_CACHE_SIZE,
        }
    }
}
