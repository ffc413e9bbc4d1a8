use serde::{Deserialize, Serialize};

use super::defaults;

/// Feedback processing and threshold adaptation configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FeedbackConfig {
    /// Ratings per feedback type consumed by one adjustment evaluation.
    pub rolling_window: usize,
    /// Average rating below which the mapped threshold is raised.
    pub low_water: f64,
    /// Average rating above which the mapped threshold is lowered.
    pub high_water: f64,
    /// Fixed step applied per evaluation.
    pub adjustment_step: f64,
    /// Feedback records kept in memory (and reloaded at startup).
    pub recent_capacity: usize,
    /// Ratings at or above this are copied into the reference dataset.
    pub reference_min_rating: i32,
    /// Ratings at or below this are returned by the low-rated query.
    pub low_rating_max: i32,
}

impl Default for FeedbackConfig {
    fn default() -> Self {
        Self {
            rolling_window: defaults::DEFAULT_ROLLING_WINDOW,
            low_water: defaults::DEFAULT_LOW_WATER,
            high_water: defaults::DEFAULT_HIGH_WATER,
            adjustment_step: defaults::DEFAULT_ADJUSTMENT_STEP,
            recent_capacity: defaults::DEFAULT_RECENT_FEEDBACK_CAPACITY,
            reference_min_rating: defaults::DEFAULT_REFERENCE_MIN_RATING,
            low_rating_max: defaults::DEFAULT_LOW_RATING_MAX,
        }
    }
}
