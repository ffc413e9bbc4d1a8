use serde::{Deserialize, Serialize};

use super::defaults;
use crate::models::{ThresholdBounds, ThresholdClass, ThresholdKey, ThresholdSet};

/// Initial threshold values and the range each class may be adjusted within.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ThresholdConfig {
    /// Values used when nothing is persisted yet.
    pub initial: ThresholdSet,
    pub score_bounds: ThresholdBounds,
    pub distance_bounds: ThresholdBounds,
    pub delta_bounds: ThresholdBounds,
}

impl Default for ThresholdConfig {
    fn default() -> Self {
        Self {
            initial: ThresholdSet::default(),
            score_bounds: ThresholdBounds::new(
                defaults::SCORE_THRESHOLD_FLOOR,
                defaults::SCORE_THRESHOLD_CEILING,
            ),
            distance_bounds: ThresholdBounds::new(
                defaults::DISTANCE_THRESHOLD_FLOOR,
                defaults::DISTANCE_THRESHOLD_CEILING,
            ),
            delta_bounds: ThresholdBounds::new(
                defaults::DELTA_THRESHOLD_FLOOR,
                defaults::DELTA_THRESHOLD_CEILING,
            ),
        }
    }
}

impl ThresholdConfig {
    pub fn bounds_for(&self, key: ThresholdKey) -> ThresholdBounds {
        match key.class() {
            ThresholdClass::Score => self.score_bounds,
            ThresholdClass::Distance => self.distance_bounds,
            ThresholdClass::Delta => self.delta_bounds,
        }
    }
}
