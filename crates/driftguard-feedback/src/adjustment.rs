//! Damped threshold adjustment from rolling feedback averages.

use std::collections::VecDeque;

use driftguard_core::config::FeedbackConfig;

/// Ratings of one feedback type collected since the last evaluation.
///
/// The window holds at most `size` ratings; once full, each push drops the
/// oldest. It is only emptied by `clear`, after its evaluation was applied.
#[derive(Debug, Clone)]
pub struct RatingWindow {
    ratings: VecDeque<i32>,
    size: usize,
}

impl RatingWindow {
    /// A size of zero is treated as one.
    pub fn new(size: usize) -> Self {
        let size = size.max(1);
        Self {
            ratings: VecDeque::with_capacity(size),
            size,
        }
    }

    /// Add a rating and return the window average once the window is full.
    pub fn push(&mut self, rating: i32) -> Option<f64> {
        if self.ratings.len() == self.size {
            self.ratings.pop_front();
        }
        self.ratings.push_back(rating);
        if self.ratings.len() < self.size {
            return None;
        }
        let sum: i64 = self.ratings.iter().map(|r| i64::from(*r)).sum();
        Some(sum as f64 / self.ratings.len() as f64)
    }

    pub fn clear(&mut self) {
        self.ratings.clear();
    }

    pub fn len(&self) -> usize {
        self.ratings.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ratings.is_empty()
    }
}

/// Maps a window average to a signed threshold step.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AdjustmentRule {
    pub low_water: f64,
    pub high_water: f64,
    pub step: f64,
}

impl AdjustmentRule {
    pub fn from_config(config: &FeedbackConfig) -> Self {
        Self {
            low_water: config.low_water,
            high_water: config.high_water,
            step: config.adjustment_step.abs(),
        }
    }

    /// Poor ratings tighten the threshold; excellent ratings relax it.
    pub fn delta(&self, average: f64) -> Option<f64> {
        if average < self.low_water {
            Some(self.step)
        } else if average > self.high_water {
            Some(-self.step)
        } else {
            None
        }
    }
}
