use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::constants::RISK_DIMENSIONS;

/// Per-dimension scores for one response, as supplied by the scoring collaborator.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct QualityScores {
    scores: BTreeMap<String, f64>,
}

impl QualityScores {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, dimension: impl Into<String>, score: f64) -> Self {
        self.insert(dimension, score);
        self
    }

    /// Non-finite scores are ignored.
    pub fn insert(&mut self, dimension: impl Into<String>, score: f64) {
        if score.is_finite() {
            self.scores.insert(dimension.into(), score);
        }
    }

    pub fn get(&self, dimension: &str) -> Option<f64> {
        self.scores.get(dimension).copied()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, f64)> {
        self.scores.iter().map(|(k, v)| (k.as_str(), *v))
    }

    pub fn is_empty(&self) -> bool {
        self.scores.is_empty()
    }

    pub fn len(&self) -> usize {
        self.scores.len()
    }

    /// Mean of all quality dimensions, excluding risk signals.
    pub fn overall(&self) -> Option<f64> {
        let values: Vec<f64> = self
            .scores
            .iter()
            .filter(|(k, _)| !RISK_DIMENSIONS.contains(&k.as_str()))
            .map(|(_, v)| *v)
            .collect();
        if values.is_empty() {
            None
        } else {
            Some(values.iter().sum::<f64>() / values.len() as f64)
        }
    }
}

impl<K: Into<String>> FromIterator<(K, f64)> for QualityScores {
    fn from_iter<I: IntoIterator<Item = (K, f64)>>(iter: I) -> Self {
        let mut scores = Self::new();
        for (k, v) in iter {
            scores.insert(k, v);
        }
        scores
    }
}
