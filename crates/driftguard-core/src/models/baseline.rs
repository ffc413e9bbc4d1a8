use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Which side of an exchange a sample came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SampleKind {
    Response,
    Input,
}

impl SampleKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Response => "response",
            Self::Input => "input",
        }
    }

    pub fn from_str_name(s: &str) -> Option<Self> {
        match s {
            "response" => Some(Self::Response),
            "input" => Some(Self::Input),
            _ => None,
        }
    }
}

/// A reference text and its embedding.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BaselineSample {
    pub text: String,
    pub embedding: Vec<f32>,
}

/// The frozen reference distribution drift is measured against.
///
/// Constructed whole and never mutated; replacement swaps the entire value.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Baseline {
    pub responses: Vec<BaselineSample>,
    pub inputs: Vec<BaselineSample>,
    pub dimensions: usize,
    pub created_at: DateTime<Utc>,
}

impl Baseline {
    pub fn new(
        responses: Vec<BaselineSample>,
        inputs: Vec<BaselineSample>,
        dimensions: usize,
        created_at: DateTime<Utc>,
    ) -> Self {
        Self {
            responses,
            inputs,
            dimensions,
            created_at,
        }
    }

    pub fn samples(&self, kind: SampleKind) -> &[BaselineSample] {
        match kind {
            SampleKind::Response => &self.responses,
            SampleKind::Input => &self.inputs,
        }
    }

    pub fn response_embeddings(&self) -> impl Iterator<Item = &[f32]> {
        self.responses.iter().map(|s| s.embedding.as_slice())
    }

    pub fn input_embeddings(&self) -> impl Iterator<Item = &[f32]> {
        self.inputs.iter().map(|s| s.embedding.as_slice())
    }

    /// Seconds since the baseline was created, never negative.
    pub fn age_seconds(&self, now: DateTime<Utc>) -> f64 {
        let millis = (now - self.created_at).num_milliseconds().max(0);
        millis as f64 / 1000.0
    }
}
