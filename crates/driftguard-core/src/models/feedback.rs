use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::constants::{MAX_RATING, MIN_RATING};
use crate::errors::FeedbackError;

/// One piece of human feedback on a chat exchange.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FeedbackRecord {
    pub session_id: String,
    /// Free-form category, e.g. "relevance", "coherence", "quality".
    pub feedback_type: String,
    /// 1..=5.
    pub rating: i32,
    pub comment: Option<String>,
    pub input_text: Option<String>,
    pub output_text: Option<String>,
    pub timestamp: DateTime<Utc>,
}

impl FeedbackRecord {
    pub fn new(session_id: impl Into<String>, feedback_type: impl Into<String>, rating: i32) -> Self {
        Self {
            session_id: session_id.into(),
            feedback_type: feedback_type.into(),
            rating,
            comment: None,
            input_text: None,
            output_text: None,
            timestamp: Utc::now(),
        }
    }

    pub fn with_comment(mut self, comment: impl Into<String>) -> Self {
        self.comment = Some(comment.into());
        self
    }

    pub fn with_exchange(mut self, input: impl Into<String>, output: impl Into<String>) -> Self {
        self.input_text = Some(input.into());
        self.output_text = Some(output.into());
        self
    }

    pub fn with_timestamp(mut self, timestamp: DateTime<Utc>) -> Self {
        self.timestamp = timestamp;
        self
    }

    /// Boundary validation. Nothing invalid is ever stored.
    pub fn validate(&self) -> Result<(), FeedbackError> {
        if !(MIN_RATING..=MAX_RATING).contains(&self.rating) {
            return Err(FeedbackError::InvalidRating {
                rating: self.rating,
                min: MIN_RATING,
                max: MAX_RATING,
            });
        }
        if self.session_id.trim().is_empty() {
            return Err(FeedbackError::InvalidRecord {
                reason: "session_id must not be empty".to_string(),
            });
        }
        if self.feedback_type.trim().is_empty() {
            return Err(FeedbackError::InvalidRecord {
                reason: "feedback_type must not be empty".to_string(),
            });
        }
        Ok(())
    }
}

/// A highly rated exchange kept for offline fine-tuning.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReferenceExample {
    pub session_id: String,
    pub input_text: Option<String>,
    pub output_text: Option<String>,
    pub rating: i32,
    pub feedback_type: String,
    pub recorded_at: DateTime<Utc>,
}

impl From<&FeedbackRecord> for ReferenceExample {
    fn from(record: &FeedbackRecord) -> Self {
        Self {
            session_id: record.session_id.clone(),
            input_text: record.input_text.clone(),
            output_text: record.output_text.clone(),
            rating: record.rating,
            feedback_type: record.feedback_type.clone(),
            recorded_at: record.timestamp,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejects_out_of_range_ratings() {
        for rating in [0, 6, -1, 100] {
            let err = FeedbackRecord::new("s", "relevance", rating)
                .validate()
                .unwrap_err();
            assert!(matches!(err, FeedbackError::InvalidRating { .. }));
        }
    }

    #[test]
    fn accepts_full_rating_range() {
        for rating in 1..=5 {
            assert!(FeedbackRecord::new("s", "relevance", rating).validate().is_ok());
        }
    }

    #[test]
    fn rejects_blank_session() {
        let err = FeedbackRecord::new("  ", "relevance", 3).validate().unwrap_err();
        assert!(matches!(err, FeedbackError::InvalidRecord { .. }));
    }
}
