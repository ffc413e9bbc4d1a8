use super::error_code::{self, DriftGuardErrorCode};

/// Feedback ingestion errors. Raised before any state is touched.
#[derive(Debug, thiserror::Error)]
pub enum FeedbackError {
    #[error("invalid rating {rating}: must be between {min} and {max}")]
    InvalidRating { rating: i32, min: i32, max: i32 },

    #[error("invalid feedback: {reason}")]
    InvalidRecord { reason: String },
}

impl DriftGuardErrorCode for FeedbackError {
    fn error_code(&self) -> &'static str {
        match self {
            Self::InvalidRating { .. } => error_code::INVALID_RATING,
            Self::InvalidRecord { .. } => error_code::INVALID_FEEDBACK,
        }
    }
}
