//! Error handling for driftguard.
//! One error enum per subsystem, `thiserror` only.

pub mod alert_error;
pub mod baseline_error;
pub mod config_error;
pub mod embedding_error;
pub mod error_code;
pub mod feedback_error;
pub mod storage_error;
pub mod threshold_error;

pub use alert_error::AlertError;
pub use baseline_error::BaselineError;
pub use config_error::ConfigError;
pub use embedding_error::EmbeddingError;
pub use error_code::DriftGuardErrorCode;
pub use feedback_error::FeedbackError;
pub use storage_error::StorageError;
pub use threshold_error::ThresholdError;

/// Top-level error type. Aggregates subsystem errors via `From` conversions.
#[derive(Debug, thiserror::Error)]
pub enum DriftGuardError {
    #[error("baseline error: {0}")]
    Baseline(#[from] BaselineError),

    #[error("embedding error: {0}")]
    Embedding(#[from] EmbeddingError),

    #[error("feedback error: {0}")]
    Feedback(#[from] FeedbackError),

    #[error("threshold error: {0}")]
    Threshold(#[from] ThresholdError),

    #[error("storage error: {0}")]
    Storage(#[from] StorageError),

    #[error("configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("alert error: {0}")]
    Alert(#[from] AlertError),

    #[error("serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),
}

impl DriftGuardErrorCode for DriftGuardError {
    fn error_code(&self) -> &'static str {
        match self {
            Self::Baseline(e) => e.error_code(),
            Self::Embedding(e) => e.error_code(),
            Self::Feedback(e) => e.error_code(),
            Self::Threshold(e) => e.error_code(),
            Self::Storage(e) => e.error_code(),
            Self::Config(e) => e.error_code(),
            Self::Alert(e) => e.error_code(),
            Self::SerializationError(_) => error_code::SERIALIZATION_ERROR,
        }
    }
}

/// Convenience alias used across the workspace.
pub type DriftGuardResult<T> = Result<T, DriftGuardError>;
