use super::error_code::{self, DriftGuardErrorCode};

/// Embedding collaborator errors. Every variant means "embedding unavailable".
#[derive(Debug, thiserror::Error)]
pub enum EmbeddingError {
    #[error("embedding timed out after {timeout_ms}ms")]
    Timeout { timeout_ms: u64 },

    #[error("inference failed: {reason}")]
    InferenceFailed { reason: String },

    #[error("dimension mismatch: expected {expected}, got {actual}")]
    DimensionMismatch { expected: usize, actual: usize },

    #[error("provider unavailable: {provider}")]
    ProviderUnavailable { provider: String },
}

impl DriftGuardErrorCode for EmbeddingError {
    fn error_code(&self) -> &'static str {
        error_code::EMBEDDING_UNAVAILABLE
    }
}
