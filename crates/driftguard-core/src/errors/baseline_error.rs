use super::error_code::{self, DriftGuardErrorCode};

/// Baseline lifecycle errors.
#[derive(Debug, thiserror::Error)]
pub enum BaselineError {
    #[error("insufficient {kind} samples: got {provided}, need at least {required}")]
    InsufficientSamples {
        kind: String,
        provided: usize,
        required: usize,
    },

    #[error("no baseline has been set")]
    NoBaseline,
}

impl DriftGuardErrorCode for BaselineError {
    fn error_code(&self) -> &'static str {
        match self {
            Self::InsufficientSamples { .. } => error_code::INSUFFICIENT_SAMPLES,
            Self::NoBaseline => error_code::NO_BASELINE,
        }
    }
}
