use super::error_code::{self, DriftGuardErrorCode};

/// Threshold store errors.
#[derive(Debug, thiserror::Error)]
pub enum ThresholdError {
    #[error("{name} = {proposed} is outside [{floor}, {ceiling}]")]
    OutOfBounds {
        name: String,
        proposed: f64,
        floor: f64,
        ceiling: f64,
    },

    #[error("unknown threshold: {name}")]
    UnknownThreshold { name: String },
}

impl DriftGuardErrorCode for ThresholdError {
    fn error_code(&self) -> &'static str {
        match self {
            Self::OutOfBounds { .. } => error_code::THRESHOLD_OUT_OF_BOUNDS,
            Self::UnknownThreshold { .. } => error_code::UNKNOWN_THRESHOLD,
        }
    }
}
