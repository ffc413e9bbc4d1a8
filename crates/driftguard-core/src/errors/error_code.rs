//! Stable string codes for every error, used for log correlation.

pub const INSUFFICIENT_SAMPLES: &str = "INSUFFICIENT_SAMPLES";
pub const NO_BASELINE: &str = "NO_BASELINE";
pub const EMBEDDING_UNAVAILABLE: &str = "EMBEDDING_UNAVAILABLE";
pub const INVALID_RATING: &str = "INVALID_RATING";
pub const INVALID_FEEDBACK: &str = "INVALID_FEEDBACK";
pub const THRESHOLD_OUT_OF_BOUNDS: &str = "THRESHOLD_OUT_OF_BOUNDS";
pub const UNKNOWN_THRESHOLD: &str = "UNKNOWN_THRESHOLD";
pub const STORAGE_ERROR: &str = "STORAGE_ERROR";
pub const CONFIG_ERROR: &str = "CONFIG_ERROR";
pub const ALERT_DELIVERY_ERROR: &str = "ALERT_DELIVERY_ERROR";
pub const SERIALIZATION_ERROR: &str = "SERIALIZATION_ERROR";

/// Implemented by every error enum in the workspace.
pub trait DriftGuardErrorCode {
    fn error_code(&self) -> &'static str;
}
