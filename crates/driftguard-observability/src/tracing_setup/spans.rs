//! Span definitions per operation: drift checks, alert evaluation, feedback, baseline.

/// Create a drift check span.
#[macro_export]
macro_rules! drift_span {
    ($kind:expr) => {
        tracing::info_span!("driftguard.drift", drift_type = %$kind)
    };
}

/// Create an alert evaluation span.
#[macro_export]
macro_rules! alert_span {
    ($source:expr) => {
        tracing::info_span!("driftguard.alert", source = %$source)
    };
}

/// Create a feedback span.
#[macro_export]
macro_rules! feedback_span {
    ($feedback_type:expr) => {
        tracing::info_span!("driftguard.feedback", feedback_type = %$feedback_type)
    };
}

/// Create a baseline span.
#[macro_export]
macro_rules! baseline_span {
    ($operation:expr) => {
        tracing::info_span!("driftguard.baseline", operation = %$operation)
    };
}

/// Span names as constants for programmatic use.
pub mod names {
    pub const DRIFT: &str = "driftguard.drift";
    pub const ALERT: &str = "driftguard.alert";
    pub const FEEDBACK: &str = "driftguard.feedback";
    pub const BASELINE: &str = "driftguard.baseline";
}
