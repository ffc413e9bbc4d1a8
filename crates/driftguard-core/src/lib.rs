//! # driftguard-core
//!
//! Foundation crate for the driftguard monitoring subsystem.
//! Defines all types, traits, errors, config, and constants.
//! Every other crate in the workspace depends on this.

pub mod collections;
pub mod config;
pub mod constants;
pub mod errors;
pub mod models;
pub mod traits;

// Re-export the most commonly used types at the crate root.
pub use collections::RingBuffer;
pub use config::DriftGuardConfig;
pub use errors::{DriftGuardError, DriftGuardResult};
pub use models::{
    AlertEvent, AlertKind, AlertSeverity, Baseline, CheckStatus, DriftEvent, DriftKind,
    DriftReport, FeedbackRecord, QualityScores, ReferenceExample, ThresholdKey, ThresholdSet,
};
