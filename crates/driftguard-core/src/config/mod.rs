//! Configuration for driftguard.
//! TOML-based, layered resolution: env > file > defaults.

pub mod alert_config;
pub mod defaults;
pub mod detection_config;
pub mod driftguard_config;
pub mod feedback_config;
pub mod observability_config;
pub mod storage_config;
pub mod threshold_config;

pub use alert_config::AlertConfig;
pub use detection_config::DetectionConfig;
pub use driftguard_config::DriftGuardConfig;
pub use feedback_config::FeedbackConfig;
pub use observability_config::ObservabilityConfig;
pub use storage_config::StorageConfig;
pub use threshold_config::ThresholdConfig;
