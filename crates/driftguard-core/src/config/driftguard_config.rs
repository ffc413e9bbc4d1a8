//! Top-level driftguard configuration with layered resolution.

use std::path::Path;

use serde::{Deserialize, Serialize};

use super::{
    defaults, AlertConfig, DetectionConfig, FeedbackConfig, ObservabilityConfig, StorageConfig,
    ThresholdConfig,
};
use crate::errors::ConfigError;
use crate::models::ThresholdKey;

/// Top-level configuration aggregating all sub-configs.
///
/// Resolution order (highest priority first):
/// 1. Environment variables (`DRIFTGUARD_*`)
/// 2. Config file (explicit path, or `driftguard.toml` in the working directory)
/// 3. Compiled defaults
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct DriftGuardConfig {
    pub detection: DetectionConfig,
    pub alerts: AlertConfig,
    pub feedback: FeedbackConfig,
    pub thresholds: ThresholdConfig,
    pub storage: StorageConfig,
    pub observability: ObservabilityConfig,
}

impl DriftGuardConfig {
    /// Load with layered resolution.
    ///
    /// An explicit `path` must exist. Without one, `driftguard.toml` in the
    /// working directory is used when present.
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        let mut config = match path {
            Some(p) => Self::from_file(p)?,
            None => {
                let default_path = Path::new(defaults::DEFAULT_CONFIG_FILENAME);
                if default_path.exists() {
                    Self::from_file(default_path)?
                } else {
                    Self::default()
                }
            }
        };

        config.apply_env_overrides_from(|key| std::env::var(key).ok());
        config.validate()?;
        Ok(config)
    }

    /// Parse a config file. Missing keys take their defaults.
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|_| ConfigError::FileNotFound {
            path: path.display().to_string(),
        })?;
        toml::from_str(&content).map_err(|e| ConfigError::ParseError {
            path: path.display().to_string(),
            message: e.to_string(),
        })
    }

    /// Load configuration from a TOML string (for testing).
    pub fn from_toml(toml_str: &str) -> Result<Self, ConfigError> {
        toml::from_str(toml_str).map_err(|e| ConfigError::ParseError {
            path: "<string>".to_string(),
            message: e.to_string(),
        })
    }

    /// Apply `DRIFTGUARD_*` overrides read through `lookup`.
    /// Unparseable values are ignored.
    pub fn apply_env_overrides_from<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(v) = lookup("DRIFTGUARD_DB_PATH") {
            self.storage.db_path = Some(v);
        }
        if let Some(v) = lookup("DRIFTGUARD_WEBHOOK_URL") {
            self.alerts.webhook_url = Some(v);
        }
        if let Some(v) = lookup("DRIFTGUARD_ALERT_LOG") {
            self.alerts.log_path = Some(v);
        }
        if let Some(v) = lookup("DRIFTGUARD_CONSECUTIVE_FAILURES").and_then(|v| v.parse().ok()) {
            self.alerts.consecutive_failures = v;
        }
        if let Some(v) = lookup("DRIFTGUARD_COOLDOWN_SECS").and_then(|v| v.parse().ok()) {
            self.alerts.cooldown_secs = v;
        }
        if let Some(v) = lookup("DRIFTGUARD_RELEVANCE_THRESHOLD").and_then(|v| v.parse().ok()) {
            self.thresholds.initial.relevance_threshold = v;
        }
        if let Some(v) = lookup("DRIFTGUARD_QUALITY_THRESHOLD").and_then(|v| v.parse().ok()) {
            self.thresholds.initial.quality_threshold = v;
        }
        if let Some(v) = lookup("DRIFTGUARD_DRIFT_THRESHOLD").and_then(|v| v.parse().ok()) {
            self.thresholds.initial.drift_threshold = v;
        }
        if let Some(v) = lookup("DRIFTGUARD_LOG_LEVEL") {
            self.observability.log_level = v;
        }
    }

    /// Validate the resolved configuration.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let d = &self.detection;
        if d.window_capacity == 0 {
            return Err(invalid("detection.window_capacity", "must be greater than 0"));
        }
        if d.quality_short_window == 0 || d.quality_short_window > d.window_capacity {
            return Err(invalid(
                "detection.quality_short_window",
                "must be between 1 and detection.window_capacity",
            ));
        }
        if d.quality_min_history == 0 {
            return Err(invalid("detection.quality_min_history", "must be greater than 0"));
        }
        if d.min_baseline_samples == 0 {
            return Err(invalid("detection.min_baseline_samples", "must be greater than 0"));
        }
        if d.embedding_dimensions == 0 {
            return Err(invalid("detection.embedding_dimensions", "must be greater than 0"));
        }
        if d.embed_timeout_ms == 0 {
            return Err(invalid("detection.embed_timeout_ms", "must be greater than 0"));
        }

        let a = &self.alerts;
        if a.consecutive_failures == 0 {
            return Err(invalid("alerts.consecutive_failures", "must be greater than 0"));
        }
        if a.queue_capacity == 0 {
            return Err(invalid("alerts.queue_capacity", "must be greater than 0"));
        }

        let f = &self.feedback;
        if f.rolling_window == 0 {
            return Err(invalid("feedback.rolling_window", "must be greater than 0"));
        }
        if !(f.adjustment_step > 0.0 && f.adjustment_step < 1.0) {
            return Err(invalid("feedback.adjustment_step", "must be in (0.0, 1.0)"));
        }
        if f.low_water >= f.high_water {
            return Err(invalid("feedback.low_water", "must be below feedback.high_water"));
        }

        let t = &self.thresholds;
        for (field, bounds) in [
            ("thresholds.score_bounds", t.score_bounds),
            ("thresholds.distance_bounds", t.distance_bounds),
            ("thresholds.delta_bounds", t.delta_bounds),
        ] {
            if !bounds.is_valid() {
                return Err(invalid(field, "floor must be finite and not above ceiling"));
            }
        }
        for (key, value) in t.initial.iter() {
            if !value.is_finite() || value <= 0.0 {
                return Err(ConfigError::ValidationFailed {
                    field: format!("thresholds.initial.{}", key.name()),
                    message: "must be a positive number".to_string(),
                });
            }
            if is_adjustable(key) && !t.bounds_for(key).contains(value) {
                let b = t.bounds_for(key);
                return Err(ConfigError::ValidationFailed {
                    field: format!("thresholds.initial.{}", key.name()),
                    message: format!("must be within [{}, {}]", b.floor, b.ceiling),
                });
            }
        }
        Ok(())
    }

    /// Serialize the config back to TOML.
    pub fn to_toml(&self) -> Result<String, ConfigError> {
        toml::to_string_pretty(self).map_err(|e| ConfigError::ParseError {
            path: "<serialization>".to_string(),
            message: e.to_string(),
        })
    }
}

/// Thresholds that feedback may move; only these must start inside their bounds.
fn is_adjustable(key: ThresholdKey) -> bool {
    !matches!(key, ThresholdKey::Toxicity | ThresholdKey::Hallucination)
}

fn invalid(field: &str, message: &str) -> ConfigError {
    ConfigError::ValidationFailed {
        field: field.to_string(),
        message: message.to_string(),
    }
}
