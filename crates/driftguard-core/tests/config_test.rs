use std::collections::HashMap;

use driftguard_core::config::DriftGuardConfig;
use driftguard_core::errors::ConfigError;
use driftguard_core::models::ThresholdKey;

#[test]
fn defaults_validate() {
    let config = DriftGuardConfig::default();
    config.validate().unwrap();
    assert_eq!(config.alerts.consecutive_failures, 10);
    assert_eq!(config.alerts.cooldown_secs, 60);
    assert_eq!(config.feedback.rolling_window, 20);
    assert_eq!(config.detection.quality_short_window, 10);
    assert_eq!(config.thresholds.initial.relevance_threshold, 0.7);
    assert_eq!(config.thresholds.initial.embedding_distance_threshold, 0.4);
    assert!(config.storage.db_path.is_none());
}

#[test]
fn partial_toml_keeps_defaults() {
    let config = DriftGuardConfig::from_toml(
        r#"
        [alerts]
        consecutive_failures = 3
        webhook_url = "https://hooks.example.com/x"

        [thresholds.initial]
        relevance_threshold = 0.8
        "#,
    )
    .unwrap();
    assert_eq!(config.alerts.consecutive_failures, 3);
    assert_eq!(config.alerts.cooldown_secs, 60);
    assert_eq!(
        config.alerts.webhook_url.as_deref(),
        Some("https://hooks.example.com/x")
    );
    assert_eq!(config.thresholds.initial.relevance_threshold, 0.8);
    assert_eq!(config.thresholds.initial.quality_threshold, 0.6);
}

#[test]
fn malformed_toml_is_parse_error() {
    let err = DriftGuardConfig::from_toml("[alerts\nconsecutive_failures = ").unwrap_err();
    assert!(matches!(err, ConfigError::ParseError { .. }));
}

#[test]
fn env_overrides_win_over_file() {
    let mut config = DriftGuardConfig::from_toml("[alerts]\nconsecutive_failures = 3\n").unwrap();
    let env: HashMap<&str, &str> = [
        ("DRIFTGUARD_CONSECUTIVE_FAILURES", "5"),
        ("DRIFTGUARD_RELEVANCE_THRESHOLD", "0.75"),
        ("DRIFTGUARD_DB_PATH", "/tmp/dg.db"),
        ("DRIFTGUARD_COOLDOWN_SECS", "not-a-number"),
    ]
    .into_iter()
    .collect();
    config.apply_env_overrides_from(|k| env.get(k).map(|v| v.to_string()));

    assert_eq!(config.alerts.consecutive_failures, 5);
    assert_eq!(config.thresholds.initial.relevance_threshold, 0.75);
    assert_eq!(config.storage.db_path.as_deref(), Some("/tmp/dg.db"));
    assert_eq!(config.alerts.cooldown_secs, 60);
}

#[test]
fn validation_rejects_bad_values() {
    let mut config = DriftGuardConfig::default();
    config.alerts.consecutive_failures = 0;
    assert!(matches!(
        config.validate(),
        Err(ConfigError::ValidationFailed { ref field, .. }) if field == "alerts.consecutive_failures"
    ));

    let mut config = DriftGuardConfig::default();
    config.feedback.low_water = 4.8;
    assert!(config.validate().is_err());

    let mut config = DriftGuardConfig::default();
    config.thresholds.initial.relevance_threshold = 0.99;
    assert!(config.validate().is_err());

    let mut config = DriftGuardConfig::default();
    config.detection.quality_short_window = 500;
    assert!(config.validate().is_err());
}

#[test]
fn bounds_follow_threshold_class() {
    let config = DriftGuardConfig::default();
    let t = &config.thresholds;
    assert_eq!(t.bounds_for(ThresholdKey::Relevance).floor, 0.3);
    assert_eq!(t.bounds_for(ThresholdKey::Relevance).ceiling, 0.95);
    assert_eq!(t.bounds_for(ThresholdKey::ResponseDrift).floor, 0.05);
    assert_eq!(t.bounds_for(ThresholdKey::QualityDriftDelta).ceiling, 0.5);
}

#[test]
fn toml_round_trip() {
    let mut config = DriftGuardConfig::default();
    config.alerts.log_path = Some("alerts.jsonl".to_string());
    let text = config.to_toml().unwrap();
    let back = DriftGuardConfig::from_toml(&text).unwrap();
    assert_eq!(back, config);
}

#[test]
fn load_reads_explicit_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("driftguard.toml");
    std::fs::write(&path, "[feedback]\nadjustment_step = 0.02\n").unwrap();
    let config = DriftGuardConfig::load(Some(&path)).unwrap();
    assert_eq!(config.feedback.adjustment_step, 0.02);
}

#[test]
fn load_missing_explicit_file_fails() {
    let dir = tempfile::tempdir().unwrap();
    let err = DriftGuardConfig::load(Some(&dir.path().join("absent.toml"))).unwrap_err();
    assert!(matches!(err, ConfigError::FileNotFound { .. }));
}
