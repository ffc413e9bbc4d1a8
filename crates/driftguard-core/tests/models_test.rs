use chrono::{Duration, Utc};
use driftguard_core::errors::{
    BaselineError, DriftGuardError, DriftGuardErrorCode, EmbeddingError,
};
use driftguard_core::models::{
    AlertKind, AlertSeverity, Baseline, BaselineSample, CheckStatus, DriftEvent, DriftKind,
    DriftReport,
};

#[test]
fn drift_event_detected_is_strict() {
    let now = Utc::now();
    let at = DriftEvent::checked(DriftKind::Response, 0.4, 0.4, 5, now);
    assert!(!at.detected);
    let over = DriftEvent::checked(DriftKind::Response, 0.41, 0.4, 5, now);
    assert!(over.detected);
}

#[test]
fn skipped_events_never_detect() {
    let e = DriftEvent::skipped(DriftKind::Data, CheckStatus::NoBaseline, 0.3, 0, Utc::now());
    assert!(!e.detected);
    assert_eq!(e.distance, 0.0);
    assert!(e.is_unavailable());
}

#[test]
fn report_any_drift_includes_quality() {
    let now = Utc::now();
    let r = DriftEvent::checked(DriftKind::Response, 0.1, 0.4, 5, now);
    let d = DriftEvent::checked(DriftKind::Data, 0.1, 0.3, 5, now);
    let q = DriftEvent::checked(DriftKind::Quality, 0.2, 0.1, 20, now);
    assert!(!DriftReport::new(r.clone(), d.clone(), None).any_drift_detected);
    let report = DriftReport::new(r, d, Some(q));
    assert!(report.any_drift_detected);
    assert_eq!(report.events().count(), 3);
}

#[test]
fn severity_cut_points() {
    assert_eq!(AlertSeverity::for_distance(0.45, 0.4), AlertSeverity::Low);
    assert_eq!(AlertSeverity::for_distance(0.6, 0.4), AlertSeverity::Medium);
    assert_eq!(AlertSeverity::for_distance(0.9, 0.4), AlertSeverity::High);
    assert_eq!(AlertSeverity::for_score(0.6, 0.7), AlertSeverity::Low);
    assert_eq!(AlertSeverity::for_score(0.5, 0.7), AlertSeverity::Medium);
    assert_eq!(AlertSeverity::for_score(0.3, 0.7), AlertSeverity::High);
    assert_eq!(AlertSeverity::for_score(0.0, 0.7), AlertSeverity::High);
}

#[test]
fn alert_kind_from_drift_kind() {
    assert_eq!(AlertKind::from(DriftKind::Response), AlertKind::ResponseDrift);
    assert_eq!(AlertKind::from(DriftKind::Quality).as_str(), "quality_drift");
}

#[test]
fn baseline_age_is_non_negative() {
    let now = Utc::now();
    let sample = BaselineSample {
        text: "a".into(),
        embedding: vec![1.0, 0.0],
    };
    let b = Baseline::new(vec![sample.clone()], vec![sample], 2, now);
    assert_eq!(b.age_seconds(now - Duration::seconds(5)), 0.0);
    assert!((b.age_seconds(now + Duration::seconds(90)) - 90.0).abs() < 1e-6);
}

#[test]
fn error_codes_propagate_through_top_level() {
    let err: DriftGuardError = BaselineError::NoBaseline.into();
    assert_eq!(err.error_code(), "NO_BASELINE");
    let err: DriftGuardError = EmbeddingError::Timeout { timeout_ms: 10 }.into();
    assert_eq!(err.error_code(), "EMBEDDING_UNAVAILABLE");
}
