mod common;

use chrono::Utc;
use proptest::prelude::*;

use driftguard_core::models::{CheckStatus, DriftKind, ThresholdKey};
use driftguard_observability::readout::find_sample;
use driftguard_observability::GaugeReadout;

use common::{harness, ml_inputs, ml_responses};

#[tokio::test]
async fn on_topic_response_is_close_and_off_topic_is_far() {
    let h = harness();
    h.store.set(ml_responses(), ml_inputs()).await.unwrap();

    let ai = h
        .detector
        .check_response(
            "Artificial intelligence is the simulation of human intelligence by computer systems and machines that can learn.",
        )
        .await;
    let pasta = h
        .detector
        .check_response(
            "Boil salted water, cook the spaghetti until al dente, then toss it with tomato sauce and fresh basil.",
        )
        .await;

    assert_eq!(ai.status, CheckStatus::Checked);
    assert!(ai.distance < ai.threshold, "ai distance {}", ai.distance);
    assert!(!ai.detected);
    assert!(pasta.distance > ai.distance);
    assert!(pasta.detected);
}

#[tokio::test]
async fn data_drift_uses_input_baseline() {
    let h = harness();
    h.store.set(ml_responses(), ml_inputs()).await.unwrap();

    let same = h.detector.check_data("What is artificial intelligence?").await;
    assert!(same.distance < 1e-6);
    assert!(!same.detected);

    let shifted = h.detector.check_data("tell me about cooking pasta").await;
    assert!(shifted.detected);
    assert_eq!(shifted.kind, DriftKind::Data);
    assert_eq!(shifted.threshold, 0.3);
}

#[tokio::test]
async fn no_baseline_short_circuits() {
    let h = harness();
    let event = h.detector.check_response("anything").await;
    assert!(!event.detected);
    assert_eq!(event.distance, 0.0);
    assert_eq!(event.status, CheckStatus::NoBaseline);
    assert_eq!(h.detector.history(10).len(), 1);
}

#[tokio::test]
async fn thresholds_are_read_per_check() {
    let mut h = harness();
    h.store.set(ml_responses(), ml_inputs()).await.unwrap();
    let text = "Neural networks learn layered representations from data in brains.";
    let before = h.detector.check_response(text).await;

    h.writer
        .propose(ThresholdKey::ResponseDrift, 0.05, Utc::now())
        .unwrap();
    let after = h.detector.check_response(text).await;
    assert_eq!(after.threshold, 0.05);
    assert!((after.distance - before.distance).abs() < 1e-12);
}

#[test]
fn quality_drift_needs_min_history() {
    let h = harness();
    for _ in 0..9 {
        let e = h.detector.check_quality(0.0);
        assert_eq!(e.status, CheckStatus::InsufficientHistory);
        assert!(!e.detected);
    }
}

#[test]
fn non_finite_quality_score_is_reported_and_not_recorded() {
    let h = harness();
    h.detector.check_quality(0.8);
    for score in [f64::NAN, f64::INFINITY, f64::NEG_INFINITY] {
        let e = h.detector.check_quality(score);
        assert_eq!(e.status, CheckStatus::InvalidScore);
        assert!(!e.detected);
        assert_eq!(e.sample_count, 1);
    }
    assert_eq!(h.detector.status().sample_counts.quality_scores, 1);
}

#[test]
fn quality_drift_fires_on_recent_decline() {
    let h = harness();
    for _ in 0..40 {
        assert!(!h.detector.check_quality(0.9).detected);
    }
    let mut last = None;
    for _ in 0..10 {
        last = Some(h.detector.check_quality(0.4));
    }
    let last = last.unwrap();
    // long = (40*0.9 + 10*0.4)/50 = 0.8, short = 0.4
    assert!((last.distance - 0.4).abs() < 1e-9);
    assert!(last.detected);
    assert!(h.detector.status().flags[&DriftKind::Quality]);
}

#[tokio::test]
async fn detect_all_reports_any_drift() {
    let h = harness();
    h.store.set(ml_responses(), ml_inputs()).await.unwrap();
    let report = h
        .detector
        .detect_all("What is artificial intelligence?", &ml_responses()[0], None)
        .await;
    assert!(!report.any_drift_detected);
    assert!(report.quality.is_none());

    let report = h
        .detector
        .detect_all("best pizza dough recipe", "Knead flour, yeast and water overnight.", Some(0.9))
        .await;
    assert!(report.any_drift_detected);
    assert!(report.quality.is_some());
}

#[tokio::test]
async fn status_and_readouts_track_state() {
    let h = harness();
    h.store.set(ml_responses(), ml_inputs()).await.unwrap();
    h.detector
        .detect_all("tell me about cooking pasta", "Pasta cooks in boiling salted water.", Some(0.7))
        .await;

    let status = h.detector.status();
    assert!(status.baseline.present);
    assert_eq!(status.baseline.response_samples, 5);
    assert_eq!(status.sample_counts.responses, 1);
    assert_eq!(status.sample_counts.inputs, 1);
    assert_eq!(status.sample_counts.quality_scores, 1);
    assert!(status.flags[&DriftKind::Data]);
    assert!(status.detected_total >= 1);
    assert_eq!(status.history_len, 3);

    let samples = h.detector.readouts();
    let flag = find_sample(&samples, "drift_detected", Some(("type", "data"))).unwrap();
    assert_eq!(flag.value, 1.0);
    assert!(find_sample(&samples, "baseline_age_seconds", None).is_some());
    let json = serde_json::to_string(&status).unwrap();
    assert!(json.contains("\"data\":true"));
}

proptest! {
    #[test]
    fn quality_never_detected_below_min_history(scores in prop::collection::vec(0.0f64..1.0, 0..10)) {
        let h = harness();
        for s in scores {
            prop_assert!(!h.detector.check_quality(s).detected);
        }
    }

    #[test]
    fn quality_distance_is_long_minus_short(scores in prop::collection::vec(0.0f64..1.0, 10..60)) {
        let h = harness();
        let mut event = None;
        for s in &scores {
            event = Some(h.detector.check_quality(*s));
        }
        let event = event.unwrap();
        let tail = &scores[scores.len() - 10..];
        let short: f64 = tail.iter().sum::<f64>() / 10.0;
        let long: f64 = scores.iter().sum::<f64>() / scores.len() as f64;
        prop_assert!((event.distance - (long - short)).abs() < 1e-9);
        prop_assert_eq!(event.detected, long - short > 0.1);
    }
}
