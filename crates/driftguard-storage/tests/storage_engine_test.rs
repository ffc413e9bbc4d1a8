use chrono::{Duration, TimeZone, Utc};

use driftguard_core::models::{
    AlertEvent, AlertKind, AlertSeverity, Baseline, BaselineSample, FeedbackRecord,
    ReferenceExample, ThresholdSet,
};
use driftguard_core::traits::IMonitorStorage;
use driftguard_storage::StorageEngine;

fn sample(text: &str, v: [f32; 3]) -> BaselineSample {
    BaselineSample {
        text: text.to_string(),
        embedding: v.to_vec(),
    }
}

fn baseline(tag: &str) -> Baseline {
    Baseline::new(
        vec![
            sample(&format!("{tag} r0"), [1.0, 0.0, 0.0]),
            sample(&format!("{tag} r1"), [0.0, 1.0, 0.0]),
        ],
        vec![
            sample(&format!("{tag} i0"), [0.0, 0.0, 1.0]),
            sample(&format!("{tag} i1"), [0.5, 0.5, 0.0]),
            sample(&format!("{tag} i2"), [0.1, 0.2, 0.3]),
        ],
        3,
        Utc.with_ymd_and_hms(2026, 1, 2, 3, 4, 5).unwrap(),
    )
}

#[test]
fn thresholds_layer_over_defaults() {
    let engine = StorageEngine::open_in_memory().unwrap();
    let defaults = ThresholdSet::default();
    assert_eq!(engine.load_thresholds(&defaults).unwrap(), defaults);

    engine
        .save_threshold("relevance_threshold", 0.75, Utc::now())
        .unwrap();
    engine
        .save_threshold("relevance_threshold", 0.8, Utc::now())
        .unwrap();
    engine.save_threshold("retired_threshold", 0.5, Utc::now()).unwrap();

    let loaded = engine.load_thresholds(&defaults).unwrap();
    assert_eq!(loaded.relevance_threshold, 0.8);
    assert_eq!(loaded.quality_threshold, defaults.quality_threshold);
}

#[test]
fn baseline_replace_is_whole() {
    let engine = StorageEngine::open_in_memory().unwrap();
    assert!(engine.load_baseline().unwrap().is_none());

    engine.save_baseline(&baseline("first")).unwrap();
    engine.save_baseline(&baseline("second")).unwrap();

    let loaded = engine.load_baseline().unwrap().unwrap();
    assert_eq!(loaded, baseline("second"));
    assert!(loaded.responses.iter().all(|s| s.text.starts_with("second")));

    engine.clear_baseline().unwrap();
    assert!(engine.load_baseline().unwrap().is_none());
}

#[test]
fn feedback_log_is_chronological() {
    let engine = StorageEngine::open_in_memory().unwrap();
    let t0 = Utc::now();
    for i in 0..5 {
        let record = FeedbackRecord::new(format!("s{i}"), "relevance", (i % 5) + 1)
            .with_timestamp(t0 + Duration::seconds(i as i64));
        engine.append_feedback(&record).unwrap();
    }
    assert_eq!(engine.feedback_count().unwrap(), 5);
    let recent = engine.recent_feedback(3).unwrap();
    let ids: Vec<_> = recent.iter().map(|r| r.session_id.as_str()).collect();
    assert_eq!(ids, vec!["s2", "s3", "s4"]);
}

#[test]
fn reference_dataset_dedups_by_session() {
    let engine = StorageEngine::open_in_memory().unwrap();
    let first = FeedbackRecord::new("b", "quality", 4).with_exchange("q", "a1");
    let second = FeedbackRecord::new("b", "quality", 5).with_exchange("q", "a2");
    let other = FeedbackRecord::new("a", "quality", 5);
    for r in [&first, &second, &other] {
        engine.upsert_reference(&ReferenceExample::from(r)).unwrap();
    }
    let dataset = engine.reference_dataset().unwrap();
    assert_eq!(dataset.len(), 2);
    assert_eq!(dataset[0].session_id, "a");
    assert_eq!(dataset[1].output_text.as_deref(), Some("a2"));
    assert_eq!(dataset[1].rating, 5);
}

#[test]
fn alert_log_round_trips_payload() {
    let engine = StorageEngine::open_in_memory().unwrap();
    let alert = AlertEvent::new(
        AlertKind::QualityDegradation,
        AlertSeverity::High,
        "relevance",
        0.3,
        0.7,
        "relevance below threshold for 10 consecutive requests",
        Utc::now(),
    )
    .with_consecutive_failures(10);
    engine.append_alert(&alert).unwrap();
    let log = engine.alert_log(10).unwrap();
    assert_eq!(log, vec![alert]);
}

#[test]
fn file_backed_state_survives_reopen() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("driftguard.db");
    {
        let engine = StorageEngine::open(&path, 5_000).unwrap();
        engine.save_baseline(&baseline("kept")).unwrap();
        engine
            .save_threshold("embedding_distance_threshold", 0.45, Utc::now())
            .unwrap();
    }
    let engine = StorageEngine::open(&path, 5_000).unwrap();
    assert_eq!(engine.load_baseline().unwrap(), Some(baseline("kept")));
    let t = engine.load_thresholds(&ThresholdSet::default()).unwrap();
    assert_eq!(t.embedding_distance_threshold, 0.45);
}
