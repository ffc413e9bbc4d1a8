mod common;

use std::sync::Arc;
use std::time::Duration;

use driftguard_core::errors::{BaselineError, DriftGuardError, DriftGuardResult, EmbeddingError};
use driftguard_core::models::CheckStatus;
use driftguard_core::traits::IEmbeddingProvider;
use driftguard_embeddings::TfIdfFallback;
use driftguard_storage::StorageEngine;

use common::{harness, harness_with, ml_inputs, ml_responses};

#[tokio::test]
async fn get_after_set_returns_embedded_inputs() {
    let h = harness();
    h.store.set(ml_responses(), ml_inputs()).await.unwrap();

    let baseline = h.store.get().unwrap();
    let provider = TfIdfFallback::new(384);
    let texts: Vec<_> = baseline.inputs.iter().map(|s| s.text.clone()).collect();
    assert_eq!(texts, ml_inputs());
    for sample in baseline.inputs.iter().chain(&baseline.responses) {
        assert_eq!(sample.embedding, provider.embed(&sample.text).unwrap());
    }
    assert_eq!(baseline.dimensions, 384);
}

#[tokio::test]
async fn too_few_samples_is_rejected() {
    let h = harness();
    let err = h
        .store
        .set(vec!["only one".into()], ml_inputs())
        .await
        .unwrap_err();
    assert!(matches!(
        err,
        DriftGuardError::Baseline(BaselineError::InsufficientSamples {
            provided: 1,
            required: 2,
            ..
        })
    ));
    assert!(matches!(h.store.get(), Err(BaselineError::NoBaseline)));
}

#[tokio::test]
async fn reset_clears_everything_and_is_idempotent() {
    let h = harness();
    h.store.set(ml_responses(), ml_inputs()).await.unwrap();
    h.detector.detect_all("What is AI?", "AI is machines", Some(0.8)).await;
    assert!(h.detector.status().history_len > 0);

    h.store.reset().await.unwrap();
    h.store.reset().await.unwrap();

    let status = h.detector.status();
    assert!(!status.baseline.present);
    assert_eq!(status.history_len, 0);
    assert_eq!(status.sample_counts.responses, 0);
    assert_eq!(status.sample_counts.quality_scores, 0);
    assert!(h.storage.load_baseline().unwrap().is_none());
}

#[tokio::test]
async fn baseline_survives_reopen() {
    let h = harness();
    h.store.set(ml_responses(), ml_inputs()).await.unwrap();
    let again = harness_with(
        Default::default(),
        Arc::new(TfIdfFallback::new(384)),
        Arc::clone(&h.storage),
    );
    assert_eq!(*again.store.get().unwrap(), *h.store.get().unwrap());
}

/// Fails on any text containing "poison" and stalls on "sluggish".
struct Flaky(TfIdfFallback);

impl IEmbeddingProvider for Flaky {
    fn embed(&self, text: &str) -> DriftGuardResult<Vec<f32>> {
        if text.contains("sluggish") {
            std::thread::sleep(Duration::from_millis(300));
        }
        if text.contains("poison") {
            return Err(EmbeddingError::InferenceFailed {
                reason: "poisoned".into(),
            }
            .into());
        }
        self.0.embed(text)
    }
    fn dimensions(&self) -> usize {
        self.0.dimensions()
    }
    fn name(&self) -> &str {
        "flaky"
    }
    fn is_available(&self) -> bool {
        true
    }
}

#[tokio::test]
async fn partial_embedding_failure_keeps_old_baseline() {
    let h = harness_with(
        Default::default(),
        Arc::new(Flaky(TfIdfFallback::new(384))),
        Arc::new(StorageEngine::open_in_memory().unwrap()),
    );
    let original = h.store.set(ml_responses(), ml_inputs()).await.unwrap();

    let mut responses = ml_responses();
    responses.push("poison pill".into());
    let err = h.store.set(responses, ml_inputs()).await.unwrap_err();
    assert!(matches!(err, DriftGuardError::Embedding(_)));

    assert_eq!(*h.store.get().unwrap(), *original);
    assert_eq!(h.storage.load_baseline().unwrap().as_ref(), Some(original.as_ref()));
}

#[tokio::test]
async fn embedding_failure_degrades_check() {
    let h = harness_with(
        Default::default(),
        Arc::new(Flaky(TfIdfFallback::new(384))),
        Arc::new(StorageEngine::open_in_memory().unwrap()),
    );
    h.store.set(ml_responses(), ml_inputs()).await.unwrap();
    let event = h.detector.check_response("poison").await;
    assert!(!event.detected);
    assert_eq!(event.status, CheckStatus::EmbeddingUnavailable);
    assert_eq!(h.detector.status().unavailable_checks, 1);
    assert_eq!(h.detector.status().sample_counts.responses, 0);
}

fn flaky_harness() -> common::Harness {
    harness_with(
        Default::default(),
        Arc::new(Flaky(TfIdfFallback::new(384))),
        Arc::new(StorageEngine::open_in_memory().unwrap()),
    )
}

#[tokio::test]
async fn reset_during_check_discards_its_result() {
    let h = flaky_harness();
    h.store.set(ml_responses(), ml_inputs()).await.unwrap();

    let (event, reset) = tokio::join!(
        h.detector.check_response("a sluggish answer about cooking pasta"),
        async {
            tokio::time::sleep(Duration::from_millis(50)).await;
            h.store.reset().await
        }
    );
    reset.unwrap();

    assert_eq!(event.status, CheckStatus::NoBaseline);
    assert!(!event.detected);
    let status = h.detector.status();
    assert_eq!(status.history_len, 0);
    assert_eq!(status.sample_counts.responses, 0);
    assert!(status.last_distances.is_empty());
}

#[tokio::test]
async fn replacement_during_check_discards_its_result() {
    let h = flaky_harness();
    h.store.set(ml_responses(), ml_inputs()).await.unwrap();

    let (event, replaced) = tokio::join!(
        h.detector.check_data("a sluggish question about pasta"),
        async {
            tokio::time::sleep(Duration::from_millis(50)).await;
            h.store.set(ml_inputs(), ml_responses()).await
        }
    );
    let replaced = replaced.unwrap();

    assert_eq!(event.status, CheckStatus::NoBaseline);
    assert_eq!(*h.store.get().unwrap(), *replaced);
    assert_eq!(h.detector.status().history_len, 0);
    assert_eq!(h.detector.status().sample_counts.inputs, 0);
}

#[tokio::test]
async fn set_embedded_installs_and_persists() {
    let source = harness();
    let original = source.store.set(ml_responses(), ml_inputs()).await.unwrap();

    let h = harness();
    let installed = h.store.set_embedded((*original).clone()).await.unwrap();
    assert_eq!(*installed, *original);
    assert_eq!(h.storage.load_baseline().unwrap().as_ref(), Some(original.as_ref()));
    assert_eq!(
        h.detector.check_data("What is artificial intelligence?").await.status,
        CheckStatus::Checked
    );
}

#[tokio::test]
async fn set_embedded_rejects_ragged_dimensions() {
    let source = harness();
    let mut baseline = (*source.store.set(ml_responses(), ml_inputs()).await.unwrap()).clone();
    baseline.inputs[0].embedding.pop();

    let h = harness();
    let err = h.store.set_embedded(baseline).await.unwrap_err();
    assert!(matches!(
        err,
        DriftGuardError::Embedding(EmbeddingError::DimensionMismatch {
            expected: 384,
            actual: 383
        })
    ));
    assert!(!h.store.has_baseline());
}
