#![allow(dead_code)]

use std::sync::Arc;
use std::time::Duration;

use driftguard_core::config::{DetectionConfig, ThresholdConfig};
use driftguard_core::traits::{IEmbeddingProvider, IMonitorStorage};
use driftguard_detection::{BaselineStore, DriftDetector, TimedEmbedder};
use driftguard_embeddings::TfIdfFallback;
use driftguard_storage::{StorageEngine, ThresholdStore, ThresholdWriter};

pub struct Harness {
    pub storage: Arc<dyn IMonitorStorage>,
    pub store: Arc<BaselineStore>,
    pub thresholds: Arc<ThresholdStore>,
    pub writer: ThresholdWriter,
    pub detector: DriftDetector,
}

pub fn harness() -> Harness {
    harness_with(
        DetectionConfig::default(),
        Arc::new(TfIdfFallback::new(384)),
        Arc::new(StorageEngine::open_in_memory().unwrap()),
    )
}

pub fn harness_with(
    config: DetectionConfig,
    provider: Arc<dyn IEmbeddingProvider>,
    storage: Arc<dyn IMonitorStorage>,
) -> Harness {
    let embedder = TimedEmbedder::new(provider, Duration::from_millis(config.embed_timeout_ms));
    let store = Arc::new(BaselineStore::open(&config, embedder, Arc::clone(&storage)).unwrap());
    let (thresholds, writer) =
        ThresholdStore::open(Arc::clone(&storage), ThresholdConfig::default()).unwrap();
    let detector = DriftDetector::new(Arc::clone(&store), Arc::clone(&thresholds), &config);
    Harness {
        storage,
        store,
        thresholds,
        writer,
        detector,
    }
}

pub fn ml_responses() -> Vec<String> {
    [
        "Artificial intelligence is the simulation of human intelligence by machines, especially computer systems.",
        "Machine learning is a subset of artificial intelligence that lets systems learn from data.",
        "Neural networks are computing systems inspired by the biological neural networks in brains.",
        "Deep learning uses neural networks with many layers to learn representations of data.",
        "Supervised learning trains models on labeled examples to predict outputs for new inputs.",
    ]
    .iter()
    .map(|s| s.to_string())
    .collect()
}

pub fn ml_inputs() -> Vec<String> {
    [
        "What is artificial intelligence?",
        "How does machine learning work?",
        "What are neural networks?",
        "Explain deep learning.",
        "What is supervised learning?",
    ]
    .iter()
    .map(|s| s.to_string())
    .collect()
}
