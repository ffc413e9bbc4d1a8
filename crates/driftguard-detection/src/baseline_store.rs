//! BaselineStore: the reference distribution plus the live state measured against it.
//!
//! The baseline is an `Arc` snapshot behind an `RwLock`; checks clone the
//! `Arc` and never observe a half-replaced baseline. The sample window and
//! drift history live here too because `reset` clears all three together.
//!
//! Every install or reset bumps a generation counter. A check that awaited
//! the embedder commits its result only if the generation it started under
//! is still current, so nothing measured against a discarded baseline lands
//! in the cleared window or history.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex, MutexGuard, RwLock};

use chrono::Utc;
use tokio::sync::Mutex as AsyncMutex;

use driftguard_core::config::DetectionConfig;
use driftguard_core::errors::{BaselineError, DriftGuardResult, EmbeddingError, StorageError};
use driftguard_core::models::{Baseline, BaselineSample, DriftEvent, SampleKind};
use driftguard_core::traits::IMonitorStorage;
use driftguard_observability::baseline_span;
use driftguard_observability::tracing_setup::events;
use tracing::Instrument;

use crate::embedder::TimedEmbedder;
use crate::history::DriftHistory;
use crate::window::SampleWindow;

pub struct BaselineStore {
    baseline: RwLock<Option<Arc<Baseline>>>,
    generation: AtomicU64,
    window: Mutex<SampleWindow>,
    history: Mutex<DriftHistory>,
    /// Serializes replacements end to end (embed, persist, swap).
    replace_lock: AsyncMutex<()>,
    embedder: TimedEmbedder,
    storage: Arc<dyn IMonitorStorage>,
    min_samples: usize,
}

impl BaselineStore {
    /// Build the store and restore a persisted baseline, if any.
    ///
    /// Windows and history always start empty.
    pub fn open(
        config: &DetectionConfig,
        embedder: TimedEmbedder,
        storage: Arc<dyn IMonitorStorage>,
    ) -> DriftGuardResult<Self> {
        let restored = storage.load_baseline()?;
        if let Some(b) = &restored {
            tracing::info!(
                responses = b.responses.len(),
                inputs = b.inputs.len(),
                created_at = %b.created_at,
                "restored persisted baseline"
            );
        }
        Ok(Self {
            baseline: RwLock::new(restored.map(Arc::new)),
            generation: AtomicU64::new(0),
            window: Mutex::new(SampleWindow::new(config.window_capacity)),
            history: Mutex::new(DriftHistory::new(config.drift_history_capacity)),
            replace_lock: AsyncMutex::new(()),
            embedder,
            storage,
            min_samples: config.min_baseline_samples,
        })
    }

    /// Embed and install a new baseline, replacing the old one whole.
    ///
    /// Fails with `InsufficientSamples` before embedding anything if either
    /// side is short. Any embedding or persistence failure leaves the
    /// previous baseline in place.
    pub async fn set(
        &self,
        responses: Vec<String>,
        inputs: Vec<String>,
    ) -> DriftGuardResult<Arc<Baseline>> {
        self.check_count("response", responses.len())?;
        self.check_count("input", inputs.len())?;

        let span = baseline_span!("set");
        async move {
            let _serial = self.replace_lock.lock().await;

            let response_vecs = self.embedder.embed_batch(responses.clone()).await?;
            let input_vecs = self.embedder.embed_batch(inputs.clone()).await?;
            let dimensions = self.embedder.dimensions();

            let baseline = Baseline::new(
                zip_samples(responses, response_vecs),
                zip_samples(inputs, input_vecs),
                dimensions,
                Utc::now(),
            );
            self.install(baseline).await
        }
        .instrument(span)
        .await
    }

    /// Install an already-embedded baseline (e.g. migrated from another store).
    pub async fn set_embedded(&self, baseline: Baseline) -> DriftGuardResult<Arc<Baseline>> {
        self.check_count("response", baseline.responses.len())?;
        self.check_count("input", baseline.inputs.len())?;
        if let Some(bad) = baseline
            .responses
            .iter()
            .chain(&baseline.inputs)
            .find(|s| s.embedding.len() != baseline.dimensions)
        {
            return Err(EmbeddingError::DimensionMismatch {
                expected: baseline.dimensions,
                actual: bad.embedding.len(),
            }
            .into());
        }
        let _serial = self.replace_lock.lock().await;
        self.install(baseline).await
    }

    /// Persist on the blocking pool, then publish. Callers hold `replace_lock`.
    async fn install(&self, baseline: Baseline) -> DriftGuardResult<Arc<Baseline>> {
        let baseline = Arc::new(baseline);
        let storage = Arc::clone(&self.storage);
        let to_save = Arc::clone(&baseline);
        tokio::task::spawn_blocking(move || storage.save_baseline(&to_save))
            .await
            .map_err(|e| StorageError::SqliteError {
                message: format!("baseline write task failed: {e}"),
            })??;
        {
            let mut guard = self.baseline.write().unwrap_or_else(|e| e.into_inner());
            *guard = Some(Arc::clone(&baseline));
            self.generation.fetch_add(1, Ordering::SeqCst);
        }
        events::baseline_replaced(
            baseline.responses.len(),
            baseline.inputs.len(),
            baseline.dimensions,
        );
        Ok(baseline)
    }

    /// The current baseline, or `NoBaseline`.
    pub fn get(&self) -> Result<Arc<Baseline>, BaselineError> {
        self.current().ok_or(BaselineError::NoBaseline)
    }

    pub fn current(&self) -> Option<Arc<Baseline>> {
        self.baseline
            .read()
            .unwrap_or_else(|e| e.into_inner())
            .clone()
    }

    pub fn has_baseline(&self) -> bool {
        self.current().is_some()
    }

    /// The current baseline together with the generation it belongs to.
    pub(crate) fn snapshot(&self) -> (Option<Arc<Baseline>>, u64) {
        let guard = self.baseline.read().unwrap_or_else(|e| e.into_inner());
        (guard.clone(), self.generation.load(Ordering::SeqCst))
    }

    /// Clear the baseline, the sample window, and the drift history.
    /// Idempotent.
    pub async fn reset(&self) -> DriftGuardResult<()> {
        let _serial = self.replace_lock.lock().await;
        let storage = Arc::clone(&self.storage);
        tokio::task::spawn_blocking(move || storage.clear_baseline())
            .await
            .map_err(|e| StorageError::SqliteError {
                message: format!("baseline clear task failed: {e}"),
            })??;
        {
            let mut guard = self.baseline.write().unwrap_or_else(|e| e.into_inner());
            *guard = None;
            self.generation.fetch_add(1, Ordering::SeqCst);
        }
        self.window().clear();
        self.history().clear();
        events::baseline_reset();
        Ok(())
    }

    pub(crate) fn embedder(&self) -> &TimedEmbedder {
        &self.embedder
    }

    pub(crate) fn window(&self) -> MutexGuard<'_, SampleWindow> {
        self.window.lock().unwrap_or_else(|e| e.into_inner())
    }

    pub(crate) fn history(&self) -> MutexGuard<'_, DriftHistory> {
        self.history.lock().unwrap_or_else(|e| e.into_inner())
    }

    pub(crate) fn record(&self, event: DriftEvent) {
        self.history().record(event);
    }

    /// Record `event` (and its embedding) if no install or reset happened
    /// since `generation` was read. Returns whether it was recorded.
    pub(crate) fn commit(
        &self,
        generation: u64,
        event: DriftEvent,
        sample: Option<(SampleKind, Vec<f32>)>,
    ) -> bool {
        let mut window = self.window();
        let mut history = self.history();
        if self.generation.load(Ordering::SeqCst) != generation {
            return false;
        }
        if let Some((kind, embedding)) = sample {
            window.push_embedding(kind, embedding);
        }
        history.record(event);
        true
    }

    fn check_count(&self, kind: &str, provided: usize) -> Result<(), BaselineError> {
        if provided < self.min_samples {
            return Err(BaselineError::InsufficientSamples {
                kind: kind.to_string(),
                provided,
                required: self.min_samples,
            });
        }
        Ok(())
    }
}

fn zip_samples(texts: Vec<String>, embeddings: Vec<Vec<f32>>) -> Vec<BaselineSample> {
    texts
        .into_iter()
        .zip(embeddings)
        .map(|(text, embedding)| BaselineSample { text, embedding })
        .collect()
}
