//! DriftGuard: the assembled monitoring subsystem.

use std::sync::Arc;
use std::time::Duration;

use serde::Serialize;

use driftguard_alerts::{channels, AlertEvaluator, AlertStats, NotificationDispatcher};
use driftguard_core::config::DriftGuardConfig;
use driftguard_core::errors::{BaselineError, DriftGuardResult};
use driftguard_core::models::{
    AlertEvent, Baseline, DriftEvent, DriftReport, FeedbackRecord, QualityScores,
    ReferenceExample, ThresholdSet,
};
use driftguard_core::traits::IMonitorStorage;
use driftguard_detection::{BaselineStore, DriftDetector, DriftStatus, TimedEmbedder};
use driftguard_feedback::{FeedbackProcessor, FeedbackSummary, SubmitOutcome};
use driftguard_observability::{GaugeReadout, MetricSample};
use driftguard_storage::{StorageEngine, ThresholdStore};

use crate::options::RuntimeOptions;

/// Everything one observed exchange produced.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Observation {
    pub drift: DriftReport,
    /// Alerts emitted (and enqueued for delivery) by this exchange.
    pub alerts: Vec<AlertEvent>,
}

pub struct DriftGuard {
    config: DriftGuardConfig,
    storage: Arc<dyn IMonitorStorage>,
    thresholds: Arc<ThresholdStore>,
    detector: DriftDetector,
    evaluator: AlertEvaluator,
    dispatcher: NotificationDispatcher,
    feedback: FeedbackProcessor,
}

impl DriftGuard {
    /// Build from config alone. Must be called inside a tokio runtime.
    pub fn new(config: DriftGuardConfig) -> DriftGuardResult<Self> {
        Self::with_options(config, RuntimeOptions::default())
    }

    /// Build with some collaborators supplied by the caller.
    /// Must be called inside a tokio runtime.
    pub fn with_options(config: DriftGuardConfig, opts: RuntimeOptions) -> DriftGuardResult<Self> {
        config.validate()?;

        let storage: Arc<dyn IMonitorStorage> = match opts.storage {
            Some(s) => s,
            None => Arc::new(StorageEngine::from_config(&config.storage)?),
        };
        let provider = opts
            .provider
            .unwrap_or_else(|| driftguard_embeddings::default_provider(&config.detection));

        let (thresholds, writer) =
            ThresholdStore::open(Arc::clone(&storage), config.thresholds.clone())?;

        let embedder = TimedEmbedder::new(
            provider,
            Duration::from_millis(config.detection.embed_timeout_ms),
        );
        let store = Arc::new(BaselineStore::open(
            &config.detection,
            embedder,
            Arc::clone(&storage),
        )?);
        let detector = DriftDetector::new(store, Arc::clone(&thresholds), &config.detection);

        let evaluator = AlertEvaluator::new(Arc::clone(&thresholds), &config.alerts);
        let channels = opts
            .channels
            .unwrap_or_else(|| channels::from_config(&config.alerts));
        let dispatcher =
            NotificationDispatcher::spawn(channels, Arc::clone(&storage), &config.alerts);

        let feedback =
            FeedbackProcessor::open(Arc::clone(&storage), writer, config.feedback.clone())?;

        tracing::info!(
            persistent = config.storage.db_path.is_some(),
            baseline = detector.baseline_store().has_baseline(),
            "driftguard ready"
        );

        Ok(Self {
            config,
            storage,
            thresholds,
            detector,
            evaluator,
            dispatcher,
            feedback,
        })
    }

    pub fn config(&self) -> &DriftGuardConfig {
        &self.config
    }

    /// Run the per-request pipeline for one exchange.
    ///
    /// The overall quality score (if any dimension was scored) feeds the
    /// quality-trend check. Alerts are enqueued and never awaited.
    pub async fn observe(&self, input: &str, output: &str, scores: &QualityScores) -> Observation {
        let drift = self
            .detector
            .detect_all(input, output, scores.overall())
            .await;

        let mut alerts = self.evaluator.evaluate_drift(drift.events());
        alerts.extend(self.evaluator.evaluate_scores(scores));
        for alert in &alerts {
            self.dispatcher.dispatch(alert.clone());
        }

        Observation { drift, alerts }
    }

    /// Embed and install a new baseline.
    pub async fn set_baseline(
        &self,
        responses: Vec<String>,
        inputs: Vec<String>,
    ) -> DriftGuardResult<Arc<Baseline>> {
        self.detector.baseline_store().set(responses, inputs).await
    }

    /// The installed baseline, or `NoBaseline`.
    pub fn baseline(&self) -> Result<Arc<Baseline>, BaselineError> {
        self.detector.baseline_store().get()
    }

    /// Clear the baseline, the live sample windows, and the drift history.
    pub async fn reset_baseline(&self) -> DriftGuardResult<()> {
        self.detector.baseline_store().reset().await
    }

    pub fn drift_status(&self) -> DriftStatus {
        self.detector.status()
    }

    pub fn drift_history(&self, limit: usize) -> Vec<DriftEvent> {
        self.detector.history(limit)
    }

    pub fn alert_history(&self, limit: usize) -> Vec<AlertEvent> {
        self.evaluator.history(limit)
    }

    /// Alerts from the durable log, including those from earlier runs.
    pub fn alert_log(&self, limit: usize) -> DriftGuardResult<Vec<AlertEvent>> {
        self.storage.alert_log(limit)
    }

    pub fn alert_stats(&self) -> AlertStats {
        self.evaluator.stats()
    }

    pub fn thresholds(&self) -> Arc<ThresholdSet> {
        self.thresholds.snapshot()
    }

    pub fn submit_feedback(&self, record: FeedbackRecord) -> DriftGuardResult<SubmitOutcome> {
        self.feedback.submit(record)
    }

    pub fn recent_feedback(&self, limit: usize) -> Vec<FeedbackRecord> {
        self.feedback.recent(limit)
    }

    pub fn low_rated_feedback(&self) -> Vec<FeedbackRecord> {
        self.feedback.low_rated()
    }

    pub fn feedback_summary(&self) -> FeedbackSummary {
        self.feedback.summary()
    }

    pub fn export_reference(&self) -> DriftGuardResult<Vec<ReferenceExample>> {
        self.feedback.export_reference()
    }

    /// Wait for every alert enqueued so far to be persisted and delivered.
    pub async fn flush_alerts(&self) {
        self.dispatcher.flush().await;
    }

    /// Drain pending notifications and stop the delivery worker.
    pub async fn shutdown(self) {
        self.dispatcher.shutdown().await;
        tracing::info!("driftguard stopped");
    }
}

impl GaugeReadout for DriftGuard {
    fn readouts(&self) -> Vec<MetricSample> {
        let mut out = self.detector.readouts();
        out.extend(self.thresholds.readouts());
        out.extend(self.evaluator.readouts());
        out.extend(self.dispatcher.readouts());
        out.extend(self.feedback.readouts());
        out
    }
}
