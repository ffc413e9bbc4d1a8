//! DriftDetector: response, data, and quality-trend drift checks.
//!
//! Response and data drift use the nearest-neighbor cosine distance to the
//! baseline set. Quality drift compares the short moving average of quality
//! scores to the average over the whole window. Missing dependencies degrade
//! to `detected = false` with a status marker instead of failing the request.

use std::sync::Arc;

use chrono::Utc;
use tracing::Instrument;

use driftguard_core::config::DetectionConfig;
use driftguard_core::constants::RECENT_DRIFT_WINDOW;
use driftguard_core::errors::{DriftGuardErrorCode, EmbeddingError};
use driftguard_core::models::{
    CheckStatus, DriftEvent, DriftKind, DriftReport, SampleKind, ThresholdKey,
};
use driftguard_embeddings::nearest_distance;
use driftguard_observability::tracing_setup::events;
use driftguard_observability::{drift_span, GaugeReadout, MetricSample};
use driftguard_storage::ThresholdStore;

use crate::baseline_store::BaselineStore;
use crate::status::{BaselineStatus, DriftStatus, SampleCounts};

pub struct DriftDetector {
    store: Arc<BaselineStore>,
    thresholds: Arc<ThresholdStore>,
    short_window: usize,
    min_history: usize,
}

impl DriftDetector {
    pub fn new(
        store: Arc<BaselineStore>,
        thresholds: Arc<ThresholdStore>,
        config: &DetectionConfig,
    ) -> Self {
        Self {
            store,
            thresholds,
            short_window: config.quality_short_window,
            min_history: config.quality_min_history,
        }
    }

    pub fn baseline_store(&self) -> &Arc<BaselineStore> {
        &self.store
    }

    /// Compare a model response to the baseline responses.
    pub async fn check_response(&self, response_text: &str) -> DriftEvent {
        self.check_embedding(DriftKind::Response, response_text)
            .instrument(drift_span!(DriftKind::Response))
            .await
    }

    /// Compare a user input to the baseline inputs.
    pub async fn check_data(&self, input_text: &str) -> DriftEvent {
        self.check_embedding(DriftKind::Data, input_text)
            .instrument(drift_span!(DriftKind::Data))
            .await
    }

    /// Record a quality score and compare the short average to the long one.
    pub fn check_quality(&self, score: f64) -> DriftEvent {
        let _span = drift_span!(DriftKind::Quality).entered();
        let now = Utc::now();
        let threshold = self.thresholds.get(ThresholdKey::QualityDriftDelta);

        if !score.is_finite() {
            tracing::debug!(score, "ignoring non-finite quality score");
            let len = self.store.window().quality_len();
            return DriftEvent::skipped(
                DriftKind::Quality,
                CheckStatus::InvalidScore,
                threshold,
                len,
                now,
            );
        }

        let (len, averages) = {
            let mut window = self.store.window();
            window.push_quality(score);
            let len = window.quality_len();
            let averages = window
                .short_quality_average(self.short_window)
                .zip(window.long_quality_average());
            (len, averages)
        };

        let event = match averages {
            Some((short, long)) if len >= self.min_history => {
                DriftEvent::checked(DriftKind::Quality, long - short, threshold, len, now)
            }
            _ => DriftEvent::skipped(
                DriftKind::Quality,
                CheckStatus::InsufficientHistory,
                threshold,
                len,
                now,
            ),
        };

        if event.detected {
            events::drift_detected(DriftKind::Quality.as_str(), event.distance, threshold);
        }
        self.store.record(event.clone());
        event
    }

    /// Run every applicable check for one exchange.
    pub async fn detect_all(
        &self,
        input_text: &str,
        response_text: &str,
        quality_score: Option<f64>,
    ) -> DriftReport {
        let (response, data) =
            tokio::join!(self.check_response(response_text), self.check_data(input_text));
        let quality = quality_score.map(|s| self.check_quality(s));
        DriftReport::new(response, data, quality)
    }

    async fn check_embedding(&self, kind: DriftKind, text: &str) -> DriftEvent {
        let (sample_kind, threshold_key) = match kind {
            DriftKind::Data => (SampleKind::Input, ThresholdKey::DataDrift),
            _ => (SampleKind::Response, ThresholdKey::ResponseDrift),
        };
        let threshold = self.thresholds.get(threshold_key);

        let (baseline, generation) = self.store.snapshot();
        let Some(baseline) = baseline else {
            tracing::debug!(drift_type = %kind, "no baseline set, skipping drift check");
            let event =
                DriftEvent::skipped(kind, CheckStatus::NoBaseline, threshold, 0, Utc::now());
            return self.commit(generation, event, None, threshold);
        };
        let references = baseline.samples(sample_kind);

        let embedding = match self.store.embedder().embed(text).await {
            Ok(v) if v.len() == baseline.dimensions => v,
            Ok(v) => {
                let err = EmbeddingError::DimensionMismatch {
                    expected: baseline.dimensions,
                    actual: v.len(),
                };
                return self.unavailable(
                    kind,
                    threshold,
                    references.len(),
                    generation,
                    &err.to_string(),
                );
            }
            Err(e) => {
                tracing::debug!(code = e.error_code(), "embedding failed");
                return self.unavailable(
                    kind,
                    threshold,
                    references.len(),
                    generation,
                    &e.to_string(),
                );
            }
        };

        let Some(distance) =
            nearest_distance(&embedding, references.iter().map(|s| s.embedding.as_slice()))
        else {
            let event =
                DriftEvent::skipped(kind, CheckStatus::NoBaseline, threshold, 0, Utc::now());
            return self.commit(generation, event, None, threshold);
        };

        let event = DriftEvent::checked(kind, distance, threshold, references.len(), Utc::now());
        let event = self.commit(generation, event, Some((sample_kind, embedding)), threshold);
        if event.detected {
            events::drift_detected(kind.as_str(), distance, threshold);
        }
        event
    }

    /// Record `event` unless the baseline was replaced or cleared while the
    /// check ran; a stale result is discarded and reported as `NoBaseline`.
    fn commit(
        &self,
        generation: u64,
        event: DriftEvent,
        sample: Option<(SampleKind, Vec<f32>)>,
        threshold: f64,
    ) -> DriftEvent {
        let kind = event.kind;
        if self.store.commit(generation, event.clone(), sample) {
            return event;
        }
        tracing::debug!(drift_type = %kind, "baseline changed during check, discarding result");
        DriftEvent::skipped(kind, CheckStatus::NoBaseline, threshold, 0, Utc::now())
    }

    fn unavailable(
        &self,
        kind: DriftKind,
        threshold: f64,
        sample_count: usize,
        generation: u64,
        reason: &str,
    ) -> DriftEvent {
        events::drift_check_unavailable(kind.as_str(), reason);
        let event = DriftEvent::skipped(
            kind,
            CheckStatus::EmbeddingUnavailable,
            threshold,
            sample_count,
            Utc::now(),
        );
        self.commit(generation, event, None, threshold)
    }

    /// Newest `limit` drift events in chronological order.
    pub fn history(&self, limit: usize) -> Vec<DriftEvent> {
        self.store.history().recent(limit)
    }

    pub fn status(&self) -> DriftStatus {
        let now = Utc::now();
        let baseline = self.store.current();
        let sample_counts = {
            let w = self.store.window();
            SampleCounts {
                responses: w.embeddings(SampleKind::Response).len(),
                inputs: w.embeddings(SampleKind::Input).len(),
                quality_scores: w.quality_len(),
            }
        };
        let h = self.store.history();

        DriftStatus {
            flags: DriftKind::ALL.iter().map(|k| (*k, h.is_latched(*k))).collect(),
            last_distances: DriftKind::ALL
                .iter()
                .filter_map(|k| {
                    h.last(*k)
                        .filter(|e| e.status == CheckStatus::Checked)
                        .map(|e| (*k, e.distance))
                })
                .collect(),
            detected_total: h.detected_total(),
            recent_detected: h.recent_detected(RECENT_DRIFT_WINDOW),
            history_len: h.len(),
            unavailable_checks: h.unavailable_total(),
            sample_counts,
            baseline: BaselineStatus {
                present: baseline.is_some(),
                response_samples: baseline.as_ref().map_or(0, |b| b.responses.len()),
                input_samples: baseline.as_ref().map_or(0, |b| b.inputs.len()),
                dimensions: baseline.as_ref().map_or(0, |b| b.dimensions),
                created_at: baseline.as_ref().map(|b| b.created_at),
                age_seconds: baseline.as_ref().map(|b| b.age_seconds(now)),
            },
        }
    }
}

impl GaugeReadout for DriftDetector {
    fn readouts(&self) -> Vec<MetricSample> {
        let status = self.status();
        let mut out = Vec::new();
        for kind in DriftKind::ALL {
            let distance = status.last_distances.get(&kind).copied().unwrap_or(0.0);
            let flag = status.flags.get(&kind).copied().unwrap_or(false);
            out.push(MetricSample::new("drift_distance", distance).with_label("type", kind.as_str()));
            out.push(
                MetricSample::new("drift_detected", if flag { 1.0 } else { 0.0 })
                    .with_label("type", kind.as_str()),
            );
        }
        let c = &status.sample_counts;
        for (kind, n) in [
            ("responses", c.responses),
            ("inputs", c.inputs),
            ("quality_scores", c.quality_scores),
        ] {
            out.push(MetricSample::new("sample_window_size", n as f64).with_label("kind", kind));
        }
        out.push(MetricSample::new("drift_events_detected_total", status.detected_total as f64));
        out.push(MetricSample::new(
            "drift_checks_unavailable_total",
            status.unavailable_checks as f64,
        ));
        out.push(MetricSample::new(
            "baseline_present",
            if status.baseline.present { 1.0 } else { 0.0 },
        ));
        if let Some(age) = status.baseline.age_seconds {
            out.push(MetricSample::new("baseline_age_seconds", age));
        }
        out
    }
}
