//! AlertEvaluator: quality gates, immediate drift and risk alerts, cool-down dedup.

use std::collections::{BTreeMap, HashMap};
use std::sync::{Arc, Mutex, MutexGuard};

use chrono::{DateTime, Duration, Utc};

use driftguard_core::collections::RingBuffer;
use driftguard_core::config::AlertConfig;
use driftguard_core::constants::{OVERALL_QUALITY_METRIC, RECENT_ALERT_WINDOW};
use driftguard_core::models::{
    AlertEvent, AlertKind, AlertSeverity, DriftEvent, QualityScores, ThresholdKey, ThresholdSet,
};
use driftguard_observability::tracing_setup::events;
use driftguard_observability::{alert_span, GaugeReadout, MetricSample};
use driftguard_storage::ThresholdStore;

use crate::gate::{ConsecutiveGate, GateOutcome};
use crate::stats::{AlertStats, AlertTotals};

struct EvaluatorState {
    gates: BTreeMap<String, ConsecutiveGate>,
    last_emitted: HashMap<(AlertKind, String), DateTime<Utc>>,
    history: RingBuffer<AlertEvent>,
    totals: AlertTotals,
}

pub struct AlertEvaluator {
    state: Mutex<EvaluatorState>,
    thresholds: Arc<ThresholdStore>,
    monitored: Vec<String>,
    consecutive_required: u32,
    cooldown: Duration,
}

impl AlertEvaluator {
    pub fn new(thresholds: Arc<ThresholdStore>, config: &AlertConfig) -> Self {
        let gates = config
            .monitored_metrics
            .iter()
            .map(|m| (m.clone(), ConsecutiveGate::new(config.consecutive_failures)))
            .collect();
        Self {
            state: Mutex::new(EvaluatorState {
                gates,
                last_emitted: HashMap::new(),
                history: RingBuffer::with_capacity(config.history_capacity),
                totals: AlertTotals::default(),
            }),
            thresholds,
            monitored: config.monitored_metrics.clone(),
            consecutive_required: config.consecutive_failures,
            cooldown: Duration::seconds(i64::from(
                u32::try_from(config.cooldown_secs).unwrap_or(u32::MAX),
            )),
        }
    }

    /// Evaluate one response's quality scores at the current time.
    pub fn evaluate_scores(&self, scores: &QualityScores) -> Vec<AlertEvent> {
        self.evaluate_scores_at(scores, Utc::now())
    }

    /// Evaluate one response's quality scores as of `now`.
    ///
    /// Monitored metrics go through the consecutive-failure gate. Toxicity and
    /// hallucination scores above their thresholds alert immediately.
    pub fn evaluate_scores_at(&self, scores: &QualityScores, now: DateTime<Utc>) -> Vec<AlertEvent> {
        let _span = alert_span!("scores").entered();
        let thresholds = self.thresholds.snapshot();
        let mut state = self.lock();
        let mut emitted = Vec::new();

        for metric in &self.monitored {
            let value = if metric == OVERALL_QUALITY_METRIC {
                scores.overall()
            } else {
                scores.get(metric)
            };
            let (Some(value), Some(key)) = (value, ThresholdKey::for_metric(metric)) else {
                continue;
            };
            let threshold = thresholds.get(key);
            let Some(gate) = state.gates.get_mut(metric) else {
                continue;
            };

            match gate.observe(value < threshold) {
                GateOutcome::Fired { count } => {
                    let alert = AlertEvent::new(
                        AlertKind::QualityDegradation,
                        AlertSeverity::for_score(value, threshold),
                        metric.as_str(),
                        value,
                        threshold,
                        format!("{metric} below threshold for {count} consecutive requests"),
                        now,
                    )
                    .with_consecutive_failures(count);
                    if let Some(a) = Self::emit(&mut state, alert, self.cooldown, now) {
                        if let Some(gate) = state.gates.get_mut(metric) {
                            gate.confirm_alert();
                        }
                        emitted.push(a);
                    }
                }
                GateOutcome::Passed { resolved: true } => {
                    tracing::info!(metric = %metric, "quality alert resolved");
                }
                _ => {}
            }
        }

        for (metric, kind, key) in [
            ("toxicity", AlertKind::Toxicity, ThresholdKey::Toxicity),
            ("hallucination", AlertKind::Hallucination, ThresholdKey::Hallucination),
        ] {
            if let Some(a) =
                self.risk_alert(&mut state, &thresholds, scores.get(metric), metric, kind, key, now)
            {
                emitted.push(a);
            }
        }
        emitted
    }

    #[allow(clippy::too_many_arguments)]
    fn risk_alert(
        &self,
        state: &mut EvaluatorState,
        thresholds: &ThresholdSet,
        value: Option<f64>,
        metric: &str,
        kind: AlertKind,
        key: ThresholdKey,
        now: DateTime<Utc>,
    ) -> Option<AlertEvent> {
        let value = value?;
        let threshold = thresholds.get(key);
        if value <= threshold {
            return None;
        }
        let alert = AlertEvent::new(
            kind,
            AlertSeverity::High,
            metric,
            value,
            threshold,
            format!("{metric} score {value:.3} above threshold {threshold:.3}"),
            now,
        );
        Self::emit(state, alert, self.cooldown, now)
    }

    /// Alert on drift verdicts at the current time.
    pub fn evaluate_drift<'a, I>(&self, events: I) -> Vec<AlertEvent>
    where
        I: IntoIterator<Item = &'a DriftEvent>,
    {
        self.evaluate_drift_at(events, Utc::now())
    }

    /// Every detected drift verdict alerts immediately, subject to cool-down.
    pub fn evaluate_drift_at<'a, I>(&self, events: I, now: DateTime<Utc>) -> Vec<AlertEvent>
    where
        I: IntoIterator<Item = &'a DriftEvent>,
    {
        let _span = alert_span!("drift").entered();
        let mut state = self.lock();
        events
            .into_iter()
            .filter(|e| e.detected)
            .filter_map(|e| {
                let alert = AlertEvent::new(
                    AlertKind::from(e.kind),
                    AlertSeverity::for_distance(e.distance, e.threshold),
                    e.kind.metric_name(),
                    e.distance,
                    e.threshold,
                    format!(
                        "{} drift detected: distance {:.3} exceeds threshold {:.3}",
                        e.kind, e.distance, e.threshold
                    ),
                    now,
                );
                Self::emit(&mut state, alert, self.cooldown, now)
            })
            .collect()
    }

    fn emit(
        state: &mut EvaluatorState,
        alert: AlertEvent,
        cooldown: Duration,
        now: DateTime<Utc>,
    ) -> Option<AlertEvent> {
        let key = (alert.kind, alert.metric.clone());
        if let Some(last) = state.last_emitted.get(&key) {
            let elapsed = now - *last;
            if elapsed < cooldown {
                state.totals.suppressed += 1;
                events::alert_suppressed(
                    alert.kind.as_str(),
                    &alert.metric,
                    (cooldown - elapsed).num_seconds(),
                );
                return None;
            }
        }

        state.last_emitted.insert(key, now);
        state.totals.record(&alert);
        state.history.push(alert.clone());
        events::alert_fired(
            alert.kind.as_str(),
            alert.severity.as_str(),
            &alert.metric,
            alert.value,
            alert.threshold,
        );
        Some(alert)
    }

    /// Newest `limit` alerts in chronological order.
    pub fn history(&self, limit: usize) -> Vec<AlertEvent> {
        self.lock().history.tail_vec(limit)
    }

    pub fn consecutive_failures(&self, metric: &str) -> u32 {
        self.lock().gates.get(metric).map_or(0, |g| g.count())
    }

    pub fn consecutive_required(&self) -> u32 {
        self.consecutive_required
    }

    pub fn stats(&self) -> AlertStats {
        let state = self.lock();
        AlertStats {
            total: state.totals.total,
            by_kind: state.totals.by_kind.clone(),
            by_severity: state.totals.by_severity.clone(),
            suppressed: state.totals.suppressed,
            in_history: state.history.len(),
            recent: state.history.len().min(RECENT_ALERT_WINDOW),
            consecutive_failures: state
                .gates
                .iter()
                .map(|(m, g)| (m.clone(), g.count()))
                .collect(),
            metric_states: state
                .gates
                .iter()
                .map(|(m, g)| (m.clone(), g.state()))
                .collect(),
        }
    }

    /// Clear counters, cool-downs, and history.
    pub fn reset(&self) {
        let mut state = self.lock();
        for gate in state.gates.values_mut() {
            gate.reset();
        }
        state.last_emitted.clear();
        state.history.clear();
    }

    fn lock(&self) -> MutexGuard<'_, EvaluatorState> {
        self.state.lock().unwrap_or_else(|e| e.into_inner())
    }
}

impl GaugeReadout for AlertEvaluator {
    fn readouts(&self) -> Vec<MetricSample> {
        let stats = self.stats();
        let mut out = vec![MetricSample::new("alerts_total", stats.total as f64)];
        for severity in AlertSeverity::ALL {
            let n = stats.by_severity.get(&severity).copied().unwrap_or(0);
            out.push(
                MetricSample::new("alerts_total", n as f64)
                    .with_label("severity", severity.as_str()),
            );
        }
        for (metric, count) in &stats.consecutive_failures {
            out.push(
                MetricSample::new("consecutive_failures", f64::from(*count))
                    .with_label("metric", metric.as_str()),
            );
        }
        out.push(MetricSample::new("alerts_suppressed_total", stats.suppressed as f64));
        out
    }
}
