//! FeedbackProcessor: validate, log, curate, adapt.

use std::collections::{BTreeMap, HashMap, HashSet};
use std::sync::{Arc, Mutex, MutexGuard};

use driftguard_core::collections::RingBuffer;
use driftguard_core::config::FeedbackConfig;
use driftguard_core::constants::{MAX_RATING, MIN_RATING};
use driftguard_core::errors::{DriftGuardErrorCode, DriftGuardResult};
use driftguard_core::models::{FeedbackRecord, ReferenceExample, ThresholdKey};
use driftguard_core::traits::IMonitorStorage;
use driftguard_observability::tracing_setup::events;
use driftguard_observability::{feedback_span, GaugeReadout, MetricSample};
use driftguard_storage::{ThresholdUpdate, ThresholdWriter};

use crate::adjustment::{AdjustmentRule, RatingWindow};
use crate::summary::{FeedbackSummary, TypeSummary};

/// What one accepted submission changed.
#[derive(Debug, Clone, PartialEq)]
pub struct SubmitOutcome {
    /// The record was newly added to the reference dataset (not a re-rating).
    pub reference_added: bool,
    /// Average of the window that triggered an evaluation, if one completed.
    pub window_average: Option<f64>,
    /// Threshold change applied by that evaluation, if any.
    pub adjustment: Option<ThresholdUpdate>,
}

struct ProcessorState {
    writer: ThresholdWriter,
    windows: HashMap<ThresholdKey, RatingWindow>,
    recent: RingBuffer<FeedbackRecord>,
    reference_ids: HashSet<String>,
    total: u64,
}

pub struct FeedbackProcessor {
    state: Mutex<ProcessorState>,
    storage: Arc<dyn IMonitorStorage>,
    rule: AdjustmentRule,
    config: FeedbackConfig,
}

impl FeedbackProcessor {
    /// Take ownership of the threshold writer and reload retained feedback
    /// and the reference index from storage.
    ///
    /// Rating windows start empty; evidence collected before a restart does
    /// not count towards the next evaluation.
    pub fn open(
        storage: Arc<dyn IMonitorStorage>,
        writer: ThresholdWriter,
        config: FeedbackConfig,
    ) -> DriftGuardResult<Self> {
        let mut recent = RingBuffer::with_capacity(config.recent_capacity);
        for record in storage.recent_feedback(config.recent_capacity)? {
            recent.push(record);
        }
        let reference_ids = storage
            .reference_dataset()?
            .into_iter()
            .map(|r| r.session_id)
            .collect();
        let total = storage.feedback_count()?;

        tracing::debug!(
            retained = recent.len(),
            total,
            "feedback processor loaded"
        );

        Ok(Self {
            state: Mutex::new(ProcessorState {
                writer,
                windows: HashMap::new(),
                recent,
                reference_ids,
                total,
            }),
            storage,
            rule: AdjustmentRule::from_config(&config),
            config,
        })
    }

    /// Record one piece of feedback.
    ///
    /// Invalid records are rejected before anything is written, and a failed
    /// log append leaves every piece of state untouched. Once the record is in
    /// the log the submission succeeds: a failed reference upsert or
    /// threshold write is logged, and the rating window keeps its evidence so
    /// the next rating of that type retries the evaluation.
    pub fn submit(&self, record: FeedbackRecord) -> DriftGuardResult<SubmitOutcome> {
        let _span = feedback_span!(record.feedback_type).entered();
        if let Err(e) = record.validate() {
            tracing::debug!(code = e.error_code(), error = %e, "feedback rejected");
            return Err(e.into());
        }

        let mut guard = self.lock();
        let state = &mut *guard;
        self.storage.append_feedback(&record)?;
        state.total += 1;
        state.recent.push(record.clone());
        events::feedback_recorded(&record.session_id, &record.feedback_type, record.rating);

        let mut reference_added = false;
        if record.rating >= self.config.reference_min_rating {
            match self.storage.upsert_reference(&ReferenceExample::from(&record)) {
                Ok(()) => reference_added = state.reference_ids.insert(record.session_id.clone()),
                Err(e) => events::persistence_failed("reference_example", &e.to_string()),
            }
        }

        let mut window_average = None;
        let mut adjustment = None;
        if let Some(key) = ThresholdKey::for_feedback_type(&record.feedback_type) {
            let window_size = self.config.rolling_window;
            let window = state
                .windows
                .entry(key)
                .or_insert_with(|| RatingWindow::new(window_size));
            window_average = window.push(record.rating);

            if let Some(avg) = window_average {
                match self.rule.delta(avg) {
                    None => window.clear(),
                    Some(delta) => match state.writer.adjust(key, delta, record.timestamp) {
                        Ok(update) => {
                            window.clear();
                            if update.changed() {
                                events::threshold_adjusted(
                                    key.name(),
                                    update.previous,
                                    update.applied,
                                    avg,
                                );
                            }
                            adjustment = Some(update);
                        }
                        Err(e) => events::persistence_failed("threshold", &e.to_string()),
                    },
                }
            }
        }

        Ok(SubmitOutcome {
            reference_added,
            window_average,
            adjustment,
        })
    }

    /// Newest `limit` records in chronological order.
    pub fn recent(&self, limit: usize) -> Vec<FeedbackRecord> {
        self.lock().recent.tail_vec(limit)
    }

    /// Retained records rated at or below the configured low-rating mark.
    pub fn low_rated(&self) -> Vec<FeedbackRecord> {
        let max = self.config.low_rating_max;
        self.lock()
            .recent
            .iter()
            .filter(|r| r.rating <= max)
            .cloned()
            .collect()
    }

    /// The reference dataset, ordered by session id.
    pub fn export_reference(&self) -> DriftGuardResult<Vec<ReferenceExample>> {
        self.storage.reference_dataset()
    }

    pub fn summary(&self) -> FeedbackSummary {
        let state = self.lock();

        let mut distribution: BTreeMap<i32, usize> =
            (MIN_RATING..=MAX_RATING).map(|r| (r, 0)).collect();
        let mut sum = 0i64;
        let mut grouped: BTreeMap<&str, Vec<i32>> = BTreeMap::new();
        for record in state.recent.iter() {
            *distribution.entry(record.rating).or_default() += 1;
            sum += i64::from(record.rating);
            grouped
                .entry(record.feedback_type.as_str())
                .or_default()
                .push(record.rating);
        }

        let retained = state.recent.len();
        let by_type = grouped
            .into_iter()
            .map(|(ty, ratings)| {
                let tail = &ratings[ratings.len().saturating_sub(self.config.rolling_window)..];
                let rolling_average = mean(tail).unwrap_or(0.0);
                (
                    ty.to_string(),
                    TypeSummary {
                        count: ratings.len(),
                        rolling_average,
                    },
                )
            })
            .collect();

        FeedbackSummary {
            total: state.total,
            average_rating: (retained > 0).then(|| sum as f64 / retained as f64),
            distribution,
            by_type,
            reference_size: state.reference_ids.len(),
        }
    }

    /// Ratings collected towards the next evaluation for `key`.
    pub fn pending(&self, key: ThresholdKey) -> usize {
        self.lock().windows.get(&key).map_or(0, RatingWindow::len)
    }

    fn lock(&self) -> MutexGuard<'_, ProcessorState> {
        self.state.lock().unwrap_or_else(|e| e.into_inner())
    }
}

fn mean(values: &[i32]) -> Option<f64> {
    if values.is_empty() {
        return None;
    }
    let sum: i64 = values.iter().map(|v| i64::from(*v)).sum();
    Some(sum as f64 / values.len() as f64)
}

impl GaugeReadout for FeedbackProcessor {
    fn readouts(&self) -> Vec<MetricSample> {
        let summary = self.summary();
        let mut out = vec![
            MetricSample::new("feedback_total", summary.total as f64),
            MetricSample::new("reference_dataset_size", summary.reference_size as f64),
        ];
        if let Some(avg) = summary.average_rating {
            out.push(MetricSample::new("feedback_average_rating", avg));
        }
        out
    }
}
