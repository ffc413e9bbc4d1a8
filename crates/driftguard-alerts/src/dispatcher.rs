//! Queued alert delivery.
//!
//! Evaluation enqueues with `try_send` and never waits. A single worker task
//! appends each alert to the durable log, then fans it out to every channel
//! with bounded retries. Channel calls block, so they run on the blocking pool.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::Duration;

use tokio::sync::{mpsc, oneshot};
use tokio::task::JoinHandle;

use driftguard_core::config::AlertConfig;
use driftguard_core::models::AlertEvent;
use driftguard_core::traits::{IAlertChannel, IMonitorStorage};
use driftguard_observability::tracing_setup::events;
use driftguard_observability::{GaugeReadout, MetricSample};

enum Message {
    Deliver(AlertEvent),
    Flush(oneshot::Sender<()>),
}

/// Delivery counters, shared with the worker.
#[derive(Debug, Default)]
pub struct DeliveryStats {
    delivered: AtomicU64,
    failed: AtomicU64,
    persisted: AtomicU64,
    dropped: AtomicU64,
}

impl DeliveryStats {
    /// Successful channel deliveries (one per alert per channel).
    pub fn delivered(&self) -> u64 {
        self.delivered.load(Ordering::Relaxed)
    }

    /// Channel deliveries that exhausted their retries.
    pub fn failed(&self) -> u64 {
        self.failed.load(Ordering::Relaxed)
    }

    /// Alerts written to the durable log.
    pub fn persisted(&self) -> u64 {
        self.persisted.load(Ordering::Relaxed)
    }

    /// Alerts rejected because the queue was full or closed.
    pub fn dropped(&self) -> u64 {
        self.dropped.load(Ordering::Relaxed)
    }
}

#[derive(Debug, Clone, Copy)]
struct RetryPolicy {
    retries: u32,
    backoff: Duration,
}

pub struct NotificationDispatcher {
    tx: mpsc::Sender<Message>,
    worker: JoinHandle<()>,
    stats: Arc<DeliveryStats>,
}

impl NotificationDispatcher {
    /// Start the delivery worker. Must be called inside a tokio runtime.
    pub fn spawn(
        channels: Vec<Arc<dyn IAlertChannel>>,
        storage: Arc<dyn IMonitorStorage>,
        config: &AlertConfig,
    ) -> Self {
        let (tx, rx) = mpsc::channel(config.queue_capacity.max(1));
        let stats = Arc::new(DeliveryStats::default());
        let policy = RetryPolicy {
            retries: config.delivery_retries,
            backoff: Duration::from_millis(config.retry_backoff_ms),
        };
        let worker = tokio::spawn(run(rx, channels, storage, policy, Arc::clone(&stats)));
        Self { tx, worker, stats }
    }

    /// Enqueue an alert for delivery. Returns false if it was dropped.
    pub fn dispatch(&self, event: AlertEvent) -> bool {
        match self.tx.try_send(Message::Deliver(event)) {
            Ok(()) => true,
            Err(err) => {
                self.stats.dropped.fetch_add(1, Ordering::Relaxed);
                let (reason, id) = match &err {
                    mpsc::error::TrySendError::Full(Message::Deliver(e)) => ("queue full", e.id.clone()),
                    mpsc::error::TrySendError::Closed(Message::Deliver(e)) => {
                        ("queue closed", e.id.clone())
                    }
                    _ => ("queue unavailable", String::new()),
                };
                tracing::warn!(alert_id = %id, reason, "alert notification dropped");
                false
            }
        }
    }

    /// Wait until everything enqueued before this call has been processed.
    pub async fn flush(&self) {
        let (done_tx, done_rx) = oneshot::channel();
        if self.tx.send(Message::Flush(done_tx)).await.is_ok() {
            let _ = done_rx.await;
        }
    }

    pub fn stats(&self) -> &DeliveryStats {
        &self.stats
    }

    /// Drain the queue and stop the worker.
    pub async fn shutdown(self) {
        let Self { tx, worker, .. } = self;
        drop(tx);
        if let Err(e) = worker.await {
            tracing::error!(error = %e, "alert dispatcher worker aborted");
        }
    }
}

impl std::fmt::Debug for NotificationDispatcher {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("NotificationDispatcher")
            .field("stats", &self.stats)
            .finish_non_exhaustive()
    }
}

impl GaugeReadout for NotificationDispatcher {
    fn readouts(&self) -> Vec<MetricSample> {
        vec![
            MetricSample::new("alert_deliveries_total", self.stats.delivered() as f64),
            MetricSample::new("alert_delivery_failures_total", self.stats.failed() as f64),
            MetricSample::new("alerts_persisted_total", self.stats.persisted() as f64),
            MetricSample::new("alerts_dropped_total", self.stats.dropped() as f64),
        ]
    }
}

async fn run(
    mut rx: mpsc::Receiver<Message>,
    channels: Vec<Arc<dyn IAlertChannel>>,
    storage: Arc<dyn IMonitorStorage>,
    policy: RetryPolicy,
    stats: Arc<DeliveryStats>,
) {
    while let Some(message) = rx.recv().await {
        match message {
            Message::Deliver(event) => {
                let event = Arc::new(event);
                persist(&storage, &event, &stats).await;
                for channel in &channels {
                    deliver(channel, &event, policy, &stats).await;
                }
            }
            Message::Flush(done) => {
                let _ = done.send(());
            }
        }
    }
    // Blocking HTTP clients must not be dropped on an async worker thread.
    let _ = tokio::task::spawn_blocking(move || drop(channels)).await;
    tracing::debug!("alert dispatcher stopped");
}

async fn persist(storage: &Arc<dyn IMonitorStorage>, event: &Arc<AlertEvent>, stats: &DeliveryStats) {
    let storage = Arc::clone(storage);
    let ev = Arc::clone(event);
    match tokio::task::spawn_blocking(move || storage.append_alert(&ev)).await {
        Ok(Ok(())) => {
            stats.persisted.fetch_add(1, Ordering::Relaxed);
        }
        Ok(Err(e)) => events::persistence_failed("alert_log", &e.to_string()),
        Err(e) => events::persistence_failed("alert_log", &e.to_string()),
    }
}

async fn deliver(
    channel: &Arc<dyn IAlertChannel>,
    event: &Arc<AlertEvent>,
    policy: RetryPolicy,
    stats: &DeliveryStats,
) {
    let mut attempts = 0u32;
    loop {
        attempts += 1;
        let ch = Arc::clone(channel);
        let ev = Arc::clone(event);
        let ok = tokio::task::spawn_blocking(move || ch.notify(&ev))
            .await
            .unwrap_or(false);
        if ok {
            stats.delivered.fetch_add(1, Ordering::Relaxed);
            return;
        }
        if attempts > policy.retries {
            break;
        }
        tokio::time::sleep(policy.backoff * attempts).await;
    }
    stats.failed.fetch_add(1, Ordering::Relaxed);
    events::alert_delivery_failed(channel.name(), &event.id, attempts);
}
