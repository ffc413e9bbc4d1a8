use serde::{Deserialize, Serialize};

use super::defaults;

/// Alert evaluation and delivery configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AlertConfig {
    /// Consecutive breaches required before a quality alert fires.
    pub consecutive_failures: u32,
    /// Minimum seconds between two alerts with the same kind and metric.
    pub cooldown_secs: u64,
    /// Number of alerts kept in memory.
    pub history_capacity: usize,
    /// Quality dimensions run through the consecutive-failure gate.
    pub monitored_metrics: Vec<String>,
    /// JSONL alert log file. `None` disables the file channel.
    pub log_path: Option<String>,
    /// Slack-compatible webhook. `None` disables the webhook channel.
    pub webhook_url: Option<String>,
    pub webhook_timeout_ms: u64,
    /// Emit alerts as `warn` log events.
    pub console: bool,
    /// Extra attempts per channel after the first failure.
    pub delivery_retries: u32,
    /// Linear backoff unit between attempts.
    pub retry_backoff_ms: u64,
    /// Bounded notification queue size; overflow drops the notification.
    pub queue_capacity: usize,
}

impl Default for AlertConfig {
    fn default() -> Self {
        Self {
            consecutive_failures: defaults::DEFAULT_CONSECUTIVE_FAILURES,
            cooldown_secs: defaults::DEFAULT_ALERT_COOLDOWN_SECS,
            history_capacity: defaults::DEFAULT_ALERT_HISTORY_CAPACITY,
            monitored_metrics: defaults::DEFAULT_MONITORED_METRICS
                .iter()
                .map(|s| s.to_string())
                .collect(),
            log_path: None,
            webhook_url: None,
            webhook_timeout_ms: defaults::DEFAULT_WEBHOOK_TIMEOUT_MS,
            console: defaults::DEFAULT_CONSOLE_ALERTS,
            delivery_retries: defaults::DEFAULT_DELIVERY_RETRIES,
            retry_backoff_ms: defaults::DEFAULT_RETRY_BACKOFF_MS,
            queue_capacity: defaults::DEFAULT_QUEUE_CAPACITY,
        }
    }
}
