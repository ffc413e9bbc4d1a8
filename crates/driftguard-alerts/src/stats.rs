//! Aggregate alert statistics.

use std::collections::BTreeMap;

use serde::Serialize;

use driftguard_core::models::{AlertEvent, AlertKind, AlertSeverity};

use crate::gate::MetricState;

/// Lifetime counters, unaffected by history eviction.
#[derive(Debug, Clone, Default)]
pub(crate) struct AlertTotals {
    pub total: u64,
    pub by_kind: BTreeMap<AlertKind, u64>,
    pub by_severity: BTreeMap<AlertSeverity, u64>,
    pub suppressed: u64,
}

impl AlertTotals {
    pub fn record(&mut self, alert: &AlertEvent) {
        self.total += 1;
        *self.by_kind.entry(alert.kind).or_default() += 1;
        *self.by_severity.entry(alert.severity).or_default() += 1;
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AlertStats {
    pub total: u64,
    pub by_kind: BTreeMap<AlertKind, u64>,
    pub by_severity: BTreeMap<AlertSeverity, u64>,
    pub suppressed: u64,
    /// Alerts currently retained in history.
    pub in_history: usize,
    /// Alerts among the most recent history entries.
    pub recent: usize,
    pub consecutive_failures: BTreeMap<String, u32>,
    pub metric_states: BTreeMap<String, MetricState>,
}
