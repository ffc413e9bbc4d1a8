//! Capped drift event log plus per-type latches.

use std::collections::BTreeMap;

use driftguard_core::collections::RingBuffer;
use driftguard_core::models::{DriftEvent, DriftKind};

/// Every drift verdict, oldest trimmed beyond the retention cap.
#[derive(Debug, Clone)]
pub struct DriftHistory {
    events: RingBuffer<DriftEvent>,
    /// Set when a kind detects drift; cleared only by `clear`.
    latched: BTreeMap<DriftKind, bool>,
    last: BTreeMap<DriftKind, DriftEvent>,
    detected_total: u64,
    unavailable_total: u64,
}

impl DriftHistory {
    pub fn new(capacity: usize) -> Self {
        Self {
            events: RingBuffer::with_capacity(capacity),
            latched: BTreeMap::new(),
            last: BTreeMap::new(),
            detected_total: 0,
            unavailable_total: 0,
        }
    }

    pub fn record(&mut self, event: DriftEvent) {
        if event.detected {
            self.detected_total += 1;
            self.latched.insert(event.kind, true);
        }
        if event.is_unavailable() {
            self.unavailable_total += 1;
        }
        self.last.insert(event.kind, event.clone());
        self.events.push(event);
    }

    /// Newest `limit` events in chronological order.
    pub fn recent(&self, limit: usize) -> Vec<DriftEvent> {
        self.events.tail_vec(limit)
    }

    /// Detected events among the newest `window` events.
    pub fn recent_detected(&self, window: usize) -> usize {
        self.events.tail(window).filter(|e| e.detected).count()
    }

    pub fn is_latched(&self, kind: DriftKind) -> bool {
        self.latched.get(&kind).copied().unwrap_or(false)
    }

    pub fn last(&self, kind: DriftKind) -> Option<&DriftEvent> {
        self.last.get(&kind)
    }

    pub fn detected_total(&self) -> u64 {
        self.detected_total
    }

    pub fn unavailable_total(&self) -> u64 {
        self.unavailable_total
    }

    pub fn len(&self) -> usize {
        self.events.len()
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    pub fn clear(&mut self) {
        self.events.clear();
        self.latched.clear();
        self.last.clear();
        self.detected_total = 0;
        self.unavailable_total = 0;
    }
}
