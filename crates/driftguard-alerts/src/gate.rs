//! Per-metric consecutive-failure state machine.
//!
//! `Ok -> Warning(1..k-1) -> Firing (k-th breach) -> Ok (first pass)`.
//!
//! A firing streak keeps reporting `Fired` until the caller confirms an
//! alert went out for it, so a suppressed alert is retried on the next breach.

use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "state", rename_all = "snake_case")]
pub enum MetricState {
    Ok,
    Warning { count: u32 },
    Firing { count: u32 },
}

/// What one observation did to the gate.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GateOutcome {
    /// Passing observation; `resolved` is true if the gate was firing.
    Passed { resolved: bool },
    /// Breach below the required count.
    Warning { count: u32 },
    /// A breach at or past the required count with no alert confirmed yet
    /// for this streak.
    Fired { count: u32 },
    /// Further breaches after the streak's alert was confirmed. Emits nothing.
    StillFiring { count: u32 },
}

#[derive(Debug, Clone)]
pub struct ConsecutiveGate {
    required: u32,
    count: u32,
    alerted: bool,
}

impl ConsecutiveGate {
    /// A required count of zero is treated as one.
    pub fn new(required: u32) -> Self {
        Self {
            required: required.max(1),
            count: 0,
            alerted: false,
        }
    }

    pub fn observe(&mut self, breached: bool) -> GateOutcome {
        if !breached {
            let resolved = self.count >= self.required;
            self.count = 0;
            self.alerted = false;
            return GateOutcome::Passed { resolved };
        }
        self.count = self.count.saturating_add(1);
        match self.count {
            c if c < self.required => GateOutcome::Warning { count: c },
            c if self.alerted => GateOutcome::StillFiring { count: c },
            c => GateOutcome::Fired { count: c },
        }
    }

    /// Record that the current streak's alert was delivered.
    pub fn confirm_alert(&mut self) {
        if self.count >= self.required {
            self.alerted = true;
        }
    }

    pub fn alert_pending(&self) -> bool {
        self.count >= self.required && !self.alerted
    }

    pub fn count(&self) -> u32 {
        self.count
    }

    pub fn state(&self) -> MetricState {
        match self.count {
            0 => MetricState::Ok,
            c if c < self.required => MetricState::Warning { count: c },
            c => MetricState::Firing { count: c },
        }
    }

    pub fn reset(&mut self) {
        self.count = 0;
        self.alerted = false;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fires_once_at_required_count() {
        let mut g = ConsecutiveGate::new(3);
        assert_eq!(g.observe(true), GateOutcome::Warning { count: 1 });
        assert_eq!(g.observe(true), GateOutcome::Warning { count: 2 });
        assert_eq!(g.observe(true), GateOutcome::Fired { count: 3 });
        g.confirm_alert();
        assert_eq!(g.observe(true), GateOutcome::StillFiring { count: 4 });
        assert_eq!(g.state(), MetricState::Firing { count: 4 });
    }

    #[test]
    fn unconfirmed_fire_repeats_until_confirmed() {
        let mut g = ConsecutiveGate::new(2);
        g.observe(true);
        assert_eq!(g.observe(true), GateOutcome::Fired { count: 2 });
        assert!(g.alert_pending());
        assert_eq!(g.observe(true), GateOutcome::Fired { count: 3 });
        g.confirm_alert();
        assert!(!g.alert_pending());
        assert_eq!(g.observe(true), GateOutcome::StillFiring { count: 4 });
    }

    #[test]
    fn confirm_below_required_is_ignored() {
        let mut g = ConsecutiveGate::new(3);
        g.observe(true);
        g.confirm_alert();
        g.observe(true);
        assert_eq!(g.observe(true), GateOutcome::Fired { count: 3 });
    }

    #[test]
    fn pass_resets_and_resolves() {
        let mut g = ConsecutiveGate::new(2);
        g.observe(true);
        assert_eq!(g.observe(false), GateOutcome::Passed { resolved: false });
        g.observe(true);
        g.observe(true);
        assert_eq!(g.observe(false), GateOutcome::Passed { resolved: true });
        assert_eq!(g.state(), MetricState::Ok);
        assert_eq!(g.count(), 0);
    }

    #[test]
    fn refires_after_resolution() {
        let mut g = ConsecutiveGate::new(1);
        assert_eq!(g.observe(true), GateOutcome::Fired { count: 1 });
        g.confirm_alert();
        g.observe(false);
        assert_eq!(g.observe(true), GateOutcome::Fired { count: 1 });
    }
}
