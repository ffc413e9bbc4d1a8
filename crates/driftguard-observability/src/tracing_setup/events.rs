//! Structured log events for key monitoring operations.
//!
//! Each function emits a `tracing` event with an `event` field so operators
//! can filter on it.

/// A drift check ran and the distance exceeded its threshold.
pub fn drift_detected(kind: &str, distance: f64, threshold: f64) {
    tracing::warn!(
        event = "drift_detected",
        drift_type = %kind,
        distance = distance,
        threshold = threshold,
        "drift detected"
    );
}

/// A drift check could not run. Distinct from "no drift".
pub fn drift_check_unavailable(kind: &str, reason: &str) {
    tracing::warn!(
        event = "drift_check_unavailable",
        drift_type = %kind,
        reason = %reason,
        "drift check unavailable"
    );
}

pub fn alert_fired(alert_type: &str, severity: &str, metric: &str, value: f64, threshold: f64) {
    tracing::warn!(
        event = "alert_fired",
        alert_type = %alert_type,
        severity = %severity,
        metric = %metric,
        value = value,
        threshold = threshold,
        "alert fired"
    );
}

/// An alert was swallowed by the cool-down window.
pub fn alert_suppressed(alert_type: &str, metric: &str, remaining_secs: i64) {
    tracing::debug!(
        event = "alert_suppressed",
        alert_type = %alert_type,
        metric = %metric,
        remaining_secs = remaining_secs,
        "alert suppressed by cooldown"
    );
}

pub fn alert_delivery_failed(channel: &str, alert_id: &str, attempts: u32) {
    tracing::error!(
        event = "alert_delivery_failed",
        channel = %channel,
        alert_id = %alert_id,
        attempts = attempts,
        "alert delivery failed"
    );
}

pub fn threshold_adjusted(name: &str, previous: f64, current: f64, average_rating: f64) {
    tracing::info!(
        event = "threshold_adjusted",
        threshold = %name,
        previous = previous,
        current = current,
        average_rating = average_rating,
        "threshold adjusted from feedback"
    );
}

/// A proposed threshold fell outside its bounds and was clamped.
pub fn threshold_clamped(name: &str, proposed: f64, applied: f64) {
    tracing::warn!(
        event = "threshold_clamped",
        threshold = %name,
        proposed = proposed,
        applied = applied,
        "threshold out of bounds, clamped"
    );
}

pub fn baseline_replaced(responses: usize, inputs: usize, dimensions: usize) {
    tracing::info!(
        event = "baseline_replaced",
        responses = responses,
        inputs = inputs,
        dimensions = dimensions,
        "baseline replaced"
    );
}

pub fn baseline_reset() {
    tracing::info!(event = "baseline_reset", "baseline and sample history cleared");
}

pub fn feedback_recorded(session_id: &str, feedback_type: &str, rating: i32) {
    tracing::info!(
        event = "feedback_recorded",
        session_id = %session_id,
        feedback_type = %feedback_type,
        rating = rating,
        "feedback recorded"
    );
}

/// A durable write failed but the request continued.
pub fn persistence_failed(what: &str, error: &str) {
    tracing::error!(
        event = "persistence_failed",
        what = %what,
        error = %error,
        "persistence failed"
    );
}
