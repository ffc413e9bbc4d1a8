use crate::models::AlertEvent;

/// A notification delivery channel.
///
/// Implementations block; the dispatcher runs them off the evaluation path.
pub trait IAlertChannel: Send + Sync {
    /// Stable channel name used in logs.
    fn name(&self) -> &str;

    /// Deliver one alert. Returns whether delivery succeeded.
    fn notify(&self, event: &AlertEvent) -> bool;
}
