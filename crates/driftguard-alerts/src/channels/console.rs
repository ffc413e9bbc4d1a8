use driftguard_core::models::AlertEvent;
use driftguard_core::traits::IAlertChannel;

/// Writes alerts to the log at `warn`.
#[derive(Debug, Default, Clone, Copy)]
pub struct ConsoleChannel;

impl IAlertChannel for ConsoleChannel {
    fn name(&self) -> &str {
        "console"
    }

    fn notify(&self, event: &AlertEvent) -> bool {
        tracing::warn!(
            target: "driftguard::alert",
            alert_id = %event.id,
            alert_type = %event.kind,
            metric = %event.metric,
            "[ALERT:{}] {}",
            event.severity.as_str().to_uppercase(),
            event.message
        );
        true
    }
}
