use std::sync::OnceLock;
use std::time::Duration;

use serde_json::{json, Value};

use driftguard_core::models::{AlertEvent, AlertSeverity};
use driftguard_core::traits::IAlertChannel;

/// Posts alerts to a Slack-compatible incoming webhook.
///
/// The blocking HTTP client is built on first use, on the delivery thread.
pub struct WebhookChannel {
    url: String,
    timeout: Duration,
    client: OnceLock<Option<reqwest::blocking::Client>>,
}

impl WebhookChannel {
    pub fn new(url: impl Into<String>, timeout_ms: u64) -> Self {
        Self {
            url: url.into(),
            timeout: Duration::from_millis(timeout_ms),
            client: OnceLock::new(),
        }
    }

    pub fn url(&self) -> &str {
        &self.url
    }

    fn client(&self) -> Option<&reqwest::blocking::Client> {
        self.client
            .get_or_init(|| {
                reqwest::blocking::Client::builder()
                    .timeout(self.timeout)
                    .build()
                    .map_err(|e| tracing::error!(error = %e, "webhook client build failed"))
                    .ok()
            })
            .as_ref()
    }
}

impl std::fmt::Debug for WebhookChannel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("WebhookChannel")
            .field("url", &self.url)
            .field("timeout", &self.timeout)
            .finish()
    }
}

/// Slack message body for one alert.
pub fn slack_payload(event: &AlertEvent) -> Value {
    let color = if event.severity == AlertSeverity::High {
        "danger"
    } else {
        "warning"
    };
    json!({
        "text": format!("*{}*", event.kind.as_str().to_uppercase()),
        "attachments": [{
            "color": color,
            "fields": [
                { "title": "Message", "value": event.message, "short": false },
                { "title": "Severity", "value": event.severity.as_str(), "short": true },
                { "title": "Timestamp", "value": event.timestamp.to_rfc3339(), "short": true },
            ],
        }],
    })
}

impl IAlertChannel for WebhookChannel {
    fn name(&self) -> &str {
        "webhook"
    }

    fn notify(&self, event: &AlertEvent) -> bool {
        let Some(client) = self.client() else {
            return false;
        };
        match client.post(&self.url).json(&slack_payload(event)).send() {
            Ok(resp) if resp.status().is_success() => true,
            Ok(resp) => {
                tracing::debug!(status = %resp.status(), "webhook rejected alert");
                false
            }
            Err(e) => {
                tracing::debug!(error = %e, "webhook request failed");
                false
            }
        }
    }
}
