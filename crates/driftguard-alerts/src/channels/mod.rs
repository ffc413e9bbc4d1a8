//! Notification channels. Each implements `IAlertChannel` and blocks on delivery.

mod console;
mod file;
mod webhook;

use std::sync::Arc;

use driftguard_core::config::AlertConfig;
use driftguard_core::traits::IAlertChannel;

pub use console::ConsoleChannel;
pub use file::FileChannel;
pub use webhook::WebhookChannel;

/// Build the channels enabled by `config`.
pub fn from_config(config: &AlertConfig) -> Vec<Arc<dyn IAlertChannel>> {
    let mut channels: Vec<Arc<dyn IAlertChannel>> = Vec::new();
    if config.console {
        channels.push(Arc::new(ConsoleChannel));
    }
    if let Some(path) = &config.log_path {
        channels.push(Arc::new(FileChannel::new(path)));
    }
    if let Some(url) = &config.webhook_url {
        channels.push(Arc::new(WebhookChannel::new(url, config.webhook_timeout_ms)));
    }
    channels
}
