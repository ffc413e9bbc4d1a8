use super::error_code::{self, DriftGuardErrorCode};

/// Notification delivery errors. Never surfaced to chat users.
#[derive(Debug, thiserror::Error)]
pub enum AlertError {
    #[error("channel {channel} failed: {reason}")]
    ChannelFailed { channel: String, reason: String },

    #[error("notification queue closed")]
    QueueClosed,
}

impl DriftGuardErrorCode for AlertError {
    fn error_code(&self) -> &'static str {
        error_code::ALERT_DELIVERY_ERROR
    }
}
