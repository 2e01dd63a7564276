//! Notification sink trait and error types.

use async_trait::async_trait;

use crate::domain::entities::ChangeEvent;

/// Errors that can occur while delivering a notification.
#[derive(Debug, thiserror::Error)]
pub enum NotifyError {
    #[error("Notification transport error: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("Notification rejected with status {0}")]
    Rejected(u16),
}

/// Receives change events for delivery.
///
/// The cycle logs delivery failures and carries on; implementations should
/// not retry internally for long.
///
/// # Implementations
///
/// - [`crate::infrastructure::notify::LogSink`] - Writes events to the log
/// - [`crate::infrastructure::notify::WebhookSink`] - POSTs events as JSON
/// - [`crate::infrastructure::notify::NullSink`] - Discards events
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait NotificationSink: Send + Sync {
    async fn notify(&self, event: &ChangeEvent) -> Result<(), NotifyError>;

    /// Short name used in logs.
    fn name(&self) -> &'static str;
}
