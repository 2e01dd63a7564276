//! Change notification delivery.
//!
//! Provides a [`NotificationSink`] trait with three implementations:
//! - [`LogSink`] - Writes events to the application log
//! - [`WebhookSink`] - POSTs events to an HTTP endpoint
//! - [`NullSink`] - Discards events
//!
//! The implementation is chosen from configuration (`NOTIFIER`).

mod log_sink;
mod null_sink;
mod sink;
mod webhook_sink;

pub use log_sink::LogSink;
pub use null_sink::NullSink;
pub use sink::{NotificationSink, NotifyError};
pub use webhook_sink::WebhookSink;

#[cfg(test)]
pub use sink::MockNotificationSink;
