//! No-op sink for disabled notifications.

use async_trait::async_trait;
use tracing::debug;

use super::sink::{NotificationSink, NotifyError};
use crate::domain::entities::ChangeEvent;

/// A sink that accepts and discards every event.
///
/// Selected with `NOTIFIER=none`.
pub struct NullSink;

impl NullSink {
    pub fn new() -> Self {
        debug!("Using NullSink (notifications disabled)");
        Self
    }
}

impl Default for NullSink {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl NotificationSink for NullSink {
    async fn notify(&self, _event: &ChangeEvent) -> Result<(), NotifyError> {
        Ok(())
    }

    fn name(&self) -> &'static str {
        "none"
    }
}
