//! Sink that writes change events to the application log.

use async_trait::async_trait;
use tracing::{info, warn};

use super::sink::{NotificationSink, NotifyError};
use crate::domain::entities::ChangeEvent;

/// Logs every event at `WARN` when the domain went down and `INFO` otherwise.
#[derive(Debug, Default, Clone, Copy)]
pub struct LogSink;

#[async_trait]
impl NotificationSink for LogSink {
    async fn notify(&self, event: &ChangeEvent) -> Result<(), NotifyError> {
        let went_down = !event.current.is_live
            && event.previous.as_ref().is_none_or(|previous| previous.is_live);

        if went_down {
            warn!(domain = %event.domain, kind = %event.kind, "{}", event.summary());
        } else {
            info!(domain = %event.domain, kind = %event.kind, "{}", event.summary());
        }
        Ok(())
    }

    fn name(&self) -> &'static str {
        "log"
    }
}
