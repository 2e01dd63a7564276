//! Sink that POSTs change events to a webhook.

use async_trait::async_trait;
use serde::Serialize;
use std::time::Duration;

use super::sink::{NotificationSink, NotifyError};
use crate::domain::entities::ChangeEvent;

const WEBHOOK_TIMEOUT: Duration = Duration::from_secs(10);

/// JSON body sent to the webhook.
///
/// `text` is accepted by most chat webhooks as the message body; the full
/// event is attached for programmatic consumers.
#[derive(Debug, Serialize)]
struct WebhookPayload<'a> {
    text: String,
    event: &'a ChangeEvent,
}

/// Delivers events as JSON `POST` requests.
#[derive(Debug, Clone)]
pub struct WebhookSink {
    client: reqwest::Client,
    url: String,
}

impl WebhookSink {
    /// Creates a sink posting to `url`.
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client cannot be built.
    pub fn new(url: impl Into<String>) -> Result<Self, reqwest::Error> {
        let client = reqwest::Client::builder()
            .timeout(WEBHOOK_TIMEOUT)
            .build()?;

        Ok(Self {
            client,
            url: url.into(),
        })
    }
}

#[async_trait]
impl NotificationSink for WebhookSink {
    async fn notify(&self, event: &ChangeEvent) -> Result<(), NotifyError> {
        let payload = WebhookPayload {
            text: event.summary(),
            event,
        };

        let response = self.client.post(&self.url).json(&payload).send().await?;

        let status = response.status();
        if !status.is_success() {
            return Err(NotifyError::Rejected(status.as_u16()));
        }

        tracing::debug!(domain = %event.domain, "Webhook notification delivered");
        Ok(())
    }

    fn name(&self) -> &'static str {
        "webhook"
    }
}
