//! Progress webhook client.

use reqwest::Client;
use tracing::{error, info};

use creditmeter_models::ingestion::WebhookNotification;

use crate::errors::{IngestionError, IngestionResult};

#[derive(Clone)]
pub struct WebhookClient {
    client: Client,
}

impl Default for WebhookClient {
    fn default() -> Self {
        Self::new()
    }
}

impl WebhookClient {
    pub fn new() -> Self {
        Self {
            client: Client::new(),
        }
    }

    /// POST one progress notification. A non-success reply fails the job,
    /// there is no retry.
    pub async fn notify(
        &self,
        webhook_url: &str,
        notification: &WebhookNotification,
    ) -> IngestionResult<()> {
        let response = self
            .client
            .post(webhook_url)
            .json(notification)
            .send()
            .await
            .map_err(|source| IngestionError::Transport {
                url: webhook_url.to_string(),
                source,
            })?;

        if !response.status().is_success() {
            let status = response.status().as_u16();
            error!("❌ Webhook to {} rejected with status {}", webhook_url, status);
            return Err(IngestionError::WebhookFailed { status });
        }

        info!(
            "📤 Webhook delivered: {}/{} chunks processed for job {}",
            notification.processed, notification.total, notification.unique_id
        );
        Ok(())
    }
}
