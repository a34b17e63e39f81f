//! Webhook notifier. POSTs each alert as a JSON document to a configured
//! endpoint.

use crate::domain::DomainError;
use crate::ports::NotifierPort;
use reqwest::Client;

/// Delivers alerts to an HTTP endpoint as `{"title": .., "body": ..}`.
pub struct WebhookNotifier {
    client: Client,
    url: String,
}

impl WebhookNotifier {
    pub fn new(url: String) -> Self {
        Self {
            client: Client::new(),
            url,
        }
    }
}

#[async_trait::async_trait]
impl NotifierPort for WebhookNotifier {
    async fn notify(&self, title: &str, body: &str) -> Result<(), DomainError> {
        let payload = serde_json::json!({
            "title": title,
            "body": body,
        });

        let res = self
            .client
            .post(&self.url)
            .json(&payload)
            .send()
            .await
            .map_err(|e| DomainError::Dispatch(format!("request failed: {e}")))?;

        if !res.status().is_success() {
            let status = res.status();
            let text = res.text().await.unwrap_or_else(|_| "unknown".to_string());
            return Err(DomainError::Dispatch(format!(
                "webhook error {}: {}",
                status, text
            )));
        }

        Ok(())
    }
}
