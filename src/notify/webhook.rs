//! Webhook notification channel

use std::time::Duration;

use serde::Serialize;
use tracing::warn;

use crate::config::SERVICE_TIMEOUT_MS;
use crate::notify::channel::{NotificationChannel, NotifyError};

#[derive(Debug, Serialize)]
struct WebhookPayload<'a> {
    topic: &'a str,
    subject: &'a str,
    message: &'a str,
}

/// Channel that POSTs each message as JSON to a webhook URL
pub struct WebhookChannel {
    client: reqwest::Client,
    url: String,
    topic: String,
}

impl WebhookChannel {
    pub fn new(url: &str, topic: &str) -> Self {
        Self {
            client: reqwest::Client::builder()
                .user_agent("xcode-watch")
                .timeout(Duration::from_millis(SERVICE_TIMEOUT_MS))
                .build()
                .expect("Failed to create HTTP client"),
            url: url.to_string(),
            topic: topic.to_string(),
        }
    }
}

#[async_trait::async_trait]
impl NotificationChannel for WebhookChannel {
    async fn publish(&self, subject: &str, message: &str) -> Result<(), NotifyError> {
        let payload = WebhookPayload {
            topic: &self.topic,
            subject,
            message,
        };

        let response = self.client.post(&self.url).json(&payload).send().await?;

        let status = response.status();
        if !status.is_success() {
            warn!("Webhook returned status {}: {}", status, self.url);
            return Err(NotifyError::Rejected(status.as_u16()));
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mockito::{Matcher, Server};
    use serde_json::json;

    #[tokio::test]
    async fn publish_posts_subject_and_message() {
        let mut server = Server::new_async().await;

        let mock = server
            .mock("POST", "/hook")
            .match_header("content-type", "application/json")
            .match_body(Matcher::Json(json!({
                "topic": "xcode-updates",
                "subject": "New Xcode Version Available: 16.1",
                "message": "body"
            })))
            .with_status(204)
            .create_async()
            .await;

        let channel = WebhookChannel::new(&format!("{}/hook", server.url()), "xcode-updates");
        channel
            .publish("New Xcode Version Available: 16.1", "body")
            .await
            .unwrap();

        mock.assert_async().await;
    }

    #[tokio::test]
    async fn publish_returns_rejected_for_error_status() {
        let mut server = Server::new_async().await;

        let mock = server
            .mock("POST", "/hook")
            .with_status(403)
            .create_async()
            .await;

        let channel = WebhookChannel::new(&format!("{}/hook", server.url()), "xcode-updates");
        let result = channel.publish("subject", "body").await;

        mock.assert_async().await;
        assert!(matches!(result, Err(NotifyError::Rejected(403))));
    }
}
