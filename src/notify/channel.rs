//! Notification channel trait

#[cfg(test)]
use mockall::automock;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum NotifyError {
    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    #[error("Channel rejected message with status {0}")]
    Rejected(u16),
}

/// A channel that broadcasts a message to its subscribers
#[cfg_attr(test, automock)]
#[async_trait::async_trait]
pub trait NotificationChannel: Send + Sync {
    async fn publish(&self, subject: &str, message: &str) -> Result<(), NotifyError>;
}
