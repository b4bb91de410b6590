use std::sync::Arc;

use tracing::{debug, error, info};

use crate::notify::channel::NotificationChannel;

/// Sends notifications when a channel is configured.
///
/// Failures are logged and swallowed: a notification never changes the
/// outcome of a check.
#[derive(Clone)]
pub struct Notifier {
    channel: Option<Arc<dyn NotificationChannel>>,
}

impl Notifier {
    pub fn new(channel: Arc<dyn NotificationChannel>) -> Self {
        Self {
            channel: Some(channel),
        }
    }

    /// A notifier that drops every message
    pub fn disabled() -> Self {
        Self { channel: None }
    }

    pub fn is_enabled(&self) -> bool {
        self.channel.is_some()
    }

    pub async fn notify(&self, subject: &str, body: &str) {
        let Some(channel) = &self.channel else {
            debug!("No notification channel configured, skipping: {}", subject);
            return;
        };

        match channel.publish(subject, body).await {
            Ok(()) => info!("Notification sent: {}", subject),
            Err(e) => error!("Failed to send notification {:?}: {}", subject, e),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::notify::channel::{MockNotificationChannel, NotifyError};

    #[tokio::test]
    async fn notify_publishes_to_configured_channel() {
        let mut channel = MockNotificationChannel::new();
        channel
            .expect_publish()
            .withf(|subject, body| subject == "hello" && body == "world")
            .times(1)
            .returning(|_, _| Ok(()));

        Notifier::new(Arc::new(channel)).notify("hello", "world").await;
    }

    #[tokio::test]
    async fn notify_swallows_channel_errors() {
        let mut channel = MockNotificationChannel::new();
        channel
            .expect_publish()
            .times(1)
            .returning(|_, _| Err(NotifyError::Rejected(500)));

        // Completes without panicking or returning an error
        Notifier::new(Arc::new(channel)).notify("hello", "world").await;
    }

    #[tokio::test]
    async fn disabled_notifier_is_a_no_op() {
        let notifier = Notifier::disabled();

        assert!(!notifier.is_enabled());
        notifier.notify("hello", "world").await;
    }
}
