//! Remote download requests
//!
//! A download is requested by sending a shell command to a remote worker.
//! Dispatch is best-effort: [`trigger_download`] logs failures and returns
//! `None` instead of an error.

use std::borrow::Cow;
use std::time::Duration;

#[cfg(test)]
use mockall::automock;
use regex::{Captures, Regex};
use serde::{Deserialize, Serialize};
use shell_escape::unix::escape;
use thiserror::Error;
use tracing::{error, info, warn};

use crate::config::SERVICE_TIMEOUT_MS;

#[derive(Debug, Error)]
pub enum DispatchError {
    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    #[error("Dispatcher rejected command with status {0}")]
    Rejected(u16),

    #[error("Invalid response: {0}")]
    InvalidResponse(String),
}

/// Sends commands to remote workers
#[cfg_attr(test, automock)]
#[async_trait::async_trait]
pub trait CommandDispatcher: Send + Sync {
    /// Run `commands` on `target`
    ///
    /// # Returns
    /// * `Ok(command_id)` - Identifier assigned by the dispatcher
    /// * `Err(DispatchError)` - If the command could not be submitted
    async fn send_command(
        &self,
        target: &str,
        commands: Vec<String>,
        comment: &str,
    ) -> Result<String, DispatchError>;
}

/// Shell command template with `{url}` and `{version}` placeholders.
///
/// Substituted values are shell-quoted, so placeholders must not be wrapped
/// in quotes inside the template.
#[derive(Debug, Clone)]
pub struct DownloadCommand {
    template: String,
    placeholder_re: Regex,
}

impl DownloadCommand {
    pub fn new(template: impl Into<String>) -> Self {
        Self {
            template: template.into(),
            placeholder_re: Regex::new(r"\{(url|version)\}").unwrap(),
        }
    }

    pub fn render(&self, download_url: &str, version: &str) -> String {
        self.placeholder_re
            .replace_all(&self.template, |caps: &Captures| {
                let value = match &caps[1] {
                    "url" => download_url,
                    _ => version,
                };
                escape(Cow::Borrowed(value)).into_owned()
            })
            .into_owned()
    }
}

/// Ask `worker` to download a release. Returns the command id, or `None` if
/// the request failed.
pub async fn trigger_download(
    dispatcher: &dyn CommandDispatcher,
    worker: &str,
    command: &DownloadCommand,
    download_url: &str,
    version: &str,
) -> Option<String> {
    let shell = command.render(download_url, version);
    let comment = format!("Download Xcode version {}", version);

    match dispatcher.send_command(worker, vec![shell], &comment).await {
        Ok(command_id) => {
            info!("Started download command: {}", command_id);
            Some(command_id)
        }
        Err(e) => {
            error!("Failed to trigger download on {}: {}", worker, e);
            None
        }
    }
}

#[derive(Debug, Serialize)]
struct CommandRequest<'a> {
    target: &'a str,
    commands: &'a [String],
    comment: &'a str,
}

#[derive(Debug, Deserialize)]
struct CommandResponse {
    command_id: String,
}

/// Dispatcher that submits commands to an HTTP run-command endpoint
pub struct HttpCommandDispatcher {
    client: reqwest::Client,
    base_url: String,
}

impl HttpCommandDispatcher {
    pub fn new(base_url: &str) -> Self {
        Self {
            client: reqwest::Client::builder()
                .user_agent("xcode-watch")
                .timeout(Duration::from_millis(SERVICE_TIMEOUT_MS))
                .build()
                .expect("Failed to create HTTP client"),
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }
}

#[async_trait::async_trait]
impl CommandDispatcher for HttpCommandDispatcher {
    async fn send_command(
        &self,
        target: &str,
        commands: Vec<String>,
        comment: &str,
    ) -> Result<String, DispatchError> {
        let url = format!("{}/commands", self.base_url);
        let request = CommandRequest {
            target,
            commands: &commands,
            comment,
        };

        let response = self.client.post(&url).json(&request).send().await?;

        let status = response.status();
        if !status.is_success() {
            warn!("Dispatcher returned status {}: {}", status, url);
            return Err(DispatchError::Rejected(status.as_u16()));
        }

        let body: CommandResponse = response
            .json()
            .await
            .map_err(|e| DispatchError::InvalidResponse(e.to_string()))?;

        Ok(body.command_id)
    }
}
