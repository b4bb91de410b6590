//! xcodereleases.com feed implementation

use std::time::Duration;

use serde_json::Value;
use tracing::{debug, warn};

use crate::config::{DEFAULT_FEED_URL, FETCH_TIMEOUT_MS};
use crate::release::error::FetchError;
use crate::release::feed::ReleaseFeed;

/// Release feed backed by the public xcodereleases.com JSON document
pub struct XcodeReleasesFeed {
    client: reqwest::Client,
    url: String,
    timeout_ms: u64,
}

impl XcodeReleasesFeed {
    /// Creates a feed reading from a custom URL
    pub fn new(url: &str) -> Self {
        Self::with_timeout(url, FETCH_TIMEOUT_MS)
    }

    /// Creates a feed with a custom request timeout
    pub fn with_timeout(url: &str, timeout_ms: u64) -> Self {
        Self {
            client: reqwest::Client::builder()
                .user_agent("xcode-watch")
                .timeout(Duration::from_millis(timeout_ms))
                .build()
                .expect("Failed to create HTTP client"),
            url: url.to_string(),
            timeout_ms,
        }
    }

    fn classify(&self, error: reqwest::Error) -> FetchError {
        if error.is_timeout() {
            FetchError::Timeout(self.timeout_ms)
        } else {
            FetchError::Network(error)
        }
    }
}

impl Default for XcodeReleasesFeed {
    fn default() -> Self {
        Self::new(DEFAULT_FEED_URL)
    }
}

#[async_trait::async_trait]
impl ReleaseFeed for XcodeReleasesFeed {
    async fn fetch_releases(&self) -> Result<Vec<Value>, FetchError> {
        debug!("Fetching Xcode releases: {}", self.url);

        let response = self
            .client
            .get(&self.url)
            .header("Accept", "application/json")
            .send()
            .await
            .map_err(|e| self.classify(e))?;

        let status = response.status();
        if !status.is_success() {
            warn!("Release feed returned status {}: {}", status, self.url);
            return Err(FetchError::Status(status.as_u16()));
        }

        let body: Value = response.json().await.map_err(|e| {
            if e.is_timeout() {
                return FetchError::Timeout(self.timeout_ms);
            }
            warn!("Failed to parse release feed: {}", e);
            FetchError::InvalidResponse(e.to_string())
        })?;

        match body {
            Value::Array(entries) => Ok(entries),
            other => Err(FetchError::InvalidResponse(format!(
                "expected a JSON array, got {}",
                json_kind(&other)
            ))),
        }
    }
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}
