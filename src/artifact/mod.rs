//! Lookup of already uploaded Xcode archives

use std::time::Duration;

#[cfg(test)]
use mockall::automock;
use thiserror::Error;
use tracing::{debug, warn};

use crate::config::SERVICE_TIMEOUT_MS;

#[derive(Debug, Error)]
pub enum ObjectStoreError {
    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    #[error("Unexpected status: {0}")]
    Unexpected(u16),
}

/// Object key of the archive for a version
pub fn object_key(version: &str) -> String {
    format!("xcode-{}.xip", version)
}

/// Human-readable location of an object
pub fn object_location(bucket: &str, key: &str) -> String {
    format!("s3://{}/{}", bucket, key)
}

/// Read-only view of an object store
#[cfg_attr(test, automock)]
#[async_trait::async_trait]
pub trait ObjectStore: Send + Sync {
    /// Check whether `key` exists in `bucket`
    async fn exists(&self, bucket: &str, key: &str) -> Result<bool, ObjectStoreError>;
}

/// Object store reached over HTTP with path-style addressing (`{endpoint}/{bucket}/{key}`)
pub struct HttpObjectStore {
    client: reqwest::Client,
    endpoint: String,
}

impl HttpObjectStore {
    pub fn new(endpoint: &str) -> Self {
        Self {
            client: reqwest::Client::builder()
                .user_agent("xcode-watch")
                .timeout(Duration::from_millis(SERVICE_TIMEOUT_MS))
                .build()
                .expect("Failed to create HTTP client"),
            endpoint: endpoint.trim_end_matches('/').to_string(),
        }
    }
}

#[async_trait::async_trait]
impl ObjectStore for HttpObjectStore {
    async fn exists(&self, bucket: &str, key: &str) -> Result<bool, ObjectStoreError> {
        let url = format!("{}/{}/{}", self.endpoint, bucket, key);
        debug!("Checking object: {}", url);

        let response = self.client.head(&url).send().await?;
        let status = response.status();

        if status.is_success() {
            return Ok(true);
        }
        if status == reqwest::StatusCode::NOT_FOUND {
            return Ok(false);
        }

        warn!("Object store returned status {}: {}", status, url);
        Err(ObjectStoreError::Unexpected(status.as_u16()))
    }
}
