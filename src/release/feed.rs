//! Feed trait for fetching the raw release list

#[cfg(test)]
use mockall::automock;

use crate::release::error::FetchError;

/// Source of release entries
#[cfg_attr(test, automock)]
#[async_trait::async_trait]
pub trait ReleaseFeed: Send + Sync {
    /// Fetches every entry of the feed
    ///
    /// # Returns
    /// * `Ok(entries)` - Raw entries, in feed order (newest first)
    /// * `Err(FetchError)` - If the feed is unreachable, times out, or is not a JSON array
    async fn fetch_releases(&self) -> Result<Vec<serde_json::Value>, FetchError>;
}
