//! Selection of the newest stable release from raw feed entries

use regex::Regex;
use serde::Deserialize;
use serde_json::Value;
use tracing::{debug, info};

use crate::release::error::ResolveError;
use crate::release::feed::ReleaseFeed;
use crate::release::types::{ReleaseCandidate, UNKNOWN_YEAR};

/// Markers that identify pre-release builds in a download filename
const PRERELEASE_MARKERS: &[&str] = &["beta", "rc"];

/// Shape of a feed entry. Entries that don't match are skipped.
#[derive(Debug, Deserialize)]
struct FeedEntry {
    links: Links,
    #[serde(default)]
    date: Option<Value>,
    #[serde(default)]
    name: Option<Value>,
}

#[derive(Debug, Deserialize)]
struct Links {
    download: Download,
}

#[derive(Debug, Deserialize)]
struct Download {
    url: String,
}

/// Picks the first stable release out of the feed.
///
/// The feed lists newest builds first, so the first entry that survives the
/// pre-release filter and yields a version is taken as the latest. No version
/// ordering is applied.
pub struct ReleaseSelector {
    /// Regex for the download filename: `Xcode_16.1.xip`
    filename_re: Regex,
}

impl ReleaseSelector {
    pub fn new() -> Self {
        Self {
            filename_re: Regex::new(r"Xcode_([a-zA-Z0-9._-]+)\.xip").unwrap(),
        }
    }

    /// Select the newest stable release
    pub fn select(&self, entries: &[Value]) -> Result<ReleaseCandidate, ResolveError> {
        entries
            .iter()
            .find_map(|entry| self.candidate(entry))
            .ok_or(ResolveError::NoReleaseFound)
    }

    fn candidate(&self, entry: &Value) -> Option<ReleaseCandidate> {
        let Ok(entry) = FeedEntry::deserialize(entry) else {
            debug!("Skipping feed entry without a download link");
            return None;
        };

        let download_url = entry.links.download.url;
        let filename = download_url.rsplit('/').next().unwrap_or(&download_url);

        if is_prerelease(filename) {
            debug!("Skipping pre-release build: {}", filename);
            return None;
        }

        let version = self.filename_re.captures(filename)?.get(1)?.as_str().to_string();

        let release_year = entry
            .date
            .as_ref()
            .and_then(|date| date.get("year"))
            .and_then(|year| match year {
                Value::String(s) => Some(s.clone()),
                Value::Number(n) => Some(n.to_string()),
                _ => None,
            })
            .unwrap_or_else(|| UNKNOWN_YEAR.to_string());

        let display_name = entry
            .name
            .as_ref()
            .and_then(Value::as_str)
            .map(str::to_string)
            .unwrap_or_else(|| format!("Xcode {}", version));

        Some(ReleaseCandidate {
            version,
            download_url,
            release_year,
            display_name,
        })
    }
}

impl Default for ReleaseSelector {
    fn default() -> Self {
        Self::new()
    }
}

/// Case-insensitive check for beta and release-candidate builds
pub fn is_prerelease(filename: &str) -> bool {
    let lower = filename.to_lowercase();
    PRERELEASE_MARKERS.iter().any(|marker| lower.contains(marker))
}

/// Fetch the feed and select the newest stable release
pub async fn resolve_latest(
    feed: &dyn ReleaseFeed,
    selector: &ReleaseSelector,
) -> Result<ReleaseCandidate, ResolveError> {
    let entries = feed.fetch_releases().await?;
    debug!("Fetched {} release entries", entries.len());

    let latest = selector.select(&entries)?;
    info!("Latest Xcode version: {}", latest.version);

    Ok(latest)
}
