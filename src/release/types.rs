//! Types produced by release resolution

/// Placeholder used when the feed entry carries no release year
pub const UNKNOWN_YEAR: &str = "Unknown";

/// A stable release picked from the feed
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReleaseCandidate {
    pub version: String,
    pub download_url: String,
    /// Release year as published by the feed, or `"Unknown"`
    pub release_year: String,
    pub display_name: String,
}
