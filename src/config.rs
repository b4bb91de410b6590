use std::path::PathBuf;

// =============================================================================
// Time-related constants
// =============================================================================

/// Timeout for the release feed request in milliseconds (30 seconds)
pub const FETCH_TIMEOUT_MS: u64 = 30_000;

/// Timeout for notification, object store and dispatch requests (10 seconds)
pub const SERVICE_TIMEOUT_MS: u64 = 10_000;

/// Default interval between scheduled checks in seconds (24 hours)
pub const DEFAULT_CHECK_INTERVAL_SECS: u64 = 24 * 60 * 60;

// =============================================================================
// Defaults
// =============================================================================

pub const DEFAULT_FEED_URL: &str = "https://xcodereleases.com/data.json";
pub const DEFAULT_PARAMETER_NAME: &str = "/xcode/latest_version";
pub const DEFAULT_NOTIFICATION_TOPIC: &str = "xcode-updates";
pub const DEFAULT_BUCKET_NAME: &str = "xcode-downloads";
pub const DEFAULT_DOWNLOAD_COMMAND: &str = "/usr/local/bin/download_xcode.sh {url} {version}";
pub const DEFAULT_SCHEDULE_EXPRESSION: &str = "rate(1 day)";

/// Output format for log lines
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LogFormat {
    #[default]
    Text,
    Json,
}

/// Runtime configuration, read from environment variables
#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    pub feed_url: String,
    /// Parameter store key holding the last recorded version
    pub parameter_name: String,
    pub parameter_db_path: PathBuf,
    /// Webhook URL of the notification channel. Notifications are disabled when unset.
    pub notification_url: Option<String>,
    pub notification_topic: String,
    pub bucket_name: String,
    /// Base URL of the object store. The artifact check is disabled when unset.
    pub object_store_url: Option<String>,
    /// Remote worker that downloads new builds
    pub worker_id: Option<String>,
    pub dispatch_url: Option<String>,
    pub download_command: String,
    /// Human-readable schedule, only used in the setup notification
    pub schedule_expression: String,
    /// Contact address, only used in the setup notification
    pub email_address: String,
    pub check_interval_secs: u64,
    pub log_format: LogFormat,
}

/// Optional behaviours resolved once at startup
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Capabilities {
    /// Look for an already uploaded artifact before announcing a new version
    pub object_store_check: bool,
    /// Ask the remote worker to download the new version
    pub remote_download: bool,
}

impl Config {
    /// Load configuration from the process environment
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Load configuration through an arbitrary key lookup.
    /// Empty values are treated the same as missing ones.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());
        let or = |key: &str, default: &str| get(key).unwrap_or_else(|| default.to_string());

        Self {
            feed_url: or("FEED_URL", DEFAULT_FEED_URL),
            parameter_name: or("PARAMETER_NAME", DEFAULT_PARAMETER_NAME),
            parameter_db_path: get("PARAMETER_DB_PATH")
                .map(PathBuf::from)
                .unwrap_or_else(db_path),
            notification_url: get("NOTIFICATION_URL"),
            notification_topic: or("NOTIFICATION_TOPIC", DEFAULT_NOTIFICATION_TOPIC),
            bucket_name: or("BUCKET_NAME", DEFAULT_BUCKET_NAME),
            object_store_url: get("OBJECT_STORE_URL"),
            worker_id: get("WORKER_ID"),
            dispatch_url: get("DISPATCH_URL"),
            download_command: or("DOWNLOAD_COMMAND", DEFAULT_DOWNLOAD_COMMAND),
            schedule_expression: or("SCHEDULE_EXPRESSION", DEFAULT_SCHEDULE_EXPRESSION),
            email_address: get("EMAIL_ADDRESS").unwrap_or_default(),
            check_interval_secs: get("CHECK_INTERVAL_SECS")
                .and_then(|v| v.trim().parse::<u64>().ok())
                .filter(|secs| *secs > 0)
                .unwrap_or(DEFAULT_CHECK_INTERVAL_SECS),
            log_format: match get("LOG_FORMAT").as_deref() {
                Some("json") => LogFormat::Json,
                _ => LogFormat::Text,
            },
        }
    }

    /// Worker id and dispatch endpoint, when both are set
    pub fn remote_worker(&self) -> Option<(&str, &str)> {
        self.worker_id.as_deref().zip(self.dispatch_url.as_deref())
    }

    pub fn capabilities(&self) -> Capabilities {
        Capabilities {
            object_store_check: self.object_store_url.is_some(),
            remote_download: self.remote_worker().is_some(),
        }
    }
}

/// Returns the path to the data directory for xcode-watch.
/// Uses $XDG_DATA_HOME/xcode-watch if XDG_DATA_HOME is set,
/// otherwise falls back to ~/.local/share/xcode-watch,
/// or ./xcode-watch if neither is available.
pub fn data_dir() -> PathBuf {
    data_dir_with_env(std::env::var("XDG_DATA_HOME").ok(), dirs::home_dir())
}

/// Returns the path to the parameter database file.
pub fn db_path() -> PathBuf {
    data_dir().join("parameters.db")
}

fn data_dir_with_env(xdg_data_home: Option<String>, home_dir: Option<PathBuf>) -> PathBuf {
    let data_dir = xdg_data_home
        .map(PathBuf::from)
        .or_else(|| home_dir.map(|home| home.join(".local/share")))
        .unwrap_or_else(|| PathBuf::from("."));

    data_dir.join("xcode-watch")
}
