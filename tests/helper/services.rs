//! In-memory collaborators for orchestrator tests

use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use serde_json::{Value, json};
use tempfile::TempDir;

use xcode_watch::artifact::{ObjectStore, ObjectStoreError};
use xcode_watch::check::{Orchestrator, OrchestratorSettings};
use xcode_watch::dispatch::{CommandDispatcher, DispatchError};
use xcode_watch::notify::{NotificationChannel, NotifyError, Notifier};
use xcode_watch::release::{FetchError, ReleaseFeed};
use xcode_watch::store::{ParameterStore, SqliteParameterStore, VersionStore};

pub const PARAMETER_NAME: &str = "/xcode/latest_version";

/// Feed entry pointing at a download URL
pub fn release(url: &str) -> Value {
    json!({
        "name": "Xcode",
        "date": { "year": 2024 },
        "links": { "download": { "url": url } }
    })
}

/// Feed that serves a fixed list of entries, or fails
pub struct FakeFeed {
    entries: Option<Vec<Value>>,
}

impl FakeFeed {
    pub fn with_entries(entries: Vec<Value>) -> Self {
        Self {
            entries: Some(entries),
        }
    }

    pub fn failing() -> Self {
        Self { entries: None }
    }
}

#[async_trait]
impl ReleaseFeed for FakeFeed {
    async fn fetch_releases(&self) -> Result<Vec<Value>, FetchError> {
        self.entries.clone().ok_or(FetchError::Timeout(30_000))
    }
}

/// Channel that records every published message
#[derive(Default)]
pub struct RecordingChannel {
    messages: Mutex<Vec<(String, String)>>,
    fail: bool,
}

impl RecordingChannel {
    pub fn failing() -> Self {
        Self {
            messages: Mutex::new(Vec::new()),
            fail: true,
        }
    }

    pub fn messages(&self) -> Vec<(String, String)> {
        self.messages.lock().unwrap().clone()
    }

    pub fn subjects(&self) -> Vec<String> {
        self.messages().into_iter().map(|(subject, _)| subject).collect()
    }
}

#[async_trait]
impl NotificationChannel for RecordingChannel {
    async fn publish(&self, subject: &str, message: &str) -> Result<(), NotifyError> {
        self.messages
            .lock()
            .unwrap()
            .push((subject.to_string(), message.to_string()));
        if self.fail {
            return Err(NotifyError::Rejected(500));
        }
        Ok(())
    }
}

/// Object store holding a fixed set of keys
#[derive(Default)]
pub struct FakeObjectStore {
    keys: Vec<String>,
}

impl FakeObjectStore {
    pub fn with_key(key: &str) -> Self {
        Self {
            keys: vec![key.to_string()],
        }
    }
}

#[async_trait]
impl ObjectStore for FakeObjectStore {
    async fn exists(&self, _bucket: &str, key: &str) -> Result<bool, ObjectStoreError> {
        Ok(self.keys.iter().any(|k| k == key))
    }
}

/// Dispatcher that records commands and answers with a fixed id, or fails
pub struct FakeDispatcher {
    command_id: Option<String>,
    sent: Mutex<Vec<(String, Vec<String>)>>,
}

impl FakeDispatcher {
    pub fn succeeding(command_id: &str) -> Self {
        Self {
            command_id: Some(command_id.to_string()),
            sent: Mutex::new(Vec::new()),
        }
    }

    pub fn failing() -> Self {
        Self {
            command_id: None,
            sent: Mutex::new(Vec::new()),
        }
    }

    pub fn sent(&self) -> Vec<(String, Vec<String>)> {
        self.sent.lock().unwrap().clone()
    }
}

#[async_trait]
impl CommandDispatcher for FakeDispatcher {
    async fn send_command(
        &self,
        target: &str,
        commands: Vec<String>,
        _comment: &str,
    ) -> Result<String, DispatchError> {
        self.sent
            .lock()
            .unwrap()
            .push((target.to_string(), commands));
        self.command_id
            .clone()
            .ok_or(DispatchError::Rejected(503))
    }
}

/// Parameter store in a temporary SQLite file, optionally seeded
pub fn create_test_store(seed: Option<&str>) -> (TempDir, Arc<SqliteParameterStore>) {
    let temp_dir = TempDir::new().unwrap();
    let db_path = temp_dir.path().join("parameters.db");
    let store = SqliteParameterStore::new(&db_path).unwrap();

    if let Some(value) = seed {
        store.put(PARAMETER_NAME, value, "seed").unwrap();
    }

    (temp_dir, Arc::new(store))
}

pub fn stored_version(store: &SqliteParameterStore) -> Option<String> {
    store.get(PARAMETER_NAME).unwrap()
}

pub fn settings() -> OrchestratorSettings {
    OrchestratorSettings {
        bucket_name: "xcode-downloads".to_string(),
        schedule_expression: "rate(1 day)".to_string(),
        email_address: "ops@example.com".to_string(),
    }
}

/// Orchestrator wired to a fake feed and a recording channel
pub fn create_test_orchestrator(
    feed: FakeFeed,
    store: Arc<SqliteParameterStore>,
    channel: Arc<RecordingChannel>,
) -> Orchestrator {
    Orchestrator::new(
        Arc::new(feed),
        VersionStore::new(store, PARAMETER_NAME),
        Notifier::new(channel),
        settings(),
    )
}
