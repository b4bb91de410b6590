//! Runs one version check against its collaborators

use std::any::Any;
use std::panic::AssertUnwindSafe;
use std::sync::Arc;

use futures::FutureExt;
use tracing::{error, info, warn};

use crate::artifact::{HttpObjectStore, ObjectStore, object_key, object_location};
use crate::check::decision::{Transition, decide};
use crate::check::error::CheckError;
use crate::check::outcome::{CheckOutcome, InvocationEvent, InvocationResponse};
use crate::config::{Capabilities, Config};
use crate::dispatch::{CommandDispatcher, DownloadCommand, HttpCommandDispatcher, trigger_download};
use crate::notify::message::{self, DownloadDetails};
use crate::notify::{Notifier, WebhookChannel};
use crate::release::{
    ReleaseCandidate, ReleaseFeed, ReleaseSelector, XcodeReleasesFeed, resolve_latest,
};
use crate::store::VersionStore;

/// Values that only shape messages and object locations
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OrchestratorSettings {
    pub bucket_name: String,
    pub schedule_expression: String,
    pub email_address: String,
}

impl From<&Config> for OrchestratorSettings {
    fn from(config: &Config) -> Self {
        Self {
            bucket_name: config.bucket_name.clone(),
            schedule_expression: config.schedule_expression.clone(),
            email_address: config.email_address.clone(),
        }
    }
}

struct RemoteDownload {
    dispatcher: Arc<dyn CommandDispatcher>,
    worker_id: String,
    command: DownloadCommand,
}

/// Checks the release feed and announces new versions.
///
/// Collaborators are injected at startup and live as long as the process.
/// The artifact check and the remote download are optional capabilities,
/// enabled with [`Orchestrator::with_artifact_check`] and
/// [`Orchestrator::with_remote_download`].
pub struct Orchestrator {
    feed: Arc<dyn ReleaseFeed>,
    selector: ReleaseSelector,
    versions: VersionStore,
    notifier: Notifier,
    settings: OrchestratorSettings,
    artifacts: Option<Arc<dyn ObjectStore>>,
    remote: Option<RemoteDownload>,
}

impl Orchestrator {
    pub fn new(
        feed: Arc<dyn ReleaseFeed>,
        versions: VersionStore,
        notifier: Notifier,
        settings: OrchestratorSettings,
    ) -> Self {
        Self {
            feed,
            selector: ReleaseSelector::new(),
            versions,
            notifier,
            settings,
            artifacts: None,
            remote: None,
        }
    }

    /// Wire the HTTP-backed collaborators described by `config`
    pub fn from_config(config: &Config, versions: VersionStore) -> Self {
        let notifier = match &config.notification_url {
            Some(url) => Notifier::new(Arc::new(WebhookChannel::new(
                url,
                &config.notification_topic,
            ))),
            None => Notifier::disabled(),
        };
        let notifications = notifier.is_enabled();

        let mut orchestrator = Self::new(
            Arc::new(XcodeReleasesFeed::new(&config.feed_url)),
            versions,
            notifier,
            OrchestratorSettings::from(config),
        );

        if let Some(url) = &config.object_store_url {
            orchestrator = orchestrator.with_artifact_check(Arc::new(HttpObjectStore::new(url)));
        }

        if let Some((worker_id, url)) = config.remote_worker() {
            orchestrator = orchestrator.with_remote_download(
                Arc::new(HttpCommandDispatcher::new(url)),
                worker_id,
                DownloadCommand::new(&config.download_command),
            );
        }

        info!(
            feed_url = %config.feed_url,
            parameter = %config.parameter_name,
            notifications,
            capabilities = ?orchestrator.capabilities(),
            "Orchestrator configured"
        );

        orchestrator
    }

    /// Skip the download when the archive is already in the object store
    pub fn with_artifact_check(mut self, store: Arc<dyn ObjectStore>) -> Self {
        self.artifacts = Some(store);
        self
    }

    /// Ask a remote worker to download each new version
    pub fn with_remote_download(
        mut self,
        dispatcher: Arc<dyn CommandDispatcher>,
        worker_id: impl Into<String>,
        command: DownloadCommand,
    ) -> Self {
        self.remote = Some(RemoteDownload {
            dispatcher,
            worker_id: worker_id.into(),
            command,
        });
        self
    }

    pub fn capabilities(&self) -> Capabilities {
        Capabilities {
            object_store_check: self.artifacts.is_some(),
            remote_download: self.remote.is_some(),
        }
    }

    /// Run one check. Never fails: errors become a 500 response after a
    /// best-effort failure notification.
    pub async fn run(&self, event: &InvocationEvent) -> InvocationResponse {
        let result = AssertUnwindSafe(self.check(event))
            .catch_unwind()
            .await
            .unwrap_or_else(|panic| Err(CheckError::Unexpected(panic_message(&*panic))));

        match result {
            Ok(outcome) => outcome.into(),
            Err(e) => {
                error!("Error checking Xcode version: {}", e);

                let timestamp = now();
                let failure = message::failure(&e.to_string(), &timestamp);
                self.notifier.notify(&failure.subject, &failure.body).await;

                CheckOutcome::Error {
                    message: e.to_string(),
                    timestamp,
                }
                .into()
            }
        }
    }

    /// Run one check, returning the error that aborted it
    pub async fn check(&self, event: &InvocationEvent) -> Result<CheckOutcome, CheckError> {
        info!("Starting Xcode version check at {}", now());

        let latest = resolve_latest(self.feed.as_ref(), &self.selector).await?;
        let stored = self.versions.read()?;
        info!("Current stored version: {:?}", stored);

        match decide(stored.as_deref(), &latest.version, event) {
            Transition::InitialSetup => {
                info!("No version recorded, running initial setup");
                self.versions.write(&latest.version)?;
                self.send_setup(&latest.version).await;

                Ok(CheckOutcome::InitialSetup {
                    initial_version: latest.version,
                })
            }
            Transition::ResendSetup { current_version } => {
                info!("Resending setup notification");
                self.send_setup(&current_version).await;

                Ok(CheckOutcome::SetupNotificationSent { current_version })
            }
            Transition::NoUpdate { current_version } => {
                info!(
                    "No update required. Current version {} is latest.",
                    current_version
                );

                Ok(CheckOutcome::NoUpdate { current_version })
            }
            Transition::Update { previous_version } => {
                info!("New version detected: {}", latest.version);
                self.apply_update(previous_version, latest).await
            }
        }
    }

    async fn apply_update(
        &self,
        previous_version: String,
        latest: ReleaseCandidate,
    ) -> Result<CheckOutcome, CheckError> {
        let key = object_key(&latest.version);
        let location = object_location(&self.settings.bucket_name, &key);

        if self.artifact_exists(&key).await {
            info!("Version {} already exists at {}", latest.version, location);
            self.versions.write(&latest.version)?;

            return Ok(CheckOutcome::AlreadyDownloaded {
                version: latest.version,
                object_location: location,
            });
        }

        let Some(remote) = &self.remote else {
            self.versions.write(&latest.version)?;

            let update = message::update(&previous_version, &latest, None);
            self.notifier.notify(&update.subject, &update.body).await;

            return Ok(CheckOutcome::Updated {
                previous_version,
                new_version: latest.version,
                download_url: latest.download_url,
                release_year: latest.release_year,
                display_name: latest.display_name,
                timestamp: now(),
            });
        };

        let command_id = trigger_download(
            remote.dispatcher.as_ref(),
            &remote.worker_id,
            &remote.command,
            &latest.download_url,
            &latest.version,
        )
        .await;

        self.versions.write(&latest.version)?;

        let details = DownloadDetails {
            object_location: Some(location.clone()),
            command_id: command_id.clone(),
        };
        let update = message::update(&previous_version, &latest, Some(&details));
        self.notifier.notify(&update.subject, &update.body).await;

        Ok(CheckOutcome::DownloadInitiated {
            previous_version,
            new_version: latest.version,
            download_url: latest.download_url,
            object_location: location,
            command_id,
            timestamp: now(),
        })
    }

    /// A failing lookup counts as "not uploaded yet"
    async fn artifact_exists(&self, key: &str) -> bool {
        let Some(store) = &self.artifacts else {
            return false;
        };

        store
            .exists(&self.settings.bucket_name, key)
            .await
            .inspect_err(|e| warn!("Failed to check object {}: {}", key, e))
            .unwrap_or(false)
    }

    async fn send_setup(&self, current_version: &str) {
        let setup = message::setup(
            current_version,
            &self.settings.schedule_expression,
            &self.settings.email_address,
        );
        self.notifier.notify(&setup.subject, &setup.body).await;
    }
}

fn now() -> String {
    chrono::Utc::now().to_rfc3339()
}

fn panic_message(panic: &(dyn Any + Send)) -> String {
    panic
        .downcast_ref::<&str>()
        .map(|s| s.to_string())
        .or_else(|| panic.downcast_ref::<String>().cloned())
        .unwrap_or_else(|| "panic with non-string payload".to_string())
}
