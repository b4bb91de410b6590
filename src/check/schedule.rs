//! Periodic execution of the version check

use std::future::Future;
use std::time::Duration;

use tokio::time::{MissedTickBehavior, interval};
use tracing::{info, warn};

use crate::check::orchestrator::Orchestrator;
use crate::check::outcome::InvocationEvent;

/// Run a check every `period` until `shutdown` resolves.
///
/// The first check runs immediately. Checks never overlap: a slow check
/// delays the next tick instead of queueing extra runs. Returns the number of
/// checks that were run.
pub async fn run_scheduled<F>(orchestrator: &Orchestrator, period: Duration, shutdown: F) -> u64
where
    F: Future<Output = ()>,
{
    let mut ticker = interval(period);
    ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
    tokio::pin!(shutdown);

    info!("Checking for new Xcode versions every {:?}", period);

    let mut runs = 0;
    loop {
        tokio::select! {
            _ = &mut shutdown => {
                info!("Stopping scheduled checks after {} runs", runs);
                return runs;
            }
            _ = ticker.tick() => {
                let response = orchestrator.run(&InvocationEvent::default()).await;
                runs += 1;

                if response.is_success() {
                    info!("Scheduled check finished: {}", response.outcome.status());
                } else {
                    warn!("Scheduled check failed: {:?}", response.outcome);
                }
            }
        }
    }
}
