//! Transition logic for a single check

use crate::check::outcome::InvocationEvent;

/// What a check has to do, given the recorded and the latest version
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Transition {
    /// Nothing recorded yet: record the latest version and send the setup notification
    InitialSetup,
    /// Manual request to resend the setup notification
    ResendSetup { current_version: String },
    /// Recorded version is the latest
    NoUpdate { current_version: String },
    /// A different version was published
    Update { previous_version: String },
}

/// Decide the transition for a check.
///
/// Versions are compared as exact strings: `"14.2"` and `"14.2.0"` are
/// different versions.
pub fn decide(stored: Option<&str>, latest_version: &str, event: &InvocationEvent) -> Transition {
    let Some(stored) = stored else {
        return Transition::InitialSetup;
    };

    if event.send_setup_notification {
        return Transition::ResendSetup {
            current_version: stored.to_string(),
        };
    }

    if stored == latest_version {
        return Transition::NoUpdate {
            current_version: stored.to_string(),
        };
    }

    Transition::Update {
        previous_version: stored.to_string(),
    }
}
