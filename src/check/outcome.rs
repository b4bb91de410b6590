//! Invocation input and output

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

/// Input of one invocation
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct InvocationEvent {
    /// Resend the setup notification instead of comparing versions.
    /// Any truthy JSON value enables it.
    #[serde(deserialize_with = "truthy")]
    pub send_setup_notification: bool,
}

fn truthy<'de, D>(deserializer: D) -> Result<bool, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Value::deserialize(deserializer)? {
        Value::Null => false,
        Value::Bool(flag) => flag,
        Value::Number(n) => n.as_f64().is_some_and(|n| n != 0.0),
        Value::String(s) => !s.is_empty(),
        Value::Array(items) => !items.is_empty(),
        Value::Object(fields) => !fields.is_empty(),
    })
}

/// Result of one check, tagged by `status`
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum CheckOutcome {
    InitialSetup {
        initial_version: String,
    },
    SetupNotificationSent {
        current_version: String,
    },
    NoUpdate {
        current_version: String,
    },
    AlreadyDownloaded {
        version: String,
        object_location: String,
    },
    Updated {
        previous_version: String,
        new_version: String,
        download_url: String,
        release_year: String,
        display_name: String,
        timestamp: String,
    },
    DownloadInitiated {
        previous_version: String,
        new_version: String,
        download_url: String,
        object_location: String,
        command_id: Option<String>,
        timestamp: String,
    },
    Error {
        message: String,
        timestamp: String,
    },
}

impl CheckOutcome {
    /// HTTP-style status code: 500 for errors, 200 for every handled outcome
    pub fn status_code(&self) -> u16 {
        match self {
            CheckOutcome::Error { .. } => 500,
            _ => 200,
        }
    }

    pub fn status(&self) -> &'static str {
        match self {
            CheckOutcome::InitialSetup { .. } => "initial_setup",
            CheckOutcome::SetupNotificationSent { .. } => "setup_notification_sent",
            CheckOutcome::NoUpdate { .. } => "no_update",
            CheckOutcome::AlreadyDownloaded { .. } => "already_downloaded",
            CheckOutcome::Updated { .. } => "updated",
            CheckOutcome::DownloadInitiated { .. } => "download_initiated",
            CheckOutcome::Error { .. } => "error",
        }
    }
}

/// Output of one invocation
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct InvocationResponse {
    pub status_code: u16,
    #[serde(flatten)]
    pub outcome: CheckOutcome,
}

impl InvocationResponse {
    pub fn is_success(&self) -> bool {
        self.status_code == 200
    }
}

impl From<CheckOutcome> for InvocationResponse {
    fn from(outcome: CheckOutcome) -> Self {
        Self {
            status_code: outcome.status_code(),
            outcome,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn invocation_event_defaults_when_flag_missing() {
        let event: InvocationEvent = serde_json::from_value(json!({ "source": "schedule" })).unwrap();

        assert_eq!(event, InvocationEvent::default());
    }

    #[test]
    fn invocation_event_reads_setup_flag() {
        let event: InvocationEvent =
            serde_json::from_value(json!({ "send_setup_notification": true })).unwrap();

        assert!(event.send_setup_notification);
    }

    #[rstest::rstest]
    #[case(json!(true), true)]
    #[case(json!(false), false)]
    #[case(json!(null), false)]
    #[case(json!("yes"), true)]
    #[case(json!(""), false)]
    #[case(json!(1), true)]
    #[case(json!(0), false)]
    #[case(json!([]), false)]
    #[case(json!({ "resend": true }), true)]
    fn invocation_event_accepts_any_truthy_setup_flag(#[case] flag: Value, #[case] expected: bool) {
        let event: InvocationEvent =
            serde_json::from_value(json!({ "send_setup_notification": flag })).unwrap();

        assert_eq!(event.send_setup_notification, expected);
    }

    #[test]
    fn response_flattens_outcome_fields() {
        let response = InvocationResponse::from(CheckOutcome::DownloadInitiated {
            previous_version: "15.0".to_string(),
            new_version: "15.1".to_string(),
            download_url: "https://example.com/Xcode_15.1.xip".to_string(),
            object_location: "s3://xcode-downloads/xcode-15.1.xip".to_string(),
            command_id: None,
            timestamp: "2024-10-28T00:00:00+00:00".to_string(),
        });

        assert_eq!(
            serde_json::to_value(&response).unwrap(),
            json!({
                "statusCode": 200,
                "status": "download_initiated",
                "previous_version": "15.0",
                "new_version": "15.1",
                "download_url": "https://example.com/Xcode_15.1.xip",
                "object_location": "s3://xcode-downloads/xcode-15.1.xip",
                "command_id": null,
                "timestamp": "2024-10-28T00:00:00+00:00"
            })
        );
    }

    #[test]
    fn error_outcome_maps_to_500() {
        let response = InvocationResponse::from(CheckOutcome::Error {
            message: "boom".to_string(),
            timestamp: "now".to_string(),
        });

        assert_eq!(response.status_code, 500);
        assert!(!response.is_success());
        assert_eq!(
            serde_json::to_value(&response).unwrap(),
            json!({ "statusCode": 500, "status": "error", "message": "boom", "timestamp": "now" })
        );
    }

    #[test]
    fn status_matches_serialized_tag() {
        let outcome = CheckOutcome::NoUpdate {
            current_version: "16.1".to_string(),
        };

        let value = serde_json::to_value(&outcome).unwrap();

        assert_eq!(value["status"], outcome.status());
        assert_eq!(outcome.status_code(), 200);
    }
}
