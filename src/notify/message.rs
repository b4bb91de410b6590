//! Notification subjects and bodies

use crate::release::ReleaseCandidate;

pub const SETUP_SUBJECT: &str = "Xcode Version Monitor Active";
pub const FAILURE_SUBJECT: &str = "Xcode Version Check Failed";

/// A rendered notification
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Message {
    pub subject: String,
    pub body: String,
}

/// Confirmation sent on the first run and on a manual resend
pub fn setup(current_version: &str, schedule: &str, email: &str) -> Message {
    let recipient = if email.is_empty() {
        "this channel".to_string()
    } else {
        email.to_string()
    };

    Message {
        subject: SETUP_SUBJECT.to_string(),
        body: format!(
            "Xcode version monitoring is set up.\n\
             \n\
             Current Version: {current_version}\n\
             Check Schedule: {schedule}\n\
             \n\
             Notifications about new stable Xcode releases will be sent to {recipient}.\n"
        ),
    }
}

/// Where the new build ends up and how its download was requested
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DownloadDetails {
    pub object_location: Option<String>,
    pub command_id: Option<String>,
}

/// Announcement of a version different from the recorded one
pub fn update(
    previous_version: &str,
    latest: &ReleaseCandidate,
    download: Option<&DownloadDetails>,
) -> Message {
    let subject = format!("New Xcode Version Available: {}", latest.version);

    let mut body = match download {
        Some(_) => "New Xcode version detected and download initiated!\n".to_string(),
        None => "New Xcode version detected!\n".to_string(),
    };
    body.push_str(&format!(
        "\nPrevious Version: {}\nNew Version: {}\nDownload URL: {}\n",
        previous_version, latest.version, latest.download_url
    ));

    match download {
        Some(details) => {
            if let Some(location) = &details.object_location {
                body.push_str(&format!("Object Location: {}\n", location));
            }
            body.push_str(&format!(
                "Command ID: {}\n",
                details.command_id.as_deref().unwrap_or("N/A")
            ));
            body.push_str(
                "\nThe download has been requested on the remote worker.\n\
                 You'll receive another notification once the download is complete.\n",
            );
        }
        None => {
            body.push_str(&format!(
                "Release: {} ({})\n",
                latest.display_name, latest.release_year
            ));
        }
    }

    Message { subject, body }
}

/// Report of a check that could not complete
pub fn failure(error: &str, timestamp: &str) -> Message {
    Message {
        subject: FAILURE_SUBJECT.to_string(),
        body: format!("Error checking Xcode version: {error}\n\nTimestamp: {timestamp}"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn candidate() -> ReleaseCandidate {
        ReleaseCandidate {
            version: "15.1".to_string(),
            download_url: "https://example.com/Xcode_15.1.xip".to_string(),
            release_year: "2023".to_string(),
            display_name: "Xcode".to_string(),
        }
    }

    #[test]
    fn setup_mentions_version_schedule_and_contact() {
        let message = setup("16.1", "rate(1 day)", "ops@example.com");

        assert_eq!(message.subject, SETUP_SUBJECT);
        assert!(message.body.contains("Current Version: 16.1"));
        assert!(message.body.contains("rate(1 day)"));
        assert!(message.body.contains("ops@example.com"));
    }

    #[test]
    fn setup_without_email_names_the_channel() {
        let message = setup("16.1", "rate(1 day)", "");

        assert!(message.body.contains("sent to this channel"));
    }

    #[test]
    fn update_without_download_lists_release_metadata() {
        let message = update("15.0", &candidate(), None);

        assert_eq!(message.subject, "New Xcode Version Available: 15.1");
        assert!(message.body.contains("Previous Version: 15.0"));
        assert!(message.body.contains("New Version: 15.1"));
        assert!(message.body.contains("https://example.com/Xcode_15.1.xip"));
        assert!(message.body.contains("Release: Xcode (2023)"));
        assert!(!message.body.contains("Command ID"));
    }

    #[test]
    fn update_with_download_lists_command_and_location() {
        let details = DownloadDetails {
            object_location: Some("s3://xcode-downloads/xcode-15.1.xip".to_string()),
            command_id: None,
        };

        let message = update("15.0", &candidate(), Some(&details));

        assert!(message.body.starts_with("New Xcode version detected and download initiated!"));
        assert!(message.body.contains("Object Location: s3://xcode-downloads/xcode-15.1.xip"));
        assert!(message.body.contains("Command ID: N/A"));
    }

    #[test]
    fn failure_includes_error_and_timestamp() {
        let message = failure("feed unreachable", "2024-10-28T00:00:00+00:00");

        assert_eq!(message.subject, FAILURE_SUBJECT);
        assert_eq!(
            message.body,
            "Error checking Xcode version: feed unreachable\n\nTimestamp: 2024-10-28T00:00:00+00:00"
        );
    }
}
