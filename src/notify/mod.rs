//! Best-effort notifications
//!
//! # Modules
//!
//! - [`channel`]: Broadcast channel trait
//! - [`webhook`]: Webhook channel posting JSON messages
//! - [`notifier`]: Wrapper that never lets a failed send escape
//! - [`message`]: Subjects and bodies for each notification kind

pub mod channel;
pub mod message;
pub mod notifier;
pub mod webhook;

pub use channel::{NotificationChannel, NotifyError};
pub use notifier::Notifier;
pub use webhook::WebhookChannel;
