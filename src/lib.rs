//! Watches the Xcode release feed and announces new stable builds.
//!
//! # Modules
//!
//! - [`check`]: Orchestrates one version check and its scheduling
//! - [`release`]: Fetches the feed and picks the newest stable release
//! - [`store`]: Persists the last announced version
//! - [`notify`]: Best-effort notifications
//! - [`artifact`]: Looks up already uploaded archives
//! - [`dispatch`]: Requests downloads on a remote worker
//! - [`config`]: Environment configuration and constants
//! - [`logging`]: Tracing subscriber setup

pub mod artifact;
pub mod check;
pub mod config;
pub mod dispatch;
pub mod logging;
pub mod notify;
pub mod release;
pub mod store;
