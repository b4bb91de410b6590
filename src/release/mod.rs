//! Release resolution for the Xcode release feed
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────┐     ┌─────────────┐     ┌──────────────────┐
//! │ ReleaseFeed │────▶│  Selector   │────▶│ ReleaseCandidate │
//! │  (fetch)    │     │ (filter)    │     │   (newest GA)    │
//! └─────────────┘     └─────────────┘     └──────────────────┘
//! ```
//!
//! # Modules
//!
//! - [`feed`]: Trait for fetching the raw release list
//! - [`xcode`]: HTTP implementation backed by xcodereleases.com
//! - [`selector`]: Picks the first stable entry in feed order
//! - [`types`]: `ReleaseCandidate`
//! - [`error`]: Fetch and resolution errors

pub mod error;
pub mod feed;
pub mod selector;
pub mod types;
pub mod xcode;

pub use error::{FetchError, ResolveError};
pub use feed::ReleaseFeed;
pub use selector::{ReleaseSelector, resolve_latest};
pub use types::ReleaseCandidate;
pub use xcode::XcodeReleasesFeed;
