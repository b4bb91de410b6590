//! Persistence of the last announced version
//!
//! # Modules
//!
//! - [`parameter`]: Key/value parameter store trait
//! - [`sqlite`]: SQLite-backed parameter store
//! - [`version`]: Version record accessor on top of a parameter store
//! - [`error`]: Store errors

pub mod error;
pub mod parameter;
pub mod sqlite;
pub mod version;

pub use error::StoreError;
pub use parameter::ParameterStore;
pub use sqlite::SqliteParameterStore;
pub use version::{INITIAL_SENTINEL, VersionStore};
