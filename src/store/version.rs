//! Accessor for the recorded version

use std::sync::Arc;

use tracing::{debug, info};

use crate::store::error::StoreError;
use crate::store::parameter::ParameterStore;

/// Value meaning "no version recorded yet"
pub const INITIAL_SENTINEL: &str = "initial";

/// Reads and writes the last announced version under a fixed parameter name
#[derive(Clone)]
pub struct VersionStore {
    store: Arc<dyn ParameterStore>,
    parameter_name: String,
}

impl VersionStore {
    pub fn new(store: Arc<dyn ParameterStore>, parameter_name: impl Into<String>) -> Self {
        Self {
            store,
            parameter_name: parameter_name.into(),
        }
    }

    pub fn parameter_name(&self) -> &str {
        &self.parameter_name
    }

    /// Get the recorded version.
    ///
    /// Returns `None` on the first run: either the parameter is missing or it
    /// still holds the `"initial"` sentinel.
    pub fn read(&self) -> Result<Option<String>, StoreError> {
        let value = self.store.get(&self.parameter_name)?;
        debug!("Stored version parameter {}: {:?}", self.parameter_name, value);

        Ok(value.filter(|v| v != INITIAL_SENTINEL))
    }

    /// Overwrite the recorded version
    pub fn write(&self, version: &str) -> Result<(), StoreError> {
        let description = format!(
            "Latest Xcode version - Updated on {}",
            chrono::Utc::now().to_rfc3339()
        );
        self.store.put(&self.parameter_name, version, &description)?;

        info!("Recorded Xcode version {}", version);
        Ok(())
    }

    /// Put the sentinel back so the next check runs the first-time setup
    pub fn reset(&self) -> Result<(), StoreError> {
        self.store.put(
            &self.parameter_name,
            INITIAL_SENTINEL,
            "Latest Xcode version - awaiting initial check",
        )?;

        info!("Reset {} to {}", self.parameter_name, INITIAL_SENTINEL);
        Ok(())
    }
}
