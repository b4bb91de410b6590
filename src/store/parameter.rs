//! Parameter store trait

#[cfg(test)]
use mockall::automock;

use crate::store::error::StoreError;

/// Named string parameters with atomic overwrite
#[cfg_attr(test, automock)]
pub trait ParameterStore: Send + Sync {
    /// Get the value of a parameter, `None` if it has never been written
    fn get(&self, name: &str) -> Result<Option<String>, StoreError>;

    /// Create or overwrite a parameter
    fn put(&self, name: &str, value: &str, description: &str) -> Result<(), StoreError>;
}
