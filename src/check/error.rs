use thiserror::Error;

use crate::release::ResolveError;
use crate::store::StoreError;

/// Failures that abort a check and produce an error response
#[derive(Debug, Error)]
pub enum CheckError {
    #[error(transparent)]
    Resolve(#[from] ResolveError),

    #[error("Parameter store error: {0}")]
    Store(#[from] StoreError),

    #[error("Unexpected failure: {0}")]
    Unexpected(String),
}
