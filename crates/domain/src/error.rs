//! Domain error types.

use sample_store::StoreError;
use thiserror::Error;

/// Errors that can occur during domain operations.
#[derive(Debug, Error)]
pub enum DomainError {
    /// An error occurred in the sample store.
    #[error("Sample store error: {0}")]
    Store(#[from] StoreError),

    /// A simulation request body could not be decoded.
    #[error("Invalid simulation request: {0}")]
    InvalidRequest(#[from] serde_json::Error),
}
