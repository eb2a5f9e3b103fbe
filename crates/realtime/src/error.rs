//! Realtime error types.

use thiserror::Error;

/// Errors that can occur while setting up or feeding the fan-out.
#[derive(Debug, Error)]
pub enum RealtimeError {
    /// The change feed could not be opened.
    #[error("Change feed error: {0}")]
    Store(#[from] sample_store::StoreError),

    /// A change event could not be encoded.
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// Result type for realtime operations.
pub type Result<T> = std::result::Result<T, RealtimeError>;
