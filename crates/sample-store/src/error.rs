use thiserror::Error;

/// Errors that can occur when interacting with the sample store or its change feed.
#[derive(Debug, Error)]
pub enum StoreError {
    /// A database error occurred.
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    /// A database migration error occurred.
    #[error("Migration error: {0}")]
    Migration(#[from] sqlx::migrate::MigrateError),

    /// A change notification payload could not be decoded.
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// A change feed subscription named a table this store does not publish.
    #[error("No change feed for table: {0}")]
    UnknownTable(String),
}

/// Result type for sample store operations.
pub type Result<T> = std::result::Result<T, StoreError>;
