use std::pin::Pin;

use async_trait::async_trait;
use futures_core::Stream;

use crate::{ChangeEvent, ChangeFilter, NewSample, Result, Sample};

/// A stream of committed changes.
pub type ChangeStream = Pin<Box<dyn Stream<Item = Result<ChangeEvent>> + Send>>;

/// Query and insert access to the sample table.
///
/// All implementations must be thread-safe (Send + Sync).
#[async_trait]
pub trait SampleStore: Send + Sync {
    /// Returns every sample, ordered by identifier (insertion order).
    async fn select_all(&self) -> Result<Vec<Sample>>;

    /// Removes every sample and returns the number of rows deleted.
    async fn delete_all(&self) -> Result<u64>;

    /// Inserts a batch of rows atomically and returns them with their
    /// assigned identifiers. An empty batch is a no-op.
    async fn insert_batch(&self, rows: Vec<NewSample>) -> Result<Vec<Sample>>;
}

/// Source of row-level change notifications.
#[async_trait]
pub trait ChangeFeed: Send + Sync {
    /// Opens a subscription delivering every committed change matching
    /// `filter`, in commit order.
    async fn subscribe(&self, filter: ChangeFilter) -> Result<ChangeStream>;
}
