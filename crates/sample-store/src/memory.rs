use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::{RwLock, broadcast};

use crate::{
    ChangeEvent, ChangeFilter, NewSample, Result, SAMPLE_TABLE, Sample, SampleId, StoreError,
    store::{ChangeFeed, ChangeStream, SampleStore},
};

/// Number of pending change events a feed subscriber may fall behind by
/// before it starts skipping.
const CHANGE_CHANNEL_CAPACITY: usize = 1024;

#[derive(Debug)]
struct MemoryState {
    rows: Vec<Sample>,
    next_id: SampleId,
}

impl Default for MemoryState {
    fn default() -> Self {
        Self {
            rows: Vec::new(),
            next_id: SampleId::new(1),
        }
    }
}

/// In-memory sample store with a built-in change feed.
///
/// Used by tests and by the server when no database is configured. Every
/// mutation publishes per-row change events the same way the PostgreSQL
/// trigger does.
#[derive(Clone)]
pub struct InMemorySampleStore {
    state: Arc<RwLock<MemoryState>>,
    changes: broadcast::Sender<ChangeEvent>,
}

impl InMemorySampleStore {
    /// Creates a new empty in-memory store.
    pub fn new() -> Self {
        let (changes, _) = broadcast::channel(CHANGE_CHANNEL_CAPACITY);
        Self {
            state: Arc::new(RwLock::new(MemoryState::default())),
            changes,
        }
    }

    /// Returns the number of stored samples.
    pub async fn len(&self) -> usize {
        self.state.read().await.rows.len()
    }

    /// Returns true if the store holds no samples.
    pub async fn is_empty(&self) -> bool {
        self.state.read().await.rows.is_empty()
    }

    /// Replaces an existing row, as an external writer would.
    ///
    /// Returns the previous row, or None if no row has that identifier.
    pub async fn update(&self, row: Sample) -> Option<Sample> {
        let mut state = self.state.write().await;
        let slot = state
            .rows
            .iter_mut()
            .find(|existing| existing.sample_id == row.sample_id)?;
        let old = std::mem::replace(slot, row.clone());
        self.publish(ChangeEvent::updated(old.clone(), row));
        Some(old)
    }

    /// Deletes a single row, as an external writer would.
    pub async fn delete(&self, sample_id: SampleId) -> Option<Sample> {
        let mut state = self.state.write().await;
        let index = state.rows.iter().position(|r| r.sample_id == sample_id)?;
        let removed = state.rows.remove(index);
        self.publish(ChangeEvent::deleted(removed.clone()));
        Some(removed)
    }

    // Called with the state lock held so feed order equals commit order.
    fn publish(&self, event: ChangeEvent) {
        // send only fails when nobody is subscribed
        let _ = self.changes.send(event);
    }
}

impl Default for InMemorySampleStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl SampleStore for InMemorySampleStore {
    async fn select_all(&self) -> Result<Vec<Sample>> {
        Ok(self.state.read().await.rows.clone())
    }

    async fn delete_all(&self) -> Result<u64> {
        let mut state = self.state.write().await;
        let removed: Vec<Sample> = state.rows.drain(..).collect();
        let count = removed.len() as u64;
        for row in removed {
            self.publish(ChangeEvent::deleted(row));
        }
        Ok(count)
    }

    async fn insert_batch(&self, rows: Vec<NewSample>) -> Result<Vec<Sample>> {
        let mut state = self.state.write().await;
        let mut inserted = Vec::with_capacity(rows.len());
        for new_row in rows {
            let sample_id = state.next_id;
            state.next_id = sample_id.next();
            let row = new_row.with_id(sample_id);
            state.rows.push(row.clone());
            self.publish(ChangeEvent::inserted(row.clone()));
            inserted.push(row);
        }
        Ok(inserted)
    }
}

#[async_trait]
impl ChangeFeed for InMemorySampleStore {
    async fn subscribe(&self, filter: ChangeFilter) -> Result<ChangeStream> {
        use futures_util::stream;
        use tokio::sync::broadcast::error::RecvError;

        if filter.table != SAMPLE_TABLE {
            return Err(StoreError::UnknownTable(filter.table));
        }

        let receiver = self.changes.subscribe();
        let stream = stream::unfold((receiver, filter), |(mut receiver, filter)| async move {
            loop {
                match receiver.recv().await {
                    Ok(event) if filter.matches(&event) => {
                        return Some((Ok(event), (receiver, filter)));
                    }
                    Ok(_) => continue,
                    Err(RecvError::Lagged(skipped)) => {
                        tracing::warn!(skipped, "change feed subscriber lagged, skipping ahead");
                    }
                    Err(RecvError::Closed) => return None,
                }
            }
        });

        Ok(Box::pin(stream))
    }
}
