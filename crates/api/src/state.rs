//! Shared application state.

use std::sync::Arc;

use domain::{SampleCatalog, Simulator};
use realtime::{FeedSubscription, NotificationHub};
use sample_store::{ChangeFeed, SampleStore};

/// State shared by every handler.
///
/// `catalog` is `None` when no sample store handle could be established;
/// listing pages then degrade to empty results and the realtime endpoint
/// refuses connections.
pub struct AppState<S: SampleStore + ChangeFeed> {
    pub catalog: Option<SampleCatalog<S>>,
    pub hub: Arc<NotificationHub>,
    pub feed: FeedSubscription,
    pub simulator: Simulator,
}

impl<S: SampleStore + ChangeFeed> AppState<S> {
    /// Creates state backed by `store`.
    pub fn new(store: S, simulator: Simulator) -> Self {
        Self::from_parts(Some(SampleCatalog::new(store)), simulator)
    }

    /// Creates state with no sample store.
    pub fn without_store(simulator: Simulator) -> Self {
        Self::from_parts(None, simulator)
    }

    fn from_parts(catalog: Option<SampleCatalog<S>>, simulator: Simulator) -> Self {
        Self {
            catalog,
            hub: Arc::new(NotificationHub::new()),
            feed: FeedSubscription::new(),
            simulator,
        }
    }

    /// Returns the store handle, if one was established.
    pub fn store(&self) -> Option<&S> {
        self.catalog.as_ref().map(SampleCatalog::store)
    }

    /// Subscribes the hub to the store's change feed if that has not
    /// happened yet. Does nothing without a store.
    pub async fn ensure_feed(&self) -> Result<(), realtime::RealtimeError> {
        match self.store() {
            Some(store) => self.feed.ensure_initialized(store, &self.hub).await,
            None => Ok(()),
        }
    }
}
