//! One-time bridge from a change feed into the notification hub.

use std::sync::Arc;

use futures_util::StreamExt;
use sample_store::{ChangeFeed, ChangeFilter, ChangeStream};
use tokio::sync::OnceCell;
use tokio::task::JoinHandle;

use crate::{NotificationHub, Result};

/// Ensures at most one live feed subscription per process.
///
/// The first successful [`ensure_initialized`](Self::ensure_initialized)
/// subscribes to every change kind on the sample table and spawns a task
/// forwarding each event to the hub. Later and concurrent calls are no-ops.
/// A failed attempt leaves the component uninitialized.
#[derive(Default)]
pub struct FeedSubscription {
    pump: OnceCell<JoinHandle<()>>,
}

impl FeedSubscription {
    /// Creates an uninitialized feed subscription.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns true once the feed has been subscribed.
    pub fn is_initialized(&self) -> bool {
        self.pump.initialized()
    }

    /// Subscribes `hub` to `feed` unless that already happened.
    pub async fn ensure_initialized<F>(&self, feed: &F, hub: &Arc<NotificationHub>) -> Result<()>
    where
        F: ChangeFeed + ?Sized,
    {
        self.pump
            .get_or_try_init(|| async {
                let stream = feed.subscribe(ChangeFilter::samples()).await?;
                tracing::info!("change feed subscribed");
                Ok::<_, crate::RealtimeError>(tokio::spawn(pump(stream, Arc::clone(hub))))
            })
            .await?;
        Ok(())
    }
}

async fn pump(mut stream: ChangeStream, hub: Arc<NotificationHub>) {
    while let Some(result) = stream.next().await {
        match result {
            Ok(event) => {
                if let Err(e) = hub.broadcast(&event) {
                    tracing::warn!(error = %e, kind = %event.kind, "failed to broadcast change");
                }
            }
            Err(e) => tracing::warn!(error = %e, "change feed error"),
        }
    }
    tracing::warn!("change feed ended");
}
