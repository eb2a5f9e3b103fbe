//! Per-connection subscription handle.

use std::pin::Pin;
use std::sync::Arc;
use std::task::{Context, Poll};

use futures_core::Stream;
use tokio::sync::mpsc;

use crate::{Frame, NotificationHub, SinkId};

/// The receiving end of one registered sink.
///
/// Yields frames in broadcast order for as long as it lives. Dropping it
/// (client disconnect, cancelled response body) unregisters the sink
/// immediately, so the hub never keeps entries for dead connections.
pub struct Subscription {
    hub: Arc<NotificationHub>,
    id: SinkId,
    frames: mpsc::UnboundedReceiver<Frame>,
}

impl Subscription {
    pub(crate) fn new(
        hub: Arc<NotificationHub>,
        id: SinkId,
        frames: mpsc::UnboundedReceiver<Frame>,
    ) -> Self {
        Self { hub, id, frames }
    }

    /// Returns the identity of the underlying sink.
    pub fn id(&self) -> SinkId {
        self.id
    }

    /// Waits for the next frame.
    pub async fn recv(&mut self) -> Option<Frame> {
        self.frames.recv().await
    }

    /// Returns a frame if one is already queued.
    pub fn try_recv(&mut self) -> Option<Frame> {
        self.frames.try_recv().ok()
    }
}

impl Stream for Subscription {
    type Item = Frame;

    fn poll_next(mut self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Option<Self::Item>> {
        self.frames.poll_recv(cx)
    }
}

impl Drop for Subscription {
    fn drop(&mut self) {
        self.hub.unsubscribe(self.id);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use futures_util::StreamExt;
    use sample_store::{ChangeEvent, Decimal, NewSample, SampleId};

    fn event(id: i32) -> ChangeEvent {
        ChangeEvent::inserted(
            NewSample::new(
                "PBAT",
                "Compost",
                10,
                Decimal::new(1840, 2),
                Decimal::new(2500, 2),
                Decimal::new(6000, 2),
            )
            .with_id(SampleId::new(id)),
        )
    }

    #[tokio::test]
    async fn connect_registers_and_drop_unregisters() {
        let hub = Arc::new(NotificationHub::new());

        let subscription = hub.connect();
        let id = subscription.id();
        assert!(hub.is_subscribed(id));

        drop(subscription);
        assert!(!hub.is_subscribed(id));
        assert_eq!(hub.subscriber_count(), 0);
    }

    #[tokio::test]
    async fn stream_yields_broadcast_frames() {
        let hub = Arc::new(NotificationHub::new());
        let mut subscription = hub.connect();

        hub.broadcast(&event(1)).unwrap();
        hub.broadcast(&event(2)).unwrap();

        let first = subscription.next().await.unwrap();
        let second = subscription.recv().await.unwrap();
        assert!(std::str::from_utf8(first.as_bytes()).unwrap().contains(r#""sample_id":1"#));
        assert!(std::str::from_utf8(second.as_bytes()).unwrap().contains(r#""sample_id":2"#));
        assert!(subscription.try_recv().is_none());
    }

    #[tokio::test]
    async fn disconnected_client_misses_later_events_without_errors() {
        let hub = Arc::new(NotificationHub::new());
        let mut subscription = hub.connect();

        assert_eq!(hub.broadcast(&event(1)).unwrap(), 1);
        let received = subscription.recv().await.unwrap();
        drop(subscription);

        assert_eq!(hub.broadcast(&event(2)).unwrap(), 0);
        assert!(std::str::from_utf8(received.as_bytes()).unwrap().contains(r#""sample_id":1"#));
    }
}
