//! Notification fan-out.

use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use sample_store::ChangeEvent;

use crate::subscription::Subscription;
use crate::{ChannelSink, Frame, Result, Sink, SinkId};

/// Set of live sinks that every change event is delivered to.
///
/// Delivery is best-effort and at-most-once: nothing is buffered for sinks
/// that are not registered at broadcast time. The subscriber lock is never
/// held across an await point, so each sink sees broadcasts in call order.
///
/// A sink whose `send` fails is dropped from the set during the broadcast
/// pass; the remaining sinks still receive the frame.
#[derive(Default)]
pub struct NotificationHub {
    sinks: Mutex<HashMap<SinkId, Box<dyn Sink>>>,
}

impl NotificationHub {
    /// Creates a hub with no subscribers.
    pub fn new() -> Self {
        Self::default()
    }

    fn sinks(&self) -> MutexGuard<'_, HashMap<SinkId, Box<dyn Sink>>> {
        self.sinks.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Registers a sink.
    ///
    /// Returns false if a sink with the same identity is already registered,
    /// in which case the existing registration is kept.
    pub fn subscribe(&self, sink: Box<dyn Sink>) -> bool {
        let mut sinks = self.sinks();
        let id = sink.id();
        if sinks.contains_key(&id) {
            return false;
        }
        sinks.insert(id, sink);
        record_subscriber_count(sinks.len());
        tracing::debug!(%id, subscribers = sinks.len(), "sink subscribed");
        true
    }

    /// Removes a sink. Returns false if it was not registered.
    pub fn unsubscribe(&self, id: SinkId) -> bool {
        let mut sinks = self.sinks();
        let removed = sinks.remove(&id).is_some();
        if removed {
            record_subscriber_count(sinks.len());
            tracing::debug!(%id, subscribers = sinks.len(), "sink unsubscribed");
        }
        removed
    }

    /// Returns the number of registered sinks.
    pub fn subscriber_count(&self) -> usize {
        self.sinks().len()
    }

    /// Returns true if the sink is currently registered.
    pub fn is_subscribed(&self, id: SinkId) -> bool {
        self.sinks().contains_key(&id)
    }

    /// Encodes `event` once and delivers the frame to every registered sink.
    ///
    /// Returns the number of sinks the frame was delivered to. Events without
    /// an affected row are skipped.
    pub fn broadcast(&self, event: &ChangeEvent) -> Result<usize> {
        let Some(frame) = Frame::encode(event)? else {
            tracing::debug!(kind = %event.kind, "change event without a row, skipping");
            return Ok(0);
        };
        metrics::counter!("realtime_broadcasts_total").increment(1);
        Ok(self.deliver(&frame))
    }

    fn deliver(&self, frame: &Frame) -> usize {
        let mut sinks = self.sinks();
        let before = sinks.len();
        let mut delivered = 0usize;

        sinks.retain(|id, sink| match sink.send(frame.clone()) {
            Ok(()) => {
                delivered += 1;
                true
            }
            Err(e) => {
                tracing::debug!(%id, error = %e, "dropping closed sink");
                false
            }
        });

        let dropped = before - sinks.len();
        if dropped > 0 {
            metrics::counter!("realtime_sinks_dropped_total").increment(dropped as u64);
            record_subscriber_count(sinks.len());
        }
        metrics::counter!("realtime_frames_delivered_total").increment(delivered as u64);

        delivered
    }

    /// Opens a channel-backed subscription.
    ///
    /// The returned [`Subscription`] yields every frame broadcast while it is
    /// alive and unregisters itself when dropped.
    pub fn connect(self: &Arc<Self>) -> Subscription {
        let (sink, frames) = ChannelSink::new();
        let id = sink.id();
        self.subscribe(Box::new(sink));
        Subscription::new(Arc::clone(self), id, frames)
    }
}

fn record_subscriber_count(count: usize) {
    metrics::gauge!("realtime_subscribers").set(count as f64);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::SinkClosed;
    use sample_store::{Decimal, NewSample, Sample, SampleId};
    use std::sync::atomic::{AtomicUsize, Ordering};

    fn row(id: i32) -> Sample {
        NewSample::new(
            "PLA",
            "Soil",
            25,
            Decimal::new(3560, 2),
            Decimal::new(2200, 2),
            Decimal::new(5000, 2),
        )
        .with_id(SampleId::new(id))
    }

    fn decode(frame: &Frame) -> serde_json::Value {
        let text = std::str::from_utf8(frame.as_bytes()).unwrap();
        serde_json::from_str(text.trim_start_matches("data: ").trim_end()).unwrap()
    }

    fn drain(rx: &mut tokio::sync::mpsc::UnboundedReceiver<Frame>) -> Vec<i64> {
        let mut ids = Vec::new();
        while let Ok(frame) = rx.try_recv() {
            ids.push(decode(&frame)["data"]["sample_id"].as_i64().unwrap());
        }
        ids
    }

    /// Sink that always reports itself closed.
    struct BrokenSink {
        id: SinkId,
        attempts: Arc<AtomicUsize>,
    }

    impl Sink for BrokenSink {
        fn id(&self) -> SinkId {
            self.id
        }

        fn send(&self, _frame: Frame) -> std::result::Result<(), SinkClosed> {
            self.attempts.fetch_add(1, Ordering::SeqCst);
            Err(SinkClosed(self.id))
        }
    }

    #[test]
    fn subscribers_receive_broadcasts_in_call_order() {
        let hub = NotificationHub::new();
        let (sink_a, mut rx_a) = ChannelSink::new();
        let (sink_b, mut rx_b) = ChannelSink::new();
        hub.subscribe(Box::new(sink_a));
        hub.subscribe(Box::new(sink_b));

        for id in 1..=3 {
            assert_eq!(hub.broadcast(&ChangeEvent::inserted(row(id))).unwrap(), 2);
        }

        assert_eq!(drain(&mut rx_a), vec![1, 2, 3]);
        assert_eq!(drain(&mut rx_b), vec![1, 2, 3]);
    }

    #[test]
    fn sinks_only_see_broadcasts_while_subscribed() {
        let hub = NotificationHub::new();
        let (early, mut rx_early) = ChannelSink::new();
        let (late, mut rx_late) = ChannelSink::new();
        let early_id = early.id();

        hub.subscribe(Box::new(early));
        hub.broadcast(&ChangeEvent::inserted(row(1))).unwrap();

        hub.subscribe(Box::new(late));
        hub.broadcast(&ChangeEvent::inserted(row(2))).unwrap();

        hub.unsubscribe(early_id);
        hub.broadcast(&ChangeEvent::inserted(row(3))).unwrap();

        assert_eq!(drain(&mut rx_early), vec![1, 2]);
        assert_eq!(drain(&mut rx_late), vec![2, 3]);
    }

    #[test]
    fn duplicate_subscribe_does_not_duplicate_delivery() {
        let hub = NotificationHub::new();
        let (sink, mut rx) = ChannelSink::new();

        assert!(hub.subscribe(Box::new(sink.clone())));
        assert!(!hub.subscribe(Box::new(sink)));
        assert_eq!(hub.subscriber_count(), 1);

        hub.broadcast(&ChangeEvent::inserted(row(1))).unwrap();
        assert_eq!(drain(&mut rx), vec![1]);
    }

    #[test]
    fn unsubscribing_unknown_sink_is_noop() {
        let hub = NotificationHub::new();
        let (sink, _rx) = ChannelSink::new();
        hub.subscribe(Box::new(sink));

        assert!(!hub.unsubscribe(SinkId::next()));
        assert_eq!(hub.subscriber_count(), 1);
    }

    #[test]
    fn broadcast_without_subscribers_is_harmless() {
        let hub = NotificationHub::new();
        assert_eq!(hub.broadcast(&ChangeEvent::deleted(row(1))).unwrap(), 0);
    }

    #[test]
    fn failing_sink_is_dropped_without_affecting_others() {
        let hub = NotificationHub::new();
        let attempts = Arc::new(AtomicUsize::new(0));
        let broken_id = SinkId::next();
        hub.subscribe(Box::new(BrokenSink {
            id: broken_id,
            attempts: Arc::clone(&attempts),
        }));
        let (healthy, mut rx) = ChannelSink::new();
        hub.subscribe(Box::new(healthy));

        assert_eq!(hub.broadcast(&ChangeEvent::inserted(row(1))).unwrap(), 1);
        assert!(!hub.is_subscribed(broken_id));

        hub.broadcast(&ChangeEvent::inserted(row(2))).unwrap();
        assert_eq!(attempts.load(Ordering::SeqCst), 1);
        assert_eq!(drain(&mut rx), vec![1, 2]);
    }

    #[test]
    fn closed_channel_sink_is_pruned() {
        let hub = NotificationHub::new();
        let (sink, rx) = ChannelSink::new();
        let id = sink.id();
        hub.subscribe(Box::new(sink));
        drop(rx);

        assert_eq!(hub.broadcast(&ChangeEvent::inserted(row(1))).unwrap(), 0);
        assert!(!hub.is_subscribed(id));
    }

    #[test]
    fn rowless_events_are_skipped() {
        let hub = NotificationHub::new();
        let (sink, mut rx) = ChannelSink::new();
        hub.subscribe(Box::new(sink));

        let event = ChangeEvent {
            kind: sample_store::ChangeKind::Insert,
            new: None,
            old: None,
        };
        assert_eq!(hub.broadcast(&event).unwrap(), 0);
        assert!(drain(&mut rx).is_empty());
        assert_eq!(hub.subscriber_count(), 1);
    }
}
