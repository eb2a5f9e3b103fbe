//! Destinations for broadcast frames.

use std::sync::atomic::{AtomicU64, Ordering};

use thiserror::Error;
use tokio::sync::mpsc;

use crate::Frame;

/// Identity of a registered sink, unique within the process.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SinkId(u64);

impl SinkId {
    /// Allocates a fresh identifier.
    pub fn next() -> Self {
        static NEXT: AtomicU64 = AtomicU64::new(1);
        Self(NEXT.fetch_add(1, Ordering::Relaxed))
    }

    /// Returns the raw value.
    pub fn as_u64(&self) -> u64 {
        self.0
    }
}

impl std::fmt::Display for SinkId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "sink-{}", self.0)
    }
}

/// The receiving side of a sink is gone.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("{0} is closed")]
pub struct SinkClosed(pub SinkId);

/// A destination that accepts streamed frames, bound to one client connection.
///
/// `send` must not block or suspend: the hub calls it while holding its
/// subscriber lock.
pub trait Sink: Send + Sync {
    /// Returns this sink's identity.
    fn id(&self) -> SinkId;

    /// Enqueues a frame for delivery.
    fn send(&self, frame: Frame) -> Result<(), SinkClosed>;
}

/// Sink backed by an unbounded channel.
///
/// There is no backpressure; a slow reader accumulates frames.
#[derive(Debug, Clone)]
pub struct ChannelSink {
    id: SinkId,
    tx: mpsc::UnboundedSender<Frame>,
}

impl ChannelSink {
    /// Creates a sink and the receiver its frames arrive on.
    pub fn new() -> (Self, mpsc::UnboundedReceiver<Frame>) {
        let (tx, rx) = mpsc::unbounded_channel();
        (
            Self {
                id: SinkId::next(),
                tx,
            },
            rx,
        )
    }
}

impl Sink for ChannelSink {
    fn id(&self) -> SinkId {
        self.id
    }

    fn send(&self, frame: Frame) -> Result<(), SinkClosed> {
        self.tx.send(frame).map_err(|_| SinkClosed(self.id))
    }
}
