//! Live change notifications for connected clients.
//!
//! This crate provides the push side of the service:
//! - [`NotificationHub`] fans each change event out to every registered sink
//! - [`Sink`] and [`ChannelSink`] abstract one client connection
//! - [`Subscription`] owns a connection's receiving end and unregisters on drop
//! - [`FeedSubscription`] bridges a [`sample_store::ChangeFeed`] into the hub once

pub mod error;
pub mod feed;
pub mod frame;
pub mod hub;
pub mod sink;
pub mod subscription;

pub use error::{RealtimeError, Result};
pub use feed::FeedSubscription;
pub use frame::Frame;
pub use hub::NotificationHub;
pub use sink::{ChannelSink, Sink, SinkClosed, SinkId};
pub use subscription::Subscription;
