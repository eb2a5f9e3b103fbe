pub mod change;
pub mod error;
pub mod memory;
pub mod postgres;
pub mod sample;
pub mod seed;
pub mod store;

pub use change::{ChangeEvent, ChangeFilter, ChangeKind};
pub use common::SampleId;
pub use error::{Result, StoreError};
pub use memory::InMemorySampleStore;
pub use postgres::PostgresSampleStore;
pub use rust_decimal::Decimal;
pub use sample::{NewSample, Sample};
pub use seed::{seed, seed_batch};
pub use store::{ChangeFeed, ChangeStream, SampleStore};

/// Name of the table holding biodegradation samples.
pub const SAMPLE_TABLE: &str = "biodegradation";
