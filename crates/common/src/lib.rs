//! Shared types used across the biodegradation sample crates.

pub mod types;

pub use types::SampleId;
