pub mod health;
pub mod metrics;
pub mod realtime;
pub mod samples;
pub mod simulate;
