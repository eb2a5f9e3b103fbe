//! Placeholder degradation simulation.
//!
//! There is no real model behind this: the prediction is a fixed linear
//! extrapolation from elapsed time, and the artificial delay stands in for a
//! future computation.

use std::time::Duration;

use common::SampleId;
use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Serialize};

use crate::error::DomainError;

/// Predicted degradation at day zero, in percent.
pub const BASELINE_PCT: f64 = 35.6;

/// Predicted degradation gained per elapsed day, in percent.
pub const RATE_PCT_PER_DAY: f64 = 1.5;

/// Upper clamp for predictions.
pub const MAX_PCT: f64 = 100.0;

/// Delay applied before each simulation result is returned.
pub const DEFAULT_DELAY: Duration = Duration::from_secs(2);

/// Simulation inputs.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SimulationParams {
    pub time_days: f64,
}

/// A request to simulate degradation of one sample.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SimulationRequest {
    pub sample_id: SampleId,
    pub simulation_params: SimulationParams,
}

impl SimulationRequest {
    /// Decodes a request from a JSON body.
    pub fn from_json(body: &[u8]) -> Result<Self, DomainError> {
        Ok(serde_json::from_slice(body)?)
    }
}

/// The outcome of a simulation.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SimulationResult {
    pub sample_id: SampleId,
    pub predicted_degradation_pct: f64,
    pub simulation_time_days: f64,
}

/// Predicts degradation after `time_days`, clamped to 100 and rounded to two
/// decimal places. Negative times are not clamped at the low end.
pub fn predict_degradation(time_days: f64) -> f64 {
    let raw = (BASELINE_PCT + RATE_PCT_PER_DAY * time_days).min(MAX_PCT);
    round_to_hundredths(raw)
}

/// Rounds the exact binary value of `value`, so 35.705 (stored just below
/// the midpoint) becomes 35.70. Exact midpoints round away from zero.
fn round_to_hundredths(value: f64) -> f64 {
    Decimal::from_f64_retain(value)
        .map(|exact| exact.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero))
        .and_then(|rounded| rounded.to_string().parse().ok())
        .unwrap_or(value)
}

/// Runs simulations after a fixed delay.
#[derive(Debug, Clone, Copy)]
pub struct Simulator {
    delay: Duration,
}

impl Simulator {
    /// Creates a simulator with the given response delay.
    pub fn new(delay: Duration) -> Self {
        Self { delay }
    }

    /// Returns the configured delay.
    pub fn delay(&self) -> Duration {
        self.delay
    }

    /// Computes the prediction for `request`, waiting out the delay first.
    #[tracing::instrument(skip(self), fields(sample_id = %request.sample_id))]
    pub async fn run(&self, request: SimulationRequest) -> SimulationResult {
        let time_days = request.simulation_params.time_days;
        let predicted = predict_degradation(time_days);

        if !self.delay.is_zero() {
            tokio::time::sleep(self.delay).await;
        }

        metrics::counter!("simulations_total").increment(1);
        tracing::debug!(time_days, predicted, "simulation complete");

        SimulationResult {
            sample_id: request.sample_id,
            predicted_degradation_pct: predicted,
            simulation_time_days: time_days,
        }
    }
}

impl Default for Simulator {
    fn default() -> Self {
        Self::new(DEFAULT_DELAY)
    }
}
