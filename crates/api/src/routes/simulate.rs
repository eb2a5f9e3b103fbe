//! Degradation simulation endpoint.

use std::sync::Arc;

use axum::Json;
use axum::extract::State;
use bytes::Bytes;
use domain::{SimulationRequest, SimulationResult};
use sample_store::{ChangeFeed, SampleStore};

use crate::error::ApiError;
use crate::state::AppState;

/// POST /api/simulate — predicts degradation for a sample after a delay.
///
/// The body is parsed by hand so that malformed JSON or missing fields map
/// to the same 500 response as any other simulation failure.
#[tracing::instrument(skip_all)]
pub async fn run<S: SampleStore + ChangeFeed + 'static>(
    State(state): State<Arc<AppState<S>>>,
    body: Bytes,
) -> Result<Json<SimulationResult>, ApiError> {
    let request = SimulationRequest::from_json(&body)?;
    Ok(Json(state.simulator.run(request).await))
}
