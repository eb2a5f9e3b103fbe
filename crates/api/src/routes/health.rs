//! Health check endpoint.

use std::sync::Arc;

use axum::Json;
use axum::extract::State;
use sample_store::{ChangeFeed, SampleStore};
use serde::Serialize;

use crate::state::AppState;

#[derive(Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub store: bool,
    pub feed: bool,
    pub subscribers: usize,
}

/// GET /health — reports liveness and realtime wiring.
pub async fn check<S: SampleStore + ChangeFeed + 'static>(
    State(state): State<Arc<AppState<S>>>,
) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok",
        store: state.store().is_some(),
        feed: state.feed.is_initialized(),
        subscribers: state.hub.subscriber_count(),
    })
}
