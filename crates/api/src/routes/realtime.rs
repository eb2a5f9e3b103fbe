//! Server-sent event stream of sample table changes.

use std::convert::Infallible;
use std::sync::Arc;

use axum::body::Body;
use axum::extract::State;
use axum::http::header::{CACHE_CONTROL, CONNECTION, CONTENT_TYPE};
use axum::response::{IntoResponse, Response};
use futures_util::StreamExt;
use sample_store::{ChangeFeed, SampleStore};

use crate::error::ApiError;
use crate::state::AppState;

/// GET /api/realtime — opens a long-lived event stream.
///
/// Every change to the sample table after the client connects is written as
/// one `data: {...}` frame. The client is unregistered when the response
/// body is dropped.
#[tracing::instrument(skip_all)]
pub async fn stream<S: SampleStore + ChangeFeed + 'static>(
    State(state): State<Arc<AppState<S>>>,
) -> Result<Response, ApiError> {
    let Some(store) = state.store() else {
        return Err(ApiError::StoreNotInitialized);
    };
    state.feed.ensure_initialized(store, &state.hub).await?;

    let subscription = state.hub.connect();
    tracing::info!(client = %subscription.id(), "realtime client connected");

    let body = Body::from_stream(
        subscription.map(|frame| Ok::<_, Infallible>(frame.into_bytes())),
    );

    Ok((
        [
            (CONTENT_TYPE, "text/event-stream"),
            (CACHE_CONTROL, "no-cache"),
            (CONNECTION, "keep-alive"),
        ],
        body,
    )
        .into_response())
}
