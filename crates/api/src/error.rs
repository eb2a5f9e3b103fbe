//! API error types with HTTP response mapping.

use axum::http::StatusCode;
use axum::http::header::CONTENT_TYPE;
use axum::response::{IntoResponse, Response};
use domain::DomainError;
use realtime::RealtimeError;

/// API-level error type that maps to HTTP responses.
///
/// Every failure is converted to a response at the handler boundary; the
/// specific cause is logged but never exposed to the client.
#[derive(Debug)]
pub enum ApiError {
    /// No sample store handle was established for this server.
    StoreNotInitialized,
    /// The change feed could not be subscribed.
    Feed(RealtimeError),
    /// A simulation request could not be served.
    Simulation(DomainError),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        match self {
            ApiError::StoreNotInitialized => plain_text_error("Sample store not initialized"),
            ApiError::Feed(err) => {
                tracing::error!(error = %err, "failed to subscribe to change feed");
                plain_text_error("Realtime feed unavailable")
            }
            ApiError::Simulation(err) => {
                tracing::error!(error = %err, "error running simulation");
                let body = serde_json::json!({ "error": "Failed to run simulation" });
                (StatusCode::INTERNAL_SERVER_ERROR, axum::Json(body)).into_response()
            }
        }
    }
}

fn plain_text_error(message: &'static str) -> Response {
    (
        StatusCode::INTERNAL_SERVER_ERROR,
        [(CONTENT_TYPE, "text/plain")],
        message,
    )
        .into_response()
}

impl From<DomainError> for ApiError {
    fn from(err: DomainError) -> Self {
        ApiError::Simulation(err)
    }
}

impl From<RealtimeError> for ApiError {
    fn from(err: RealtimeError) -> Self {
        ApiError::Feed(err)
    }
}
