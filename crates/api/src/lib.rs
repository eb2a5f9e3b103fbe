//! HTTP API server for the biodegradation sample service.
//!
//! Serves the sample listing, the placeholder degradation simulation and a
//! server-sent event stream of table changes, with structured logging
//! (tracing) and Prometheus metrics.

pub mod config;
pub mod error;
pub mod routes;
pub mod session;
pub mod state;

use std::sync::Arc;

use axum::Router;
use axum::routing::{get, post};
use domain::Simulator;
use metrics_exporter_prometheus::PrometheusHandle;
use sample_store::{ChangeFeed, SampleStore};
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use config::Config;
use state::AppState;

/// Creates the Axum application router with all routes and shared state.
pub fn create_app<S: SampleStore + ChangeFeed + 'static>(
    state: Arc<AppState<S>>,
    metrics_handle: PrometheusHandle,
) -> Router {
    let metrics_router = Router::new()
        .route("/metrics", get(routes::metrics::get))
        .with_state(metrics_handle);

    Router::new()
        .route("/", get(routes::samples::page::<S>))
        .route("/health", get(routes::health::check::<S>))
        .route("/api/samples", get(routes::samples::list::<S>))
        .route("/api/simulate", post(routes::simulate::run::<S>))
        .route("/api/realtime", get(routes::realtime::stream::<S>))
        .with_state(state)
        .merge(metrics_router)
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        )
        .layer(TraceLayer::new_for_http())
}

/// Creates the application state for `store` using the configured
/// simulation delay.
pub fn create_default_state<S: SampleStore + ChangeFeed + 'static>(
    store: S,
    config: &Config,
) -> Arc<AppState<S>> {
    Arc::new(AppState::new(store, Simulator::new(config.simulation_delay)))
}
