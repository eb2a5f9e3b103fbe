//! Sample listing endpoints.

use std::sync::Arc;

use axum::extract::{Query, State};
use axum::{Extension, Json};
use domain::{Listing, SampleFilter};
use sample_store::{ChangeFeed, Sample, SampleStore};
use serde::Serialize;

use crate::session::Session;
use crate::state::AppState;

/// Data for the main page: every sample, the filter facets and the session.
#[derive(Debug, Serialize)]
pub struct PageData {
    #[serde(flatten)]
    pub listing: Listing,
    pub session: Option<Session>,
}

/// GET / — loads page data.
///
/// Never fails: if the store is missing or the read errors, the page is
/// served with empty lists.
#[tracing::instrument(skip_all)]
pub async fn page<S: SampleStore + ChangeFeed + 'static>(
    State(state): State<Arc<AppState<S>>>,
    session: Option<Extension<Session>>,
) -> Json<PageData> {
    let listing = load_listing(&state).await;
    Json(PageData {
        listing,
        session: session.map(|Extension(s)| s),
    })
}

async fn load_listing<S: SampleStore + ChangeFeed>(state: &AppState<S>) -> Listing {
    let Some(catalog) = state.catalog.as_ref() else {
        tracing::error!("sample store not initialized, serving empty listing");
        metrics::counter!("listing_fallbacks_total").increment(1);
        return Listing::empty();
    };

    match catalog.listing().await {
        Ok(listing) => {
            tracing::debug!(points = listing.points.len(), "listing loaded");
            listing
        }
        Err(e) => {
            tracing::error!(error = %e, "error loading samples");
            metrics::counter!("listing_fallbacks_total").increment(1);
            Listing::empty()
        }
    }
}

/// GET /api/samples — samples matching the optional `material` and
/// `environment` query parameters.
///
/// Degrades to an empty list like the page does.
#[tracing::instrument(skip(state))]
pub async fn list<S: SampleStore + ChangeFeed + 'static>(
    State(state): State<Arc<AppState<S>>>,
    Query(filter): Query<SampleFilter>,
) -> Json<Vec<Sample>> {
    let Some(catalog) = state.catalog.as_ref() else {
        return Json(Vec::new());
    };

    match catalog.filtered(&filter).await {
        Ok(samples) => Json(samples),
        Err(e) => {
            tracing::error!(error = %e, "error loading filtered samples");
            metrics::counter!("listing_fallbacks_total").increment(1);
            Json(Vec::new())
        }
    }
}
