//! Sample catalog providing read access to the sample table.

use sample_store::{Sample, SampleStore};
use serde::Serialize;

use crate::error::DomainError;
use crate::facets::{FilterFacets, SampleFilter};

/// The full sample set plus the facets derived from it.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Listing {
    pub points: Vec<Sample>,
    #[serde(flatten)]
    pub facets: FilterFacets,
}

impl Listing {
    /// Builds a listing, deriving facets from `points`.
    pub fn from_samples(points: Vec<Sample>) -> Self {
        let facets = FilterFacets::from_samples(&points);
        Self { points, facets }
    }

    /// A listing with no samples and no facets.
    pub fn empty() -> Self {
        Self::default()
    }
}

/// Service for reading samples.
///
/// Reads are snapshots; they are not isolated from concurrent changes.
pub struct SampleCatalog<S: SampleStore> {
    store: S,
}

impl<S: SampleStore> SampleCatalog<S> {
    /// Creates a catalog over the given store.
    pub fn new(store: S) -> Self {
        Self { store }
    }

    /// Returns a reference to the underlying store.
    pub fn store(&self) -> &S {
        &self.store
    }

    /// Loads every sample and its filter facets.
    #[tracing::instrument(skip(self))]
    pub async fn listing(&self) -> Result<Listing, DomainError> {
        let points = self.store.select_all().await?;
        Ok(Listing::from_samples(points))
    }

    /// Loads the samples matching `filter`.
    #[tracing::instrument(skip(self))]
    pub async fn filtered(&self, filter: &SampleFilter) -> Result<Vec<Sample>, DomainError> {
        let samples = self.store.select_all().await?;
        Ok(filter.apply(samples))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use sample_store::{Decimal, InMemorySampleStore, NewSample};

    fn new_sample(material: &str, environment: &str) -> NewSample {
        NewSample::new(
            material,
            environment,
            10,
            Decimal::new(1520, 2),
            Decimal::new(2500, 2),
            Decimal::new(6000, 2),
        )
    }

    async fn catalog_with_rows() -> SampleCatalog<InMemorySampleStore> {
        let store = InMemorySampleStore::new();
        store
            .insert_batch(vec![
                new_sample("PLA", "Compost"),
                new_sample("PHA", "Soil"),
                new_sample("PLA", "Marine"),
            ])
            .await
            .unwrap();
        SampleCatalog::new(store)
    }

    #[tokio::test]
    async fn listing_returns_rows_and_facets() {
        let catalog = catalog_with_rows().await;

        let listing = catalog.listing().await.unwrap();
        assert_eq!(listing.points.len(), 3);
        assert_eq!(listing.facets.material_types, vec!["PLA", "PHA"]);
        assert_eq!(
            listing.facets.environments,
            vec!["Compost", "Soil", "Marine"]
        );
    }

    #[tokio::test]
    async fn listing_of_empty_store_is_empty() {
        let catalog = SampleCatalog::new(InMemorySampleStore::new());
        assert_eq!(catalog.listing().await.unwrap(), Listing::empty());
    }

    #[tokio::test]
    async fn filtered_applies_filter() {
        let catalog = catalog_with_rows().await;
        let filter = SampleFilter {
            material: Some("PLA".to_string()),
            environment: None,
        };

        let rows = catalog.filtered(&filter).await.unwrap();
        assert_eq!(rows.len(), 2);
        assert!(rows.iter().all(|r| r.material_type == "PLA"));
    }

    #[test]
    fn listing_serializes_flat_page_shape() {
        let json = serde_json::to_value(Listing::empty()).unwrap();
        assert_eq!(
            json,
            serde_json::json!({"points": [], "materialTypes": [], "environments": []})
        );
    }
}
