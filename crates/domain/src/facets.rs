//! Filter facets and material/environment filtering.

use std::collections::HashSet;

use sample_store::Sample;
use serde::{Deserialize, Serialize};

/// Distinct values available for building filter controls.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FilterFacets {
    pub material_types: Vec<String>,
    pub environments: Vec<String>,
}

impl FilterFacets {
    /// Collects distinct material types and environments in the order they
    /// are first seen while scanning `samples`.
    pub fn from_samples(samples: &[Sample]) -> Self {
        Self {
            material_types: distinct_in_order(samples.iter().map(|s| s.material_type.as_str())),
            environments: distinct_in_order(samples.iter().map(|s| s.environment.as_str())),
        }
    }
}

fn distinct_in_order<'a>(values: impl Iterator<Item = &'a str>) -> Vec<String> {
    let mut seen = HashSet::new();
    values
        .filter(|v| seen.insert(*v))
        .map(str::to_owned)
        .collect()
}

/// Exact-match filter on material type and environment.
///
/// An unset field matches every sample.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct SampleFilter {
    pub material: Option<String>,
    pub environment: Option<String>,
}

impl SampleFilter {
    /// Returns true if the sample passes this filter.
    pub fn matches(&self, sample: &Sample) -> bool {
        let material_ok = self
            .material
            .as_deref()
            .is_none_or(|m| m == sample.material_type);
        let environment_ok = self
            .environment
            .as_deref()
            .is_none_or(|e| e == sample.environment);
        material_ok && environment_ok
    }

    /// Keeps the matching samples, preserving their order.
    pub fn apply(&self, samples: Vec<Sample>) -> Vec<Sample> {
        samples.into_iter().filter(|s| self.matches(s)).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use sample_store::{Decimal, NewSample, SampleId};

    fn sample(id: i32, material: &str, environment: &str) -> Sample {
        NewSample::new(
            material,
            environment,
            10,
            Decimal::new(1000, 2),
            Decimal::new(2000, 2),
            Decimal::new(5000, 2),
        )
        .with_id(SampleId::new(id))
    }

    #[test]
    fn facets_keep_first_seen_order_without_duplicates() {
        let samples = vec![
            sample(1, "PLA", "Compost"),
            sample(2, "PHA", "Soil"),
            sample(3, "PLA", "Marine"),
        ];

        let facets = FilterFacets::from_samples(&samples);
        assert_eq!(facets.material_types, vec!["PLA", "PHA"]);
        assert_eq!(facets.environments, vec!["Compost", "Soil", "Marine"]);
    }

    #[test]
    fn facets_of_empty_set_are_empty() {
        assert_eq!(FilterFacets::from_samples(&[]), FilterFacets::default());
    }

    #[test]
    fn facets_serialize_camel_case() {
        let json = serde_json::to_value(FilterFacets::default()).unwrap();
        assert!(json.get("materialTypes").is_some());
        assert!(json.get("environments").is_some());
    }

    #[test]
    fn empty_filter_matches_everything() {
        let samples = vec![sample(1, "PLA", "Compost"), sample(2, "PHA", "Soil")];
        assert_eq!(SampleFilter::default().apply(samples).len(), 2);
    }

    #[test]
    fn filter_combines_material_and_environment() {
        let samples = vec![
            sample(1, "PLA", "Compost"),
            sample(2, "PHA", "Soil"),
            sample(3, "PLA", "Marine"),
            sample(4, "PLA", "Compost"),
        ];

        let filter = SampleFilter {
            material: Some("PLA".to_string()),
            environment: Some("Compost".to_string()),
        };
        let ids: Vec<i32> = filter
            .apply(samples)
            .iter()
            .map(|s| s.sample_id.as_i32())
            .collect();
        assert_eq!(ids, vec![1, 4]);
    }

    #[test]
    fn filter_is_case_sensitive() {
        let filter = SampleFilter {
            material: Some("pla".to_string()),
            environment: None,
        };
        assert!(!filter.matches(&sample(1, "PLA", "Compost")));
    }
}
