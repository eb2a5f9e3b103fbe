use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::SampleId;

/// One measured or seeded biodegradation observation.
///
/// Decimal columns are serialized as JSON numbers so clients can chart
/// them directly.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Sample {
    pub sample_id: SampleId,
    pub material_type: String,
    pub environment: String,
    pub time_days: i32,
    #[serde(with = "rust_decimal::serde::float")]
    pub degradation_pct: Decimal,
    #[serde(with = "rust_decimal::serde::float")]
    pub temperature_c: Decimal,
    #[serde(with = "rust_decimal::serde::float")]
    pub humidity_pct: Decimal,
}

/// A sample row that has not been assigned an identifier yet.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewSample {
    pub material_type: String,
    pub environment: String,
    pub time_days: i32,
    pub degradation_pct: Decimal,
    pub temperature_c: Decimal,
    pub humidity_pct: Decimal,
}

impl NewSample {
    /// Creates a new sample row.
    pub fn new(
        material_type: impl Into<String>,
        environment: impl Into<String>,
        time_days: i32,
        degradation_pct: Decimal,
        temperature_c: Decimal,
        humidity_pct: Decimal,
    ) -> Self {
        Self {
            material_type: material_type.into(),
            environment: environment.into(),
            time_days,
            degradation_pct,
            temperature_c,
            humidity_pct,
        }
    }

    /// Attaches a store-assigned identifier, producing a full row.
    pub fn with_id(self, sample_id: SampleId) -> Sample {
        Sample {
            sample_id,
            material_type: self.material_type,
            environment: self.environment,
            time_days: self.time_days,
            degradation_pct: self.degradation_pct,
            temperature_c: self.temperature_c,
            humidity_pct: self.humidity_pct,
        }
    }
}
