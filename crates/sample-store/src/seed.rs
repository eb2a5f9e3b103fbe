//! Fixed seed batch of biodegradation test data.

use crate::{Decimal, NewSample, Result, Sample, SampleStore};

/// Seed rows as (material, environment, days, degradation, temperature, humidity).
/// Decimal columns are in hundredths.
const SEED_ROWS: &[(&str, &str, i32, i64, i64, i64)] = &[
    ("PLA", "Compost", 10, 1520, 2500, 6000),
    ("PHA", "Soil", 15, 2250, 2000, 5500),
    ("PLA", "Marine", 20, 1080, 1800, 7000),
    ("PBAT", "Compost", 10, 1840, 2500, 6000),
    ("PLA", "Soil", 25, 3560, 2200, 5000),
    ("PET", "Aquatic", 30, 1200, 2400, 6500),
    ("PHB", "Compost", 35, 2850, 2600, 7000),
    ("PLA", "Industrial", 40, 2030, 2700, 5800),
    ("PHA", "Marine", 45, 1570, 1900, 7200),
    ("PBAT", "Soil", 50, 3000, 2300, 6000),
    ("PLA", "Aquatic", 55, 2540, 2100, 6800),
    ("PET", "Compost", 60, 4010, 2800, 7500),
    ("PHB", "Industrial", 65, 1890, 2900, 5500),
    ("PLA", "Soil", 70, 3280, 2200, 6200),
    ("PBAT", "Aquatic", 75, 1450, 2000, 6000),
    ("PET", "Marine", 80, 1930, 2500, 7000),
    ("PHB", "Soil", 85, 2760, 2400, 6500),
    ("PLA", "Compost", 90, 3820, 2600, 7200),
    ("PBAT", "Industrial", 95, 2290, 2800, 5800),
    ("PET", "Soil", 100, 3400, 2300, 6500),
    ("PHB", "Aquatic", 105, 1780, 2000, 6000),
    ("PLA", "Marine", 110, 2950, 1900, 7000),
    ("PBAT", "Compost", 115, 2520, 2700, 6800),
    ("PET", "Industrial", 120, 3170, 3000, 5500),
    ("PHB", "Soil", 125, 2440, 2200, 6300),
    ("PLA", "Aquatic", 130, 2090, 2100, 6600),
    ("PBAT", "Marine", 135, 1360, 1800, 7000),
    ("PET", "Soil", 140, 3650, 2400, 6700),
    ("PHB", "Compost", 145, 1980, 2600, 7200),
    ("PLA", "Industrial", 150, 3470, 2800, 6000),
    ("PBAT", "Soil", 155, 2130, 2300, 6500),
    ("PET", "Aquatic", 160, 1640, 2000, 6200),
    ("PHB", "Marine", 165, 2910, 1900, 6800),
    ("PLA", "Soil", 170, 4000, 2500, 7000),
    ("PBAT", "Aquatic", 175, 1750, 2100, 6300),
    ("PET", "Compost", 180, 3330, 2700, 7500),
    ("PHB", "Industrial", 185, 2370, 2900, 5500),
    ("PLA", "Aquatic", 190, 2680, 2200, 6400),
    ("PBAT", "Soil", 195, 1990, 2400, 6600),
    ("PET", "Marine", 200, 2820, 1800, 7000),
];

/// Returns the fixed seed batch, two decimal places per measurement.
pub fn seed_batch() -> Vec<NewSample> {
    SEED_ROWS
        .iter()
        .map(|&(material, environment, days, degradation, temperature, humidity)| {
            NewSample::new(
                material,
                environment,
                days,
                Decimal::new(degradation, 2),
                Decimal::new(temperature, 2),
                Decimal::new(humidity, 2),
            )
        })
        .collect()
}

/// Clears the store and inserts the seed batch.
#[tracing::instrument(skip(store))]
pub async fn seed<S: SampleStore + ?Sized>(store: &S) -> Result<Vec<Sample>> {
    let removed = store.delete_all().await?;
    let inserted = store.insert_batch(seed_batch()).await?;
    tracing::info!(removed, inserted = inserted.len(), "seeded sample store");
    Ok(inserted)
}
