//! Seeded synthetic training data.
//!
//! Generation is deterministic for a fixed seed: the same seed produces
//! the same sample set on every run.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use rand_distr::{Exp, Normal};

use crate::{FeatureRecord, FeatureSchema, LabeledSample};

/// Seed used by the default synthetic data set.
pub const DEFAULT_SEED: u64 = 42;

/// Number of rows generated per schema by default.
pub const DEFAULT_ROWS: usize = 500;

/// Generates synthetic financial samples.
///
/// Incomes, loan amounts and credit scores are drawn uniformly from the
/// ranges of the historical data set; the default label is Bernoulli with
/// p = 0.2.
#[must_use]
pub fn generate_financial(seed: u64, rows: usize) -> Vec<LabeledSample> {
    let schema = FeatureSchema::financial();
    let mut rng = StdRng::seed_from_u64(seed);

    (0..rows)
        .map(|_| {
            let values = vec![
                f64::from(rng.gen_range(100_000..500_000)),
                f64::from(rng.gen_range(50_000..300_000)),
                f64::from(rng.gen_range(300..850)),
                f64::from(rng.gen_range(0..3)),
            ];
            let label = u8::from(rng.gen_bool(0.2));

            // Value count matches the schema by construction.
            let record = FeatureRecord::new(schema.clone(), values)
                .expect("financial schema arity");
            LabeledSample { record, label }
        })
        .collect()
}

/// Generates synthetic water-quality samples.
///
/// Readings follow the distributions of the historical data set; the
/// failure label is derived from the fixed water-quality rule, not drawn
/// at random.
#[must_use]
pub fn generate_water(seed: u64, rows: usize) -> Vec<LabeledSample> {
    let schema = FeatureSchema::water_quality();
    let mut rng = StdRng::seed_from_u64(seed);

    let temperature = Normal::new(28.0, 2.0).expect("valid distribution");
    let ph = Normal::new(7.5, 0.5).expect("valid distribution");
    // Exp is parameterized by rate; mean ammonia is 0.2 mg/L.
    let ammonia = Exp::new(5.0).expect("valid distribution");
    let dissolved_oxygen = Normal::new(6.0, 1.0).expect("valid distribution");
    let turbidity = Normal::new(15.0, 5.0).expect("valid distribution");

    (0..rows)
        .map(|_| {
            let values = vec![
                rng.sample(temperature),
                rng.sample(ph),
                rng.sample(ammonia),
                rng.sample(dissolved_oxygen),
                rng.sample(turbidity),
            ];
            let label = water_failure_label(values[1], values[2], values[3]);

            let record = FeatureRecord::new(schema.clone(), values)
                .expect("water schema arity");
            LabeledSample { record, label }
        })
        .collect()
}

/// The fixed farm-failure rule: high ammonia, low dissolved oxygen or pH
/// outside the healthy band.
#[must_use]
pub fn water_failure_label(ph: f64, ammonia: f64, dissolved_oxygen: f64) -> u8 {
    u8::from(ammonia > 0.5 || dissolved_oxygen < 4.0 || !(6.5..=8.5).contains(&ph))
}
