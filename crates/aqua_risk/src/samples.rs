//! Conversions between database sample rows and in-memory labeled
//! samples.

use database::{CreateFinancialSample, CreateWaterSample, FinancialSample, WaterSample};
use sample_store::{FeatureRecord, FeatureSchema, LabeledSample, SchemaError};

/// Converts financial history rows into training samples.
///
/// # Errors
///
/// Returns a [`SchemaError`] if a row does not fit the financial schema;
/// rows written through this crate always do.
pub fn financial_rows_to_samples(
    rows: &[FinancialSample],
) -> Result<Vec<LabeledSample>, SchemaError> {
    let schema = FeatureSchema::financial();

    rows.iter()
        .map(|row| {
            let record = FeatureRecord::new(
                schema.clone(),
                vec![
                    row.annual_income,
                    row.loan_amount,
                    row.credit_score,
                    row.past_defaults,
                ],
            )?;
            Ok(LabeledSample {
                record,
                label: u8::from(row.loan_default != 0),
            })
        })
        .collect()
}

/// Converts water-quality history rows into training samples.
///
/// # Errors
///
/// Returns a [`SchemaError`] if a row does not fit the water schema.
pub fn water_rows_to_samples(rows: &[WaterSample]) -> Result<Vec<LabeledSample>, SchemaError> {
    let schema = FeatureSchema::water_quality();

    rows.iter()
        .map(|row| {
            let record = FeatureRecord::new(
                schema.clone(),
                vec![
                    row.temperature,
                    row.ph,
                    row.ammonia,
                    row.dissolved_oxygen,
                    row.turbidity,
                ],
            )?;
            Ok(LabeledSample {
                record,
                label: u8::from(row.farm_failure != 0),
            })
        })
        .collect()
}

/// Converts labeled financial samples into insertable rows.
pub fn financial_samples_to_rows(samples: &[LabeledSample]) -> Vec<CreateFinancialSample> {
    samples
        .iter()
        .map(|sample| {
            let values = sample.record.values();
            CreateFinancialSample {
                annual_income: values[0],
                loan_amount: values[1],
                credit_score: values[2],
                past_defaults: values[3],
                loan_default: i64::from(sample.label),
            }
        })
        .collect()
}

/// Converts labeled water-quality samples into insertable rows.
pub fn water_samples_to_rows(samples: &[LabeledSample]) -> Vec<CreateWaterSample> {
    samples
        .iter()
        .map(|sample| {
            let values = sample.record.values();
            CreateWaterSample {
                temperature: values[0],
                ph: values[1],
                ammonia: values[2],
                dissolved_oxygen: values[3],
                turbidity: values[4],
                farm_failure: i64::from(sample.label),
            }
        })
        .collect()
}
