//! Scoring glue: applies a fitted model to one record and rounds the
//! probability for storage.

use chrono::Local;

use sample_store::FeatureRecord;

use crate::forest::{RiskForest, ShapeError};

/// One model's output for one record.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RiskScore {
    /// Probability of the risky class, rounded to 4 decimals.
    pub probability: f64,
    /// 1 iff probability >= 0.5.
    pub label: u8,
}

/// Scores a single record against a fitted model.
///
/// Idempotent: the same model and record always produce the same score.
///
/// # Errors
///
/// Returns a [`ShapeError`] if the record does not match the model's
/// fitted schema.
pub fn score_record(model: &RiskForest, record: &FeatureRecord) -> Result<RiskScore, ShapeError> {
    let probability = round4(model.predict_proba(record)?);

    Ok(RiskScore {
        probability,
        label: u8::from(probability >= 0.5),
    })
}

/// Rounds a probability to 4 decimal places, the precision stored in the
/// result ledger.
#[must_use]
pub fn round4(p: f64) -> f64 {
    (p * 10_000.0).round() / 10_000.0
}

/// Current local time in the ledger's `YYYY-MM-DD HH:MM:SS` form.
#[must_use]
pub fn timestamp_now() -> String {
    Local::now().format("%Y-%m-%d %H:%M:%S").to_string()
}
