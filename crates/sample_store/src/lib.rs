//! Sample store: feature schemas, labeled training samples, seeded
//! synthetic generation and CSV bulk loading.
//!
//! A [`FeatureSchema`] is an explicit, ordered list of field names. Every
//! record carries its schema and every fitted model validates against it,
//! so a reordered input fails loudly instead of silently misassigning
//! values to the wrong features.

use serde::{Deserialize, Serialize};

pub mod synthetic;
pub mod upload;

pub use upload::load_csv;

/// Error raised when input data does not match the expected schema.
#[derive(Debug, thiserror::Error)]
pub enum SchemaError {
    /// A required column is absent from an uploaded table.
    #[error("missing required column `{column}`")]
    MissingColumn { column: String },

    /// A record was built with the wrong number of values for its schema.
    #[error("schema `{schema}` has {expected} fields, got {got} values")]
    FieldCount {
        schema: String,
        expected: usize,
        got: usize,
    },

    /// The uploaded file could not be read or parsed at all.
    #[error("failed to read samples: {0}")]
    Csv(#[from] csv::Error),
}

/// An ordered feature schema: the named contract between training data
/// and a fitted model.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FeatureSchema {
    name: String,
    fields: Vec<String>,
    label: String,
}

impl FeatureSchema {
    /// Creates a schema from a name, ordered field names and a label column.
    #[must_use]
    pub fn new(name: &str, fields: &[&str], label: &str) -> Self {
        Self {
            name: name.to_string(),
            fields: fields.iter().map(ToString::to_string).collect(),
            label: label.to_string(),
        }
    }

    /// The financial profile schema used by the loan-default model.
    #[must_use]
    pub fn financial() -> Self {
        Self::new(
            "financial",
            &["annual_income", "loan_amount", "credit_score", "past_defaults"],
            "loan_default",
        )
    }

    /// The water-quality schema used by the farm-failure model.
    #[must_use]
    pub fn water_quality() -> Self {
        Self::new(
            "water_quality",
            &["temperature", "pH", "ammonia", "dissolved_oxygen", "turbidity"],
            "farm_failure",
        )
    }

    /// Schema name, e.g. `financial`.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Ordered feature field names.
    #[must_use]
    pub fn fields(&self) -> &[String] {
        &self.fields
    }

    /// Name of the binary label column.
    #[must_use]
    pub fn label(&self) -> &str {
        &self.label
    }

    /// Number of feature fields.
    #[must_use]
    pub fn len(&self) -> usize {
        self.fields.len()
    }

    /// Returns true if the schema has no fields.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// Field names joined for error messages.
    #[must_use]
    pub fn describe(&self) -> String {
        self.fields.join(", ")
    }
}

/// An ordered mapping from named feature to numeric value.
#[derive(Debug, Clone, PartialEq)]
pub struct FeatureRecord {
    schema: FeatureSchema,
    values: Vec<f64>,
}

impl FeatureRecord {
    /// Creates a record, enforcing that the value count matches the schema.
    ///
    /// # Errors
    ///
    /// Returns a [`SchemaError::FieldCount`] on a length mismatch.
    pub fn new(schema: FeatureSchema, values: Vec<f64>) -> Result<Self, SchemaError> {
        if values.len() != schema.len() {
            return Err(SchemaError::FieldCount {
                schema: schema.name().to_string(),
                expected: schema.len(),
                got: values.len(),
            });
        }

        Ok(Self { schema, values })
    }

    /// The schema this record was built against.
    #[must_use]
    pub fn schema(&self) -> &FeatureSchema {
        &self.schema
    }

    /// Feature values in schema order.
    #[must_use]
    pub fn values(&self) -> &[f64] {
        &self.values
    }

    /// Looks up a value by field name.
    #[must_use]
    pub fn get(&self, field: &str) -> Option<f64> {
        self.schema
            .fields()
            .iter()
            .position(|f| f == field)
            .map(|i| self.values[i])
    }
}

/// A feature record plus its binary label. Training sets are collections
/// of these, used as-is: no deduplication, no outlier handling.
#[derive(Debug, Clone, PartialEq)]
pub struct LabeledSample {
    pub record: FeatureRecord,
    /// Binary label: 1 = default/failure, 0 = healthy.
    pub label: u8,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builtin_schemas() {
        let financial = FeatureSchema::financial();
        assert_eq!(financial.len(), 4);
        assert_eq!(financial.label(), "loan_default");
        assert_eq!(financial.fields()[0], "annual_income");

        let water = FeatureSchema::water_quality();
        assert_eq!(water.len(), 5);
        assert_eq!(water.label(), "farm_failure");
        assert_eq!(water.fields()[1], "pH");
    }

    #[test]
    fn test_record_rejects_wrong_arity() {
        let err = FeatureRecord::new(FeatureSchema::financial(), vec![1.0, 2.0]).unwrap_err();
        match err {
            SchemaError::FieldCount { expected, got, .. } => {
                assert_eq!(expected, 4);
                assert_eq!(got, 2);
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_record_lookup_by_name() {
        let record = FeatureRecord::new(
            FeatureSchema::financial(),
            vec![250_000.0, 150_000.0, 650.0, 0.0],
        )
        .unwrap();

        assert_eq!(record.get("credit_score"), Some(650.0));
        assert_eq!(record.get("pH"), None);
    }
}
