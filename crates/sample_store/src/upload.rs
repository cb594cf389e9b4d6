//! Bulk CSV upload of labeled training samples.

use std::path::Path;

use tracing::warn;

use crate::{FeatureRecord, FeatureSchema, LabeledSample, SchemaError};

/// Loads labeled samples from a CSV file.
///
/// The header row must contain every schema field and the schema's label
/// column; extra columns are ignored. Rows with missing or non-numeric
/// values are dropped with a warning.
///
/// # Errors
///
/// Returns [`SchemaError::MissingColumn`] naming the first absent column,
/// or [`SchemaError::Csv`] if the file cannot be read.
pub fn load_csv(path: &Path, schema: &FeatureSchema) -> Result<Vec<LabeledSample>, SchemaError> {
    let mut reader = csv::Reader::from_path(path)?;

    let headers = reader.headers()?.clone();
    let field_indices = resolve_columns(&headers, schema)?;
    let label_index = column_index(&headers, schema.label()).ok_or_else(|| {
        SchemaError::MissingColumn {
            column: schema.label().to_string(),
        }
    })?;

    let mut samples = Vec::new();

    for (row, result) in reader.records().enumerate() {
        let record = result?;

        let Some(values) = parse_row(&record, &field_indices) else {
            warn!(row, path = %path.display(), "dropping row with missing or non-numeric value");
            continue;
        };

        let label = match record.get(label_index).map(str::trim) {
            Some("0") => 0,
            Some("1") => 1,
            _ => {
                warn!(row, path = %path.display(), "dropping row with invalid label");
                continue;
            }
        };

        let record = FeatureRecord::new(schema.clone(), values)?;
        samples.push(LabeledSample { record, label });
    }

    Ok(samples)
}

/// Maps each schema field to its column index in the header row.
fn resolve_columns(
    headers: &csv::StringRecord,
    schema: &FeatureSchema,
) -> Result<Vec<usize>, SchemaError> {
    schema
        .fields()
        .iter()
        .map(|field| {
            column_index(headers, field).ok_or_else(|| SchemaError::MissingColumn {
                column: field.clone(),
            })
        })
        .collect()
}

fn column_index(headers: &csv::StringRecord, name: &str) -> Option<usize> {
    headers.iter().position(|h| h.trim() == name)
}

/// Parses one row's feature values; `None` if any value is missing or
/// not a finite number.
fn parse_row(record: &csv::StringRecord, field_indices: &[usize]) -> Option<Vec<f64>> {
    field_indices
        .iter()
        .map(|&i| {
            record
                .get(i)
                .and_then(|v| v.trim().parse::<f64>().ok())
                .filter(|v| v.is_finite())
        })
        .collect()
}
