//! Bagged ensemble of decision trees.

use std::path::Path;

use anyhow::Context;
use linfa::traits::{Fit, Predict};
use linfa::DatasetBase;
use linfa_trees::DecisionTree;
use ndarray::{Array1, Array2};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde::{Deserialize, Serialize};
use tracing::debug;

use sample_store::{FeatureRecord, FeatureSchema, LabeledSample};

/// Error raised when a training set cannot be fit.
#[derive(Debug, thiserror::Error)]
pub enum TrainingError {
    #[error("training set is empty")]
    EmptySet,

    /// A one-class set would fit a degenerate always-0/always-1 model;
    /// refusing is better than returning one silently.
    #[error("training set contains a single class (label {label})")]
    SingleClass { label: u8 },

    #[error("feature `{field}` contains a non-numeric value")]
    NonNumeric { field: String },

    #[error("training sample does not match schema `{expected}`")]
    SchemaMismatch { expected: String },

    #[error("decision tree fit failed: {0}")]
    Fit(String),
}

/// Error raised when a record's schema does not match the schema a model
/// was fitted with.
#[derive(Debug, thiserror::Error)]
#[error("feature shape mismatch: model was fitted on [{expected}], record carries [{got}]")]
pub struct ShapeError {
    pub expected: String,
    pub got: String,
}

/// Forest hyperparameters. Tree-level parameters are library defaults.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct ForestParams {
    /// Number of bagged trees.
    pub trees: usize,
    /// Seed for bootstrap sampling; fixes the fitted model for a given
    /// training set.
    pub seed: u64,
}

impl Default for ForestParams {
    fn default() -> Self {
        Self {
            trees: 100,
            seed: 42,
        }
    }
}

/// A fitted binary classifier: bagged decision trees plus the feature
/// schema they were trained against.
///
/// Opaque to callers beyond `predict_proba` / `predict`; never updated
/// incrementally. New data means a full refit.
#[derive(Debug, Serialize, Deserialize)]
pub struct RiskForest {
    schema: FeatureSchema,
    params: ForestParams,
    trees: Vec<DecisionTree<f64, usize>>,
}

impl RiskForest {
    /// Fits a forest on the given samples.
    ///
    /// Every sample is used as-is: no deduplication, no outlier handling.
    /// Each tree is fit on a bootstrap resample drawn from a seeded RNG,
    /// so the fitted model is reproducible for a fixed seed.
    ///
    /// # Errors
    ///
    /// Returns a [`TrainingError`] if the set is empty, contains a single
    /// class, has non-numeric values, or a sample deviates from `schema`.
    pub fn fit(
        schema: &FeatureSchema,
        samples: &[LabeledSample],
        params: ForestParams,
    ) -> Result<Self, TrainingError> {
        if samples.is_empty() {
            return Err(TrainingError::EmptySet);
        }

        for sample in samples {
            if sample.record.schema() != schema {
                return Err(TrainingError::SchemaMismatch {
                    expected: schema.describe(),
                });
            }
            for (field, value) in schema.fields().iter().zip(sample.record.values()) {
                if !value.is_finite() {
                    return Err(TrainingError::NonNumeric {
                        field: field.clone(),
                    });
                }
            }
        }

        let first = samples[0].label;
        if samples.iter().all(|s| s.label == first) {
            return Err(TrainingError::SingleClass { label: first });
        }

        let n = samples.len();
        let d = schema.len();
        let mut rng = StdRng::seed_from_u64(params.seed);
        let mut trees = Vec::with_capacity(params.trees);

        for _ in 0..params.trees {
            let mut x = Array2::<f64>::zeros((n, d));
            let mut y = Array1::<usize>::zeros(n);

            for i in 0..n {
                let pick = rng.gen_range(0..n);
                for (j, value) in samples[pick].record.values().iter().enumerate() {
                    x[[i, j]] = *value;
                }
                y[i] = usize::from(samples[pick].label);
            }

            let ds = DatasetBase::from(x).with_targets(y);
            let tree: DecisionTree<f64, usize> = DecisionTree::params()
                .fit(&ds)
                .map_err(|e| TrainingError::Fit(e.to_string()))?;
            trees.push(tree);
        }

        debug!(
            schema = schema.name(),
            samples = n,
            trees = trees.len(),
            "fitted risk forest"
        );

        Ok(Self {
            schema: schema.clone(),
            params,
            trees,
        })
    }

    /// The schema this forest was fitted against.
    #[must_use]
    pub fn schema(&self) -> &FeatureSchema {
        &self.schema
    }

    /// Predicted probability of class 1: the fraction of trees voting 1.
    ///
    /// Deterministic for a fitted model: scoring the same record twice
    /// yields the same probability.
    ///
    /// # Errors
    ///
    /// Returns a [`ShapeError`] if the record's schema (field names and
    /// order) does not match the fitted schema.
    pub fn predict_proba(&self, record: &FeatureRecord) -> Result<f64, ShapeError> {
        self.validate(record)?;

        let d = self.schema.len();
        let mut x = Array2::<f64>::zeros((1, d));
        for (j, value) in record.values().iter().enumerate() {
            x[[0, j]] = *value;
        }

        let votes = self
            .trees
            .iter()
            .filter(|tree| tree.predict(&x)[0] == 1)
            .count();

        Ok(votes as f64 / self.trees.len() as f64)
    }

    /// Thresholded label: 1 iff the predicted probability is at least 0.5.
    ///
    /// # Errors
    ///
    /// Returns a [`ShapeError`] on a schema mismatch.
    pub fn predict(&self, record: &FeatureRecord) -> Result<u8, ShapeError> {
        Ok(u8::from(self.predict_proba(record)? >= 0.5))
    }

    fn validate(&self, record: &FeatureRecord) -> Result<(), ShapeError> {
        if record.schema() == &self.schema {
            Ok(())
        } else {
            Err(ShapeError {
                expected: self.schema.describe(),
                got: record.schema().describe(),
            })
        }
    }

    /// Saves the fitted forest as a JSON checkpoint.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be written.
    pub fn save(&self, path: &Path) -> anyhow::Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("creating {}", parent.display()))?;
        }

        let file = std::fs::File::create(path)
            .with_context(|| format!("creating checkpoint {}", path.display()))?;
        serde_json::to_writer(file, self)
            .with_context(|| format!("writing checkpoint {}", path.display()))?;

        Ok(())
    }

    /// Loads a fitted forest from a JSON checkpoint.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed.
    pub fn load(path: &Path) -> anyhow::Result<Self> {
        let file = std::fs::File::open(path)
            .with_context(|| format!("opening checkpoint {}", path.display()))?;
        let forest = serde_json::from_reader(std::io::BufReader::new(file))
            .with_context(|| format!("parsing checkpoint {}", path.display()))?;

        Ok(forest)
    }
}

#[cfg(test)]
mod tests {
    use sample_store::synthetic::{generate_financial, generate_water, DEFAULT_ROWS, DEFAULT_SEED};
    use sample_store::FeatureSchema;

    use super::*;

    fn financial_record(values: Vec<f64>) -> FeatureRecord {
        FeatureRecord::new(FeatureSchema::financial(), values).unwrap()
    }

    #[test]
    fn test_empty_training_set_fails() {
        let err = RiskForest::fit(&FeatureSchema::financial(), &[], ForestParams::default())
            .unwrap_err();
        assert!(matches!(err, TrainingError::EmptySet));
    }

    #[test]
    fn test_single_class_fails() {
        let mut samples = generate_financial(DEFAULT_SEED, 50);
        for sample in &mut samples {
            sample.label = 1;
        }

        let err = RiskForest::fit(&FeatureSchema::financial(), &samples, ForestParams::default())
            .unwrap_err();
        assert!(matches!(err, TrainingError::SingleClass { label: 1 }));
    }

    #[test]
    fn test_non_numeric_feature_fails() {
        let mut samples = generate_financial(DEFAULT_SEED, 50);
        samples[3] = LabeledSample {
            record: financial_record(vec![f64::NAN, 100_000.0, 500.0, 0.0]),
            label: samples[3].label,
        };

        let err = RiskForest::fit(&FeatureSchema::financial(), &samples, ForestParams::default())
            .unwrap_err();
        match err {
            TrainingError::NonNumeric { field } => assert_eq!(field, "annual_income"),
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_probability_in_unit_interval_and_threshold_law() {
        let samples = generate_financial(DEFAULT_SEED, 200);
        let params = ForestParams {
            trees: 20,
            seed: DEFAULT_SEED,
        };
        let forest = RiskForest::fit(&FeatureSchema::financial(), &samples, params).unwrap();

        for sample in samples.iter().take(20) {
            let p = forest.predict_proba(&sample.record).unwrap();
            assert!((0.0..=1.0).contains(&p));

            let label = forest.predict(&sample.record).unwrap();
            assert_eq!(label, u8::from(p >= 0.5));
        }
    }

    #[test]
    fn test_scoring_is_idempotent() {
        let samples = generate_water(DEFAULT_SEED, 200);
        let params = ForestParams {
            trees: 20,
            seed: DEFAULT_SEED,
        };
        let forest = RiskForest::fit(&FeatureSchema::water_quality(), &samples, params).unwrap();

        let record = FeatureRecord::new(
            FeatureSchema::water_quality(),
            vec![28.0, 7.5, 0.2, 6.0, 15.0],
        )
        .unwrap();

        let a = forest.predict_proba(&record).unwrap();
        let b = forest.predict_proba(&record).unwrap();
        assert!((a - b).abs() < f64::EPSILON);
    }

    #[test]
    fn test_refit_with_same_seed_reproduces_probability() {
        // Fixed seed, n = 500: the fit + score scenario must reproduce
        // the probability exactly after a full refit.
        let record = financial_record(vec![250_000.0, 150_000.0, 650.0, 0.0]);
        let params = ForestParams {
            trees: 25,
            seed: DEFAULT_SEED,
        };

        let samples = generate_financial(DEFAULT_SEED, DEFAULT_ROWS);
        let first = RiskForest::fit(&FeatureSchema::financial(), &samples, params)
            .unwrap()
            .predict_proba(&record)
            .unwrap();

        let samples = generate_financial(DEFAULT_SEED, DEFAULT_ROWS);
        let second = RiskForest::fit(&FeatureSchema::financial(), &samples, params)
            .unwrap()
            .predict_proba(&record)
            .unwrap();

        assert!((0.0..=1.0).contains(&first));
        assert!((first - second).abs() < f64::EPSILON);
    }

    #[test]
    fn test_mismatched_schema_is_rejected() {
        let samples = generate_financial(DEFAULT_SEED, 100);
        let params = ForestParams {
            trees: 10,
            seed: DEFAULT_SEED,
        };
        let forest = RiskForest::fit(&FeatureSchema::financial(), &samples, params).unwrap();

        let water_record = FeatureRecord::new(
            FeatureSchema::water_quality(),
            vec![28.0, 7.5, 0.2, 6.0, 15.0],
        )
        .unwrap();

        let err = forest.predict_proba(&water_record).unwrap_err();
        assert!(err.expected.contains("annual_income"));
        assert!(err.got.contains("pH"));
    }

    #[test]
    fn test_checkpoint_roundtrip_preserves_predictions() {
        let samples = generate_financial(DEFAULT_SEED, 100);
        let params = ForestParams {
            trees: 10,
            seed: DEFAULT_SEED,
        };
        let forest = RiskForest::fit(&FeatureSchema::financial(), &samples, params).unwrap();

        let record = financial_record(vec![250_000.0, 150_000.0, 650.0, 0.0]);
        let before = forest.predict_proba(&record).unwrap();

        let path = std::env::temp_dir().join(format!(
            "risk_forest_checkpoint_{}.json",
            std::process::id()
        ));
        forest.save(&path).unwrap();
        let loaded = RiskForest::load(&path).unwrap();
        let _ = std::fs::remove_file(&path);

        let after = loaded.predict_proba(&record).unwrap();
        assert!((before - after).abs() < f64::EPSILON);
        assert_eq!(loaded.schema(), &FeatureSchema::financial());
    }
}
