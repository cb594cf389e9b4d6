//! Sample-to-model lifecycle.
//!
//! A pipeline is UNINITIALIZED until samples arrive, LOADED once they
//! have, and FITTED after `fit`. Any new sample arrival while FITTED
//! discards the fitted model and returns to LOADED; there is no
//! incremental learning.

use sample_store::{FeatureSchema, LabeledSample};

use crate::forest::{ForestParams, RiskForest, TrainingError};

/// Observable pipeline state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PipelineState {
    /// No data loaded.
    Uninitialized,
    /// Samples present, no fitted model.
    Loaded,
    /// Model ready to score.
    Fitted,
}

/// Holds the training samples for one schema and the model fitted from
/// them.
#[derive(Debug)]
pub struct RiskPipeline {
    schema: FeatureSchema,
    params: ForestParams,
    samples: Vec<LabeledSample>,
    model: Option<RiskForest>,
}

impl RiskPipeline {
    /// Creates an uninitialized pipeline for the given schema.
    #[must_use]
    pub fn new(schema: FeatureSchema, params: ForestParams) -> Self {
        Self {
            schema,
            params,
            samples: Vec::new(),
            model: None,
        }
    }

    /// Current state.
    #[must_use]
    pub fn state(&self) -> PipelineState {
        if self.model.is_some() {
            PipelineState::Fitted
        } else if self.samples.is_empty() {
            PipelineState::Uninitialized
        } else {
            PipelineState::Loaded
        }
    }

    /// Appends samples, discarding any previously fitted model.
    pub fn load_samples(&mut self, samples: Vec<LabeledSample>) {
        self.samples.extend(samples);
        self.model = None;
    }

    /// Number of loaded samples.
    #[must_use]
    pub fn sample_count(&self) -> usize {
        self.samples.len()
    }

    /// Fits a fresh model from the loaded samples.
    ///
    /// # Errors
    ///
    /// Returns a [`TrainingError`] if the samples cannot be fit; the
    /// pipeline stays in its previous state.
    pub fn fit(&mut self) -> Result<&RiskForest, TrainingError> {
        let model = RiskForest::fit(&self.schema, &self.samples, self.params)?;
        Ok(self.model.insert(model))
    }

    /// The fitted model, if any.
    #[must_use]
    pub fn model(&self) -> Option<&RiskForest> {
        self.model.as_ref()
    }

    /// Consumes the pipeline, yielding ownership of the fitted model.
    #[must_use]
    pub fn into_model(self) -> Option<RiskForest> {
        self.model
    }
}

#[cfg(test)]
mod tests {
    use sample_store::synthetic::{generate_financial, DEFAULT_SEED};

    use super::*;

    fn pipeline() -> RiskPipeline {
        RiskPipeline::new(
            FeatureSchema::financial(),
            ForestParams {
                trees: 10,
                seed: DEFAULT_SEED,
            },
        )
    }

    #[test]
    fn test_state_transitions() {
        let mut pipeline = pipeline();
        assert_eq!(pipeline.state(), PipelineState::Uninitialized);

        pipeline.load_samples(generate_financial(DEFAULT_SEED, 100));
        assert_eq!(pipeline.state(), PipelineState::Loaded);
        assert_eq!(pipeline.sample_count(), 100);

        pipeline.fit().unwrap();
        assert_eq!(pipeline.state(), PipelineState::Fitted);
        assert!(pipeline.model().is_some());
    }

    #[test]
    fn test_new_data_discards_fitted_model() {
        let mut pipeline = pipeline();
        pipeline.load_samples(generate_financial(DEFAULT_SEED, 100));
        pipeline.fit().unwrap();
        assert_eq!(pipeline.state(), PipelineState::Fitted);

        pipeline.load_samples(generate_financial(DEFAULT_SEED + 1, 50));
        assert_eq!(pipeline.state(), PipelineState::Loaded);
        assert!(pipeline.model().is_none());
        assert_eq!(pipeline.sample_count(), 150);
    }

    #[test]
    fn test_fit_without_data_fails_and_state_unchanged() {
        let mut pipeline = pipeline();
        assert!(pipeline.fit().is_err());
        assert_eq!(pipeline.state(), PipelineState::Uninitialized);
    }
}
