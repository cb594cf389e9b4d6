//! Train command - fits both risk models from the sample history and
//! saves checkpoints.

use anyhow::Result;
use database::{FinancialSampleRepository, WaterSampleRepository};
use risk_model::{ForestParams, RiskForest, RiskPipeline};
use sample_store::{FeatureSchema, LabeledSample};
use tracing::info;

use crate::context::AppContext;
use crate::samples::{financial_rows_to_samples, water_rows_to_samples};

/// Runs the train command.
///
/// # Errors
///
/// Returns an error if the sample history is empty or cannot be fit.
pub async fn run(ctx: &AppContext, trees: usize, model_seed: u64) -> Result<()> {
    let params = ForestParams {
        trees,
        seed: model_seed,
    };

    info!("Loading training data...");
    let financial_rows = FinancialSampleRepository::list_all(&ctx.pool).await?;
    let water_rows = WaterSampleRepository::list_all(&ctx.pool).await?;

    if financial_rows.is_empty() || water_rows.is_empty() {
        anyhow::bail!("No training data found. Run `aqua-risk seed` or `aqua-risk ingest` first.");
    }

    fit_and_save(
        ctx,
        FeatureSchema::financial(),
        financial_rows_to_samples(&financial_rows)?,
        params,
    )?;
    fit_and_save(
        ctx,
        FeatureSchema::water_quality(),
        water_rows_to_samples(&water_rows)?,
        params,
    )?;

    Ok(())
}

fn fit_and_save(
    ctx: &AppContext,
    schema: FeatureSchema,
    samples: Vec<LabeledSample>,
    params: ForestParams,
) -> Result<()> {
    let name = schema.name().to_string();
    info!(
        model = %name,
        samples = samples.len(),
        trees = params.trees,
        "Training model"
    );

    let mut pipeline = RiskPipeline::new(schema, params);
    pipeline.load_samples(samples.clone());
    let model = pipeline.fit()?;

    let accuracy = training_accuracy(model, &samples)?;
    let checkpoint = ctx.config.checkpoint_path(&name);
    model.save(&checkpoint)?;

    info!(
        model = %name,
        accuracy,
        checkpoint = %checkpoint.display(),
        "Training complete"
    );

    Ok(())
}

/// Fraction of training samples the fitted model classifies correctly.
/// A resubstitution estimate, logged as a quick sanity check only.
fn training_accuracy(model: &RiskForest, samples: &[LabeledSample]) -> Result<f64> {
    let mut correct = 0usize;

    for sample in samples {
        if model.predict(&sample.record)? == sample.label {
            correct += 1;
        }
    }

    Ok(correct as f64 / samples.len() as f64)
}
