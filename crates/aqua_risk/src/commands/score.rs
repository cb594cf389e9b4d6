//! Score command - evaluates one farmer record against both risk models
//! and appends the result to the ledger.

use anyhow::{Context, Result};
use database::{
    CreateScoringResult, FinancialSampleRepository, ResultRepository, WaterSampleRepository,
};
use risk_model::{score_record, timestamp_now, ForestParams, RiskForest, RiskPipeline};
use sample_store::{FeatureRecord, FeatureSchema};
use tracing::info;

use crate::context::AppContext;
use crate::samples::{financial_rows_to_samples, water_rows_to_samples};
use crate::{gate, ScoreArgs};

/// Runs the score command.
///
/// # Errors
///
/// Returns an error if authentication fails, no training data exists, or
/// the ledger cannot be written.
pub async fn run(ctx: AppContext, args: &ScoreArgs) -> Result<()> {
    let ctx = match (&args.username, &args.password) {
        (Some(username), Some(password)) => {
            if !gate::authenticate(&ctx.pool, username, password).await? {
                anyhow::bail!("invalid credentials for `{username}`");
            }
            info!(identity = %username, "authenticated");
            ctx.with_identity(username.clone())
        }
        _ => ctx,
    };

    let financial_record = FeatureRecord::new(
        FeatureSchema::financial(),
        vec![
            args.income,
            args.loan_amount,
            args.credit_score,
            args.past_defaults,
        ],
    )?;
    let water_record = FeatureRecord::new(
        FeatureSchema::water_quality(),
        vec![
            args.temperature,
            args.ph,
            args.ammonia,
            args.dissolved_oxygen,
            args.turbidity,
        ],
    )?;

    let params = ForestParams::default();
    let financial_model = obtain_model(&ctx, FeatureSchema::financial(), params).await?;
    let water_model = obtain_model(&ctx, FeatureSchema::water_quality(), params).await?;

    let financial = score_record(&financial_model, &financial_record)?;
    let technical = score_record(&water_model, &water_record)?;
    let scored_at = timestamp_now();

    let id = ResultRepository::append(
        &ctx.pool,
        CreateScoringResult {
            farmer_name: args.name.clone(),
            age: args.age,
            region: args.region.clone(),
            annual_income: args.income,
            loan_amount: args.loan_amount,
            credit_score: args.credit_score,
            past_defaults: args.past_defaults,
            temperature: args.temperature,
            ph: args.ph,
            ammonia: args.ammonia,
            dissolved_oxygen: args.dissolved_oxygen,
            turbidity: args.turbidity,
            financial_risk: financial.probability,
            technical_risk: technical.probability,
            scored_at: scored_at.clone(),
        },
    )
    .await?;

    info!(ledger_id = id, scored_at = %scored_at, "risk evaluation complete");
    println!(
        "Financial risk (loan default): {:.2}%  [label {}]",
        financial.probability * 100.0,
        financial.label
    );
    println!(
        "Technical risk (farm failure): {:.2}%  [label {}]",
        technical.probability * 100.0,
        technical.label
    );

    Ok(())
}

/// Loads a model checkpoint if one exists, otherwise fits a fresh model
/// from the sample history and saves it.
async fn obtain_model(
    ctx: &AppContext,
    schema: FeatureSchema,
    params: ForestParams,
) -> Result<RiskForest> {
    let checkpoint = ctx.config.checkpoint_path(schema.name());

    if checkpoint.exists() {
        info!(path = %checkpoint.display(), "loading model checkpoint");
        return RiskForest::load(&checkpoint);
    }

    let samples = match schema.name() {
        "financial" => {
            let rows = FinancialSampleRepository::list_all(&ctx.pool).await?;
            financial_rows_to_samples(&rows)?
        }
        _ => {
            let rows = WaterSampleRepository::list_all(&ctx.pool).await?;
            water_rows_to_samples(&rows)?
        }
    };

    if samples.is_empty() {
        anyhow::bail!(
            "no sample history for `{}`; run `aqua-risk seed` or `aqua-risk ingest` first",
            schema.name()
        );
    }

    info!(model = schema.name(), samples = samples.len(), "fitting model");

    let mut pipeline = RiskPipeline::new(schema, params);
    pipeline.load_samples(samples);
    pipeline.fit()?;

    let model = pipeline
        .into_model()
        .context("pipeline holds a model after fit")?;
    model.save(&checkpoint)?;

    Ok(model)
}
