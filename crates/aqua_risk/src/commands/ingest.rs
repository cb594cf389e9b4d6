//! Ingest command - bulk-uploads training tables from CSV files.

use std::path::Path;

use anyhow::{Context, Result};
use database::{FinancialSampleRepository, WaterSampleRepository};
use sample_store::{load_csv, FeatureSchema};
use tracing::{info, warn};

use crate::context::AppContext;
use crate::samples::{financial_samples_to_rows, water_samples_to_rows};

/// Runs the ingest command.
///
/// # Errors
///
/// Returns an error if either table is missing a required column or the
/// rows cannot be stored.
pub async fn run(ctx: &AppContext, financial: &Path, water: &Path) -> Result<()> {
    info!(path = %financial.display(), "loading financial table");
    let financial_samples = load_csv(financial, &FeatureSchema::financial())
        .with_context(|| format!("ingesting {}", financial.display()))?;

    info!(path = %water.display(), "loading water-quality table");
    let water_samples = load_csv(water, &FeatureSchema::water_quality())
        .with_context(|| format!("ingesting {}", water.display()))?;

    if financial_samples.is_empty() && water_samples.is_empty() {
        warn!("both tables were empty after validation; nothing ingested");
        return Ok(());
    }

    let inserted_financial = FinancialSampleRepository::insert_many(
        &ctx.pool,
        &financial_samples_to_rows(&financial_samples),
    )
    .await?;
    let inserted_water =
        WaterSampleRepository::insert_many(&ctx.pool, &water_samples_to_rows(&water_samples))
            .await?;

    ctx.discard_checkpoints();

    info!(
        financial = inserted_financial,
        water = inserted_water,
        "ingest complete; previously fitted models were discarded and will be refit"
    );

    Ok(())
}
