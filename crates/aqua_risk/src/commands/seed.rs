//! Seed command - generates a deterministic synthetic sample history.

use anyhow::Result;
use database::{FinancialSampleRepository, WaterSampleRepository};
use sample_store::synthetic::{generate_financial, generate_water};
use tracing::info;

use crate::context::AppContext;
use crate::samples::{financial_samples_to_rows, water_samples_to_rows};

/// Runs the seed command.
///
/// # Errors
///
/// Returns an error if the sample history cannot be written.
pub async fn run(ctx: &AppContext, seed: u64, rows: usize, force: bool) -> Result<()> {
    let existing = FinancialSampleRepository::count(&ctx.pool).await?
        + WaterSampleRepository::count(&ctx.pool).await?;

    if existing > 0 && !force {
        info!(
            existing,
            "sample history already present; pass --force to append a fresh batch"
        );
        return Ok(());
    }

    info!(seed, rows, "generating synthetic sample history");

    let financial = generate_financial(seed, rows);
    let water = generate_water(seed, rows);

    let inserted_financial =
        FinancialSampleRepository::insert_many(&ctx.pool, &financial_samples_to_rows(&financial))
            .await?;
    let inserted_water =
        WaterSampleRepository::insert_many(&ctx.pool, &water_samples_to_rows(&water)).await?;

    ctx.discard_checkpoints();

    info!(
        financial = inserted_financial,
        water = inserted_water,
        "seed complete"
    );

    Ok(())
}
