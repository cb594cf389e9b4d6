//! History command - prints past scoring results, most recent first.

use anyhow::Result;
use database::ResultRepository;
use tracing::info;

use crate::context::AppContext;

/// Runs the history command.
///
/// # Errors
///
/// Returns an error if the ledger cannot be read.
pub async fn run(ctx: &AppContext, limit: i64) -> Result<()> {
    let total = ResultRepository::count(&ctx.pool).await?;
    let results = ResultRepository::list(&ctx.pool, limit).await?;

    if results.is_empty() {
        info!("ledger is empty; nothing scored yet");
        return Ok(());
    }

    println!("Showing {} of {} results (most recent first)", results.len(), total);

    for result in &results {
        let name = result.farmer_name.as_deref().unwrap_or("-");
        let region = result.region.as_deref().unwrap_or("-");

        println!(
            "[{}] #{:<4} {:<20} {:<15} financial={:.4} technical={:.4}",
            result.scored_at, result.id, name, region, result.financial_risk, result.technical_risk
        );
    }

    Ok(())
}
