//! SQLite access layer: pool creation, migrations, row models and
//! repositories for the sample history, the result ledger and the
//! session-gate user table.

use std::str::FromStr;

use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};
use sqlx::SqlitePool;

mod models;
mod repositories;

pub use models::{
    CreateFinancialSample, CreateScoringResult, CreateWaterSample, FinancialSample, ScoringResult,
    User, WaterSample,
};
pub use repositories::{
    FinancialSampleRepository, ResultRepository, UserRepository, WaterSampleRepository,
};

/// Error raised when the backing store cannot be read or written.
///
/// Surfaced to the caller as-is; never retried.
#[derive(Debug, thiserror::Error)]
#[error("result store unavailable: {0}")]
pub struct StoreError(#[from] sqlx::Error);

/// Creates a connection pool to the SQLite database, creating the
/// database file if it does not exist yet.
///
/// # Errors
///
/// Returns an error if the connection to the database fails.
pub async fn create_pool(database_url: &str) -> Result<SqlitePool, sqlx::Error> {
    let options = SqliteConnectOptions::from_str(database_url)?.create_if_missing(true);

    SqlitePoolOptions::new()
        .max_connections(5)
        .connect_with(options)
        .await
}

/// Runs all pending migrations.
///
/// # Errors
///
/// Returns an error if running migrations fails.
pub async fn run_migrations(pool: &SqlitePool) -> Result<(), sqlx::migrate::MigrateError> {
    sqlx::migrate!("./migrations").run(pool).await
}
