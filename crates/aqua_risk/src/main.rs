//! Aqua Risk Intelligence
//!
//! Scores farmer-loan and water-quality risk with a pair of
//! bagged-decision-tree classifiers fit from a local sample store.

use std::path::PathBuf;

use anyhow::Result;
use clap::{Args, Parser, Subcommand};
use config::Config;
use database::{create_pool, run_migrations};
use tracing_subscriber::EnvFilter;

mod commands;
mod context;
mod gate;
mod samples;

use context::AppContext;

/// Aqua Risk Intelligence
#[derive(Parser)]
#[command(name = "aqua-risk")]
#[command(about = "Loan-default and farm-failure risk scoring")]
#[command(version)]
struct Cli {
    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Generate a seeded synthetic sample history
    Seed {
        /// Seed for the synthetic generator
        #[arg(long, default_value_t = sample_store::synthetic::DEFAULT_SEED)]
        seed: u64,

        /// Number of rows per schema
        #[arg(long, default_value_t = sample_store::synthetic::DEFAULT_ROWS)]
        rows: usize,

        /// Append a fresh batch even if sample history already exists
        #[arg(long)]
        force: bool,
    },

    /// Bulk-upload training tables from CSV files
    Ingest {
        /// Path to the financial table (needs a `loan_default` column)
        #[arg(long)]
        financial: PathBuf,

        /// Path to the water-quality table (needs a `farm_failure` column)
        #[arg(long)]
        water: PathBuf,
    },

    /// Fit both models from the sample history and save checkpoints
    Train {
        /// Number of bagged trees per model
        #[arg(long, default_value_t = 100)]
        trees: usize,

        /// Seed for bootstrap sampling
        #[arg(long, default_value_t = 42)]
        model_seed: u64,
    },

    /// Score one farmer record and append the result to the ledger
    Score(ScoreArgs),

    /// Print past scoring results, most recent first
    History {
        /// Maximum number of entries to print
        #[arg(long, default_value_t = 20)]
        limit: i64,
    },

    /// Register a user with the session gate
    Register {
        #[arg(long)]
        username: String,

        #[arg(long)]
        password: String,
    },

    /// Check credentials against the session gate
    Login {
        #[arg(long)]
        username: String,

        #[arg(long)]
        password: String,
    },
}

/// Inputs for one risk assessment.
#[derive(Args)]
struct ScoreArgs {
    /// Farmer name (optional identity field)
    #[arg(long)]
    name: Option<String>,

    /// Farmer age
    #[arg(long)]
    age: Option<i64>,

    /// Region
    #[arg(long)]
    region: Option<String>,

    /// Annual income (INR)
    #[arg(long)]
    income: f64,

    /// Loan amount (INR)
    #[arg(long)]
    loan_amount: f64,

    /// Credit score
    #[arg(long)]
    credit_score: f64,

    /// Past loan defaults
    #[arg(long)]
    past_defaults: f64,

    /// Water temperature (°C)
    #[arg(long)]
    temperature: f64,

    /// pH level
    #[arg(long)]
    ph: f64,

    /// Ammonia (mg/L)
    #[arg(long)]
    ammonia: f64,

    /// Dissolved oxygen (mg/L)
    #[arg(long)]
    dissolved_oxygen: f64,

    /// Turbidity (NTU)
    #[arg(long)]
    turbidity: f64,

    /// Username for the session gate
    #[arg(long, requires = "password")]
    username: Option<String>,

    /// Password for the session gate
    #[arg(long, requires = "username")]
    password: Option<String>,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize tracing subscriber
    let filter = if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::new("info")
    };

    tracing_subscriber::fmt().with_env_filter(filter).init();

    let config = Config::from_env()?;
    let pool = create_pool(&config.database_url).await?;
    run_migrations(&pool).await?;

    let ctx = AppContext::new(pool, config);

    match cli.command {
        Commands::Seed { seed, rows, force } => {
            commands::seed::run(&ctx, seed, rows, force).await?;
        }
        Commands::Ingest { financial, water } => {
            commands::ingest::run(&ctx, &financial, &water).await?;
        }
        Commands::Train { trees, model_seed } => {
            commands::train::run(&ctx, trees, model_seed).await?;
        }
        Commands::Score(args) => {
            commands::score::run(ctx, &args).await?;
        }
        Commands::History { limit } => {
            commands::history::run(&ctx, limit).await?;
        }
        Commands::Register { username, password } => {
            commands::register::run(&ctx, &username, &password).await?;
        }
        Commands::Login { username, password } => {
            commands::login::run(&ctx, &username, &password).await?;
        }
    }

    Ok(())
}
