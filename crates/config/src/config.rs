use std::path::PathBuf;

/// Default SQLite database URL when `DATABASE_URL` is not set.
const DEFAULT_DATABASE_URL: &str = "sqlite://aqua_risk.db";

/// Default directory for model checkpoints when `MODEL_DIR` is not set.
const DEFAULT_MODEL_DIR: &str = "models";

/// Application configuration loaded from environment variables.
#[derive(Debug, Clone)]
pub struct Config {
    /// SQLite connection URL for the sample history and result ledger.
    pub database_url: String,

    /// Directory where fitted model checkpoints are saved and loaded.
    pub model_dir: PathBuf,
}

impl Config {
    /// Loads configuration from environment variables.
    ///
    /// Optional environment variables:
    /// - `DATABASE_URL`: SQLite connection string (default: `sqlite://aqua_risk.db`)
    /// - `MODEL_DIR`: directory for model checkpoints (default: `models`)
    ///
    /// # Errors
    ///
    /// Returns an error if a variable is present but not valid unicode.
    pub fn from_env() -> anyhow::Result<Self> {
        // Load .env file
        dotenvy::dotenv().ok();

        let database_url = match std::env::var("DATABASE_URL") {
            Ok(url) => url,
            Err(std::env::VarError::NotPresent) => DEFAULT_DATABASE_URL.to_string(),
            Err(e) => return Err(e.into()),
        };

        let model_dir = match std::env::var("MODEL_DIR") {
            Ok(dir) => PathBuf::from(dir),
            Err(std::env::VarError::NotPresent) => PathBuf::from(DEFAULT_MODEL_DIR),
            Err(e) => return Err(e.into()),
        };

        Ok(Self {
            database_url,
            model_dir,
        })
    }

    /// Path of the checkpoint file for a model with the given name.
    #[must_use]
    pub fn checkpoint_path(&self, model_name: &str) -> PathBuf {
        self.model_dir.join(format!("{model_name}.json"))
    }
}
