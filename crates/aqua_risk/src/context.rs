//! Shared application context.
//!
//! Constructed once at startup and passed to every command; there is no
//! global connection or session state.

use config::Config;
use sqlx::SqlitePool;
use tracing::debug;

/// Store handles plus the authenticated identity, if any.
pub struct AppContext {
    pub pool: SqlitePool,
    pub config: Config,
    pub identity: Option<String>,
}

impl AppContext {
    /// Creates an unauthenticated context.
    #[must_use]
    pub fn new(pool: SqlitePool, config: Config) -> Self {
        Self {
            pool,
            config,
            identity: None,
        }
    }

    /// Returns the context with the given identity attached.
    #[must_use]
    pub fn with_identity(mut self, identity: String) -> Self {
        self.identity = Some(identity);
        self
    }

    /// Removes saved model checkpoints.
    ///
    /// Called when new training data arrives: the prior fitted models
    /// are discarded and the next scoring run refits from scratch.
    pub fn discard_checkpoints(&self) {
        for name in ["financial", "water_quality"] {
            let path = self.config.checkpoint_path(name);
            if path.exists() && std::fs::remove_file(&path).is_ok() {
                debug!(path = %path.display(), "discarded stale model checkpoint");
            }
        }
    }
}
