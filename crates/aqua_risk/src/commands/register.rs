//! Register command - creates a session-gate user.

use anyhow::Result;
use tracing::info;

use crate::context::AppContext;
use crate::gate::{self, RegisterOutcome};

/// Runs the register command.
///
/// # Errors
///
/// Returns an error if the user table cannot be written.
pub async fn run(ctx: &AppContext, username: &str, password: &str) -> Result<()> {
    match gate::register(&ctx.pool, username, password).await? {
        RegisterOutcome::Created => {
            info!(username, "user registered");
            println!("User `{username}` registered. You can now log in.");
        }
        RegisterOutcome::AlreadyExists => {
            anyhow::bail!("username `{username}` is already taken");
        }
    }

    Ok(())
}
