//! Login command - checks credentials against the session gate.

use anyhow::Result;
use tracing::info;

use crate::context::AppContext;
use crate::gate;

/// Runs the login command.
///
/// # Errors
///
/// Returns an error on bad credentials or if the user table cannot be
/// read.
pub async fn run(ctx: &AppContext, username: &str, password: &str) -> Result<()> {
    if gate::authenticate(&ctx.pool, username, password).await? {
        info!(username, "login successful");
        println!("Login successful.");
        Ok(())
    } else {
        anyhow::bail!("invalid credentials")
    }
}
