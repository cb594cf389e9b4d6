//! Session gate: registration and credential checks.
//!
//! Secrets are stored as SHA-256 hex digests. The scoring commands
//! consume only the boolean outcome of [`authenticate`].

use database::UserRepository;
use sha2::{Digest, Sha256};
use sqlx::SqlitePool;

/// Outcome of a registration attempt.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RegisterOutcome {
    Created,
    AlreadyExists,
}

/// Hex SHA-256 digest of a secret.
#[must_use]
pub fn hash_secret(secret: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(secret.as_bytes());
    hex::encode(hasher.finalize())
}

/// Registers a new user.
///
/// # Errors
///
/// Returns an error if the user table cannot be written.
pub async fn register(
    pool: &SqlitePool,
    username: &str,
    secret: &str,
) -> Result<RegisterOutcome, sqlx::Error> {
    let created = UserRepository::create(pool, username, &hash_secret(secret)).await?;

    Ok(if created {
        RegisterOutcome::Created
    } else {
        RegisterOutcome::AlreadyExists
    })
}

/// Checks credentials. Unknown users and wrong secrets are both a plain
/// `false`.
///
/// # Errors
///
/// Returns an error if the user table cannot be read.
pub async fn authenticate(
    pool: &SqlitePool,
    username: &str,
    secret: &str,
) -> Result<bool, sqlx::Error> {
    let user = UserRepository::find_by_username(pool, username).await?;

    Ok(user.is_some_and(|u| u.password_hash == hash_secret(secret)))
}

#[cfg(test)]
mod tests {
    use super::*;

    async fn setup() -> SqlitePool {
        let pool = sqlx::sqlite::SqlitePoolOptions::new()
            .max_connections(1)
            .connect("sqlite::memory:")
            .await
            .expect("in-memory pool");

        database::run_migrations(&pool).await.expect("migrations");
        pool
    }

    #[test]
    fn test_hash_secret_is_stable_hex() {
        let a = hash_secret("swordfish");
        let b = hash_secret("swordfish");
        assert_eq!(a, b);
        assert_eq!(a.len(), 64);
        assert!(a.chars().all(|c| c.is_ascii_hexdigit()));

        assert_ne!(hash_secret("swordfish"), hash_secret("Swordfish"));
    }

    #[tokio::test]
    async fn test_register_then_authenticate() {
        let pool = setup().await;

        assert_eq!(
            register(&pool, "ravi", "swordfish").await.unwrap(),
            RegisterOutcome::Created
        );
        assert_eq!(
            register(&pool, "ravi", "other").await.unwrap(),
            RegisterOutcome::AlreadyExists
        );

        assert!(authenticate(&pool, "ravi", "swordfish").await.unwrap());
        assert!(!authenticate(&pool, "ravi", "wrong").await.unwrap());
        assert!(!authenticate(&pool, "nobody", "swordfish").await.unwrap());
    }
}
