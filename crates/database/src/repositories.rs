//! Repository functions for database operations.
//!
//! Every function takes the pool explicitly; there is no shared
//! connection state outside the application context.

use sqlx::SqlitePool;

use crate::models::{
    CreateFinancialSample, CreateScoringResult, CreateWaterSample, FinancialSample, ScoringResult,
    User, WaterSample,
};
use crate::StoreError;

/// Repository for financial training samples.
pub struct FinancialSampleRepository;

impl FinancialSampleRepository {
    /// Inserts a batch of financial samples. Returns the number inserted.
    ///
    /// # Errors
    ///
    /// Returns an error if the database operation fails.
    pub async fn insert_many(
        pool: &SqlitePool,
        inputs: &[CreateFinancialSample],
    ) -> Result<u64, sqlx::Error> {
        let mut inserted = 0;

        for input in inputs {
            let result = sqlx::query(
                r#"
                INSERT INTO financial_samples
                    (annual_income, loan_amount, credit_score, past_defaults, loan_default)
                VALUES (?, ?, ?, ?, ?)
                "#,
            )
            .bind(input.annual_income)
            .bind(input.loan_amount)
            .bind(input.credit_score)
            .bind(input.past_defaults)
            .bind(input.loan_default)
            .execute(pool)
            .await?;

            inserted += result.rows_affected();
        }

        Ok(inserted)
    }

    /// Lists all financial samples in insertion order.
    ///
    /// # Errors
    ///
    /// Returns an error if the database operation fails.
    pub async fn list_all(pool: &SqlitePool) -> Result<Vec<FinancialSample>, sqlx::Error> {
        sqlx::query_as::<_, FinancialSample>(
            r#"
            SELECT id, annual_income, loan_amount, credit_score, past_defaults,
                   loan_default, created_at
            FROM financial_samples
            ORDER BY id
            "#,
        )
        .fetch_all(pool)
        .await
    }

    /// Counts stored financial samples.
    ///
    /// # Errors
    ///
    /// Returns an error if the database operation fails.
    pub async fn count(pool: &SqlitePool) -> Result<i64, sqlx::Error> {
        sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM financial_samples")
            .fetch_one(pool)
            .await
    }
}

/// Repository for water-quality training samples.
pub struct WaterSampleRepository;

impl WaterSampleRepository {
    /// Inserts a batch of water-quality samples. Returns the number inserted.
    ///
    /// # Errors
    ///
    /// Returns an error if the database operation fails.
    pub async fn insert_many(
        pool: &SqlitePool,
        inputs: &[CreateWaterSample],
    ) -> Result<u64, sqlx::Error> {
        let mut inserted = 0;

        for input in inputs {
            let result = sqlx::query(
                r#"
                INSERT INTO water_samples
                    (temperature, ph, ammonia, dissolved_oxygen, turbidity, farm_failure)
                VALUES (?, ?, ?, ?, ?, ?)
                "#,
            )
            .bind(input.temperature)
            .bind(input.ph)
            .bind(input.ammonia)
            .bind(input.dissolved_oxygen)
            .bind(input.turbidity)
            .bind(input.farm_failure)
            .execute(pool)
            .await?;

            inserted += result.rows_affected();
        }

        Ok(inserted)
    }

    /// Lists all water-quality samples in insertion order.
    ///
    /// # Errors
    ///
    /// Returns an error if the database operation fails.
    pub async fn list_all(pool: &SqlitePool) -> Result<Vec<WaterSample>, sqlx::Error> {
        sqlx::query_as::<_, WaterSample>(
            r#"
            SELECT id, temperature, ph, ammonia, dissolved_oxygen, turbidity,
                   farm_failure, created_at
            FROM water_samples
            ORDER BY id
            "#,
        )
        .fetch_all(pool)
        .await
    }

    /// Counts stored water-quality samples.
    ///
    /// # Errors
    ///
    /// Returns an error if the database operation fails.
    pub async fn count(pool: &SqlitePool) -> Result<i64, sqlx::Error> {
        sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM water_samples")
            .fetch_one(pool)
            .await
    }
}

/// Repository for the append-only result ledger.
///
/// There is no update or delete operation: rows are immutable once
/// written.
pub struct ResultRepository;

impl ResultRepository {
    /// Appends a scoring result to the ledger. Returns the row id.
    ///
    /// # Errors
    ///
    /// Returns a [`StoreError`] if the ledger cannot be written.
    pub async fn append(
        pool: &SqlitePool,
        input: CreateScoringResult,
    ) -> Result<i64, StoreError> {
        let result = sqlx::query(
            r#"
            INSERT INTO scoring_results
                (farmer_name, age, region,
                 annual_income, loan_amount, credit_score, past_defaults,
                 temperature, ph, ammonia, dissolved_oxygen, turbidity,
                 financial_risk, technical_risk, scored_at)
            VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?)
            "#,
        )
        .bind(input.farmer_name)
        .bind(input.age)
        .bind(input.region)
        .bind(input.annual_income)
        .bind(input.loan_amount)
        .bind(input.credit_score)
        .bind(input.past_defaults)
        .bind(input.temperature)
        .bind(input.ph)
        .bind(input.ammonia)
        .bind(input.dissolved_oxygen)
        .bind(input.turbidity)
        .bind(input.financial_risk)
        .bind(input.technical_risk)
        .bind(input.scored_at)
        .execute(pool)
        .await?;

        Ok(result.last_insert_rowid())
    }

    /// Lists scoring results, most recent first.
    ///
    /// # Errors
    ///
    /// Returns a [`StoreError`] if the ledger cannot be read.
    pub async fn list(pool: &SqlitePool, limit: i64) -> Result<Vec<ScoringResult>, StoreError> {
        sqlx::query_as::<_, ScoringResult>(
            r#"
            SELECT id, farmer_name, age, region,
                   annual_income, loan_amount, credit_score, past_defaults,
                   temperature, ph, ammonia, dissolved_oxygen, turbidity,
                   financial_risk, technical_risk, scored_at
            FROM scoring_results
            ORDER BY id DESC
            LIMIT ?
            "#,
        )
        .bind(limit)
        .fetch_all(pool)
        .await
        .map_err(Into::into)
    }

    /// Counts ledger entries.
    ///
    /// # Errors
    ///
    /// Returns a [`StoreError`] if the ledger cannot be read.
    pub async fn count(pool: &SqlitePool) -> Result<i64, StoreError> {
        sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM scoring_results")
            .fetch_one(pool)
            .await
            .map_err(Into::into)
    }
}

/// Repository for session-gate users.
pub struct UserRepository;

impl UserRepository {
    /// Creates a user. Returns `false` if the username is already taken.
    ///
    /// # Errors
    ///
    /// Returns an error if the database operation fails.
    pub async fn create(
        pool: &SqlitePool,
        username: &str,
        password_hash: &str,
    ) -> Result<bool, sqlx::Error> {
        let result = sqlx::query(
            r#"
            INSERT OR IGNORE INTO users (username, password_hash)
            VALUES (?, ?)
            "#,
        )
        .bind(username)
        .bind(password_hash)
        .execute(pool)
        .await?;

        Ok(result.rows_affected() > 0)
    }

    /// Finds a user by username.
    ///
    /// # Errors
    ///
    /// Returns an error if the database operation fails.
    pub async fn find_by_username(
        pool: &SqlitePool,
        username: &str,
    ) -> Result<Option<User>, sqlx::Error> {
        sqlx::query_as::<_, User>(
            r#"
            SELECT username, password_hash, created_at
            FROM users
            WHERE username = ?
            "#,
        )
        .bind(username)
        .fetch_optional(pool)
        .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// In-memory database with migrations applied.
    ///
    /// A single connection is required: each new `sqlite::memory:`
    /// connection would otherwise see its own empty database.
    async fn setup() -> SqlitePool {
        let pool = sqlx::sqlite::SqlitePoolOptions::new()
            .max_connections(1)
            .connect("sqlite::memory:")
            .await
            .expect("in-memory pool");

        crate::run_migrations(&pool).await.expect("migrations");
        pool
    }

    fn sample_result(scored_at: &str) -> CreateScoringResult {
        CreateScoringResult {
            farmer_name: Some("Ravi".to_string()),
            age: Some(35),
            region: Some("Andhra Pradesh".to_string()),
            annual_income: 250_000.0,
            loan_amount: 150_000.0,
            credit_score: 650.0,
            past_defaults: 0.0,
            temperature: 28.0,
            ph: 7.5,
            ammonia: 0.2,
            dissolved_oxygen: 6.0,
            turbidity: 15.0,
            financial_risk: 0.1234,
            technical_risk: 0.5678,
            scored_at: scored_at.to_string(),
        }
    }

    #[tokio::test]
    async fn test_ledger_append_only_most_recent_first() {
        let pool = setup().await;

        for i in 0..5 {
            let result = sample_result(&format!("2025-01-0{} 12:00:00", i + 1));
            ResultRepository::append(&pool, result).await.unwrap();
        }

        assert_eq!(ResultRepository::count(&pool).await.unwrap(), 5);

        let rows = ResultRepository::list(&pool, 100).await.unwrap();
        assert_eq!(rows.len(), 5);
        // Most recent first: ids descending.
        for pair in rows.windows(2) {
            assert!(pair[0].id > pair[1].id);
        }
        assert_eq!(rows[0].scored_at, "2025-01-05 12:00:00");
    }

    #[tokio::test]
    async fn test_ledger_list_respects_limit() {
        let pool = setup().await;

        for _ in 0..4 {
            ResultRepository::append(&pool, sample_result("2025-01-01 00:00:00"))
                .await
                .unwrap();
        }

        let rows = ResultRepository::list(&pool, 2).await.unwrap();
        assert_eq!(rows.len(), 2);
    }

    #[tokio::test]
    async fn test_sample_insert_and_list() {
        let pool = setup().await;

        let inputs = vec![
            CreateFinancialSample {
                annual_income: 200_000.0,
                loan_amount: 80_000.0,
                credit_score: 700.0,
                past_defaults: 0.0,
                loan_default: 0,
            },
            CreateFinancialSample {
                annual_income: 120_000.0,
                loan_amount: 250_000.0,
                credit_score: 400.0,
                past_defaults: 2.0,
                loan_default: 1,
            },
        ];

        let inserted = FinancialSampleRepository::insert_many(&pool, &inputs)
            .await
            .unwrap();
        assert_eq!(inserted, 2);
        assert_eq!(FinancialSampleRepository::count(&pool).await.unwrap(), 2);

        let rows = FinancialSampleRepository::list_all(&pool).await.unwrap();
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].loan_default, 0);
        assert_eq!(rows[1].loan_default, 1);
    }

    #[tokio::test]
    async fn test_water_sample_roundtrip() {
        let pool = setup().await;

        let inputs = vec![CreateWaterSample {
            temperature: 29.5,
            ph: 8.9,
            ammonia: 0.7,
            dissolved_oxygen: 3.2,
            turbidity: 20.0,
            farm_failure: 1,
        }];

        WaterSampleRepository::insert_many(&pool, &inputs)
            .await
            .unwrap();

        let rows = WaterSampleRepository::list_all(&pool).await.unwrap();
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].farm_failure, 1);
        assert!((rows[0].ph - 8.9).abs() < f64::EPSILON);
    }

    #[tokio::test]
    async fn test_user_create_rejects_duplicates() {
        let pool = setup().await;

        assert!(UserRepository::create(&pool, "ravi", "hash1").await.unwrap());
        assert!(!UserRepository::create(&pool, "ravi", "hash2").await.unwrap());

        let user = UserRepository::find_by_username(&pool, "ravi")
            .await
            .unwrap()
            .expect("user exists");
        // First write wins; the duplicate insert is ignored.
        assert_eq!(user.password_hash, "hash1");

        assert!(UserRepository::find_by_username(&pool, "missing")
            .await
            .unwrap()
            .is_none());
    }
}
