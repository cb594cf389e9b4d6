//! Database model types.

/// A historical financial sample used for training the loan-default model.
#[derive(Debug, Clone, PartialEq, sqlx::FromRow)]
pub struct FinancialSample {
    pub id: i64,
    pub annual_income: f64,
    pub loan_amount: f64,
    pub credit_score: f64,
    pub past_defaults: f64,
    /// Binary label: 1 = defaulted, 0 = repaid.
    pub loan_default: i64,
    pub created_at: String,
}

/// A historical water-quality sample used for training the farm-failure model.
#[derive(Debug, Clone, PartialEq, sqlx::FromRow)]
pub struct WaterSample {
    pub id: i64,
    pub temperature: f64,
    pub ph: f64,
    pub ammonia: f64,
    pub dissolved_oxygen: f64,
    pub turbidity: f64,
    /// Binary label: 1 = farm failed, 0 = healthy.
    pub farm_failure: i64,
    pub created_at: String,
}

/// A past scoring result. Immutable once written.
#[derive(Debug, Clone, PartialEq, sqlx::FromRow)]
pub struct ScoringResult {
    pub id: i64,
    pub farmer_name: Option<String>,
    pub age: Option<i64>,
    pub region: Option<String>,
    pub annual_income: f64,
    pub loan_amount: f64,
    pub credit_score: f64,
    pub past_defaults: f64,
    pub temperature: f64,
    pub ph: f64,
    pub ammonia: f64,
    pub dissolved_oxygen: f64,
    pub turbidity: f64,
    /// Predicted loan-default probability, rounded to 4 decimals.
    pub financial_risk: f64,
    /// Predicted farm-failure probability, rounded to 4 decimals.
    pub technical_risk: f64,
    /// Timestamp string in `YYYY-MM-DD HH:MM:SS` form.
    pub scored_at: String,
}

/// A registered user of the session gate.
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct User {
    pub username: String,
    pub password_hash: String,
    pub created_at: String,
}

/// Input for inserting a financial training sample.
#[derive(Debug, Clone)]
pub struct CreateFinancialSample {
    pub annual_income: f64,
    pub loan_amount: f64,
    pub credit_score: f64,
    pub past_defaults: f64,
    pub loan_default: i64,
}

/// Input for inserting a water-quality training sample.
#[derive(Debug, Clone)]
pub struct CreateWaterSample {
    pub temperature: f64,
    pub ph: f64,
    pub ammonia: f64,
    pub dissolved_oxygen: f64,
    pub turbidity: f64,
    pub farm_failure: i64,
}

/// Input for appending a scoring result to the ledger.
#[derive(Debug, Clone)]
pub struct CreateScoringResult {
    pub farmer_name: Option<String>,
    pub age: Option<i64>,
    pub region: Option<String>,
    pub annual_income: f64,
    pub loan_amount: f64,
    pub credit_score: f64,
    pub past_defaults: f64,
    pub temperature: f64,
    pub ph: f64,
    pub ammonia: f64,
    pub dissolved_oxygen: f64,
    pub turbidity: f64,
    pub financial_risk: f64,
    pub technical_risk: f64,
    pub scored_at: String,
}
