//! Weight repository for database operations

use anyhow::Result;
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use sqlx::PgPool;
use uuid::Uuid;

/// Weight log record from database
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct WeightLogRecord {
    pub id: Uuid,
    pub user_id: Uuid,
    pub weight_kg: Decimal,
    pub bmi: Option<Decimal>,
    pub logged_at: DateTime<Utc>,
    pub created_at: DateTime<Utc>,
}

/// Input for creating a weight log
#[derive(Debug, Clone)]
pub struct CreateWeightLog {
    pub user_id: Uuid,
    pub weight_kg: Decimal,
    pub bmi: Option<Decimal>,
    pub logged_at: DateTime<Utc>,
}

/// Weight repository for database operations
pub struct WeightRepository;

impl WeightRepository {
    /// Create a new weight log entry
    pub async fn create(pool: &PgPool, input: CreateWeightLog) -> Result<WeightLogRecord> {
        let record = sqlx::query_as::<_, WeightLogRecord>(
            r#"
            INSERT INTO weight_logs (user_id, weight_kg, bmi, logged_at)
            VALUES ($1, $2, $3, $4)
            RETURNING id, user_id, weight_kg, bmi, logged_at, created_at
            "#,
        )
        .bind(input.user_id)
        .bind(input.weight_kg)
        .bind(input.bmi)
        .bind(input.logged_at)
        .fetch_one(pool)
        .await?;

        Ok(record)
    }

    /// Get the N most recent weight logs for a user
    pub async fn list_recent(
        pool: &PgPool,
        user_id: Uuid,
        limit: i64,
    ) -> Result<Vec<WeightLogRecord>> {
        let records = sqlx::query_as::<_, WeightLogRecord>(
            r#"
            SELECT id, user_id, weight_kg, bmi, logged_at, created_at
            FROM weight_logs
            WHERE user_id = $1
            ORDER BY logged_at DESC
            LIMIT $2
            "#,
        )
        .bind(user_id)
        .bind(limit)
        .fetch_all(pool)
        .await?;

        Ok(records)
    }

    /// Get the most recent weight log for a user
    pub async fn get_latest(pool: &PgPool, user_id: Uuid) -> Result<Option<WeightLogRecord>> {
        let record = sqlx::query_as::<_, WeightLogRecord>(
            r#"
            SELECT id, user_id, weight_kg, bmi, logged_at, created_at
            FROM weight_logs
            WHERE user_id = $1
            ORDER BY logged_at DESC
            LIMIT 1
            "#,
        )
        .bind(user_id)
        .fetch_optional(pool)
        .await?;

        Ok(record)
    }
}
