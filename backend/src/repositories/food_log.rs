//! Food diary repository

use anyhow::Result;
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use sqlx::PgPool;
use uuid::Uuid;

/// Food log record from the database
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct FoodLogRecord {
    pub id: Uuid,
    pub user_id: Uuid,
    pub food_id: Uuid,
    pub food_name: String,
    pub grams: Decimal,
    pub calories: i32,
    pub protein: i32,
    pub fat: i32,
    pub carbs: i32,
    pub logged_at: DateTime<Utc>,
    pub created_at: DateTime<Utc>,
}

/// Input for creating a food log
#[derive(Debug, Clone)]
pub struct CreateFoodLog {
    pub user_id: Uuid,
    pub food_id: Uuid,
    pub food_name: String,
    pub grams: Decimal,
    pub calories: i32,
    pub protein: i32,
    pub fat: i32,
    pub carbs: i32,
    pub logged_at: DateTime<Utc>,
}

/// Summed nutrients over a time window
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, sqlx::FromRow)]
pub struct FoodTotals {
    pub calories: i64,
    pub protein: i64,
    pub fat: i64,
    pub carbs: i64,
    pub count: i64,
}

/// Food log repository
pub struct FoodLogRepository;

impl FoodLogRepository {
    /// Create a new food log entry
    pub async fn create(pool: &PgPool, input: CreateFoodLog) -> Result<FoodLogRecord> {
        let record = sqlx::query_as::<_, FoodLogRecord>(
            r#"
            INSERT INTO food_logs (user_id, food_id, food_name, grams, calories,
                                   protein, fat, carbs, logged_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)
            RETURNING id, user_id, food_id, food_name, grams, calories,
                      protein, fat, carbs, logged_at, created_at
            "#,
        )
        .bind(input.user_id)
        .bind(input.food_id)
        .bind(&input.food_name)
        .bind(input.grams)
        .bind(input.calories)
        .bind(input.protein)
        .bind(input.fat)
        .bind(input.carbs)
        .bind(input.logged_at)
        .fetch_one(pool)
        .await?;

        Ok(record)
    }

    /// List a user's food logs, newest first; either bound may be open
    pub async fn list_by_range(
        pool: &PgPool,
        user_id: Uuid,
        start: Option<DateTime<Utc>>,
        end: Option<DateTime<Utc>>,
    ) -> Result<Vec<FoodLogRecord>> {
        let records = sqlx::query_as::<_, FoodLogRecord>(
            r#"
            SELECT id, user_id, food_id, food_name, grams, calories,
                   protein, fat, carbs, logged_at, created_at
            FROM food_logs
            WHERE user_id = $1
              AND ($2::timestamptz IS NULL OR logged_at >= $2)
              AND ($3::timestamptz IS NULL OR logged_at <= $3)
            ORDER BY logged_at DESC
            "#,
        )
        .bind(user_id)
        .bind(start)
        .bind(end)
        .fetch_all(pool)
        .await?;

        Ok(records)
    }

    /// Delete a food log entry owned by the user
    pub async fn delete(pool: &PgPool, id: Uuid, user_id: Uuid) -> Result<bool> {
        let result = sqlx::query("DELETE FROM food_logs WHERE id = $1 AND user_id = $2")
            .bind(id)
            .bind(user_id)
            .execute(pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }

    /// Sum nutrients logged in `[day_start, day_end)`
    pub async fn daily_totals(
        pool: &PgPool,
        user_id: Uuid,
        day_start: DateTime<Utc>,
        day_end: DateTime<Utc>,
    ) -> Result<FoodTotals> {
        let totals = sqlx::query_as::<_, FoodTotals>(
            r#"
            SELECT
                COALESCE(SUM(calories), 0)::BIGINT AS calories,
                COALESCE(SUM(protein), 0)::BIGINT AS protein,
                COALESCE(SUM(fat), 0)::BIGINT AS fat,
                COALESCE(SUM(carbs), 0)::BIGINT AS carbs,
                COUNT(*) AS count
            FROM food_logs
            WHERE user_id = $1 AND logged_at >= $2 AND logged_at < $3
            "#,
        )
        .bind(user_id)
        .bind(day_start)
        .bind(day_end)
        .fetch_one(pool)
        .await?;

        Ok(totals)
    }
}
