//! Exercise log repository for database operations

use anyhow::Result;
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use sqlx::PgPool;
use uuid::Uuid;

/// Exercise log record from database
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct ExerciseLogRecord {
    pub id: Uuid,
    pub user_id: Uuid,
    pub exercise_type: String,
    pub duration_minutes: i32,
    pub calories_burned: i32,
    pub distance_km: Option<Decimal>,
    pub notes: Option<String>,
    pub logged_at: DateTime<Utc>,
    pub created_at: DateTime<Utc>,
}

/// Input for creating an exercise log
#[derive(Debug, Clone)]
pub struct CreateExerciseLog {
    pub user_id: Uuid,
    pub exercise_type: String,
    pub duration_minutes: i32,
    pub calories_burned: i32,
    pub distance_km: Option<Decimal>,
    pub notes: Option<String>,
    pub logged_at: DateTime<Utc>,
}

/// Exercise log repository
pub struct ExerciseRepository;

impl ExerciseRepository {
    /// Create a new exercise log entry
    pub async fn create(pool: &PgPool, input: CreateExerciseLog) -> Result<ExerciseLogRecord> {
        let record = sqlx::query_as::<_, ExerciseLogRecord>(
            r#"
            INSERT INTO exercise_logs (user_id, exercise_type, duration_minutes,
                                       calories_burned, distance_km, notes, logged_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7)
            RETURNING id, user_id, exercise_type, duration_minutes, calories_burned,
                      distance_km, notes, logged_at, created_at
            "#,
        )
        .bind(input.user_id)
        .bind(&input.exercise_type)
        .bind(input.duration_minutes)
        .bind(input.calories_burned)
        .bind(input.distance_km)
        .bind(&input.notes)
        .bind(input.logged_at)
        .fetch_one(pool)
        .await?;

        Ok(record)
    }

    /// List a user's exercise logs, newest first; either bound may be open
    pub async fn list_by_range(
        pool: &PgPool,
        user_id: Uuid,
        start: Option<DateTime<Utc>>,
        end: Option<DateTime<Utc>>,
    ) -> Result<Vec<ExerciseLogRecord>> {
        let records = sqlx::query_as::<_, ExerciseLogRecord>(
            r#"
            SELECT id, user_id, exercise_type, duration_minutes, calories_burned,
                   distance_km, notes, logged_at, created_at
            FROM exercise_logs
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

    /// Calories burned in `[start, end)`
    pub async fn total_burned(
        pool: &PgPool,
        user_id: Uuid,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    ) -> Result<i64> {
        let total: (i64,) = sqlx::query_as(
            r#"
            SELECT COALESCE(SUM(calories_burned), 0)::BIGINT
            FROM exercise_logs
            WHERE user_id = $1 AND logged_at >= $2 AND logged_at < $3
            "#,
        )
        .bind(user_id)
        .bind(start)
        .bind(end)
        .fetch_one(pool)
        .await?;

        Ok(total.0)
    }
}
