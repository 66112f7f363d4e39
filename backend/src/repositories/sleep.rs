//! Sleep repository for database operations

use anyhow::Result;
use chrono::{DateTime, Utc};
use sqlx::PgPool;
use uuid::Uuid;

/// Sleep log record from database
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct SleepLogRecord {
    pub id: Uuid,
    pub user_id: Uuid,
    pub bed_time: DateTime<Utc>,
    pub wake_time: DateTime<Utc>,
    pub duration_hours: i32,
    pub quality: Option<i32>,
    pub notes: Option<String>,
    pub logged_at: DateTime<Utc>,
    pub created_at: DateTime<Utc>,
}

/// Input for creating a sleep log
#[derive(Debug, Clone)]
pub struct CreateSleepLog {
    pub user_id: Uuid,
    pub bed_time: DateTime<Utc>,
    pub wake_time: DateTime<Utc>,
    pub duration_hours: i32,
    pub quality: Option<i32>,
    pub notes: Option<String>,
}

/// Sleep log repository
pub struct SleepRepository;

impl SleepRepository {
    /// Create a new sleep log; `logged_at` is the wake time
    pub async fn create(pool: &PgPool, input: CreateSleepLog) -> Result<SleepLogRecord> {
        let record = sqlx::query_as::<_, SleepLogRecord>(
            r#"
            INSERT INTO sleep_logs (user_id, bed_time, wake_time, duration_hours,
                                    quality, notes, logged_at)
            VALUES ($1, $2, $3, $4, $5, $6, $3)
            RETURNING id, user_id, bed_time, wake_time, duration_hours,
                      quality, notes, logged_at, created_at
            "#,
        )
        .bind(input.user_id)
        .bind(input.bed_time)
        .bind(input.wake_time)
        .bind(input.duration_hours)
        .bind(input.quality)
        .bind(&input.notes)
        .fetch_one(pool)
        .await?;

        Ok(record)
    }

    /// List a user's sleep logs, newest first; either bound may be open
    pub async fn list_by_range(
        pool: &PgPool,
        user_id: Uuid,
        start: Option<DateTime<Utc>>,
        end: Option<DateTime<Utc>>,
    ) -> Result<Vec<SleepLogRecord>> {
        let records = sqlx::query_as::<_, SleepLogRecord>(
            r#"
            SELECT id, user_id, bed_time, wake_time, duration_hours,
                   quality, notes, logged_at, created_at
            FROM sleep_logs
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
}
