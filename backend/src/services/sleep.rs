//! Sleep service

use crate::error::ApiError;
use crate::repositories::{CreateSleepLog, SleepLogRecord, SleepRepository};
use diet_assistant_shared::validation::validate_sleep_window;
use diet_assistant_shared::{
    average_sleep_quality, sleep_duration_hours, LogSleepRequest, SleepListResponse,
    SleepLogResponse, SleepQuality, SleepSummary, TimeRangeQuery,
};
use sqlx::PgPool;
use tracing::info;
use uuid::Uuid;
use validator::Validate;

/// Sleep service
pub struct SleepService;

impl SleepService {
    /// Log a night (or nap) of sleep
    pub async fn log_sleep(
        db: &PgPool,
        user_id: Uuid,
        req: LogSleepRequest,
    ) -> Result<SleepLogResponse, ApiError> {
        req.validate()?;
        validate_sleep_window(req.bed_time, req.wake_time).map_err(|msg| {
            ApiError::Validation {
                message: msg,
                field: Some("wake_time".to_string()),
            }
        })?;

        let duration_hours = sleep_duration_hours(req.bed_time, req.wake_time);

        let record = SleepRepository::create(
            db,
            CreateSleepLog {
                user_id,
                bed_time: req.bed_time,
                wake_time: req.wake_time,
                duration_hours,
                quality: req.quality,
                notes: req.notes,
            },
        )
        .await
        .map_err(ApiError::Internal)?;

        info!(user_id = %user_id, hours = duration_hours, quality = ?req.quality, "Sleep logged");

        Ok(Self::to_response(record))
    }

    /// List the caller's sleep logs with an aggregate
    pub async fn list(
        db: &PgPool,
        user_id: Uuid,
        range: TimeRangeQuery,
    ) -> Result<SleepListResponse, ApiError> {
        let records = SleepRepository::list_by_range(db, user_id, range.start, range.end)
            .await
            .map_err(ApiError::Internal)?;

        let logs: Vec<SleepLogResponse> = records.into_iter().map(Self::to_response).collect();
        let summary = Self::summarize(&logs);

        Ok(SleepListResponse { logs, summary })
    }

    /// Total hours and average quality over logs
    pub fn summarize(logs: &[SleepLogResponse]) -> SleepSummary {
        let total_hours = logs.iter().map(|l| l.duration_hours).sum();
        let scores: Vec<Option<i32>> = logs.iter().map(|l| l.quality).collect();
        let average_quality = average_sleep_quality(&scores).map(|avg| (avg * 10.0).round() / 10.0);

        SleepSummary {
            total_hours,
            average_quality,
            quality: average_quality.map(SleepQuality::from_score),
        }
    }

    fn to_response(record: SleepLogRecord) -> SleepLogResponse {
        SleepLogResponse {
            id: record.id.to_string(),
            bed_time: record.bed_time,
            wake_time: record.wake_time,
            duration_hours: record.duration_hours,
            quality: record.quality,
            notes: record.notes,
            logged_at: record.logged_at,
        }
    }
}
