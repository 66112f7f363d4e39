//! Exercise service
//!
//! Calories burned are computed from the MET table and the caller's most
//! recent body weight.

use crate::error::ApiError;
use crate::repositories::{
    CreateExerciseLog, ExerciseLogRecord, ExerciseRepository, ProfileRepository, WeightRepository,
};
use crate::services::{decimal_to_f64, f64_to_decimal};
use diet_assistant_shared::{
    calculate_exercise_calories, ExerciseLogResponse, LogExerciseRequest, TimeRangeQuery,
};
use sqlx::PgPool;
use tracing::info;
use uuid::Uuid;
use validator::Validate;

/// Exercise service
pub struct ExerciseService;

impl ExerciseService {
    /// Log an exercise session
    pub async fn log_exercise(
        db: &PgPool,
        user_id: Uuid,
        req: LogExerciseRequest,
        default_body_weight_kg: f64,
    ) -> Result<ExerciseLogResponse, ApiError> {
        req.validate()?;

        let latest = WeightRepository::get_latest(db, user_id)
            .await
            .map_err(ApiError::Internal)?
            .map(|w| decimal_to_f64(&w.weight_kg));
        let profile_weight = match latest {
            Some(_) => None,
            None => ProfileRepository::find_by_user(db, user_id)
                .await
                .map_err(ApiError::Internal)?
                .map(|p| decimal_to_f64(&p.initial_weight_kg)),
        };
        let body_weight = Self::resolve_body_weight(latest, profile_weight, default_body_weight_kg);

        let exercise_type = req.exercise_type.trim().to_string();
        let calories_burned = calculate_exercise_calories(
            &exercise_type,
            f64::from(req.duration_minutes),
            body_weight,
        );

        let record = ExerciseRepository::create(
            db,
            CreateExerciseLog {
                user_id,
                exercise_type,
                duration_minutes: req.duration_minutes,
                calories_burned,
                distance_km: req.distance_km.map(f64_to_decimal),
                notes: req.notes,
                logged_at: req.logged_at,
            },
        )
        .await
        .map_err(ApiError::Internal)?;

        info!(
            user_id = %user_id,
            exercise = %record.exercise_type,
            minutes = record.duration_minutes,
            calories = calories_burned,
            body_weight_kg = body_weight,
            "Exercise logged"
        );

        Ok(Self::to_response(record))
    }

    /// List the caller's exercise logs, newest first
    pub async fn list(
        db: &PgPool,
        user_id: Uuid,
        range: TimeRangeQuery,
    ) -> Result<Vec<ExerciseLogResponse>, ApiError> {
        let records = ExerciseRepository::list_by_range(db, user_id, range.start, range.end)
            .await
            .map_err(ApiError::Internal)?;

        Ok(records.into_iter().map(Self::to_response).collect())
    }

    /// Latest weigh-in, else the profile's initial weight, else the default
    pub fn resolve_body_weight(
        latest_weight_kg: Option<f64>,
        profile_weight_kg: Option<f64>,
        default_kg: f64,
    ) -> f64 {
        latest_weight_kg
            .or(profile_weight_kg)
            .filter(|w| *w > 0.0)
            .unwrap_or(default_kg)
    }

    fn to_response(record: ExerciseLogRecord) -> ExerciseLogResponse {
        ExerciseLogResponse {
            id: record.id.to_string(),
            exercise_type: record.exercise_type,
            duration_minutes: record.duration_minutes,
            calories_burned: record.calories_burned,
            distance_km: record.distance_km.as_ref().map(decimal_to_f64),
            notes: record.notes,
            logged_at: record.logged_at,
        }
    }
}
