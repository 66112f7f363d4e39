//! Weight service
//!
//! Weigh-ins record BMI alongside the weight when the caller has a profile
//! with a height.

use crate::error::ApiError;
use crate::repositories::{CreateWeightLog, ProfileRepository, WeightLogRecord, WeightRepository};
use crate::services::{decimal_to_f64, f64_to_decimal};
use diet_assistant_shared::validation::clamp_limit;
use diet_assistant_shared::{calculate_bmi, LogWeightRequest, WeightLogResponse};
use sqlx::PgPool;
use tracing::info;
use uuid::Uuid;
use validator::Validate;

/// Default number of weigh-ins returned
pub const DEFAULT_WEIGHT_LIMIT: i64 = 30;
/// Maximum number of weigh-ins returned
pub const MAX_WEIGHT_LIMIT: i64 = 365;

/// Weight service
pub struct WeightService;

impl WeightService {
    /// Log a weigh-in
    pub async fn log_weight(
        db: &PgPool,
        user_id: Uuid,
        req: LogWeightRequest,
    ) -> Result<WeightLogResponse, ApiError> {
        req.validate()?;

        let profile = ProfileRepository::find_by_user(db, user_id)
            .await
            .map_err(ApiError::Internal)?;
        let bmi = profile.and_then(|p| Self::bmi_for(req.weight_kg, decimal_to_f64(&p.height_cm)));

        let record = WeightRepository::create(
            db,
            CreateWeightLog {
                user_id,
                weight_kg: f64_to_decimal(req.weight_kg),
                bmi: bmi.map(f64_to_decimal),
                logged_at: req.logged_at,
            },
        )
        .await
        .map_err(ApiError::Internal)?;

        info!(user_id = %user_id, weight_kg = req.weight_kg, bmi = ?bmi, "Weight logged");

        Ok(Self::to_response(record))
    }

    /// Most recent weigh-ins, newest first
    pub async fn list_weights(
        db: &PgPool,
        user_id: Uuid,
        limit: Option<i64>,
    ) -> Result<Vec<WeightLogResponse>, ApiError> {
        let limit = clamp_limit(limit, DEFAULT_WEIGHT_LIMIT, MAX_WEIGHT_LIMIT);
        let records = WeightRepository::list_recent(db, user_id, limit)
            .await
            .map_err(ApiError::Internal)?;

        Ok(records.into_iter().map(Self::to_response).collect())
    }

    /// BMI for a weigh-in; `None` without a usable height
    pub fn bmi_for(weight_kg: f64, height_cm: f64) -> Option<f64> {
        if height_cm <= 0.0 {
            return None;
        }
        Some(calculate_bmi(weight_kg, height_cm)).filter(|bmi| bmi.is_finite())
    }

    fn to_response(record: WeightLogRecord) -> WeightLogResponse {
        WeightLogResponse {
            id: record.id.to_string(),
            weight_kg: decimal_to_f64(&record.weight_kg),
            bmi: record.bmi.as_ref().map(decimal_to_f64),
            logged_at: record.logged_at,
        }
    }
}
