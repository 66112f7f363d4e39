//! Food service - catalogue search and the food diary

use crate::error::ApiError;
use crate::repositories::{
    CreateFoodLog, ExerciseRepository, FoodLogRecord, FoodLogRepository, FoodRecord,
    FoodRepository, ProfileRepository,
};
use crate::services::{day_bounds, decimal_to_f64, f64_to_decimal};
use chrono::NaiveDate;
use diet_assistant_shared::validation::{clamp_limit, validate_search_query};
use diet_assistant_shared::{
    scale_nutrients, DailyBudget, DailySummaryResponse, FoodLogResponse, FoodResponse,
    LogFoodRequest, NutrientsPer100g, TimeRangeQuery,
};
use sqlx::PgPool;
use tracing::{debug, info};
use uuid::Uuid;
use validator::Validate;

/// Default number of search results
pub const DEFAULT_SEARCH_LIMIT: i64 = 20;
/// Maximum number of search results
pub const MAX_SEARCH_LIMIT: i64 = 50;

/// Food service
pub struct FoodService;

impl FoodService {
    /// Search the catalogue by name
    pub async fn search(
        db: &PgPool,
        query: &str,
        limit: Option<i64>,
    ) -> Result<Vec<FoodResponse>, ApiError> {
        let query = validate_search_query(query).map_err(|msg| ApiError::Validation {
            message: msg,
            field: Some("q".to_string()),
        })?;
        let limit = clamp_limit(limit, DEFAULT_SEARCH_LIMIT, MAX_SEARCH_LIMIT);

        let records = FoodRepository::search(db, query, limit)
            .await
            .map_err(ApiError::Internal)?;

        debug!(query, results = records.len(), "Food search");

        Ok(records.iter().map(Self::food_response).collect())
    }

    /// Get a food by ID
    pub async fn get_food(db: &PgPool, food_id: Uuid) -> Result<FoodResponse, ApiError> {
        let record = FoodRepository::find_by_id(db, food_id)
            .await
            .map_err(ApiError::Internal)?
            .ok_or_else(|| ApiError::NotFound("Food not found".to_string()))?;

        Ok(Self::food_response(&record))
    }

    /// Log an eaten portion; nutrients are scaled from the catalogue entry
    pub async fn log_food(
        db: &PgPool,
        user_id: Uuid,
        req: LogFoodRequest,
    ) -> Result<FoodLogResponse, ApiError> {
        req.validate()?;

        let food_id = Uuid::parse_str(&req.food_id).map_err(|_| ApiError::Validation {
            message: "Invalid food ID".to_string(),
            field: Some("food_id".to_string()),
        })?;

        let food = FoodRepository::find_by_id(db, food_id)
            .await
            .map_err(ApiError::Internal)?
            .ok_or_else(|| ApiError::NotFound("Food not found".to_string()))?;

        let portion = scale_nutrients(Self::nutrients(&food), req.grams);

        let record = FoodLogRepository::create(
            db,
            CreateFoodLog {
                user_id,
                food_id,
                food_name: food.name.clone(),
                grams: f64_to_decimal(req.grams),
                calories: portion.calories,
                protein: portion.protein,
                fat: portion.fat,
                carbs: portion.carbs,
                logged_at: req.logged_at,
            },
        )
        .await
        .map_err(ApiError::Internal)?;

        info!(
            user_id = %user_id,
            food = %food.name,
            grams = req.grams,
            calories = portion.calories,
            "Food logged"
        );

        Ok(Self::log_response(record))
    }

    /// List the caller's food logs, newest first
    pub async fn list_logs(
        db: &PgPool,
        user_id: Uuid,
        range: TimeRangeQuery,
    ) -> Result<Vec<FoodLogResponse>, ApiError> {
        let records = FoodLogRepository::list_by_range(db, user_id, range.start, range.end)
            .await
            .map_err(ApiError::Internal)?;

        Ok(records.into_iter().map(Self::log_response).collect())
    }

    /// Delete one of the caller's food logs
    pub async fn delete_log(db: &PgPool, user_id: Uuid, log_id: Uuid) -> Result<(), ApiError> {
        let deleted = FoodLogRepository::delete(db, log_id, user_id)
            .await
            .map_err(ApiError::Internal)?;

        if !deleted {
            return Err(ApiError::NotFound("Food log not found".to_string()));
        }

        info!(user_id = %user_id, log_id = %log_id, "Food log deleted");
        Ok(())
    }

    /// Food totals, exercise and calorie budget for one UTC day
    pub async fn daily_summary(
        db: &PgPool,
        user_id: Uuid,
        date: NaiveDate,
    ) -> Result<DailySummaryResponse, ApiError> {
        let (start, end) = day_bounds(date);

        let totals = FoodLogRepository::daily_totals(db, user_id, start, end)
            .await
            .map_err(ApiError::Internal)?;
        let burned = ExerciseRepository::total_burned(db, user_id, start, end)
            .await
            .map_err(ApiError::Internal)?;
        let profile = ProfileRepository::find_by_user(db, user_id)
            .await
            .map_err(ApiError::Internal)?;

        let consumed = saturate(totals.calories);
        let burned = saturate(burned);
        let budget = profile
            .map(|p| DailyBudget::compute(p.daily_calorie_target, p.tdee, consumed, burned));

        Ok(DailySummaryResponse {
            date,
            total_calories: consumed,
            total_protein: saturate(totals.protein),
            total_fat: saturate(totals.fat),
            total_carbs: saturate(totals.carbs),
            meal_count: totals.count,
            exercise_calories: burned,
            budget,
        })
    }

    fn nutrients(food: &FoodRecord) -> NutrientsPer100g {
        NutrientsPer100g {
            calories: decimal_to_f64(&food.calories_per_100g),
            protein: decimal_to_f64(&food.protein_per_100g),
            fat: decimal_to_f64(&food.fat_per_100g),
            carbs: decimal_to_f64(&food.carbs_per_100g),
        }
    }

    fn food_response(record: &FoodRecord) -> FoodResponse {
        FoodResponse {
            id: record.id.to_string(),
            name: record.name.clone(),
            calories_per_100g: decimal_to_f64(&record.calories_per_100g),
            protein_per_100g: decimal_to_f64(&record.protein_per_100g),
            fat_per_100g: decimal_to_f64(&record.fat_per_100g),
            carbs_per_100g: decimal_to_f64(&record.carbs_per_100g),
            serving_size: record.serving_size.clone(),
            serving_grams: record.serving_grams.as_ref().map(decimal_to_f64),
        }
    }

    fn log_response(record: FoodLogRecord) -> FoodLogResponse {
        FoodLogResponse {
            id: record.id.to_string(),
            food_id: record.food_id.to_string(),
            food_name: record.food_name,
            grams: decimal_to_f64(&record.grams),
            calories: record.calories,
            protein: record.protein,
            fat: record.fat,
            carbs: record.carbs,
            logged_at: record.logged_at,
        }
    }
}

/// Narrow a SQL `BIGINT` sum to the `i32` used for kcal
fn saturate(value: i64) -> i32 {
    value.clamp(i64::from(i32::MIN), i64::from(i32::MAX)) as i32
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    fn rice() -> FoodRecord {
        FoodRecord {
            id: Uuid::new_v4(),
            name: "米饭".to_string(),
            calories_per_100g: f64_to_decimal(116.0),
            protein_per_100g: f64_to_decimal(3.0),
            fat_per_100g: f64_to_decimal(0.0),
            carbs_per_100g: f64_to_decimal(26.0),
            serving_size: Some("一碗".to_string()),
            serving_grams: Some(f64_to_decimal(150.0)),
            created_at: Utc::now(),
        }
    }

    #[test]
    fn test_portion_from_catalogue_entry() {
        let portion = scale_nutrients(FoodService::nutrients(&rice()), 150.0);
        assert_eq!(portion.calories, 174);
        assert_eq!(portion.carbs, 39);
    }

    #[test]
    fn test_food_response_mapping() {
        let response = FoodService::food_response(&rice());
        assert_eq!(response.name, "米饭");
        assert_eq!(response.calories_per_100g, 116.0);
        assert_eq!(response.serving_grams, Some(150.0));
    }

    #[test]
    fn test_saturate() {
        assert_eq!(saturate(1500), 1500);
        assert_eq!(saturate(i64::MAX), i32::MAX);
    }
}
