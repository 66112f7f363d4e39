//! API request and response types
//!
//! Request types derive [`validator::Validate`]; handlers validate them
//! before calling into services.

use crate::metabolic::{ActivityLevel, BmiCategory, Gender, GoalDirection};
use crate::tracking::{DailyBudget, SleepQuality};
use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use validator::Validate;

/// API error response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: ErrorDetail,
}

/// Error detail
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorDetail {
    pub code: String,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub field: Option<String>,
}

/// Optional time window for list endpoints
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TimeRangeQuery {
    pub start: Option<DateTime<Utc>>,
    pub end: Option<DateTime<Utc>>,
}

// ============================================================================
// Calculator Types
// ============================================================================

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct BmrRequest {
    pub gender: Gender,
    #[validate(range(min = 1, max = 120))]
    pub age: u32,
    #[validate(range(min = 50.0, max = 300.0))]
    pub height_cm: f64,
    #[validate(range(min = 20.0, max = 500.0))]
    pub weight_kg: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BmrResponse {
    pub bmr: i32,
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct TdeeRequest {
    #[validate(range(min = 0, max = 10000))]
    pub bmr: i32,
    pub activity_level: ActivityLevel,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TdeeResponse {
    pub tdee: i32,
    pub multiplier: f64,
    pub activity_description: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct DailyTargetRequest {
    #[validate(range(min = 0, max = 20000))]
    pub tdee: i32,
    #[validate(range(min = 20.0, max = 500.0))]
    pub current_weight_kg: f64,
    #[validate(range(min = 20.0, max = 500.0))]
    pub target_weight_kg: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DailyTargetResponse {
    pub daily_calorie_target: i32,
    pub direction: GoalDirection,
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct BmiRequest {
    #[validate(range(min = 20.0, max = 500.0))]
    pub weight_kg: f64,
    #[validate(range(min = 50.0, max = 300.0))]
    pub height_cm: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BmiResponse {
    pub bmi: f64,
    pub category: BmiCategory,
    pub category_label: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct ExerciseCaloriesRequest {
    #[validate(length(min = 1, max = 100))]
    pub exercise_type: String,
    #[validate(range(min = 1.0, max = 1440.0))]
    pub duration_minutes: f64,
    #[validate(range(min = 20.0, max = 500.0))]
    pub weight_kg: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExerciseCaloriesResponse {
    pub calories_burned: i32,
    pub met: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct DaysToGoalRequest {
    #[validate(range(min = 20.0, max = 500.0))]
    pub current_weight_kg: f64,
    #[validate(range(min = 20.0, max = 500.0))]
    pub target_weight_kg: f64,
    pub daily_calorie_deficit: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DaysToGoalResponse {
    /// `None` when the deficit is zero
    pub days: Option<i64>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WeightChangeRequest {
    pub net_calories: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WeightChangeResponse {
    pub weight_change_kg: f64,
}

/// Entry of the exercise catalogue
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExerciseTypeResponse {
    pub label: String,
    pub slug: String,
    pub met: f64,
}

// ============================================================================
// Profile Types
// ============================================================================

/// Create or replace the caller's profile
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct CreateProfileRequest {
    pub gender: Gender,
    #[validate(range(min = 1, max = 120))]
    pub age: u32,
    #[validate(range(min = 50.0, max = 300.0))]
    pub height_cm: f64,
    #[validate(range(min = 20.0, max = 500.0))]
    pub initial_weight_kg: f64,
    #[validate(range(min = 20.0, max = 500.0))]
    pub target_weight_kg: f64,
    pub activity_level: ActivityLevel,
    /// Client-defined meal preferences, stored verbatim
    #[serde(default)]
    #[validate(length(max = 4000))]
    pub meal_settings: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProfileResponse {
    pub user_id: String,
    pub gender: Gender,
    pub age: u32,
    pub height_cm: f64,
    pub initial_weight_kg: f64,
    pub target_weight_kg: f64,
    pub activity_level: ActivityLevel,
    pub bmr: i32,
    pub tdee: i32,
    pub daily_calorie_target: i32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub meal_settings: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Result of creating a profile
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateProfileResponse {
    pub bmr: i32,
    pub tdee: i32,
    pub daily_calorie_target: i32,
    pub profile: ProfileResponse,
}

/// Progress summary derived from the profile and weight history
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProfileInsightsResponse {
    pub current_weight_kg: f64,
    pub target_weight_kg: f64,
    pub bmi: f64,
    pub bmi_category: BmiCategory,
    pub bmi_category_label: String,
    /// Signed; positive means weight still to lose
    pub weight_to_goal_kg: f64,
    pub direction: GoalDirection,
    /// tdee - daily target
    pub daily_calorie_deficit: i32,
    /// `None` when maintaining
    pub days_to_goal: Option<i64>,
}

// ============================================================================
// Food Types
// ============================================================================

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FoodSearchQuery {
    pub q: String,
    pub limit: Option<i64>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FoodResponse {
    pub id: String,
    pub name: String,
    pub calories_per_100g: f64,
    pub protein_per_100g: f64,
    pub fat_per_100g: f64,
    pub carbs_per_100g: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub serving_size: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub serving_grams: Option<f64>,
}

/// Log an eaten portion; nutrients are computed server-side
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct LogFoodRequest {
    pub food_id: String,
    #[validate(range(min = 1.0, max = 5000.0))]
    pub grams: f64,
    #[serde(default = "Utc::now")]
    pub logged_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FoodLogResponse {
    pub id: String,
    pub food_id: String,
    pub food_name: String,
    pub grams: f64,
    pub calories: i32,
    pub protein: i32,
    pub fat: i32,
    pub carbs: i32,
    pub logged_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DailySummaryQuery {
    pub date: NaiveDate,
}

/// Totals for one day of the food diary
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DailySummaryResponse {
    pub date: NaiveDate,
    pub total_calories: i32,
    pub total_protein: i32,
    pub total_fat: i32,
    pub total_carbs: i32,
    pub meal_count: i64,
    pub exercise_calories: i32,
    /// Present when the caller has a profile
    #[serde(skip_serializing_if = "Option::is_none")]
    pub budget: Option<DailyBudget>,
}

// ============================================================================
// Weight Types
// ============================================================================

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct LogWeightRequest {
    #[validate(range(min = 20.0, max = 500.0))]
    pub weight_kg: f64,
    #[serde(default = "Utc::now")]
    pub logged_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WeightLogResponse {
    pub id: String,
    pub weight_kg: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bmi: Option<f64>,
    pub logged_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct WeightListQuery {
    pub limit: Option<i64>,
}

// ============================================================================
// Exercise Types
// ============================================================================

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct LogExerciseRequest {
    #[validate(length(min = 1, max = 100))]
    pub exercise_type: String,
    #[validate(range(min = 1, max = 1440))]
    pub duration_minutes: i32,
    #[validate(range(min = 0.0, max = 1000.0))]
    pub distance_km: Option<f64>,
    #[validate(length(max = 1000))]
    pub notes: Option<String>,
    #[serde(default = "Utc::now")]
    pub logged_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExerciseLogResponse {
    pub id: String,
    pub exercise_type: String,
    pub duration_minutes: i32,
    pub calories_burned: i32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub distance_km: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
    pub logged_at: DateTime<Utc>,
}

// ============================================================================
// Sleep Types
// ============================================================================

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct LogSleepRequest {
    pub bed_time: DateTime<Utc>,
    pub wake_time: DateTime<Utc>,
    #[validate(range(min = 1, max = 5))]
    pub quality: Option<i32>,
    #[validate(length(max = 1000))]
    pub notes: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SleepLogResponse {
    pub id: String,
    pub bed_time: DateTime<Utc>,
    pub wake_time: DateTime<Utc>,
    pub duration_hours: i32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub quality: Option<i32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
    pub logged_at: DateTime<Utc>,
}

/// Aggregate over the listed sleep logs
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SleepSummary {
    pub total_hours: i32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub average_quality: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub quality: Option<SleepQuality>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SleepListResponse {
    pub logs: Vec<SleepLogResponse>,
    pub summary: SleepSummary,
}

// ============================================================================
// Advisor Types
// ============================================================================

/// Persona answering a chat message
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AdvisorKind {
    Nutritionist,
    Trainer,
}

impl AdvisorKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            AdvisorKind::Nutritionist => "nutritionist",
            AdvisorKind::Trainer => "trainer",
        }
    }
}

impl fmt::Display for AdvisorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for AdvisorKind {
    type Err = crate::errors::ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "nutritionist" => Ok(AdvisorKind::Nutritionist),
            "trainer" => Ok(AdvisorKind::Trainer),
            _ => Err(crate::errors::ParseError::UnknownAdvisorKind(s.to_string())),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct ChatRequest {
    pub advisor: AdvisorKind,
    #[validate(length(min = 1, max = 2000))]
    pub message: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatResponse {
    pub advisor: AdvisorKind,
    pub reply: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct MealPlanRequest {
    #[validate(range(min = 800, max = 6000))]
    pub target_calories: i32,
    #[validate(length(max = 500))]
    pub preferences: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MealPlanResponse {
    pub target_calories: i32,
    pub plan: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct RecognizeFoodRequest {
    #[validate(url)]
    pub image_url: String,
}

/// A food spotted in a photo
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RecognizedFood {
    pub name: String,
    /// 0.0-1.0
    pub confidence: f64,
    pub estimated_grams: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RecognizeFoodResponse {
    pub success: bool,
    pub foods: Vec<RecognizedFood>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct FoodAdviceRequest {
    #[validate(length(min = 1, max = 100))]
    pub food_name: String,
    #[validate(range(min = 0, max = 10000))]
    pub calories: i32,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FoodAdviceResponse {
    pub advice: String,
    pub daily_target: i32,
    pub consumed_today: i32,
}
