//! Metabolic calculator API routes
//!
//! Public and stateless apart from the configured calorie policy; no
//! database access.

use crate::error::ApiError;
use crate::state::AppState;
use axum::{
    extract::State,
    routing::{get, post},
    Json, Router,
};
use diet_assistant_shared::{
    calculate_bmi, calculate_bmr, calculate_daily_calorie_target_with_policy,
    calculate_days_to_goal, calculate_exercise_calories, calculate_tdee, calculate_weight_change,
    classify_bmi, met_value, BmiRequest, BmiResponse, BmrRequest, BmrResponse,
    DailyTargetRequest, DailyTargetResponse, DaysToGoalRequest, DaysToGoalResponse,
    ExerciseCaloriesRequest, ExerciseCaloriesResponse, ExerciseTypeResponse, GoalDirection,
    TdeeRequest, TdeeResponse, WeightChangeRequest, WeightChangeResponse, MET_TABLE,
};
use validator::Validate;

/// Create calculator routes
pub fn calculator_routes() -> Router<AppState> {
    Router::new()
        .route("/bmr", post(compute_bmr))
        .route("/tdee", post(compute_tdee))
        .route("/daily-target", post(compute_daily_target))
        .route("/bmi", post(compute_bmi))
        .route("/exercise", post(compute_exercise_calories))
        .route("/days-to-goal", post(compute_days_to_goal))
        .route("/weight-change", post(compute_weight_change))
        .route("/exercises", get(list_exercises))
}

/// POST /api/v1/calculator/bmr - Basal metabolic rate
async fn compute_bmr(Json(req): Json<BmrRequest>) -> Result<Json<BmrResponse>, ApiError> {
    req.validate()?;
    Ok(Json(BmrResponse {
        bmr: calculate_bmr(req.gender, req.age, req.height_cm, req.weight_kg),
    }))
}

/// POST /api/v1/calculator/tdee - Total daily energy expenditure
async fn compute_tdee(Json(req): Json<TdeeRequest>) -> Result<Json<TdeeResponse>, ApiError> {
    req.validate()?;
    Ok(Json(TdeeResponse {
        tdee: calculate_tdee(req.bmr, req.activity_level),
        multiplier: req.activity_level.multiplier(),
        activity_description: req.activity_level.description().to_string(),
    }))
}

/// POST /api/v1/calculator/daily-target - Daily calorie target
async fn compute_daily_target(
    State(state): State<AppState>,
    Json(req): Json<DailyTargetRequest>,
) -> Result<Json<DailyTargetResponse>, ApiError> {
    req.validate()?;
    let policy = state.config().nutrition.calorie_policy();
    Ok(Json(DailyTargetResponse {
        daily_calorie_target: calculate_daily_calorie_target_with_policy(
            req.tdee,
            req.current_weight_kg,
            req.target_weight_kg,
            policy,
        ),
        direction: GoalDirection::from_weights(req.current_weight_kg, req.target_weight_kg),
    }))
}

/// POST /api/v1/calculator/bmi - BMI and category
async fn compute_bmi(Json(req): Json<BmiRequest>) -> Result<Json<BmiResponse>, ApiError> {
    req.validate()?;
    let bmi = calculate_bmi(req.weight_kg, req.height_cm);
    let category = classify_bmi(bmi);
    Ok(Json(BmiResponse {
        bmi,
        category,
        category_label: category.label().to_string(),
    }))
}

/// POST /api/v1/calculator/exercise - Calories burned by an exercise
async fn compute_exercise_calories(
    Json(req): Json<ExerciseCaloriesRequest>,
) -> Result<Json<ExerciseCaloriesResponse>, ApiError> {
    req.validate()?;
    Ok(Json(ExerciseCaloriesResponse {
        calories_burned: calculate_exercise_calories(
            &req.exercise_type,
            req.duration_minutes,
            req.weight_kg,
        ),
        met: met_value(&req.exercise_type),
    }))
}

/// POST /api/v1/calculator/days-to-goal - Days to reach a target weight
async fn compute_days_to_goal(
    Json(req): Json<DaysToGoalRequest>,
) -> Result<Json<DaysToGoalResponse>, ApiError> {
    req.validate()?;
    Ok(Json(DaysToGoalResponse {
        days: calculate_days_to_goal(
            req.current_weight_kg,
            req.target_weight_kg,
            req.daily_calorie_deficit,
        ),
    }))
}

/// POST /api/v1/calculator/weight-change - Weight change from a calorie balance
async fn compute_weight_change(
    Json(req): Json<WeightChangeRequest>,
) -> Result<Json<WeightChangeResponse>, ApiError> {
    if !req.net_calories.is_finite() {
        return Err(ApiError::Validation {
            message: "net_calories must be a finite number".to_string(),
            field: Some("net_calories".to_string()),
        });
    }
    Ok(Json(WeightChangeResponse {
        weight_change_kg: calculate_weight_change(req.net_calories),
    }))
}

/// GET /api/v1/calculator/exercises - MET catalogue
async fn list_exercises() -> Json<Vec<ExerciseTypeResponse>> {
    Json(
        MET_TABLE
            .iter()
            .map(|entry| ExerciseTypeResponse {
                label: entry.label.to_string(),
                slug: entry.slug.to_string(),
                met: entry.met,
            })
            .collect(),
    )
}
