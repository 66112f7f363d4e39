//! AI advisor API routes

use crate::auth::AuthUser;
use crate::error::ApiError;
use crate::services::AdvisorService;
use crate::state::AppState;
use axum::{extract::State, routing::post, Json, Router};
use diet_assistant_shared::{
    ChatRequest, ChatResponse, FoodAdviceRequest, FoodAdviceResponse, MealPlanRequest,
    MealPlanResponse, RecognizeFoodRequest, RecognizeFoodResponse,
};

/// Create advisor routes
pub fn advisor_routes() -> Router<AppState> {
    Router::new()
        .route("/chat", post(chat))
        .route("/meal-plan", post(meal_plan))
        .route("/recognize-food", post(recognize_food))
        .route("/food-advice", post(food_advice))
}

/// POST /api/v1/advisor/chat - Ask the nutritionist or the trainer
async fn chat(
    State(state): State<AppState>,
    _auth: AuthUser,
    Json(req): Json<ChatRequest>,
) -> Result<Json<ChatResponse>, ApiError> {
    let response = AdvisorService::chat(state.llm(), req).await?;
    Ok(Json(response))
}

/// POST /api/v1/advisor/meal-plan - One-day meal plan for a calorie target
async fn meal_plan(
    State(state): State<AppState>,
    _auth: AuthUser,
    Json(req): Json<MealPlanRequest>,
) -> Result<Json<MealPlanResponse>, ApiError> {
    let response = AdvisorService::recommend_meal_plan(state.llm(), req).await?;
    Ok(Json(response))
}

/// POST /api/v1/advisor/recognize-food - Identify foods in a photo
///
/// Failures are reported in the body with `success: false`.
async fn recognize_food(
    State(state): State<AppState>,
    _auth: AuthUser,
    Json(req): Json<RecognizeFoodRequest>,
) -> Result<Json<RecognizeFoodResponse>, ApiError> {
    let response = AdvisorService::recognize_food(state.llm(), req).await?;
    Ok(Json(response))
}

/// POST /api/v1/advisor/food-advice - Comment on a food against today's budget
async fn food_advice(
    State(state): State<AppState>,
    auth: AuthUser,
    Json(req): Json<FoodAdviceRequest>,
) -> Result<Json<FoodAdviceResponse>, ApiError> {
    let response =
        AdvisorService::food_advice(state.db(), state.llm(), auth.user_id, req).await?;
    Ok(Json(response))
}
