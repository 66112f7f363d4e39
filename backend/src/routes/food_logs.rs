//! Food diary API routes

use crate::auth::AuthUser;
use crate::error::ApiError;
use crate::services::FoodService;
use crate::state::AppState;
use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    routing::{delete, get, post},
    Json, Router,
};
use diet_assistant_shared::{
    DailySummaryQuery, DailySummaryResponse, FoodLogResponse, LogFoodRequest, TimeRangeQuery,
};
use uuid::Uuid;

/// Create food log routes
pub fn food_log_routes() -> Router<AppState> {
    Router::new()
        .route("/", post(log_food).get(list_food_logs))
        .route("/daily", get(daily_summary))
        .route("/:id", delete(delete_food_log))
}

/// POST /api/v1/food-logs - Log a portion of a catalogue food
async fn log_food(
    State(state): State<AppState>,
    auth: AuthUser,
    Json(req): Json<LogFoodRequest>,
) -> Result<(StatusCode, Json<FoodLogResponse>), ApiError> {
    let log = FoodService::log_food(state.db(), auth.user_id, req).await?;
    Ok((StatusCode::CREATED, Json(log)))
}

/// GET /api/v1/food-logs - Food logs in a time range, newest first
async fn list_food_logs(
    State(state): State<AppState>,
    auth: AuthUser,
    Query(range): Query<TimeRangeQuery>,
) -> Result<Json<Vec<FoodLogResponse>>, ApiError> {
    let logs = FoodService::list_logs(state.db(), auth.user_id, range).await?;
    Ok(Json(logs))
}

/// DELETE /api/v1/food-logs/:id - Delete one of the caller's food logs
async fn delete_food_log(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(log_id): Path<Uuid>,
) -> Result<StatusCode, ApiError> {
    FoodService::delete_log(state.db(), auth.user_id, log_id).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// GET /api/v1/food-logs/daily?date= - Totals and budget for a UTC day
async fn daily_summary(
    State(state): State<AppState>,
    auth: AuthUser,
    Query(query): Query<DailySummaryQuery>,
) -> Result<Json<DailySummaryResponse>, ApiError> {
    let summary = FoodService::daily_summary(state.db(), auth.user_id, query.date).await?;
    Ok(Json(summary))
}
