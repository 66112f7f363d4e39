//! Sleep tracking API routes

use crate::auth::AuthUser;
use crate::error::ApiError;
use crate::services::SleepService;
use crate::state::AppState;
use axum::{
    extract::{Query, State},
    routing::post,
    Json, Router,
};
use diet_assistant_shared::{LogSleepRequest, SleepListResponse, SleepLogResponse, TimeRangeQuery};

/// Create sleep routes
pub fn sleep_routes() -> Router<AppState> {
    Router::new().route("/", post(log_sleep).get(list_sleep))
}

/// POST /api/v1/sleep - Log a sleep session
async fn log_sleep(
    State(state): State<AppState>,
    auth: AuthUser,
    Json(req): Json<LogSleepRequest>,
) -> Result<Json<SleepLogResponse>, ApiError> {
    let log = SleepService::log_sleep(state.db(), auth.user_id, req).await?;
    Ok(Json(log))
}

/// GET /api/v1/sleep - Sleep logs with total hours and average quality
async fn list_sleep(
    State(state): State<AppState>,
    auth: AuthUser,
    Query(range): Query<TimeRangeQuery>,
) -> Result<Json<SleepListResponse>, ApiError> {
    let response = SleepService::list(state.db(), auth.user_id, range).await?;
    Ok(Json(response))
}
