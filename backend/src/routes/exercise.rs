//! Exercise tracking API routes

use crate::auth::AuthUser;
use crate::error::ApiError;
use crate::services::ExerciseService;
use crate::state::AppState;
use axum::{
    extract::{Query, State},
    routing::post,
    Json, Router,
};
use diet_assistant_shared::{ExerciseLogResponse, LogExerciseRequest, TimeRangeQuery};

/// Create exercise routes
pub fn exercise_routes() -> Router<AppState> {
    Router::new().route("/", post(log_exercise).get(list_exercise))
}

/// POST /api/v1/exercise - Log an exercise session
///
/// Calories are computed from the MET table and the caller's latest body weight.
async fn log_exercise(
    State(state): State<AppState>,
    auth: AuthUser,
    Json(req): Json<LogExerciseRequest>,
) -> Result<Json<ExerciseLogResponse>, ApiError> {
    let default_weight = state.config().nutrition.default_body_weight_kg;
    let log = ExerciseService::log_exercise(state.db(), auth.user_id, req, default_weight).await?;
    Ok(Json(log))
}

/// GET /api/v1/exercise - Exercise logs in a time range
async fn list_exercise(
    State(state): State<AppState>,
    auth: AuthUser,
    Query(range): Query<TimeRangeQuery>,
) -> Result<Json<Vec<ExerciseLogResponse>>, ApiError> {
    let logs = ExerciseService::list(state.db(), auth.user_id, range).await?;
    Ok(Json(logs))
}
