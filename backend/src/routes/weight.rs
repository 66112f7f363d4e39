//! Weight tracking API routes

use crate::auth::AuthUser;
use crate::error::ApiError;
use crate::services::WeightService;
use crate::state::AppState;
use axum::{
    extract::{Query, State},
    routing::post,
    Json, Router,
};
use diet_assistant_shared::{LogWeightRequest, WeightListQuery, WeightLogResponse};

/// Create weight routes
pub fn weight_routes() -> Router<AppState> {
    Router::new().route("/", post(log_weight).get(list_weights))
}

/// POST /api/v1/weight - Log a weight entry
///
/// BMI is derived from the profile height when a profile exists.
async fn log_weight(
    State(state): State<AppState>,
    auth: AuthUser,
    Json(req): Json<LogWeightRequest>,
) -> Result<Json<WeightLogResponse>, ApiError> {
    let log = WeightService::log_weight(state.db(), auth.user_id, req).await?;
    Ok(Json(log))
}

/// GET /api/v1/weight - Most recent weigh-ins, newest first
async fn list_weights(
    State(state): State<AppState>,
    auth: AuthUser,
    Query(query): Query<WeightListQuery>,
) -> Result<Json<Vec<WeightLogResponse>>, ApiError> {
    let logs = WeightService::list_weights(state.db(), auth.user_id, query.limit).await?;
    Ok(Json(logs))
}
