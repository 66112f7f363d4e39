//! User profile API routes

use crate::auth::AuthUser;
use crate::error::ApiError;
use crate::services::ProfileService;
use crate::state::AppState;
use axum::{
    extract::State,
    routing::get,
    Json, Router,
};
use diet_assistant_shared::{
    CreateProfileRequest, CreateProfileResponse, ProfileInsightsResponse, ProfileResponse,
};

/// Create profile routes
pub fn profile_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(get_profile).post(create_profile))
        .route("/insights", get(get_insights))
}

/// GET /api/v1/profile - Get the caller's profile
async fn get_profile(
    State(state): State<AppState>,
    auth: AuthUser,
) -> Result<Json<ProfileResponse>, ApiError> {
    let profile = ProfileService::get_profile(state.db(), auth.user_id).await?;
    Ok(Json(profile))
}

/// POST /api/v1/profile - Create or replace the caller's profile
///
/// Returns the derived BMR, TDEE and daily calorie target alongside the profile.
async fn create_profile(
    State(state): State<AppState>,
    auth: AuthUser,
    Json(req): Json<CreateProfileRequest>,
) -> Result<Json<CreateProfileResponse>, ApiError> {
    let policy = state.config().nutrition.calorie_policy();
    let response = ProfileService::create_profile(state.db(), auth.user_id, req, policy).await?;
    Ok(Json(response))
}

/// GET /api/v1/profile/insights - BMI and goal projection from the latest weight
async fn get_insights(
    State(state): State<AppState>,
    auth: AuthUser,
) -> Result<Json<ProfileInsightsResponse>, ApiError> {
    let insights = ProfileService::get_insights(state.db(), auth.user_id).await?;
    Ok(Json(insights))
}
