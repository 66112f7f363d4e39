//! Food catalogue API routes
//!
//! The catalogue is shared reference data and needs no authentication.

use crate::error::ApiError;
use crate::services::FoodService;
use crate::state::AppState;
use axum::{
    extract::{Path, Query, State},
    routing::get,
    Json, Router,
};
use diet_assistant_shared::{FoodResponse, FoodSearchQuery};
use uuid::Uuid;

/// Create food catalogue routes
pub fn food_routes() -> Router<AppState> {
    Router::new()
        .route("/search", get(search_foods))
        .route("/:id", get(get_food))
}

/// GET /api/v1/foods/search?q=&limit= - Case-insensitive substring search
async fn search_foods(
    State(state): State<AppState>,
    Query(query): Query<FoodSearchQuery>,
) -> Result<Json<Vec<FoodResponse>>, ApiError> {
    let foods = FoodService::search(state.db(), &query.q, query.limit).await?;
    Ok(Json(foods))
}

/// GET /api/v1/foods/:id - Get a single food
async fn get_food(
    State(state): State<AppState>,
    Path(food_id): Path<Uuid>,
) -> Result<Json<FoodResponse>, ApiError> {
    let food = FoodService::get_food(state.db(), food_id).await?;
    Ok(Json(food))
}
