//! Route definitions for the Diet Assistant API
//!
//! This module organizes all API routes and applies middleware.

use crate::state::AppState;
use axum::{
    http::{header, Method},
    routing::get,
    Router,
};
use tower_http::{
    compression::CompressionLayer,
    cors::{Any, CorsLayer},
    request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer},
    timeout::TimeoutLayer,
    trace::TraceLayer,
};

mod advisor;
mod calculator;
mod exercise;
mod food_logs;
mod foods;
mod health;
mod profile;
mod sleep;
mod weight;


pub use advisor::advisor_routes;
pub use calculator::calculator_routes;
pub use exercise::exercise_routes;
pub use food_logs::food_log_routes;
pub use foods::food_routes;
pub use profile::profile_routes;
pub use sleep::sleep_routes;
pub use weight::weight_routes;

/// Create the main application router with all middleware
pub fn create_router(state: AppState) -> Router {
    let request_timeout = state.config().server.request_timeout();

    Router::new()
        .route("/health", get(health::health_check))
        .route("/health/ready", get(health::readiness_check))
        .route("/health/live", get(health::liveness_check))
        .nest("/api/v1", api_routes())
        // Apply middleware layers
        .layer(CompressionLayer::new())
        .layer(TimeoutLayer::new(request_timeout))
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods([Method::GET, Method::POST, Method::PUT, Method::DELETE])
                .allow_headers([header::CONTENT_TYPE, header::AUTHORIZATION]),
        )
        .layer(PropagateRequestIdLayer::x_request_id())
        .layer(SetRequestIdLayer::x_request_id(MakeRequestUuid))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// API v1 routes
fn api_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(|| async { "Diet Assistant API v1" }))
        .nest("/calculator", calculator_routes())
        .nest("/profile", profile_routes())
        .nest("/foods", food_routes())
        .nest("/food-logs", food_log_routes())
        .nest("/weight", weight_routes())
        .nest("/exercise", exercise_routes())
        .nest("/sleep", sleep_routes())
        .nest("/advisor", advisor_routes())
}
