//! Health check endpoints
//!
//! - /health - Basic health check
//! - /health/ready - Readiness probe (database reachable)
//! - /health/live - Liveness probe

use crate::{db, state::AppState};
use axum::{extract::State, http::StatusCode, Json};
use serde::Serialize;

/// Health check response
#[derive(Serialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub checks: Option<HealthChecks>,
}

/// Individual health checks
#[derive(Serialize)]
pub struct HealthChecks {
    pub database: CheckStatus,
    /// Informational; a disabled advisor does not make the service unready
    pub advisor: CheckStatus,
}

/// Status of an individual check
#[derive(Serialize)]
pub struct CheckStatus {
    pub status: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

impl CheckStatus {
    fn new(status: &str, message: Option<String>) -> Self {
        Self {
            status: status.to_string(),
            message,
        }
    }
}

fn response(status: &str, checks: Option<HealthChecks>) -> HealthResponse {
    HealthResponse {
        status: status.to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        checks,
    }
}

/// GET /health - Basic health check
pub async fn health_check() -> Json<HealthResponse> {
    Json(response("healthy", None))
}

/// GET /health/ready - 503 when the database is unreachable
pub async fn readiness_check(
    State(state): State<AppState>,
) -> Result<Json<HealthResponse>, (StatusCode, Json<HealthResponse>)> {
    let database = match db::health_check(state.db()).await {
        Ok(_) => CheckStatus::new("healthy", None),
        Err(e) => CheckStatus::new("unhealthy", Some(e.to_string())),
    };
    let advisor = if state.llm().is_enabled() {
        CheckStatus::new("enabled", None)
    } else {
        CheckStatus::new("disabled", Some("Set DA__AI__ENABLED=true to enable".to_string()))
    };

    let is_healthy = database.status == "healthy";
    let body = response(
        if is_healthy { "ready" } else { "not_ready" },
        Some(HealthChecks { database, advisor }),
    );

    if is_healthy {
        Ok(Json(body))
    } else {
        Err((StatusCode::SERVICE_UNAVAILABLE, Json(body)))
    }
}

/// GET /health/live - OK whenever the server is running
pub async fn liveness_check() -> Json<HealthResponse> {
    Json(response("alive", None))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_health_check_returns_healthy() {
        let response = health_check().await;
        assert_eq!(response.status, "healthy");
        assert!(!response.version.is_empty());
    }

    #[tokio::test]
    async fn test_liveness_check_returns_alive() {
        let response = liveness_check().await;
        assert_eq!(response.status, "alive");
    }
}
