//! Diet Assistant Backend
//!
//! Calorie tracking API built around a metabolic calculator.
//!
//! ## Architecture
//!
//! - Routes: HTTP request handling and routing
//! - Services: Business logic
//! - Repositories: Data access
//! - LLM: OpenAI-compatible client for the advisor endpoints
//! - Database: PostgreSQL with SQLx

use anyhow::Result;
use diet_assistant_backend::{
    config,
    db,
    llm::{DisabledClient, LlmClient, OpenAiCompatibleClient},
    routes,
    state::AppState,
};
use std::sync::Arc;
use tokio::signal;
use tracing::{error, info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> Result<()> {
    // Load environment variables from .env file
    dotenvy::dotenv().ok();

    init_tracing();

    let config = config::AppConfig::load()?;

    info!(
        version = env!("CARGO_PKG_VERSION"),
        env = if config::AppConfig::is_production() { "production" } else { "development" },
        "Starting Diet Assistant Backend"
    );

    if config::AppConfig::is_production() {
        if let Err(e) = config.validate_for_production() {
            error!("Configuration error: {}", e);
            return Err(e);
        }
        if config.database.url.contains("localhost") || config.database.url.contains("127.0.0.1") {
            warn!("Database URL contains localhost - ensure this is intentional for production");
        }
    }

    info!("Connecting to database...");
    let db_pool = db::create_pool(&config.database.url, config.database.max_connections).await?;

    // Production runs migrations as a separate job
    if !config::AppConfig::is_production() {
        info!("Running database migrations...");
        db::run_migrations(&db_pool).await?;
    }

    let llm = build_llm_client(&config.ai)?;

    let state = AppState::new(db_pool.clone(), config.clone(), llm);
    let app = routes::create_router(state);

    let addr = format!("{}:{}", config.server.host, config.server.port);
    info!(address = %addr, "Server listening");

    let listener = tokio::net::TcpListener::bind(&addr).await?;

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    db::close_pool(&db_pool).await;
    info!("Server shutdown complete");
    Ok(())
}

/// Pick the advisor backend from configuration
fn build_llm_client(ai: &config::AiConfig) -> Result<Arc<dyn LlmClient>> {
    if !ai.enabled {
        info!("AI advisor disabled; advisor endpoints will return 503");
        return Ok(Arc::new(DisabledClient));
    }

    if ai.api_key.is_none() {
        warn!("AI advisor enabled without an API key");
    }

    let client = OpenAiCompatibleClient::new(ai)?;
    info!(base_url = %ai.base_url, model = %ai.model, "AI advisor enabled");
    Ok(Arc::new(client))
}

/// Initialize tracing/logging
fn init_tracing() {
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        if config::AppConfig::is_production() {
            "diet_assistant_backend=info,tower_http=info".into()
        } else {
            "diet_assistant_backend=debug,tower_http=debug,sqlx=warn".into()
        }
    });

    let subscriber = tracing_subscriber::registry().with(env_filter);

    if config::AppConfig::is_production() {
        // JSON logging for log aggregation
        subscriber
            .with(tracing_subscriber::fmt::layer().json())
            .init();
    } else {
        subscriber
            .with(tracing_subscriber::fmt::layer().pretty())
            .init();
    }
}

/// Graceful shutdown signal handler
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            error!("Failed to install Ctrl+C handler: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut sigterm) => {
                sigterm.recv().await;
            }
            Err(e) => {
                error!("Failed to install SIGTERM handler: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            info!("Received Ctrl+C, starting graceful shutdown");
        }
        _ = terminate => {
            info!("Received SIGTERM, starting graceful shutdown");
        }
    }
}
