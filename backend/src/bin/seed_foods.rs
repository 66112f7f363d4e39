//! Populate the food catalogue
//!
//! Uses the same configuration as the server and is a no-op when foods
//! already exist.

use anyhow::Result;
use diet_assistant_backend::{config::AppConfig, db, seed};
use tracing::info;

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "diet_assistant_backend=debug,sqlx=warn".into());
    tracing_subscriber::fmt().with_env_filter(env_filter).init();

    let config = AppConfig::load()?;

    info!("Connecting to database...");
    let pool = db::create_pool(&config.database.url, config.database.max_connections).await?;
    db::run_migrations(&pool).await?;

    let inserted = seed::seed_foods(&pool).await?;
    info!(inserted, total = seed::SEED_FOODS.len(), "Seeding finished");

    db::close_pool(&pool).await;
    Ok(())
}
