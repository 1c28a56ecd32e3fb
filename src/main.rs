use std::sync::Arc;
use std::time::Duration;

use anyhow::Context;
use clap::Parser;
use sqlx::postgres::PgPoolOptions;

use tourney_api::api::handlers::SharedStore;
use tourney_api::config::{ServerConfig, StoreKind};
use tourney_api::infrastructure::repositories::{InMemoryStore, PostgresStore};
use tourney_api::infrastructure::schema;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load environment variables
    dotenv::dotenv().ok();

    // Initialize tracing
    tourney_api::logging::init();

    let config = ServerConfig::parse();
    config.validate()?;

    let store: SharedStore = match config.store_kind() {
        StoreKind::Memory => {
            tracing::warn!("Using in-memory store; data is lost on exit");
            if config.hard_reset {
                tracing::info!("Hard reset has no effect on the in-memory store");
            }
            Arc::new(InMemoryStore::new())
        }
        StoreKind::Postgres => {
            // Connect to database
            tracing::info!("Connecting to database...");
            let pool = PgPoolOptions::new()
                .max_connections(config.max_connections)
                .acquire_timeout(Duration::from_secs(5))
                .connect(&config.database_url)
                .await
                .context("Failed to connect to database")?;

            tracing::info!("Database connected successfully");

            schema::create_database(&pool, config.hard_reset)
                .await
                .context("Failed to prepare database schema")?;

            Arc::new(PostgresStore::new(pool))
        }
    };

    let app = tourney_api::api::router(store);

    // Start server
    tracing::info!("Server listening on {}", config.bind);

    let listener = tokio::net::TcpListener::bind(config.bind)
        .await
        .context("Failed to bind address")?;

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("Server failed")?;

    tracing::info!("Server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("Failed to listen for shutdown signal: {}", e);
        std::future::pending::<()>().await;
    }
    tracing::info!("Shutdown signal received");
}
