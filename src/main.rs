use std::sync::Arc;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

mod config;
mod db;
mod domain;
mod errors;
mod handlers;
mod models;
mod repositories;
mod routes;
mod services;

use crate::config::Config;
use crate::errors::AppError;
use crate::repositories::{SqliteFeedbackRepository, SqliteJokeRepository};
use crate::services::{FeedbackService, JokeService};

/// AppState holds shared resources for the web server.
pub struct AppState {
    pub joke_service: JokeService,
    pub feedback_service: FeedbackService,
}

#[tokio::main]
async fn main() -> Result<(), AppError> {
    // Initialize tracing (logging)
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(
            std::env::var("RUST_LOG")
                .unwrap_or_else(|_| "joke_api=debug,tower_http=debug".into()),
        ))
        .with(tracing_subscriber::fmt::layer())
        .init();

    // --- Configuration ---
    let config = Config::load()?;

    // --- Database Initialization ---
    tracing::info!("Connecting to database...");
    let pool = db::connect(&config.database_url).await.map_err(|e| {
        tracing::error!("Failed to connect to database: {}", e);
        AppError::InitError(format!("Failed to connect to database: {}", e))
    })?;

    tracing::info!("Ensuring database schema exists...");
    db::init_schema(&pool)
        .await
        .map_err(|e| AppError::InitError(format!("Failed to initialize schema: {}", e)))?;

    // --- Application State ---
    let joke_repo = Arc::new(SqliteJokeRepository::new(pool.clone()));
    let feedback_repo = Arc::new(SqliteFeedbackRepository::new(pool.clone()));
    let state = Arc::new(AppState {
        joke_service: JokeService::new(joke_repo.clone()),
        feedback_service: FeedbackService::new(joke_repo, feedback_repo),
    });

    // --- Router Definition ---
    let app = routes::create_router(state);

    // --- Server Startup ---
    tracing::info!("Server listening on http://{}", config.bind_address);
    let listener = tokio::net::TcpListener::bind(config.bind_address).await?;
    axum::serve(listener, app).await?;

    // Dropping the pool on the way out closes remaining connections.
    pool.close().await;

    Ok(())
}
