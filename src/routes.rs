use crate::{
    handlers, // Import handlers module
    AppState, // Use the AppState defined in main.rs
};
use axum::{
    routing::{get, post, put},
    Router,
};
use std::sync::Arc;
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};

/// Creates the Axum router and associates routes with handlers.
pub fn create_router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/admin/jokes", post(handlers::create_joke))
        .route(
            "/admin/jokes/{jokeId}",
            put(handlers::update_joke).delete(handlers::delete_joke),
        )
        .route("/jokes/random", get(handlers::get_random_joke))
        .route("/feedback/jokes/{jokeId}", post(handlers::submit_feedback))
        // Middleware Layers
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        )
        .layer(TraceLayer::new_for_http())
        .with_state(state) // Pass the application state
}
