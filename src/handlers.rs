use crate::{
    errors::AppError,
    models::{
        CreateJokeRequest, CreateJokeResponse, DeleteJokeResponse, FeedbackRequest,
        FeedbackSubmissionResponse, RandomJoke, UpdateJokeRequest, UpdateJokeResponse,
    },
    AppState,
};
use axum::{
    extract::{Path, State},
    Json,
};
use std::sync::Arc;
use tracing;

/// Handler for POST /admin/jokes.
///
/// Documented as administrator-only, but no authentication is enforced
/// anywhere in this service.
pub async fn create_joke(
    State(state): State<Arc<AppState>>,
    Json(req): Json<CreateJokeRequest>,
) -> Result<Json<CreateJokeResponse>, AppError> {
    tracing::debug!("Creating joke via handler");
    let response = state.joke_service.create(&req.content).await?;
    Ok(Json(response))
}

/// Handler for GET /jokes/random.
pub async fn get_random_joke(
    State(state): State<Arc<AppState>>,
) -> Result<Json<RandomJoke>, AppError> {
    tracing::debug!("Fetching random joke via handler");
    let joke = state.joke_service.get_random().await?;
    Ok(Json(joke))
}

/// Handler for PUT /admin/jokes/{jokeId}.
///
/// Every outcome, including store failures, is reported in the response
/// body; this endpoint never maps to the generic 500 envelope.
pub async fn update_joke(
    State(state): State<Arc<AppState>>,
    Path(joke_id): Path<String>,
    Json(req): Json<UpdateJokeRequest>,
) -> Json<UpdateJokeResponse> {
    tracing::debug!(%joke_id, "Updating joke via handler");
    Json(state.joke_service.update(&joke_id, &req.content).await)
}

/// Handler for DELETE /admin/jokes/{jokeId}.
pub async fn delete_joke(
    State(state): State<Arc<AppState>>,
    Path(joke_id): Path<String>,
) -> Result<Json<DeleteJokeResponse>, AppError> {
    tracing::debug!(%joke_id, "Deleting joke via handler");
    let response = state.joke_service.delete(&joke_id).await?;
    Ok(Json(response))
}

/// Handler for POST /feedback/jokes/{jokeId}.
pub async fn submit_feedback(
    State(state): State<Arc<AppState>>,
    Path(joke_id): Path<String>,
    Json(req): Json<FeedbackRequest>,
) -> Result<Json<FeedbackSubmissionResponse>, AppError> {
    tracing::debug!(%joke_id, feedback_type = %req.feedback_type, "Submitting feedback via handler");
    let response = state
        .feedback_service
        .submit(&joke_id, req.feedback_text.as_deref(), &req.feedback_type)
        .await?;
    Ok(Json(response))
}
