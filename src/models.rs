use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A joke row as stored in the `jokes` table.
///
/// Jokes are never physically removed; `deleted` marks them inactive
/// (soft delete). Serialized with camelCase field names because this
/// struct doubles as the `updated_joke` payload of the update endpoint.
#[derive(Serialize, Deserialize, Debug, Clone, sqlx::FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Joke {
    pub id: String,
    pub content: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub deleted: bool,
}

/// A feedback row as stored in the `feedback` table.
///
/// Insert-only; rows are never updated or deleted. `content` holds the
/// free-text payload of a submission (empty string when none was given).
#[derive(Serialize, Deserialize, Debug, Clone, sqlx::FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Feedback {
    pub id: String,
    pub joke_id: String,
    pub user_id: String,
    pub content: String,
    pub created_at: DateTime<Utc>,
}

// --- Request payloads ---

#[derive(Deserialize, Debug)]
pub struct CreateJokeRequest {
    pub content: String,
}

#[derive(Deserialize, Debug)]
pub struct UpdateJokeRequest {
    pub content: String,
}

#[derive(Deserialize, Debug)]
pub struct FeedbackRequest {
    #[serde(rename = "feedbackText")]
    pub feedback_text: Option<String>,
    #[serde(rename = "feedbackType")]
    pub feedback_type: String,
}

// --- Response models ---

/// Confirmation returned after a joke was added.
#[derive(Serialize, Debug, Clone)]
pub struct CreateJokeResponse {
    pub id: String,
    pub content: String,
    pub created_at: DateTime<Utc>,
}

/// A single random joke, timestamps rendered as ISO-8601 strings.
///
/// When no non-deleted joke exists this carries the sentinel record
/// (id "0", epoch timestamps) instead of an error.
#[derive(Serialize, Debug, Clone, PartialEq)]
pub struct RandomJoke {
    pub id: String,
    pub content: String,
    #[serde(rename = "createdAt")]
    pub created_at: String,
    #[serde(rename = "updatedAt")]
    pub updated_at: String,
}

/// Outcome of an update attempt. `updated_joke` is present only on success.
#[derive(Serialize, Debug, Clone)]
pub struct UpdateJokeResponse {
    pub success: bool,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub updated_joke: Option<Joke>,
}

/// Outcome of a delete attempt, collapsed into a single message string.
#[derive(Serialize, Debug, Clone)]
pub struct DeleteJokeResponse {
    pub message: String,
}

/// Confirmation of a feedback submission, with refreshed aggregate counts
/// when the submission was accepted.
#[derive(Serialize, Debug, Clone)]
pub struct FeedbackSubmissionResponse {
    pub success: bool,
    pub message: String,
    #[serde(rename = "updatedLikes", skip_serializing_if = "Option::is_none")]
    pub updated_likes: Option<i64>,
    #[serde(rename = "updatedDislikes", skip_serializing_if = "Option::is_none")]
    pub updated_dislikes: Option<i64>,
}
