use crate::{
    domain::{FeedbackRepository, JokeRepository},
    errors::RepoError,
    models::{
        CreateJokeResponse, DeleteJokeResponse, FeedbackSubmissionResponse, RandomJoke,
        UpdateJokeResponse,
    },
};
use rand::seq::SliceRandom;
use std::sync::Arc;
use tracing;

/// Submitter recorded on every feedback row until real authentication exists.
const PLACEHOLDER_USER_ID: &str = "user-placeholder-id";

/// Accepted values for the feedbackType field.
const VALID_FEEDBACK_TYPES: [&str; 3] = ["like", "dislike", "text"];

/// Business logic for the joke resource: create, random read, update,
/// soft delete. Holds the repository behind a trait object so tests can
/// run it against an in-memory store.
#[derive(Clone)]
pub struct JokeService {
    repo: Arc<dyn JokeRepository>,
}

impl JokeService {
    pub fn new(repo: Arc<dyn JokeRepository>) -> Self {
        Self { repo }
    }

    /// Adds a new joke. Content is stored as-is, no validation.
    pub async fn create(&self, content: &str) -> Result<CreateJokeResponse, RepoError> {
        let joke = self.repo.create(content).await?;
        tracing::info!(joke_id = %joke.id, "Joke created");
        Ok(CreateJokeResponse {
            id: joke.id,
            content: joke.content,
            created_at: joke.created_at,
        })
    }

    /// Picks one non-deleted joke uniformly at random.
    ///
    /// An empty store yields the sentinel record instead of an error;
    /// callers must not treat the sentinel as a real joke.
    pub async fn get_random(&self) -> Result<RandomJoke, RepoError> {
        let jokes = self.repo.list_active().await?;
        match jokes.choose(&mut rand::thread_rng()) {
            Some(joke) => Ok(RandomJoke {
                id: joke.id.clone(),
                content: joke.content.clone(),
                created_at: joke.created_at.to_rfc3339(),
                updated_at: joke.updated_at.to_rfc3339(),
            }),
            None => Ok(RandomJoke {
                id: "0".to_string(),
                content: "No jokes available.".to_string(),
                created_at: "1970-01-01T00:00:00".to_string(),
                updated_at: "1970-01-01T00:00:00".to_string(),
            }),
        }
    }

    /// Overwrites a joke's content and returns the refreshed record.
    ///
    /// Store failures during this operation are reported in the response
    /// body (success = false) rather than propagated to the HTTP layer.
    pub async fn update(&self, joke_id: &str, content: &str) -> UpdateJokeResponse {
        match self.try_update(joke_id, content).await {
            Ok(response) => response,
            Err(e) => {
                tracing::warn!(joke_id = %joke_id, error = %e, "Joke update failed");
                UpdateJokeResponse {
                    success: false,
                    message: format!("Failed to update joke due to an error: {}", e),
                    updated_joke: None,
                }
            }
        }
    }

    async fn try_update(
        &self,
        joke_id: &str,
        content: &str,
    ) -> Result<UpdateJokeResponse, RepoError> {
        if self.repo.get_by_id(joke_id).await?.is_none() {
            return Ok(UpdateJokeResponse {
                success: false,
                message: "Joke not found.".to_string(),
                updated_joke: None,
            });
        }

        self.repo.update_content(joke_id, content).await?;

        // Re-read so the response carries the store-refreshed updated_at.
        let updated = self
            .repo
            .get_by_id(joke_id)
            .await?
            .ok_or(RepoError::Backend(sqlx::Error::RowNotFound))?;

        tracing::info!(joke_id = %joke_id, "Joke updated");
        Ok(UpdateJokeResponse {
            success: true,
            message: "Joke updated successfully.".to_string(),
            updated_joke: Some(updated),
        })
    }

    /// Soft-deletes a joke. Tri-state outcome collapsed into one message:
    /// unknown id, already deleted, or successfully deleted.
    pub async fn delete(&self, joke_id: &str) -> Result<DeleteJokeResponse, RepoError> {
        let message = match self.repo.get_by_id(joke_id).await? {
            None => format!("Joke with ID {} does not exist.", joke_id),
            Some(joke) if joke.deleted => {
                format!("Joke with ID {} has already been deleted.", joke_id)
            }
            Some(_) => {
                self.repo.mark_deleted(joke_id).await?;
                tracing::info!(joke_id = %joke_id, "Joke soft-deleted");
                "Joke successfully deleted.".to_string()
            }
        };
        Ok(DeleteJokeResponse { message })
    }
}

/// Business logic for per-joke feedback submission and aggregate counts.
#[derive(Clone)]
pub struct FeedbackService {
    jokes: Arc<dyn JokeRepository>,
    feedback: Arc<dyn FeedbackRepository>,
}

impl FeedbackService {
    pub fn new(jokes: Arc<dyn JokeRepository>, feedback: Arc<dyn FeedbackRepository>) -> Self {
        Self { jokes, feedback }
    }

    /// Records one feedback submission and recounts the joke's likes and
    /// dislikes.
    ///
    /// Note: only the free-text field is persisted as row content; the
    /// validated feedbackType token itself is not stored. The counters
    /// match rows whose content is literally "like"/"dislike", so typed
    /// like/dislike submissions without matching text do not move them.
    /// Kept as-is for compatibility with existing clients.
    pub async fn submit(
        &self,
        joke_id: &str,
        feedback_text: Option<&str>,
        feedback_type: &str,
    ) -> Result<FeedbackSubmissionResponse, RepoError> {
        if self.jokes.get_by_id(joke_id).await?.is_none() {
            return Ok(FeedbackSubmissionResponse {
                success: false,
                message: "Joke not found.".to_string(),
                updated_likes: None,
                updated_dislikes: None,
            });
        }

        if !VALID_FEEDBACK_TYPES.contains(&feedback_type) {
            return Ok(FeedbackSubmissionResponse {
                success: false,
                message: "Invalid feedback type.".to_string(),
                updated_likes: None,
                updated_dislikes: None,
            });
        }

        self.feedback
            .create(joke_id, PLACEHOLDER_USER_ID, feedback_text.unwrap_or(""))
            .await?;

        let updated_likes = self.feedback.count_by_content(joke_id, "like").await?;
        let updated_dislikes = self.feedback.count_by_content(joke_id, "dislike").await?;

        tracing::info!(joke_id = %joke_id, likes = updated_likes, dislikes = updated_dislikes, "Feedback recorded");
        Ok(FeedbackSubmissionResponse {
            success: true,
            message: "Feedback submitted successfully.".to_string(),
            updated_likes: Some(updated_likes),
            updated_dislikes: Some(updated_dislikes),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db;
    use crate::repositories::{SqliteFeedbackRepository, SqliteJokeRepository};
    use sqlx::sqlite::SqlitePoolOptions;
    use sqlx::SqlitePool;

    async fn setup() -> (JokeService, FeedbackService, SqlitePool) {
        let pool = SqlitePoolOptions::new()
            .max_connections(1)
            .connect("sqlite::memory:")
            .await
            .expect("in-memory pool");
        db::init_schema(&pool).await.expect("schema");

        let joke_repo = Arc::new(SqliteJokeRepository::new(pool.clone()));
        let feedback_repo = Arc::new(SqliteFeedbackRepository::new(pool.clone()));
        let jokes = JokeService::new(joke_repo.clone());
        let feedback = FeedbackService::new(joke_repo, feedback_repo);
        (jokes, feedback, pool)
    }

    #[tokio::test]
    async fn create_returns_stored_content() {
        let (jokes, _, _) = setup().await;
        let created = jokes.create("Light attracts bugs.").await.unwrap();
        assert_eq!(created.content, "Light attracts bugs.");
        assert_ne!(created.id, "0");
    }

    #[tokio::test]
    async fn random_over_empty_store_returns_sentinel() {
        let (jokes, _, _) = setup().await;
        let joke = jokes.get_random().await.unwrap();
        assert_eq!(joke.id, "0");
        assert_eq!(joke.content, "No jokes available.");
        assert_eq!(joke.created_at, "1970-01-01T00:00:00");
        assert_eq!(joke.updated_at, "1970-01-01T00:00:00");
    }

    #[tokio::test]
    async fn random_over_only_deleted_jokes_returns_sentinel() {
        let (jokes, _, _) = setup().await;
        let created = jokes.create("short-lived").await.unwrap();
        jokes.delete(&created.id).await.unwrap();

        let joke = jokes.get_random().await.unwrap();
        assert_eq!(joke.id, "0");
        assert_eq!(joke.content, "No jokes available.");
    }

    #[tokio::test]
    async fn random_never_picks_a_deleted_joke() {
        let (jokes, _, _) = setup().await;
        let kept = jokes.create("kept").await.unwrap();
        let gone = jokes.create("gone").await.unwrap();
        jokes.delete(&gone.id).await.unwrap();

        for _ in 0..20 {
            let picked = jokes.get_random().await.unwrap();
            assert_eq!(picked.id, kept.id);
        }
    }

    #[tokio::test]
    async fn delete_twice_reports_already_deleted() {
        let (jokes, _, _) = setup().await;
        let created = jokes.create("doomed").await.unwrap();

        let first = jokes.delete(&created.id).await.unwrap();
        assert_eq!(first.message, "Joke successfully deleted.");

        let second = jokes.delete(&created.id).await.unwrap();
        assert_eq!(
            second.message,
            format!("Joke with ID {} has already been deleted.", created.id)
        );
    }

    #[tokio::test]
    async fn delete_unknown_id_reports_missing_and_mutates_nothing() {
        let (jokes, _, pool) = setup().await;
        jokes.create("bystander").await.unwrap();

        let result = jokes.delete("no-such-id").await.unwrap();
        assert_eq!(result.message, "Joke with ID no-such-id does not exist.");

        let deleted_count = sqlx::query_scalar::<_, i64>(
            "SELECT COUNT(*) FROM jokes WHERE deleted = 1",
        )
        .fetch_one(&pool)
        .await
        .unwrap();
        assert_eq!(deleted_count, 0);
    }

    #[tokio::test]
    async fn update_existing_joke_refreshes_content_and_timestamp() {
        let (jokes, _, _) = setup().await;
        let created = jokes.create("old text").await.unwrap();

        tokio::time::sleep(std::time::Duration::from_millis(5)).await;
        let result = jokes.update(&created.id, "new text").await;

        assert!(result.success);
        assert_eq!(result.message, "Joke updated successfully.");
        let updated = result.updated_joke.expect("payload on success");
        assert_eq!(updated.content, "new text");
        // Compare at millisecond granularity; the stored value round-trips
        // through the TEXT column encoding.
        assert_eq!(
            updated.created_at.timestamp_millis(),
            created.created_at.timestamp_millis()
        );
        assert!(updated.updated_at > created.created_at);
    }

    #[tokio::test]
    async fn update_unknown_id_reports_not_found() {
        let (jokes, _, _) = setup().await;
        let result = jokes.update("no-such-id", "whatever").await;
        assert!(!result.success);
        assert_eq!(result.message, "Joke not found.");
        assert!(result.updated_joke.is_none());
    }

    #[tokio::test]
    async fn feedback_on_unknown_joke_is_rejected() {
        let (_, feedback, _) = setup().await;
        let result = feedback.submit("no-such-id", Some("great!"), "text").await.unwrap();
        assert!(!result.success);
        assert_eq!(result.message, "Joke not found.");
        assert!(result.updated_likes.is_none());
        assert!(result.updated_dislikes.is_none());
    }

    #[tokio::test]
    async fn invalid_feedback_type_persists_nothing() {
        let (jokes, feedback, pool) = setup().await;
        let joke = jokes.create("target").await.unwrap();

        let result = feedback.submit(&joke.id, Some("meh"), "shrug").await.unwrap();
        assert!(!result.success);
        assert_eq!(result.message, "Invalid feedback type.");
        assert!(result.updated_likes.is_none());

        let rows = sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM feedback")
            .fetch_one(&pool)
            .await
            .unwrap();
        assert_eq!(rows, 0);
    }

    #[tokio::test]
    async fn counters_match_literal_like_and_dislike_content() {
        let (jokes, feedback, _) = setup().await;
        let joke = jokes.create("countable").await.unwrap();

        // Counters key on stored content, which is the free-text field.
        feedback.submit(&joke.id, Some("like"), "text").await.unwrap();
        feedback.submit(&joke.id, Some("like"), "text").await.unwrap();
        feedback.submit(&joke.id, Some("like"), "text").await.unwrap();
        let result = feedback.submit(&joke.id, Some("dislike"), "text").await.unwrap();

        assert!(result.success);
        assert_eq!(result.updated_likes, Some(3));
        assert_eq!(result.updated_dislikes, Some(1));
    }

    #[tokio::test]
    async fn typed_like_without_text_stores_empty_content() {
        let (jokes, feedback, _) = setup().await;
        let joke = jokes.create("quirky").await.unwrap();

        // A bare "like" submission stores "" as content, so the like
        // counter does not move. Preserved compatibility behavior.
        let result = feedback.submit(&joke.id, None, "like").await.unwrap();
        assert!(result.success);
        assert_eq!(result.updated_likes, Some(0));
        assert_eq!(result.updated_dislikes, Some(0));
    }

    #[tokio::test]
    async fn free_text_feedback_is_accepted() {
        let (jokes, feedback, _) = setup().await;
        let joke = jokes.create("funny").await.unwrap();

        let result = feedback.submit(&joke.id, Some("great!"), "text").await.unwrap();
        assert!(result.success);
        assert_eq!(result.message, "Feedback submitted successfully.");
        assert_eq!(result.updated_likes, Some(0));
        assert_eq!(result.updated_dislikes, Some(0));
    }
}
