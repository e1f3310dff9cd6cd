use crate::errors::RepoError;
use crate::models::{Feedback, Joke};
use async_trait::async_trait;

/// Trait defining operations for storing and retrieving jokes.
#[async_trait]
pub trait JokeRepository: Send + Sync + 'static { // Send+Sync+'static required for Arc<dyn>
    /// Inserts a new joke; the store assigns the id and both timestamps.
    async fn create(&self, content: &str) -> Result<Joke, RepoError>;

    /// Retrieves a joke by its unique ID, deleted or not.
    /// Returns Ok(None) if no such joke exists.
    async fn get_by_id(&self, id: &str) -> Result<Option<Joke>, RepoError>;

    /// Lists all jokes that have not been soft-deleted.
    async fn list_active(&self) -> Result<Vec<Joke>, RepoError>;

    /// Overwrites a joke's content and refreshes its updated_at timestamp.
    async fn update_content(&self, id: &str, content: &str) -> Result<(), RepoError>;

    /// Sets the soft-delete flag. The row itself is never removed.
    async fn mark_deleted(&self, id: &str) -> Result<(), RepoError>;
}

/// Trait defining operations for storing and counting feedback records.
#[async_trait]
pub trait FeedbackRepository: Send + Sync + 'static {
    /// Inserts a new feedback record; the store assigns id and timestamp.
    async fn create(&self, joke_id: &str, user_id: &str, content: &str)
        -> Result<Feedback, RepoError>;

    /// Counts feedback rows for a joke whose content matches exactly.
    async fn count_by_content(&self, joke_id: &str, content: &str) -> Result<i64, RepoError>;
}
