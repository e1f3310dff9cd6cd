use crate::{
    domain::{FeedbackRepository, JokeRepository},
    errors::RepoError,
    models::{Feedback, Joke},
};
use async_trait::async_trait;
use chrono::Utc;
use sqlx::SqlitePool;
use tracing::{self, info};
use uuid::Uuid;

#[derive(Debug, Clone)]
pub struct SqliteJokeRepository {
    pool: SqlitePool,
}

impl SqliteJokeRepository {
    /// Creates a new repository instance over a shared connection pool.
    pub fn new(pool: SqlitePool) -> Self {
        info!("Initializing SqliteJokeRepository");
        Self { pool }
    }
}

#[async_trait]
impl JokeRepository for SqliteJokeRepository {
    /// Inserts a new joke row; id and timestamps are assigned here.
    async fn create(&self, content: &str) -> Result<Joke, RepoError> {
        let joke = Joke {
            id: Uuid::new_v4().to_string(),
            content: content.to_string(),
            created_at: Utc::now(),
            updated_at: Utc::now(),
            deleted: false,
        };

        sqlx::query(
            r#"
            INSERT INTO jokes (id, content, created_at, updated_at, deleted)
            VALUES (?, ?, ?, ?, ?)
            "#,
        )
        .bind(&joke.id)
        .bind(&joke.content)
        .bind(joke.created_at)
        .bind(joke.updated_at)
        .bind(joke.deleted)
        .execute(&self.pool)
        .await?;

        tracing::debug!(joke_id = %joke.id, "SQLite: Inserted joke");
        Ok(joke)
    }

    /// Retrieves a joke by id. A missing row is not an error.
    async fn get_by_id(&self, id: &str) -> Result<Option<Joke>, RepoError> {
        let joke = sqlx::query_as::<_, Joke>("SELECT * FROM jokes WHERE id = ?")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(joke)
    }

    /// Lists all jokes with deleted = false.
    async fn list_active(&self) -> Result<Vec<Joke>, RepoError> {
        let jokes = sqlx::query_as::<_, Joke>("SELECT * FROM jokes WHERE deleted = 0")
            .fetch_all(&self.pool)
            .await?;
        tracing::debug!("SQLite: Listed {} active jokes", jokes.len());
        Ok(jokes)
    }

    /// Overwrites content and refreshes updated_at. created_at is untouched.
    async fn update_content(&self, id: &str, content: &str) -> Result<(), RepoError> {
        sqlx::query("UPDATE jokes SET content = ?, updated_at = ? WHERE id = ?")
            .bind(content)
            .bind(Utc::now())
            .bind(id)
            .execute(&self.pool)
            .await?;
        tracing::debug!(joke_id = %id, "SQLite: Updated joke content");
        Ok(())
    }

    /// Sets the soft-delete flag on a joke row.
    async fn mark_deleted(&self, id: &str) -> Result<(), RepoError> {
        sqlx::query("UPDATE jokes SET deleted = 1 WHERE id = ?")
            .bind(id)
            .execute(&self.pool)
            .await?;
        tracing::debug!(joke_id = %id, "SQLite: Soft-deleted joke");
        Ok(())
    }
}

#[derive(Debug, Clone)]
pub struct SqliteFeedbackRepository {
    pool: SqlitePool,
}

impl SqliteFeedbackRepository {
    /// Creates a new repository instance over a shared connection pool.
    pub fn new(pool: SqlitePool) -> Self {
        info!("Initializing SqliteFeedbackRepository");
        Self { pool }
    }
}

#[async_trait]
impl FeedbackRepository for SqliteFeedbackRepository {
    /// Inserts a feedback row; id and timestamp are assigned here.
    async fn create(
        &self,
        joke_id: &str,
        user_id: &str,
        content: &str,
    ) -> Result<Feedback, RepoError> {
        let feedback = Feedback {
            id: Uuid::new_v4().to_string(),
            joke_id: joke_id.to_string(),
            user_id: user_id.to_string(),
            content: content.to_string(),
            created_at: Utc::now(),
        };

        sqlx::query(
            r#"
            INSERT INTO feedback (id, joke_id, user_id, content, created_at)
            VALUES (?, ?, ?, ?, ?)
            "#,
        )
        .bind(&feedback.id)
        .bind(&feedback.joke_id)
        .bind(&feedback.user_id)
        .bind(&feedback.content)
        .bind(feedback.created_at)
        .execute(&self.pool)
        .await?;

        tracing::debug!(feedback_id = %feedback.id, joke_id = %joke_id, "SQLite: Inserted feedback");
        Ok(feedback)
    }

    /// Counts feedback rows for a joke whose content matches exactly.
    async fn count_by_content(&self, joke_id: &str, content: &str) -> Result<i64, RepoError> {
        let count = sqlx::query_scalar::<_, i64>(
            "SELECT COUNT(*) FROM feedback WHERE joke_id = ? AND content = ?",
        )
        .bind(joke_id)
        .bind(content)
        .fetch_one(&self.pool)
        .await?;
        Ok(count)
    }
}
