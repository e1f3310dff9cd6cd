// External crate imports
use anyhow::{Context, Result};
use sqlx::sqlite::SqlitePoolOptions;
use sqlx::SqlitePool;
use tracing;

/// Opens the SQLite connection pool for the given connection string.
pub async fn connect(database_url: &str) -> Result<SqlitePool> {
    let pool = SqlitePoolOptions::new()
        .connect(database_url)
        .await
        .context(format!("Failed to connect to database '{}'", database_url))?;
    tracing::info!(%database_url, "Database connection pool ready");
    Ok(pool)
}

/// Creates the `jokes` and `feedback` tables if they do not already exist.
///
/// Timestamps are stored as RFC 3339 TEXT; `deleted` is an INTEGER flag
/// defaulting to 0. There is no migration tooling; the schema is fixed.
pub async fn init_schema(pool: &SqlitePool) -> Result<()> {
    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS jokes (
            id TEXT PRIMARY KEY,
            content TEXT NOT NULL,
            created_at TEXT NOT NULL,
            updated_at TEXT NOT NULL,
            deleted INTEGER NOT NULL DEFAULT 0
        )
        "#,
    )
    .execute(pool)
    .await
    .context("Failed to create 'jokes' table")?;

    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS feedback (
            id TEXT PRIMARY KEY,
            joke_id TEXT NOT NULL,
            user_id TEXT NOT NULL,
            content TEXT NOT NULL,
            created_at TEXT NOT NULL
        )
        "#,
    )
    .execute(pool)
    .await
    .context("Failed to create 'feedback' table")?;

    tracing::info!("Schema check complete, tables ready");
    Ok(())
}
