//! Database repository for the pronoun and chat history tables

use super::migrations::INIT_SCHEMA;
use super::models::{ChatMessage, Sender, UserPronoun};
use sqlx::sqlite::{SqliteConnectOptions, SqlitePool, SqlitePoolOptions};
use std::path::Path;
use std::str::FromStr;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum DatabaseError {
    #[error("SQLx error: {0}")]
    Sqlx(#[from] sqlx::Error),
    #[error("Migration error: {0}")]
    Migration(String),
    #[error("Database unavailable: {0}")]
    Unavailable(String),
}

/// Database connection and operations.
///
/// The pool is capped at a single connection that stays open for the life of
/// the process.
pub struct Database {
    pool: SqlitePool,
}

impl Database {
    /// Open (or create) the database file and ensure the schema exists
    pub async fn new(path: &Path) -> Result<Self, DatabaseError> {
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                tokio::fs::create_dir_all(parent).await.ok();
            }
        }

        let options = SqliteConnectOptions::new()
            .filename(path)
            .create_if_missing(true)
            .journal_mode(sqlx::sqlite::SqliteJournalMode::Wal)
            .synchronous(sqlx::sqlite::SqliteSynchronous::Normal);

        let pool = Self::single_connection_pool()
            .connect_with(options)
            .await?;

        let db = Self { pool };
        db.ensure_schema().await?;

        tracing::info!("Database ready at {:?}", path);
        Ok(db)
    }

    /// Create an in-memory database (for testing)
    pub async fn in_memory() -> Result<Self, DatabaseError> {
        let options = SqliteConnectOptions::from_str("sqlite::memory:")?;

        let pool = Self::single_connection_pool()
            .connect_with(options)
            .await?;

        let db = Self { pool };
        db.ensure_schema().await?;

        Ok(db)
    }

    // An in-memory database lives only as long as its connection, so the one
    // connection must never be reaped.
    fn single_connection_pool() -> SqlitePoolOptions {
        SqlitePoolOptions::new()
            .max_connections(1)
            .min_connections(1)
            .idle_timeout(None)
            .max_lifetime(None)
    }

    /// Create both tables if they are missing
    pub async fn ensure_schema(&self) -> Result<(), DatabaseError> {
        sqlx::query(INIT_SCHEMA)
            .execute(&self.pool)
            .await
            .map_err(|e| DatabaseError::Migration(e.to_string()))?;

        Ok(())
    }

    // ========================================================================
    // Pronoun operations
    // ========================================================================

    /// Record a pronoun choice. Every call inserts a new row.
    pub async fn insert_pronoun(&self, pronoun: &str) -> Result<i64, DatabaseError> {
        let result = sqlx::query("INSERT INTO users (pronoun) VALUES (?)")
            .bind(pronoun)
            .execute(&self.pool)
            .await?;

        Ok(result.last_insert_rowid())
    }

    /// All saved pronouns, oldest first
    pub async fn pronoun_history(&self) -> Result<Vec<UserPronoun>, DatabaseError> {
        Ok(sqlx::query_as::<_, UserPronoun>(
            "SELECT id, COALESCE(pronoun, '') AS pronoun FROM users ORDER BY id ASC",
        )
        .fetch_all(&self.pool)
        .await?)
    }

    /// Most recently saved pronoun, if any
    pub async fn latest_pronoun(&self) -> Result<Option<UserPronoun>, DatabaseError> {
        Ok(sqlx::query_as::<_, UserPronoun>(
            "SELECT id, COALESCE(pronoun, '') AS pronoun FROM users ORDER BY id DESC LIMIT 1",
        )
        .fetch_optional(&self.pool)
        .await?)
    }

    // ========================================================================
    // Chat history operations
    // ========================================================================

    /// Append one chat line
    pub async fn insert_chat_message(
        &self,
        sender: Sender,
        message: &str,
    ) -> Result<i64, DatabaseError> {
        let result = sqlx::query("INSERT INTO chat_history (message, sender) VALUES (?, ?)")
            .bind(message)
            .bind(sender.as_str())
            .execute(&self.pool)
            .await?;

        Ok(result.last_insert_rowid())
    }

    /// Full chat history in insertion order
    pub async fn load_all_messages(&self) -> Result<Vec<ChatMessage>, DatabaseError> {
        Ok(sqlx::query_as::<_, ChatMessage>(
            r#"
            SELECT id, COALESCE(message, '') AS message, COALESCE(sender, '') AS sender
            FROM chat_history
            ORDER BY id ASC
            "#,
        )
        .fetch_all(&self.pool)
        .await?)
    }

    /// Delete every chat row, returning how many were removed
    pub async fn clear_messages(&self) -> Result<u64, DatabaseError> {
        let result = sqlx::query("DELETE FROM chat_history")
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected())
    }

    /// Close the database connection
    pub async fn close(&self) {
        self.pool.close().await;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_ensure_schema_is_idempotent() {
        let db = Database::in_memory().await.unwrap();
        db.ensure_schema().await.unwrap();
        db.ensure_schema().await.unwrap();

        assert!(db.load_all_messages().await.unwrap().is_empty());
        assert!(db.pronoun_history().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_pronoun_saves_accumulate() {
        let db = Database::in_memory().await.unwrap();

        let first = db.insert_pronoun("they/them").await.unwrap();
        let second = db.insert_pronoun("he/him").await.unwrap();
        assert!(second > first);

        let history = db.pronoun_history().await.unwrap();
        assert_eq!(history.len(), 2);
        assert_eq!(history[0].pronoun, "they/them");
        assert_eq!(history[1].pronoun, "he/him");

        let latest = db.latest_pronoun().await.unwrap().unwrap();
        assert_eq!(latest.pronoun, "he/him");
    }

    #[tokio::test]
    async fn test_messages_load_in_insertion_order() {
        let db = Database::in_memory().await.unwrap();

        db.insert_chat_message(Sender::You, "hello").await.unwrap();
        db.insert_chat_message(Sender::Bot, "Hey bestie! ✨").await.unwrap();
        db.insert_chat_message(Sender::You, "bye").await.unwrap();

        let messages = db.load_all_messages().await.unwrap();
        let lines: Vec<String> = messages
            .iter()
            .map(|m| format!("{}: {}", m.sender, m.message))
            .collect();
        assert_eq!(lines, vec!["You: hello", "Bot: Hey bestie! ✨", "You: bye"]);
        assert!(messages.windows(2).all(|w| w[0].id < w[1].id));
    }

    #[tokio::test]
    async fn test_clear_messages_keeps_pronouns() {
        let db = Database::in_memory().await.unwrap();

        db.insert_pronoun("xe/xem").await.unwrap();
        db.insert_chat_message(Sender::You, "hi").await.unwrap();
        db.insert_chat_message(Sender::Bot, "Hey bestie! ✨").await.unwrap();

        assert_eq!(db.clear_messages().await.unwrap(), 2);
        assert!(db.load_all_messages().await.unwrap().is_empty());
        assert_eq!(db.pronoun_history().await.unwrap().len(), 1);

        // Clearing an empty table is still fine
        assert_eq!(db.clear_messages().await.unwrap(), 0);
    }

    #[tokio::test]
    async fn test_opens_path_with_url_characters() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("my?chat#1.db");

        let db = Database::new(&path).await.unwrap();
        db.insert_pronoun("ze/zir").await.unwrap();
        db.close().await;

        assert!(path.exists());
        let db = Database::new(&path).await.unwrap();
        assert_eq!(db.pronoun_history().await.unwrap()[0].pronoun, "ze/zir");
        db.close().await;
    }

    #[tokio::test]
    async fn test_closed_database_reports_errors() {
        let db = Database::in_memory().await.unwrap();
        db.close().await;

        assert!(db.insert_chat_message(Sender::You, "hi").await.is_err());
    }
}
