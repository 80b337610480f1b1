//! Persistence store: SQLite tables plus the plain-text chat log
//!
//! Every chat write goes to both the database and the log file. The two are
//! independent: each half is attempted even if the other fails, and nothing
//! is rolled back.

mod chat_log;

pub use chat_log::ChatLog;

use std::io;
use std::path::Path;
use thiserror::Error;

use crate::db::{ChatMessage, Database, DatabaseError, Sender, UserPronoun};

#[derive(Error, Debug)]
pub enum StoreError {
    #[error("Database error: {0}")]
    Database(#[from] DatabaseError),
    #[error("Chat log error: {0}")]
    Log(#[from] io::Error),
    #[error("Database error: {database}; chat log error: {log}")]
    Both {
        database: DatabaseError,
        log: io::Error,
    },
}

impl StoreError {
    fn combine(db: Result<(), DatabaseError>, log: io::Result<()>) -> Result<(), StoreError> {
        match (db, log) {
            (Ok(()), Ok(())) => Ok(()),
            (Err(database), Ok(())) => Err(StoreError::Database(database)),
            (Ok(()), Err(log)) => Err(StoreError::Log(log)),
            (Err(database), Err(log)) => Err(StoreError::Both { database, log }),
        }
    }
}

/// Database handle plus chat log.
///
/// The database may be missing when it could not be opened at startup; every
/// database-backed operation then fails with [`DatabaseError::Unavailable`].
pub struct ChatStore {
    db: Option<Database>,
    log: ChatLog,
}

impl ChatStore {
    pub fn new(db: Option<Database>, log: ChatLog) -> Self {
        Self { db, log }
    }

    /// Open the database at `db_path`. The log is used regardless of whether
    /// the database opens; the error is handed back alongside the store.
    pub async fn open(db_path: &Path, log: ChatLog) -> (Self, Option<DatabaseError>) {
        match Database::new(db_path).await {
            Ok(db) => (Self::new(Some(db), log), None),
            Err(e) => (Self::new(None, log), Some(e)),
        }
    }

    pub fn is_available(&self) -> bool {
        self.db.is_some()
    }

    pub fn chat_log(&self) -> &ChatLog {
        &self.log
    }

    fn db(&self) -> Result<&Database, DatabaseError> {
        self.db
            .as_ref()
            .ok_or_else(|| DatabaseError::Unavailable("database was not opened".to_string()))
    }

    pub async fn ensure_schema(&self) -> Result<(), StoreError> {
        Ok(self.db()?.ensure_schema().await?)
    }

    pub async fn insert_pronoun(&self, pronoun: &str) -> Result<i64, StoreError> {
        Ok(self.db()?.insert_pronoun(pronoun).await?)
    }

    pub async fn pronoun_history(&self) -> Result<Vec<UserPronoun>, StoreError> {
        Ok(self.db()?.pronoun_history().await?)
    }

    pub async fn latest_pronoun(&self) -> Result<Option<UserPronoun>, StoreError> {
        Ok(self.db()?.latest_pronoun().await?)
    }

    /// Insert the row and append the log line
    pub async fn insert_chat_message(
        &self,
        sender: Sender,
        message: &str,
    ) -> Result<(), StoreError> {
        let db_result = match self.db() {
            Ok(db) => db.insert_chat_message(sender, message).await.map(|_| ()),
            Err(e) => Err(e),
        };
        let log_result = self.log.append(sender, message);

        StoreError::combine(db_result, log_result)
    }

    pub async fn load_all_messages(&self) -> Result<Vec<ChatMessage>, StoreError> {
        Ok(self.db()?.load_all_messages().await?)
    }

    /// Delete all chat rows and truncate the log
    pub async fn clear_messages(&self) -> Result<(), StoreError> {
        let db_result = match self.db() {
            Ok(db) => db.clear_messages().await.map(|_| ()),
            Err(e) => Err(e),
        };
        let log_result = self.log.truncate();

        StoreError::combine(db_result, log_result)
    }

    pub async fn close(&self) {
        if let Some(db) = &self.db {
            db.close().await;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[tokio::test]
    async fn test_chat_message_goes_to_both_sinks() {
        let dir = tempdir().unwrap();
        let db = Database::in_memory().await.unwrap();
        let store = ChatStore::new(Some(db), ChatLog::new(dir.path().join("chat_log.txt")));

        store.insert_chat_message(Sender::You, "hello").await.unwrap();

        let rows = store.load_all_messages().await.unwrap();
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].sender, "You");
        assert_eq!(store.chat_log().read_lines().unwrap(), vec!["You: hello"]);
    }

    #[tokio::test]
    async fn test_missing_database_still_writes_log() {
        let dir = tempdir().unwrap();
        let store = ChatStore::new(None, ChatLog::new(dir.path().join("chat_log.txt")));

        let err = store
            .insert_chat_message(Sender::Bot, "Love that! Tell me more. 💖")
            .await
            .unwrap_err();
        assert!(matches!(err, StoreError::Database(DatabaseError::Unavailable(_))));
        assert_eq!(
            store.chat_log().read_lines().unwrap(),
            vec!["Bot: Love that! Tell me more. 💖"]
        );
    }

    #[tokio::test]
    async fn test_both_failures_are_reported() {
        let dir = tempdir().unwrap();
        let log = ChatLog::new(dir.path().join("missing").join("chat_log.txt"));
        let store = ChatStore::new(None, log);

        let err = store.clear_messages().await.unwrap_err();
        assert!(matches!(err, StoreError::Both { .. }));
    }

    #[tokio::test]
    async fn test_clear_truncates_log_and_rows() {
        let dir = tempdir().unwrap();
        let db = Database::in_memory().await.unwrap();
        let store = ChatStore::new(Some(db), ChatLog::new(dir.path().join("chat_log.txt")));

        store.insert_chat_message(Sender::You, "hi").await.unwrap();
        store.insert_chat_message(Sender::Bot, "Hey bestie! ✨").await.unwrap();
        store.clear_messages().await.unwrap();

        assert!(store.load_all_messages().await.unwrap().is_empty());
        assert_eq!(std::fs::metadata(store.chat_log().path()).unwrap().len(), 0);
    }

    #[tokio::test]
    async fn test_open_reports_bad_path() {
        let dir = tempdir().unwrap();
        // A directory cannot be opened as a database file
        let (store, err) = ChatStore::open(dir.path(), ChatLog::new(dir.path().join("log"))).await;
        assert!(err.is_some());
        assert!(!store.is_available());
    }
}
