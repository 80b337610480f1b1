//! Database schema

/// SQL for creating the database schema.
///
/// Safe to run on every startup: both tables are created only if missing.
pub const INIT_SCHEMA: &str = r#"
-- Pronoun choices, append-only history
CREATE TABLE IF NOT EXISTS users (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    pronoun TEXT
);

-- Chat transcript, two rows per user turn
CREATE TABLE IF NOT EXISTS chat_history (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    message TEXT,
    sender TEXT
);
"#;
