//! Database module for SQLite persistence

mod migrations;
mod models;
mod repository;

pub use models::{ChatMessage, Pronoun, Sender, UserPronoun};
pub use repository::{Database, DatabaseError};
