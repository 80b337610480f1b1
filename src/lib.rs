//! Pronoun Chat
//!
//! A small terminal chat: pick and save your pronouns, talk to a scripted bot,
//! and keep the conversation in SQLite plus a plain-text log.
//!
//! # Modules
//!
//! - [`app`] - Application context and the actions it handles
//! - [`responder`] - Rule-based bot replies
//! - [`db`] - SQLite tables for pronouns and chat history
//! - [`store`] - Database plus chat log, written together
//! - [`ui`] - ratatui shell and the line-oriented fallback
//! - [`config`] - JSON configuration with environment overrides
//!
//! # Example
//!
//! ```rust,no_run
//! use pronoun_chat::app::{Action, ChatApp};
//! use std::path::Path;
//!
//! # async fn example() {
//! let mut app = ChatApp::initialize(Path::new("chat.db"), Path::new("chat_log.txt")).await;
//! app.input_mut().set_value("/joke");
//! app.dispatch(Action::SendMessage).await;
//! for line in app.transcript().display_lines() {
//!     println!("{}", line);
//! }
//! # }
//! ```

pub mod app;
pub mod config;
pub mod db;
pub mod logging;
pub mod responder;
pub mod store;
pub mod ui;

pub use app::{Action, ChatApp};
pub use db::Database;
pub use responder::Responder;
pub use store::ChatStore;
