//! UI module - terminal shell using ratatui, plus a line-oriented fallback

pub mod chat_tui;
pub mod layout;
pub mod render;
pub mod simple;
pub mod theme;

pub use chat_tui::ChatTui;
pub use simple::run_simple;
pub use theme::Theme;
