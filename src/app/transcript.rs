//! In-memory transcript shown in the chat view

use crate::db::{ChatMessage, Sender};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TranscriptLine {
    pub sender: String,
    pub message: String,
}

impl TranscriptLine {
    pub fn new(sender: Sender, message: impl Into<String>) -> Self {
        Self {
            sender: sender.to_string(),
            message: message.into(),
        }
    }

    pub fn is_from(&self, sender: Sender) -> bool {
        self.sender == sender.as_str()
    }

    pub fn display(&self) -> String {
        format!("{}: {}", self.sender, self.message)
    }
}

impl From<ChatMessage> for TranscriptLine {
    fn from(msg: ChatMessage) -> Self {
        Self {
            sender: msg.sender,
            message: msg.message,
        }
    }
}

/// Ordered display lines, oldest first
#[derive(Debug, Clone, Default)]
pub struct Transcript {
    lines: Vec<TranscriptLine>,
}

impl Transcript {
    pub fn from_history(history: Vec<ChatMessage>) -> Self {
        Self {
            lines: history.into_iter().map(TranscriptLine::from).collect(),
        }
    }

    pub fn push(&mut self, sender: Sender, message: impl Into<String>) {
        self.lines.push(TranscriptLine::new(sender, message));
    }

    pub fn clear(&mut self) {
        self.lines.clear();
    }

    pub fn lines(&self) -> &[TranscriptLine] {
        &self.lines
    }

    pub fn len(&self) -> usize {
        self.lines.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// Display strings, "sender: message"
    pub fn display_lines(&self) -> Vec<String> {
        self.lines.iter().map(TranscriptLine::display).collect()
    }
}
