//! Database models

use std::fmt;
use std::str::FromStr;

/// Saved pronoun record
#[derive(Debug, Clone, PartialEq, Eq, sqlx::FromRow)]
pub struct UserPronoun {
    pub id: i64,
    pub pronoun: String,
}

/// Chat history record
#[derive(Debug, Clone, PartialEq, Eq, sqlx::FromRow)]
pub struct ChatMessage {
    pub id: i64,
    pub message: String,
    pub sender: String,
}

/// Who wrote a chat line
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Sender {
    You,
    Bot,
}

impl Sender {
    pub fn as_str(&self) -> &'static str {
        match self {
            Sender::You => "You",
            Sender::Bot => "Bot",
        }
    }
}

impl fmt::Display for Sender {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The fixed set of pronouns offered by the selector
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Pronoun {
    #[default]
    HeHim,
    SheHer,
    TheyThem,
    XeXem,
    ZeZir,
    Other,
}

impl Pronoun {
    /// Selector order
    pub const ALL: [Pronoun; 6] = [
        Pronoun::HeHim,
        Pronoun::SheHer,
        Pronoun::TheyThem,
        Pronoun::XeXem,
        Pronoun::ZeZir,
        Pronoun::Other,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Pronoun::HeHim => "he/him",
            Pronoun::SheHer => "she/her",
            Pronoun::TheyThem => "they/them",
            Pronoun::XeXem => "xe/xem",
            Pronoun::ZeZir => "ze/zir",
            Pronoun::Other => "other",
        }
    }

    /// Position in [`Pronoun::ALL`]
    pub fn index(&self) -> usize {
        Self::ALL.iter().position(|p| p == self).unwrap_or(0)
    }
}

impl fmt::Display for Pronoun {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Pronoun {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().to_lowercase();
        Self::ALL
            .iter()
            .copied()
            .find(|p| p.as_str() == wanted)
            .ok_or_else(|| format!("Unknown pronoun: {}", s))
    }
}
