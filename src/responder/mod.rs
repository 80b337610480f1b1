//! Rule-based bot replies
//!
//! Input is lower-cased and matched exactly against a short list of phrases
//! and slash commands. The three pool commands pick uniformly at random.

use rand::rngs::ThreadRng;
use rand::Rng;

pub const GREETING: &str = "Hey bestie! ✨";
pub const STATUS_REPLY: &str = "Living my best digital life! 💖";
pub const DEFAULT_REPLY: &str = "Love that! Tell me more. 💖";

pub const JOKES: [&str; 3] = [
    "Why did the pronoun break up with the verb? It needed some space!",
    "Non-binary people are like stars – they shine no matter what. 🌟",
    "Why did the LGBTQ+ AI go to therapy? Too many processing issues! 🤖",
];

pub const QUOTES: [&str; 3] = [
    "“Love yourself first and everything else falls into line.” - RuPaul",
    "“Visibility is important because it’s how change begins.” - Laverne Cox",
    "“Be proud of who you are, and not ashamed of how someone else sees you.” - Unknown",
];

pub const FACTS: [&str; 3] = [
    "🏳️‍🌈 The first Pride was a riot – led by Black and Latinx trans women like Marsha P. Johnson!",
    "In 2022, over 30 countries recognized same-sex marriage. Progress! ❤️",
    "The term ‘non-binary’ has been used since at least the 1990s!",
];

/// What a message matched
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Rule {
    Greeting,
    Status,
    Joke,
    Quote,
    Fact,
    Fallback,
}

impl Rule {
    /// Classify an already lower-cased message
    pub fn classify(lowered: &str) -> Self {
        match lowered {
            "hello" | "hi" => Rule::Greeting,
            "how are you?" => Rule::Status,
            "/joke" => Rule::Joke,
            "/quote" => Rule::Quote,
            "/fact" => Rule::Fact,
            _ => Rule::Fallback,
        }
    }

    /// Reply pool for the random commands
    pub fn pool(&self) -> Option<&'static [&'static str]> {
        match self {
            Rule::Joke => Some(&JOKES),
            Rule::Quote => Some(&QUOTES),
            Rule::Fact => Some(&FACTS),
            _ => None,
        }
    }
}

/// Reply generator with an injectable random source
#[derive(Debug, Clone)]
pub struct Responder<R: Rng = ThreadRng> {
    rng: R,
}

impl Responder<ThreadRng> {
    pub fn new() -> Self {
        Self { rng: rand::rng() }
    }
}

impl Default for Responder<ThreadRng> {
    fn default() -> Self {
        Self::new()
    }
}

impl<R: Rng> Responder<R> {
    pub fn with_rng(rng: R) -> Self {
        Self { rng }
    }

    pub fn respond(&mut self, text: &str) -> String {
        let rule = Rule::classify(&text.to_lowercase());
        if let Some(pool) = rule.pool() {
            return pool[self.rng.random_range(0..pool.len())].to_string();
        }

        match rule {
            Rule::Greeting => GREETING,
            Rule::Status => STATUS_REPLY,
            _ => DEFAULT_REPLY,
        }
        .to_string()
    }
}
