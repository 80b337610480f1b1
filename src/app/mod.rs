//! Application context: transcript, input, pronoun selector and theme flag
//!
//! `ChatApp` owns the store and the responder and applies one [`Action`] at a
//! time. Store failures are written to the diagnostics log and never stop the
//! in-memory update that triggered them.

mod action;
mod input;
mod transcript;

pub use action::Action;
pub use input::InputLine;
pub use transcript::{Transcript, TranscriptLine};

use std::path::Path;

use rand::rngs::ThreadRng;
use rand::Rng;

use crate::db::{Pronoun, Sender, UserPronoun};
use crate::responder::Responder;
use crate::store::{ChatLog, ChatStore};
use crate::{log_debug, log_error, log_info, log_warn};

/// Acknowledgment shown after a successful pronoun save
pub const PRONOUN_SAVED: &str = "Pronoun saved!";

pub struct ChatApp<R: Rng = ThreadRng> {
    store: ChatStore,
    responder: Responder<R>,
    transcript: Transcript,
    input: InputLine,
    pronoun: Pronoun,
    saved_pronoun: Option<String>,
    dark_mode: bool,
    notice: Option<String>,
    should_quit: bool,
}

impl ChatApp<ThreadRng> {
    /// Open the database and chat log and load the saved history.
    ///
    /// A database that fails to open is logged; the app still starts and each
    /// later store operation fails on its own.
    pub async fn initialize(db_path: &Path, chat_log_path: &Path) -> Self {
        let (store, open_error) = ChatStore::open(db_path, ChatLog::new(chat_log_path)).await;
        if let Some(e) = open_error {
            log_error!("Failed to open database at {}: {}", db_path.display(), e);
        } else {
            log_info!("Connected to database at {}", db_path.display());
        }

        Self::with_store(store, Responder::new()).await
    }
}

impl<R: Rng> ChatApp<R> {
    pub async fn with_store(store: ChatStore, responder: Responder<R>) -> Self {
        if store.is_available() {
            if let Err(e) = store.ensure_schema().await {
                log_error!("Failed to create tables: {}", e);
            }
        }

        let transcript = match store.load_all_messages().await {
            Ok(history) => Transcript::from_history(history),
            Err(e) => {
                log_error!("Failed to load chat history: {}", e);
                Transcript::default()
            }
        };

        let saved_pronoun = match store.latest_pronoun().await {
            Ok(latest) => latest.map(|p| p.pronoun),
            Err(e) => {
                log_error!("Failed to load saved pronoun: {}", e);
                None
            }
        };

        let pronoun = match saved_pronoun.as_deref().map(str::parse::<Pronoun>) {
            Some(Ok(pronoun)) => pronoun,
            Some(Err(_)) => {
                log_warn!("Ignoring unrecognized saved pronoun {:?}", saved_pronoun);
                Pronoun::default()
            }
            None => Pronoun::default(),
        };

        Self {
            store,
            responder,
            transcript,
            input: InputLine::new(),
            pronoun,
            saved_pronoun,
            dark_mode: false,
            notice: None,
            should_quit: false,
        }
    }

    // ========================================================================
    // Accessors
    // ========================================================================

    pub fn transcript(&self) -> &Transcript {
        &self.transcript
    }

    pub fn input(&self) -> &InputLine {
        &self.input
    }

    pub fn input_mut(&mut self) -> &mut InputLine {
        &mut self.input
    }

    /// Current selector value
    pub fn pronoun(&self) -> Pronoun {
        self.pronoun
    }

    /// Last pronoun persisted, this session or a previous one
    pub fn saved_pronoun(&self) -> Option<&str> {
        self.saved_pronoun.as_deref()
    }

    pub fn is_dark_mode(&self) -> bool {
        self.dark_mode
    }

    pub fn notice(&self) -> Option<&str> {
        self.notice.as_deref()
    }

    pub fn should_quit(&self) -> bool {
        self.should_quit
    }

    pub fn store(&self) -> &ChatStore {
        &self.store
    }

    pub async fn pronoun_history(&self) -> Vec<UserPronoun> {
        match self.store.pronoun_history().await {
            Ok(history) => history,
            Err(e) => {
                log_error!("Failed to load pronoun history: {}", e);
                Vec::new()
            }
        }
    }

    // ========================================================================
    // Action handlers
    // ========================================================================

    pub async fn dispatch(&mut self, action: Action) {
        log_debug!("Dispatching {:?}", action);
        match action {
            Action::SavePronoun => self.save_pronoun().await,
            Action::SendMessage => self.send_message().await,
            Action::ClearChat => self.clear_chat().await,
            Action::ToggleTheme => self.dark_mode = !self.dark_mode,
            Action::SelectNextPronoun => self.step_pronoun(1),
            Action::SelectPreviousPronoun => self.step_pronoun(Pronoun::ALL.len() - 1),
            Action::SelectPronoun(pronoun) => self.pronoun = pronoun,
            Action::DismissNotice => self.notice = None,
            Action::Quit => self.should_quit = true,
        }
    }

    fn step_pronoun(&mut self, by: usize) {
        let next = (self.pronoun.index() + by) % Pronoun::ALL.len();
        self.pronoun = Pronoun::ALL[next];
    }

    async fn save_pronoun(&mut self) {
        let pronoun = self.pronoun.as_str();
        match self.store.insert_pronoun(pronoun).await {
            Ok(id) => {
                log_info!("Saved pronoun {} (row {})", pronoun, id);
                self.saved_pronoun = Some(pronoun.to_string());
                self.notice = Some(PRONOUN_SAVED.to_string());
            }
            Err(e) => {
                log_error!("Failed to save pronoun {}: {}", pronoun, e);
            }
        }
    }

    async fn send_message(&mut self) {
        let message = self.input.value().trim().to_string();
        if message.is_empty() {
            return;
        }

        self.transcript.push(Sender::You, message.as_str());
        self.record(Sender::You, &message).await;

        let reply = self.responder.respond(&message);
        self.transcript.push(Sender::Bot, reply.as_str());
        self.record(Sender::Bot, &reply).await;

        self.input.clear();
    }

    async fn record(&self, sender: Sender, message: &str) {
        if let Err(e) = self.store.insert_chat_message(sender, message).await {
            log_error!("Failed to save {} message: {}", sender, e);
        }
    }

    async fn clear_chat(&mut self) {
        self.transcript.clear();
        if let Err(e) = self.store.clear_messages().await {
            log_error!("Failed to clear chat history: {}", e);
        }
    }

    /// Release the database connection
    pub async fn shutdown(&self) {
        self.store.close().await;
    }
}
