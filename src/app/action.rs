//! User actions dispatched by the shell

use crate::db::Pronoun;

/// Everything the user can do. Each variant has exactly one handler in
/// [`super::ChatApp::dispatch`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    /// Persist the selector's current pronoun
    SavePronoun,
    /// Send the input line to the bot
    SendMessage,
    /// Wipe transcript, history table and chat log
    ClearChat,
    /// Switch between the light and dark palettes
    ToggleTheme,
    SelectNextPronoun,
    SelectPreviousPronoun,
    SelectPronoun(Pronoun),
    DismissNotice,
    Quit,
}
