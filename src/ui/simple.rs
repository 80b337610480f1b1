//! Line-oriented shell for pipes and dumb terminals
//!
//! Each input line is one action. Lines starting with `:` are commands,
//! anything else is sent as a chat message.

use std::io::{self, BufRead, Write};

use rand::Rng;

use crate::app::{Action, ChatApp};
use crate::db::Pronoun;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LineCommand {
    Send(String),
    SavePronoun(Pronoun),
    UnknownPronoun(String),
    Clear,
    Theme,
    History,
    Quit,
}

pub fn parse_line(line: &str) -> LineCommand {
    let trimmed = line.trim();
    match trimmed {
        ":clear" => return LineCommand::Clear,
        ":theme" => return LineCommand::Theme,
        ":history" => return LineCommand::History,
        ":quit" | ":q" => return LineCommand::Quit,
        _ => {}
    }

    if let Some(value) = trimmed.strip_prefix(":pronoun ") {
        return match value.parse::<Pronoun>() {
            Ok(pronoun) => LineCommand::SavePronoun(pronoun),
            Err(_) => LineCommand::UnknownPronoun(value.trim().to_string()),
        };
    }

    LineCommand::Send(line.to_string())
}

/// Drive the app from `input` until EOF or `:quit`
pub async fn run_simple<R, I, O, E>(
    app: &mut ChatApp<R>,
    input: I,
    out: &mut O,
    err: &mut E,
) -> io::Result<()>
where
    R: Rng,
    I: BufRead,
    O: Write,
    E: Write,
{
    for line in app.transcript().display_lines() {
        writeln!(out, "{}", line)?;
    }

    for line in input.lines() {
        let line = line?;
        match parse_line(&line) {
            LineCommand::Send(text) => {
                let before = app.transcript().len();
                app.input_mut().set_value(text);
                app.dispatch(Action::SendMessage).await;
                for line in &app.transcript().lines()[before..] {
                    writeln!(out, "{}", line.display())?;
                }
            }
            LineCommand::SavePronoun(pronoun) => {
                app.dispatch(Action::SelectPronoun(pronoun)).await;
                app.dispatch(Action::SavePronoun).await;
                if let Some(notice) = app.notice() {
                    writeln!(out, "{}", notice)?;
                }
                app.dispatch(Action::DismissNotice).await;
            }
            LineCommand::UnknownPronoun(value) => {
                let options: Vec<&str> = Pronoun::ALL.iter().map(|p| p.as_str()).collect();
                writeln!(
                    err,
                    "Unknown pronoun '{}'. Choose one of: {}",
                    value,
                    options.join(", ")
                )?;
            }
            LineCommand::Clear => {
                app.dispatch(Action::ClearChat).await;
                writeln!(out, "(chat cleared)")?;
            }
            LineCommand::Theme => {
                app.dispatch(Action::ToggleTheme).await;
                let mode = if app.is_dark_mode() { "dark" } else { "light" };
                writeln!(out, "(theme: {})", mode)?;
            }
            LineCommand::History => {
                for saved in app.pronoun_history().await {
                    writeln!(out, "{}. {}", saved.id, saved.pronoun)?;
                }
            }
            LineCommand::Quit => app.dispatch(Action::Quit).await,
        }
        out.flush()?;

        if app.should_quit() {
            break;
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::Database;
    use crate::responder::{Responder, GREETING};
    use crate::store::{ChatLog, ChatStore};
    use rand::rngs::StdRng;
    use rand::SeedableRng;
    use std::io::Cursor;
    use tempfile::tempdir;

    #[test]
    fn test_parse_line() {
        assert_eq!(parse_line(":clear"), LineCommand::Clear);
        assert_eq!(parse_line(" :quit "), LineCommand::Quit);
        assert_eq!(
            parse_line(":pronoun they/them"),
            LineCommand::SavePronoun(Pronoun::TheyThem)
        );
        assert_eq!(
            parse_line(":pronoun it/its"),
            LineCommand::UnknownPronoun("it/its".to_string())
        );
        assert_eq!(parse_line("hello"), LineCommand::Send("hello".to_string()));
        assert_eq!(parse_line(":joke"), LineCommand::Send(":joke".to_string()));
    }

    #[tokio::test]
    async fn test_session_script() {
        let dir = tempdir().unwrap();
        let db = Database::in_memory().await.unwrap();
        let store = ChatStore::new(Some(db), ChatLog::new(dir.path().join("chat_log.txt")));
        let mut app =
            ChatApp::with_store(store, Responder::with_rng(StdRng::seed_from_u64(9))).await;

        let script = "hello\n\n:pronoun ze/zir\n:pronoun nope\n:history\n:theme\n:quit\nignored\n";
        let mut out = Vec::new();
        let mut err = Vec::new();
        run_simple(&mut app, Cursor::new(script), &mut out, &mut err)
            .await
            .unwrap();

        let out = String::from_utf8(out).unwrap();
        let lines: Vec<&str> = out.lines().collect();
        assert_eq!(
            lines,
            vec![
                "You: hello".to_string(),
                format!("Bot: {}", GREETING),
                "Pronoun saved!".to_string(),
                "1. ze/zir".to_string(),
                "(theme: dark)".to_string(),
            ]
        );
        assert!(String::from_utf8(err).unwrap().contains("Unknown pronoun 'nope'"));
        assert!(app.should_quit());
        assert_eq!(app.transcript().len(), 2);
    }
}
