//! Full-screen chat shell

use std::io::{self, Stdout};
use std::time::{Duration, Instant};

use crossterm::{
    cursor::{Hide, Show},
    event::{
        self, DisableMouseCapture, EnableMouseCapture, Event, KeyCode, KeyEvent, KeyEventKind,
        KeyModifiers, MouseEvent, MouseEventKind,
    },
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};
use rand::Rng;

use super::render::{render_ui, RenderData};
use crate::app::{Action, ChatApp};

/// What a key press means to the shell
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyCommand {
    Dispatch(Action),
    Insert(char),
    Backspace,
    Delete,
    CursorLeft,
    CursorRight,
    CursorHome,
    CursorEnd,
    ScrollUp(usize),
    ScrollDown(usize),
    Interrupt,
}

/// Map a key press to a command. While a notice is showing only the keys
/// that close it (and quit) do anything.
pub fn map_key(key: KeyEvent, notice_visible: bool) -> Option<KeyCommand> {
    let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);

    if ctrl {
        return match key.code {
            KeyCode::Char('c') => Some(KeyCommand::Interrupt),
            KeyCode::Char('q') => Some(KeyCommand::Dispatch(Action::Quit)),
            _ if notice_visible => None,
            KeyCode::Char('s') => Some(KeyCommand::Dispatch(Action::SavePronoun)),
            KeyCode::Char('t') => Some(KeyCommand::Dispatch(Action::ToggleTheme)),
            KeyCode::Char('l') => Some(KeyCommand::Dispatch(Action::ClearChat)),
            KeyCode::Char('n') => Some(KeyCommand::Dispatch(Action::SelectNextPronoun)),
            KeyCode::Char('p') => Some(KeyCommand::Dispatch(Action::SelectPreviousPronoun)),
            _ => None,
        };
    }

    if notice_visible {
        return match key.code {
            KeyCode::Esc | KeyCode::Enter => Some(KeyCommand::Dispatch(Action::DismissNotice)),
            _ => None,
        };
    }

    match key.code {
        KeyCode::Enter => Some(KeyCommand::Dispatch(Action::SendMessage)),
        KeyCode::Char(c) => Some(KeyCommand::Insert(c)),
        KeyCode::Backspace => Some(KeyCommand::Backspace),
        KeyCode::Delete => Some(KeyCommand::Delete),
        KeyCode::Left => Some(KeyCommand::CursorLeft),
        KeyCode::Right => Some(KeyCommand::CursorRight),
        KeyCode::Home => Some(KeyCommand::CursorHome),
        KeyCode::End => Some(KeyCommand::CursorEnd),
        KeyCode::Up => Some(KeyCommand::ScrollUp(1)),
        KeyCode::Down => Some(KeyCommand::ScrollDown(1)),
        KeyCode::PageUp => Some(KeyCommand::ScrollUp(10)),
        KeyCode::PageDown => Some(KeyCommand::ScrollDown(10)),
        _ => None,
    }
}

/// Terminal plus the application context.
///
/// Dropping it restores the terminal even if the loop bailed out early.
pub struct ChatTui<R: Rng> {
    terminal: Terminal<CrosstermBackend<Stdout>>,
    app: ChatApp<R>,

    // Scroll state
    scroll_offset: usize,
    max_scroll: usize,
    follow_tail: bool,

    // Ctrl+C counter for exit
    ctrl_c_count: u8,
    last_ctrl_c: Option<Instant>,

    // Tick counter for the cursor blink
    tick_counter: u64,
}

impl<R: Rng> ChatTui<R> {
    pub fn new(app: ChatApp<R>) -> io::Result<Self> {
        enable_raw_mode()?;
        let mut stdout = io::stdout();
        execute!(stdout, EnterAlternateScreen, EnableMouseCapture, Hide)?;
        let backend = CrosstermBackend::new(stdout);
        let terminal = Terminal::new(backend)?;

        Ok(Self {
            terminal,
            app,
            scroll_offset: 0,
            max_scroll: 0,
            follow_tail: true,
            ctrl_c_count: 0,
            last_ctrl_c: None,
            tick_counter: 0,
        })
    }

    pub fn app(&self) -> &ChatApp<R> {
        &self.app
    }

    /// Run until the user quits
    pub async fn run(&mut self) -> io::Result<()> {
        let tick_rate = Duration::from_millis(120);
        let mut last_tick = Instant::now();

        while !self.app.should_quit() {
            self.draw()?;

            let timeout = tick_rate.saturating_sub(last_tick.elapsed());
            if event::poll(timeout)? {
                match event::read()? {
                    Event::Key(key) if key.kind == KeyEventKind::Press => {
                        self.handle_key_event(key).await
                    }
                    Event::Mouse(mouse) => self.handle_mouse_event(mouse),
                    _ => {}
                }
            }

            if last_tick.elapsed() >= tick_rate {
                self.tick_counter = self.tick_counter.wrapping_add(1);
                last_tick = Instant::now();
            }
        }

        self.cleanup()
    }

    fn cleanup(&mut self) -> io::Result<()> {
        disable_raw_mode()?;
        execute!(
            self.terminal.backend_mut(),
            LeaveAlternateScreen,
            DisableMouseCapture,
            Show
        )?;
        Ok(())
    }

    fn draw(&mut self) -> io::Result<()> {
        let render_data = RenderData::snapshot(
            &self.app,
            self.scroll_offset,
            self.follow_tail,
            self.tick_counter,
        );

        let mut max_scroll = 0;
        self.terminal.draw(|frame| {
            max_scroll = render_ui(frame, &render_data);
        })?;
        self.max_scroll = max_scroll;
        self.scroll_offset = self.scroll_offset.min(max_scroll);
        Ok(())
    }

    async fn handle_key_event(&mut self, key: KeyEvent) {
        let Some(command) = map_key(key, self.app.notice().is_some()) else {
            return;
        };

        if command != KeyCommand::Interrupt {
            self.ctrl_c_count = 0;
        }

        match command {
            KeyCommand::Interrupt => self.handle_interrupt().await,
            KeyCommand::Dispatch(action) => {
                if matches!(action, Action::SendMessage | Action::ClearChat) {
                    self.follow_tail = true;
                }
                self.app.dispatch(action).await;
            }
            KeyCommand::Insert(c) => self.app.input_mut().insert(c),
            KeyCommand::Backspace => self.app.input_mut().backspace(),
            KeyCommand::Delete => self.app.input_mut().delete(),
            KeyCommand::CursorLeft => self.app.input_mut().move_left(),
            KeyCommand::CursorRight => self.app.input_mut().move_right(),
            KeyCommand::CursorHome => self.app.input_mut().move_home(),
            KeyCommand::CursorEnd => self.app.input_mut().move_end(),
            KeyCommand::ScrollUp(n) => self.scroll_up(n),
            KeyCommand::ScrollDown(n) => self.scroll_down(n),
        }
    }

    // Double Ctrl+C within half a second quits
    async fn handle_interrupt(&mut self) {
        let now = Instant::now();
        match self.last_ctrl_c {
            Some(last) if now.duration_since(last) < Duration::from_millis(500) => {
                self.ctrl_c_count += 1;
            }
            _ => self.ctrl_c_count = 1,
        }
        self.last_ctrl_c = Some(now);

        if self.ctrl_c_count >= 2 {
            self.app.dispatch(Action::Quit).await;
        }
    }

    fn scroll_up(&mut self, lines: usize) {
        if self.follow_tail {
            self.scroll_offset = self.max_scroll;
            self.follow_tail = false;
        }
        self.scroll_offset = self.scroll_offset.saturating_sub(lines);
    }

    // Reaching the bottom re-attaches to new messages
    fn scroll_down(&mut self, lines: usize) {
        self.scroll_offset = self.scroll_offset.saturating_add(lines).min(self.max_scroll);
        if self.scroll_offset == self.max_scroll {
            self.follow_tail = true;
        }
    }

    fn handle_mouse_event(&mut self, mouse: MouseEvent) {
        match mouse.kind {
            MouseEventKind::ScrollUp => self.scroll_up(3),
            MouseEventKind::ScrollDown => self.scroll_down(3),
            _ => {}
        }
    }
}

impl<R: Rng> Drop for ChatTui<R> {
    fn drop(&mut self) {
        let _ = disable_raw_mode();
        let _ = execute!(
            self.terminal.backend_mut(),
            LeaveAlternateScreen,
            DisableMouseCapture,
            Show
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::KeyEventState;

    fn key(code: KeyCode, modifiers: KeyModifiers) -> KeyEvent {
        KeyEvent {
            code,
            modifiers,
            kind: KeyEventKind::Press,
            state: KeyEventState::NONE,
        }
    }

    #[test]
    fn test_control_shortcuts() {
        let ctrl = KeyModifiers::CONTROL;
        assert_eq!(
            map_key(key(KeyCode::Char('s'), ctrl), false),
            Some(KeyCommand::Dispatch(Action::SavePronoun))
        );
        assert_eq!(
            map_key(key(KeyCode::Char('t'), ctrl), false),
            Some(KeyCommand::Dispatch(Action::ToggleTheme))
        );
        assert_eq!(
            map_key(key(KeyCode::Char('l'), ctrl), false),
            Some(KeyCommand::Dispatch(Action::ClearChat))
        );
        assert_eq!(
            map_key(key(KeyCode::Char('c'), ctrl), false),
            Some(KeyCommand::Interrupt)
        );
    }

    #[test]
    fn test_plain_keys_edit_input() {
        let none = KeyModifiers::NONE;
        assert_eq!(
            map_key(key(KeyCode::Char('s'), none), false),
            Some(KeyCommand::Insert('s'))
        );
        assert_eq!(
            map_key(key(KeyCode::Char('S'), KeyModifiers::SHIFT), false),
            Some(KeyCommand::Insert('S'))
        );
        assert_eq!(
            map_key(key(KeyCode::Enter, none), false),
            Some(KeyCommand::Dispatch(Action::SendMessage))
        );
        assert_eq!(map_key(key(KeyCode::Tab, none), false), None);
    }

    #[test]
    fn test_notice_swallows_input() {
        let none = KeyModifiers::NONE;
        assert_eq!(map_key(key(KeyCode::Char('x'), none), true), None);
        assert_eq!(
            map_key(key(KeyCode::Enter, none), true),
            Some(KeyCommand::Dispatch(Action::DismissNotice))
        );
        assert_eq!(
            map_key(key(KeyCode::Char('l'), KeyModifiers::CONTROL), true),
            None
        );
        assert_eq!(
            map_key(key(KeyCode::Char('q'), KeyModifiers::CONTROL), true),
            Some(KeyCommand::Dispatch(Action::Quit))
        );
    }
}
