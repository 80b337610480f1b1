//! Light and dark palettes for the TUI

use ratatui::style::{Color, Modifier, Style};

/// Color palette for the application
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Theme {
    // Window
    pub background: Color,
    pub foreground: Color,
    pub muted: Color,

    // Transcript view
    pub transcript_background: Color,
    pub transcript_foreground: Color,

    // Bars
    pub top_bar: Color,
    pub bottom_bar: Color,

    // Accents
    pub primary: Color,
    pub accent: Color,
    pub success: Color,

    // UI elements
    pub border: Color,
    pub border_focused: Color,

    // Message colors
    pub user_message: Color,
    pub bot_message: Color,
}

impl Theme {
    /// Light palette, used on every launch
    pub fn light() -> Self {
        Self {
            background: Color::White,
            foreground: Color::Black,
            muted: Color::Rgb(130, 130, 150),

            transcript_background: Color::White,
            transcript_foreground: Color::Black,

            top_bar: Color::Rgb(173, 216, 230),
            bottom_bar: Color::Rgb(240, 240, 240),

            primary: Color::Rgb(60, 100, 200),
            accent: Color::Rgb(220, 130, 50),
            success: Color::Rgb(50, 180, 100),

            border: Color::Rgb(200, 200, 210),
            border_focused: Color::Rgb(60, 100, 200),

            user_message: Color::Rgb(50, 80, 150),
            bot_message: Color::Rgb(130, 80, 200),
        }
    }

    /// Dark palette
    pub fn dark() -> Self {
        Self {
            background: Color::DarkGray,
            foreground: Color::White,
            muted: Color::Rgb(120, 120, 140),

            transcript_background: Color::Black,
            transcript_foreground: Color::White,

            top_bar: Color::Rgb(40, 60, 80),
            bottom_bar: Color::Rgb(30, 30, 36),

            primary: Color::Rgb(130, 170, 255),
            accent: Color::Rgb(255, 180, 100),
            success: Color::Rgb(130, 255, 170),

            border: Color::Rgb(60, 60, 80),
            border_focused: Color::Rgb(130, 170, 255),

            user_message: Color::Rgb(180, 220, 255),
            bot_message: Color::Rgb(220, 180, 255),
        }
    }

    pub fn for_mode(dark: bool) -> Self {
        if dark {
            Self::dark()
        } else {
            Self::light()
        }
    }

    // Style builders

    pub fn base_style(&self) -> Style {
        Style::default().bg(self.background).fg(self.foreground)
    }

    pub fn transcript_style(&self) -> Style {
        Style::default()
            .bg(self.transcript_background)
            .fg(self.transcript_foreground)
    }

    pub fn top_bar_style(&self) -> Style {
        Style::default().bg(self.top_bar).fg(self.foreground)
    }

    pub fn bottom_bar_style(&self) -> Style {
        Style::default().bg(self.bottom_bar).fg(self.foreground)
    }

    pub fn muted_style(&self) -> Style {
        Style::default().fg(self.muted)
    }

    pub fn primary_style(&self) -> Style {
        Style::default().fg(self.primary)
    }

    pub fn success_style(&self) -> Style {
        Style::default().fg(self.success).add_modifier(Modifier::BOLD)
    }

    pub fn border_style(&self, focused: bool) -> Style {
        Style::default().fg(if focused { self.border_focused } else { self.border })
    }

    pub fn title_style(&self) -> Style {
        Style::default()
            .fg(self.primary)
            .add_modifier(Modifier::BOLD)
    }

    pub fn user_style(&self) -> Style {
        Style::default()
            .fg(self.user_message)
            .add_modifier(Modifier::BOLD)
    }

    pub fn bot_style(&self) -> Style {
        Style::default()
            .fg(self.bot_message)
            .add_modifier(Modifier::BOLD)
    }

    pub fn shortcut_key_style(&self) -> Style {
        Style::default()
            .fg(self.accent)
            .add_modifier(Modifier::BOLD)
    }

    pub fn shortcut_desc_style(&self) -> Style {
        Style::default().fg(self.muted)
    }
}

impl Default for Theme {
    fn default() -> Self {
        Self::light()
    }
}

/// Labels used on the bars
pub struct Icons;

impl Icons {
    pub const SAVE: &'static str = "💾";
    pub const MOON: &'static str = "🌙";
    pub const SUN: &'static str = "☀";
    pub const SEND: &'static str = "📩";
    pub const TRASH: &'static str = "🗑";
    pub const CHECK: &'static str = "✓";
    pub const CHEVRON_LEFT: &'static str = "‹";
    pub const CHEVRON_RIGHT: &'static str = "›";
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_theme_styles() {
        let theme = Theme::dark();
        let style = theme.transcript_style();
        assert_eq!(style.bg, Some(Color::Black));
        assert_eq!(style.fg, Some(Color::White));
    }

    #[test]
    fn test_mode_selects_palette() {
        assert_eq!(Theme::for_mode(false), Theme::light());
        assert_eq!(Theme::for_mode(true), Theme::dark());
        assert_eq!(Theme::default().transcript_background, Color::White);
    }
}
