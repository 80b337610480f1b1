//! Static rendering functions
//!
//! The event loop snapshots what it needs into [`RenderData`] and hands it to
//! [`render_ui`], so drawing never borrows the live application state.

use ratatui::{
    layout::{Alignment, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Clear, Paragraph, Wrap},
    Frame,
};

use super::layout::{bottom_bar_areas, centered_rect, create_areas, is_compact, top_bar_areas};
use super::theme::{Icons, Theme};
use crate::app::{ChatApp, TranscriptLine};
use crate::db::{Pronoun, Sender};

pub struct RenderData {
    pub theme: Theme,
    pub dark_mode: bool,
    pub pronoun: Pronoun,
    pub saved_pronoun: Option<String>,
    pub lines: Vec<TranscriptLine>,
    pub input_before_cursor: String,
    pub input_after_cursor: String,
    pub scroll_offset: usize,
    pub follow_tail: bool,
    pub notice: Option<String>,
    pub store_available: bool,
    pub diagnostics_path: Option<String>,
    pub tick_counter: u64,
}

impl RenderData {
    pub fn snapshot<R: rand::Rng>(
        app: &ChatApp<R>,
        scroll_offset: usize,
        follow_tail: bool,
        tick_counter: u64,
    ) -> Self {
        let (before, after) = app.input().split_at_cursor();
        Self {
            theme: Theme::for_mode(app.is_dark_mode()),
            dark_mode: app.is_dark_mode(),
            pronoun: app.pronoun(),
            saved_pronoun: app.saved_pronoun().map(str::to_string),
            lines: app.transcript().lines().to_vec(),
            input_before_cursor: before.to_string(),
            input_after_cursor: after.to_string(),
            scroll_offset,
            follow_tail,
            notice: app.notice().map(str::to_string),
            store_available: app.store().is_available(),
            diagnostics_path: crate::logging::log_path_display(),
            tick_counter,
        }
    }
}

/// Draw the whole screen. Returns the transcript's largest scroll offset so
/// the caller can clamp its own scroll position.
pub fn render_ui(frame: &mut Frame, data: &RenderData) -> usize {
    let area = frame.area();

    frame.render_widget(Block::default().style(data.theme.base_style()), area);

    let areas = create_areas(area);
    render_top_bar(frame, areas.top_bar, data);
    let max_scroll = render_transcript(frame, areas.transcript, data);
    render_bottom_bar(frame, areas.bottom_bar, data);
    render_status_bar(frame, areas.status, data);

    if let Some(ref notice) = data.notice {
        render_notice(frame, area, notice, data);
    }

    max_scroll
}

fn render_top_bar(frame: &mut Frame, area: Rect, data: &RenderData) {
    let block = Block::default()
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(data.theme.border_style(false))
        .style(data.theme.top_bar_style())
        .title(Span::styled(" Pronoun-Friendly Chat ", data.theme.title_style()));

    let inner = block.inner(area);
    frame.render_widget(block, area);

    let (selector_area, theme_area) = top_bar_areas(inner);
    let compact = is_compact(area);

    let mut spans = Vec::new();
    if !compact {
        spans.push(Span::raw(" Set Your Pronouns: "));
    }
    spans.extend([
        Span::styled(Icons::CHEVRON_LEFT, data.theme.muted_style()),
        Span::styled(
            format!(" {} ", data.pronoun),
            Style::default().add_modifier(Modifier::BOLD | Modifier::REVERSED),
        ),
        Span::styled(Icons::CHEVRON_RIGHT, data.theme.muted_style()),
        Span::raw("  "),
    ]);
    let save_label = if compact {
        format!("[{} Save]", Icons::SAVE)
    } else {
        format!("[{} Save Pronoun]", Icons::SAVE)
    };
    spans.push(Span::styled(save_label, data.theme.primary_style()));

    if let Some(ref saved) = data.saved_pronoun {
        spans.push(Span::raw("  "));
        spans.push(Span::styled(
            format!("{} {}", Icons::CHECK, saved),
            data.theme.success_style(),
        ));
    }

    frame.render_widget(Paragraph::new(Line::from(spans)), selector_area);

    let theme_button = if data.dark_mode { Icons::SUN } else { Icons::MOON };
    frame.render_widget(
        Paragraph::new(format!("[{}]", theme_button)).alignment(Alignment::Right),
        theme_area,
    );
}

fn transcript_line(line: &TranscriptLine, theme: &Theme) -> Line<'static> {
    let sender_style = if line.is_from(Sender::You) {
        theme.user_style()
    } else if line.is_from(Sender::Bot) {
        theme.bot_style()
    } else {
        theme.muted_style()
    };

    Line::from(vec![
        Span::styled(format!("{}: ", line.sender), sender_style),
        Span::raw(line.message.clone()),
    ])
}

fn render_transcript(frame: &mut Frame, area: Rect, data: &RenderData) -> usize {
    let block = Block::default()
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(data.theme.border_style(false))
        .style(data.theme.transcript_style());

    let inner = block.inner(area);
    frame.render_widget(block, area);

    let padded_inner = Rect {
        x: inner.x + 1,
        y: inner.y,
        width: inner.width.saturating_sub(2),
        height: inner.height,
    };

    let lines: Vec<Line> = data
        .lines
        .iter()
        .map(|line| transcript_line(line, &data.theme))
        .collect();

    let paragraph = Paragraph::new(lines)
        .style(data.theme.transcript_style())
        .wrap(Wrap { trim: false });

    // Count rows with the widget's own word wrapping
    let visible_lines = padded_inner.height as usize;
    let total_lines = paragraph.line_count(padded_inner.width);
    let max_scroll = total_lines.saturating_sub(visible_lines);
    let scroll = if data.follow_tail {
        max_scroll
    } else {
        data.scroll_offset.min(max_scroll)
    };

    frame.render_widget(paragraph.scroll((scroll as u16, 0)), padded_inner);

    if total_lines > visible_lines {
        let indicator = format!(
            " [{}/{}] ",
            (scroll + visible_lines).min(total_lines),
            total_lines
        );
        let width = indicator.len() as u16;
        if area.width > width + 1 {
            let indicator_area = Rect {
                x: area.x + area.width - width - 1,
                y: area.y,
                width,
                height: 1,
            };
            frame.render_widget(
                Paragraph::new(indicator).style(data.theme.muted_style()),
                indicator_area,
            );
        }
    }

    max_scroll
}

fn render_bottom_bar(frame: &mut Frame, area: Rect, data: &RenderData) {
    frame.render_widget(Block::default().style(data.theme.bottom_bar_style()), area);

    let (clear_area, input_area, send_area) = bottom_bar_areas(area);

    let button = |label: String| {
        Paragraph::new(label)
            .alignment(Alignment::Center)
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .border_type(BorderType::Rounded)
                    .border_style(data.theme.border_style(false)),
            )
            .style(data.theme.bottom_bar_style())
    };

    let (clear_label, send_label) = if is_compact(area) {
        (Icons::TRASH.to_string(), Icons::SEND.to_string())
    } else {
        (
            format!("{} Clear Chat", Icons::TRASH),
            format!("{} Send", Icons::SEND),
        )
    };
    frame.render_widget(button(clear_label), clear_area);
    frame.render_widget(button(send_label), send_area);

    let block = Block::default()
        .borders(Borders::ALL)
        .border_type(BorderType::Thick)
        .border_style(data.theme.border_style(true));
    let inner = block.inner(input_area);
    frame.render_widget(block, input_area);

    let show_cursor = (data.tick_counter / 4) % 2 == 0;
    let input_line = if data.input_before_cursor.is_empty() && data.input_after_cursor.is_empty() {
        Line::from(vec![
            Span::raw(if show_cursor { "▌" } else { " " }),
            Span::styled("Type a message…", data.theme.muted_style()),
        ])
    } else {
        Line::from(vec![
            Span::raw(data.input_before_cursor.clone()),
            Span::styled(
                if show_cursor { "▎" } else { " " },
                data.theme.shortcut_key_style(),
            ),
            Span::raw(data.input_after_cursor.clone()),
        ])
    };

    // Keep the cursor visible once the text is wider than the field
    let cursor_column = Line::raw(data.input_before_cursor.clone()).width() + 1;
    let horizontal_scroll = cursor_column.saturating_sub(inner.width as usize);

    frame.render_widget(
        Paragraph::new(input_line).scroll((0, horizontal_scroll as u16)),
        inner,
    );
}

fn render_status_bar(frame: &mut Frame, area: Rect, data: &RenderData) {
    let shortcuts = [
        ("Enter", "send"),
        ("^S", "save pronoun"),
        ("^P/^N", "pronoun"),
        ("^T", "theme"),
        ("^L", "clear"),
        ("^Q", "quit"),
    ];

    let mut spans = Vec::new();
    for (key, desc) in shortcuts {
        spans.push(Span::styled(format!(" {}", key), data.theme.shortcut_key_style()));
        spans.push(Span::styled(format!(":{} ", desc), data.theme.shortcut_desc_style()));
    }

    if !data.store_available {
        let warning = match data.diagnostics_path {
            Some(ref path) => format!(" │ history not saved, see {}", path),
            None => " │ history not saved".to_string(),
        };
        spans.push(Span::styled(
            warning,
            data.theme.muted_style().add_modifier(Modifier::ITALIC),
        ));
    }

    frame.render_widget(
        Paragraph::new(Line::from(spans)).style(data.theme.base_style()),
        area,
    );
}

fn render_notice(frame: &mut Frame, area: Rect, notice: &str, data: &RenderData) {
    let modal_area = centered_rect(40, 20, area);
    frame.render_widget(Clear, modal_area);

    let block = Block::default()
        .borders(Borders::ALL)
        .border_type(BorderType::Double)
        .border_style(data.theme.border_style(true))
        .style(data.theme.base_style())
        .title(Span::styled(" Message ", data.theme.title_style()));

    let text = vec![
        Line::from(""),
        Line::from(Span::styled(notice.to_string(), data.theme.success_style())),
        Line::from(""),
        Line::from(Span::styled("Press Esc or Enter", data.theme.muted_style())),
    ];

    frame.render_widget(
        Paragraph::new(text)
            .alignment(Alignment::Center)
            .wrap(Wrap { trim: true })
            .block(block),
        modal_area,
    );
}

#[cfg(test)]
mod tests {
    use super::*;
    use ratatui::backend::TestBackend;
    use ratatui::Terminal;

    fn data_with(lines: Vec<TranscriptLine>) -> RenderData {
        RenderData {
            theme: Theme::light(),
            dark_mode: false,
            pronoun: Pronoun::TheyThem,
            saved_pronoun: None,
            lines,
            input_before_cursor: "draft".to_string(),
            input_after_cursor: String::new(),
            scroll_offset: 0,
            follow_tail: true,
            notice: None,
            store_available: true,
            diagnostics_path: None,
            tick_counter: 0,
        }
    }

    fn screen_text(terminal: &Terminal<TestBackend>) -> String {
        let buffer = terminal.backend().buffer();
        let area = buffer.area;
        let mut out = String::new();
        for y in 0..area.height {
            for x in 0..area.width {
                out.push_str(buffer[(x, y)].symbol());
            }
            out.push('\n');
        }
        out
    }

    #[test]
    fn test_renders_transcript_and_selector() {
        let mut terminal = Terminal::new(TestBackend::new(80, 20)).unwrap();
        let data = data_with(vec![
            TranscriptLine::new(Sender::You, "hello"),
            TranscriptLine::new(Sender::Bot, "Love that!"),
        ]);

        terminal.draw(|frame| { render_ui(frame, &data); }).unwrap();
        let text = screen_text(&terminal);

        assert!(text.contains("You: hello"));
        assert!(text.contains("Bot: Love that!"));
        assert!(text.contains("they/them"));
        assert!(text.contains("draft"));
    }

    #[test]
    fn test_renders_notice() {
        let mut terminal = Terminal::new(TestBackend::new(80, 20)).unwrap();
        let mut data = data_with(Vec::new());
        data.notice = Some("Pronoun saved!".to_string());

        terminal.draw(|frame| { render_ui(frame, &data); }).unwrap();
        assert!(screen_text(&terminal).contains("Pronoun saved!"));
    }

    #[test]
    fn test_follow_tail_shows_latest_line() {
        let mut terminal = Terminal::new(TestBackend::new(60, 12)).unwrap();
        let lines = (0..30)
            .map(|i| TranscriptLine::new(Sender::You, format!("line {}", i)))
            .collect();
        let data = data_with(lines);

        terminal.draw(|frame| { render_ui(frame, &data); }).unwrap();
        let text = screen_text(&terminal);
        assert!(text.contains("You: line 29"));
        assert!(!text.contains("line 0 "));
    }

    #[test]
    fn test_status_bar_warns_without_store() {
        let mut terminal = Terminal::new(TestBackend::new(120, 20)).unwrap();
        let mut data = data_with(Vec::new());
        data.store_available = false;
        data.diagnostics_path = Some("/tmp/pc.log".to_string());

        terminal.draw(|frame| { render_ui(frame, &data); }).unwrap();
        assert!(screen_text(&terminal).contains("history not saved, see /tmp/pc.log"));
    }

    #[test]
    fn test_follow_tail_counts_word_wrapped_rows() {
        let mut terminal = Terminal::new(TestBackend::new(40, 16)).unwrap();
        let long = format!("{} {} {}", "a".repeat(20), "b".repeat(20), "c".repeat(20));
        let mut lines: Vec<TranscriptLine> = (0..12)
            .map(|_| TranscriptLine::new(Sender::Bot, long.clone()))
            .collect();
        lines.push(TranscriptLine::new(Sender::You, "NEWEST"));
        let data = data_with(lines);

        let mut max_scroll = 0;
        terminal.draw(|frame| { max_scroll = render_ui(frame, &data); }).unwrap();
        let text = screen_text(&terminal);

        assert!(text.contains("You: NEWEST"));
        // Each long line takes three rows at this width
        assert_eq!(max_scroll, 12 * 3 + 1 - 7);
    }

    #[test]
    fn test_narrow_screen_keeps_labels_apart() {
        let mut terminal = Terminal::new(TestBackend::new(40, 16)).unwrap();
        let data = data_with(Vec::new());

        terminal.draw(|frame| { render_ui(frame, &data); }).unwrap();
        let text = screen_text(&terminal);

        assert!(text.contains("Save]"));
        assert!(!text.contains("Save Pronoun"));
        assert!(text.contains("[🌙"));
        assert!(!text.contains("[["));
    }

    #[test]
    fn test_narrow_screen_shows_placeholder() {
        let mut terminal = Terminal::new(TestBackend::new(40, 16)).unwrap();
        let mut data = data_with(Vec::new());
        data.input_before_cursor.clear();

        terminal.draw(|frame| { render_ui(frame, &data); }).unwrap();
        assert!(screen_text(&terminal).contains("Type a message…"));
    }
}
