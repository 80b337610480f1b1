//! Screen layout: top bar, transcript, bottom bar

use ratatui::layout::{Constraint, Direction, Layout, Rect};

/// The three bands of the chat screen
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LayoutAreas {
    pub top_bar: Rect,
    pub transcript: Rect,
    pub bottom_bar: Rect,
    pub status: Rect,
}

/// Split the screen into top bar, transcript, bottom bar and a one-line status
pub fn create_areas(area: Rect) -> LayoutAreas {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Pronoun selector, save, theme
            Constraint::Min(3),    // Transcript
            Constraint::Length(3), // Clear, input, send
            Constraint::Length(1), // Shortcuts
        ])
        .split(area);

    LayoutAreas {
        top_bar: chunks[0],
        transcript: chunks[1],
        bottom_bar: chunks[2],
        status: chunks[3],
    }
}

/// Below this width the bars drop their text labels
pub const COMPACT_WIDTH: u16 = 72;

pub fn is_compact(area: Rect) -> bool {
    area.width < COMPACT_WIDTH
}

/// Split the top bar into the selector strip and the theme button
pub fn top_bar_areas(area: Rect) -> (Rect, Rect) {
    let chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Min(0), Constraint::Length(6)])
        .split(area);

    (chunks[0], chunks[1])
}

/// Split the bottom bar into clear button, input field and send button
pub fn bottom_bar_areas(area: Rect) -> (Rect, Rect, Rect) {
    let (clear, send) = if is_compact(area) { (6, 6) } else { (16, 11) };
    let chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Length(clear),
            Constraint::Min(10),
            Constraint::Length(send),
        ])
        .split(area);

    (chunks[0], chunks[1], chunks[2])
}

/// Helper to create a centered rect
pub fn centered_rect(percent_x: u16, percent_y: u16, area: Rect) -> Rect {
    let popup_layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage((100 - percent_y) / 2),
            Constraint::Percentage(percent_y),
            Constraint::Percentage((100 - percent_y) / 2),
        ])
        .split(area);

    Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage((100 - percent_x) / 2),
            Constraint::Percentage(percent_x),
            Constraint::Percentage((100 - percent_x) / 2),
        ])
        .split(popup_layout[1])[1]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_areas_cover_screen() {
        let area = Rect::new(0, 0, 80, 24);
        let areas = create_areas(area);
        assert_eq!(areas.top_bar.height, 3);
        assert_eq!(areas.bottom_bar.height, 3);
        assert_eq!(areas.status.height, 1);
        assert_eq!(areas.transcript.height, 24 - 7);
    }

    #[test]
    fn test_narrow_bottom_bar_favors_input() {
        let (clear, input, send) = bottom_bar_areas(Rect::new(0, 0, 40, 3));
        assert_eq!(clear.width + send.width, 12);
        assert_eq!(input.width, 28);

        let (_, input, _) = bottom_bar_areas(Rect::new(0, 0, 100, 3));
        assert_eq!(input.width, 100 - 27);
    }

    #[test]
    fn test_theme_button_has_own_area() {
        let (selector, button) = top_bar_areas(Rect::new(1, 1, 38, 1));
        assert_eq!(button.width, 6);
        assert_eq!(selector.right(), button.left());
    }

    #[test]
    fn test_centered_rect_is_inside() {
        let area = Rect::new(0, 0, 100, 50);
        let popup = centered_rect(40, 20, area);
        assert!(popup.x > 0 && popup.y > 0);
        assert!(popup.right() < area.right());
        assert!(popup.bottom() < area.bottom());
    }
}
