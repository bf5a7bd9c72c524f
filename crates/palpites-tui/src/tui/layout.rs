// Screen layout: panel arrangement and sizing.
//
// +--------------------------------------------------+
// | Header (6 rows)                                   |
// +-------------------------+------------------------+
// | Matches (60%)            | Sidebar (40%)          |
// |                          | +- History (55%) -----+|
// |                          | +- Summary (45%) -----+|
// +-------------------------+------------------------+
// | Status Bar (1 row)                                |
// | Help Bar (1 row)                                  |
// +--------------------------------------------------+

use ratatui::layout::{Constraint, Direction, Layout, Rect};

/// Resolved screen areas for each zone.
#[derive(Debug, Clone)]
pub struct AppLayout {
    /// Title, beta warning, market rule and deadline notice.
    pub header: Rect,
    /// Match list grouped by day, with the picks of each match.
    pub matches: Rect,
    /// Recent matches of both teams of the selected match.
    pub history: Rect,
    /// Running "Meus Palpites" summary.
    pub summary: Rect,
    /// Submitter name and submission status.
    pub status_bar: Rect,
    /// Keyboard shortcut hints.
    pub help_bar: Rect,
}

pub fn build_layout(area: Rect) -> AppLayout {
    // Vertical: header(6) | middle(fill) | status(1) | help(1)
    let vertical = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(6), // header
            Constraint::Min(8),    // middle section (matches + sidebar)
            Constraint::Length(1), // status bar
            Constraint::Length(1), // help bar
        ])
        .split(area);

    let header = vertical[0];
    let middle = vertical[1];
    let status_bar = vertical[2];
    let help_bar = vertical[3];

    let horizontal = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(60), Constraint::Percentage(40)])
        .split(middle);

    let matches = horizontal[0];
    let sidebar = horizontal[1];

    let sidebar_sections = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Percentage(55), Constraint::Percentage(45)])
        .split(sidebar);

    AppLayout {
        header,
        matches,
        history: sidebar_sections[0],
        summary: sidebar_sections[1],
        status_bar,
        help_bar,
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    fn test_area() -> Rect {
        Rect::new(0, 0, 140, 45)
    }

    fn all_rects(layout: &AppLayout) -> [(&'static str, Rect); 6] {
        [
            ("header", layout.header),
            ("matches", layout.matches),
            ("history", layout.history),
            ("summary", layout.summary),
            ("status_bar", layout.status_bar),
            ("help_bar", layout.help_bar),
        ]
    }

    #[test]
    fn layout_all_rects_nonzero() {
        let layout = build_layout(test_area());
        for (name, rect) in all_rects(&layout) {
            assert!(
                rect.width > 0 && rect.height > 0,
                "{} has zero area: {:?}",
                name,
                rect
            );
        }
    }

    #[test]
    fn layout_bars_are_one_row() {
        let layout = build_layout(test_area());
        assert_eq!(layout.status_bar.height, 1);
        assert_eq!(layout.help_bar.height, 1);
        assert!(layout.status_bar.y < layout.help_bar.y);
    }

    #[test]
    fn layout_matches_wider_than_sidebar() {
        let layout = build_layout(test_area());
        assert!(
            layout.matches.width > layout.history.width,
            "Matches ({}) should be wider than sidebar ({})",
            layout.matches.width,
            layout.history.width
        );
        assert_eq!(layout.history.width, layout.summary.width);
        assert!(layout.history.y < layout.summary.y);
    }

    #[test]
    fn layout_fits_within_area() {
        let area = test_area();
        let layout = build_layout(area);
        for (name, rect) in all_rects(&layout) {
            assert!(rect.x + rect.width <= area.width, "{} exceeds width", name);
            assert!(rect.y + rect.height <= area.height, "{} exceeds height", name);
        }
    }

    #[test]
    fn layout_small_terminal_still_valid() {
        let layout = build_layout(Rect::new(0, 0, 40, 18));
        for (name, rect) in all_rects(&layout) {
            assert!(
                rect.width > 0 && rect.height > 0,
                "Small terminal: {} has zero area",
                name
            );
        }
    }
}
