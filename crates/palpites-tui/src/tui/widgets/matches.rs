// Matches widget: the form itself.
//
// One heading per day, then one row per match:
//   "16:00  Flamengo (1º) x Palmeiras (2º)   Resultado [1]  Dupla [--]  Gols [Mais de 2.5]"
// The selected row is highlighted and its focused market is reversed.

use ratatui::layout::{Margin, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Paragraph, Scrollbar, ScrollbarOrientation, ScrollbarState};
use ratatui::Frame;

use palpites_core::market::Field;
use palpites_core::selection::Selection;

use crate::tui::ViewState;

/// Placeholder for a market with no pick.
pub const EMPTY_CHOICE: &str = "--";

pub fn render(frame: &mut Frame, area: Rect, state: &ViewState) {
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Cyan))
        .title(format!("Jogos ({})", state.matches.len()));

    if state.matches.is_empty() {
        let paragraph = Paragraph::new("  Nenhum jogo disponível.")
            .style(Style::default().fg(Color::DarkGray))
            .block(block);
        frame.render_widget(paragraph, area);
        return;
    }

    let (lines, cursor_line) = match_lines(state);
    let total = lines.len();
    let visible_rows = (area.height as usize).saturating_sub(2);
    let offset = scroll_offset(cursor_line, visible_rows, total);

    let paragraph = Paragraph::new(lines)
        .block(block)
        .scroll((offset as u16, 0));
    frame.render_widget(paragraph, area);

    if total > visible_rows {
        let mut scrollbar_state =
            ScrollbarState::new(total.saturating_sub(visible_rows)).position(offset);
        frame.render_stateful_widget(
            Scrollbar::new(ScrollbarOrientation::VerticalRight),
            area.inner(Margin {
                vertical: 1,
                horizontal: 0,
            }),
            &mut scrollbar_state,
        );
    }
}

/// All rows of the list plus the index of the selected match's row.
pub fn match_lines(state: &ViewState) -> (Vec<Line<'static>>, usize) {
    let mut lines = Vec::new();
    let mut cursor_line = 0;
    let mut idx = 0;

    for day in &state.fixtures.days {
        lines.push(Line::from(Span::styled(
            day.label.clone(),
            Style::default()
                .fg(Color::Yellow)
                .add_modifier(Modifier::BOLD),
        )));
        for fixture in &day.matches {
            let selected = idx == state.cursor;
            if selected {
                cursor_line = lines.len();
            }
            let match_ref = fixture.match_ref(&day.label);
            let selection = state.selection_for(&match_ref);

            let row_style = if selected {
                Style::default().bg(Color::DarkGray)
            } else {
                Style::default()
            };
            let marker = if selected { "▶ " } else { "  " };
            let mut spans = vec![
                Span::styled(format!("{marker}{}  ", fixture.time), row_style),
                Span::styled(
                    format!(
                        "{} x {}",
                        fixture.teams.0.display_name(),
                        fixture.teams.1.display_name()
                    ),
                    row_style.add_modifier(Modifier::BOLD),
                ),
            ];
            for field in Field::ALL {
                let focused = selected && field == state.focus;
                spans.extend(market_spans(field, selection, focused, row_style));
            }
            lines.push(Line::from(spans));
            idx += 1;
        }
    }

    (lines, cursor_line)
}

/// Label and bracketed value of one market.
pub fn market_spans(
    field: Field,
    selection: Option<&Selection>,
    focused: bool,
    row_style: Style,
) -> Vec<Span<'static>> {
    let value = selection
        .and_then(|s| s.value_of(field))
        .unwrap_or_else(|| EMPTY_CHOICE.to_string());
    let value_style = if focused {
        Style::default()
            .fg(Color::Black)
            .bg(Color::Cyan)
            .add_modifier(Modifier::BOLD)
    } else if value == EMPTY_CHOICE {
        row_style.fg(Color::DarkGray)
    } else {
        row_style.fg(Color::Green)
    };
    vec![
        Span::styled(format!("   {} ", field.label()), row_style.fg(Color::Gray)),
        Span::styled(format!("[{value}]"), value_style),
    ]
}

/// Smallest scroll offset that keeps `cursor_line` visible, also showing the
/// day heading above the first match.
pub fn scroll_offset(cursor_line: usize, visible_rows: usize, total: usize) -> usize {
    if visible_rows == 0 {
        return 0;
    }
    let max_offset = total.saturating_sub(visible_rows);
    let wanted = (cursor_line + 1).saturating_sub(visible_rows);
    let wanted = if cursor_line <= 1 { 0 } else { wanted };
    wanted.min(max_offset)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tui::sample_view_state;
    use palpites_core::market::{DoubleChance, PickUpdate};

    #[test]
    fn lines_group_matches_under_days() {
        let state = sample_view_state();
        let (lines, cursor_line) = match_lines(&state);
        let text: Vec<String> = lines.iter().map(|l| l.to_string()).collect();
        assert_eq!(text.len(), 5);
        assert_eq!(text[0], "Sábado 01/11");
        assert!(text[1].contains("16:00  Flamengo (1º) x Palmeiras (2º)"));
        assert!(text[2].contains("Botafogo x Fortaleza"));
        assert_eq!(text[3], "Domingo 02/11");
        assert!(text[4].contains("Grêmio x Internacional"));
        assert_eq!(cursor_line, 1);
    }

    #[test]
    fn cursor_line_skips_day_headings() {
        let mut state = sample_view_state();
        state.cursor = 2;
        let (lines, cursor_line) = match_lines(&state);
        assert_eq!(cursor_line, 4);
        assert!(lines[4].to_string().starts_with("▶ 11:00"));
    }

    #[test]
    fn row_shows_current_picks() {
        let mut state = sample_view_state();
        let match_ref = state.matches[1].clone();
        state.selections = state.selections.update(
            &match_ref,
            PickUpdate::DoubleChance(Some(DoubleChance::DrawOrAway)),
        );
        let (lines, _) = match_lines(&state);
        let row = lines[2].to_string();
        assert!(row.contains("Resultado [--]"), "row: {row}");
        assert!(row.contains("Dupla [X2]"), "row: {row}");
        assert!(row.contains("Gols [--]"), "row: {row}");
    }

    #[test]
    fn focused_market_is_highlighted() {
        let spans = market_spans(Field::FinalResult, None, true, Style::default());
        assert_eq!(spans[1].content, "[--]");
        assert_eq!(spans[1].style.bg, Some(Color::Cyan));
    }

    #[test]
    fn scroll_offset_keeps_cursor_visible() {
        assert_eq!(scroll_offset(1, 10, 30), 0);
        assert_eq!(scroll_offset(9, 10, 30), 0);
        assert_eq!(scroll_offset(10, 10, 30), 1);
        assert_eq!(scroll_offset(29, 10, 30), 20);
        assert_eq!(scroll_offset(5, 0, 30), 0);
    }

    #[test]
    fn render_does_not_panic() {
        let backend = ratatui::backend::TestBackend::new(90, 6);
        let mut terminal = ratatui::Terminal::new(backend).unwrap();
        let mut state = sample_view_state();
        state.cursor = 2;
        terminal
            .draw(|frame| render(frame, frame.area(), &state))
            .unwrap();
    }

    #[test]
    fn render_empty_does_not_panic() {
        let backend = ratatui::backend::TestBackend::new(60, 10);
        let mut terminal = ratatui::Terminal::new(backend).unwrap();
        let state = ViewState::default();
        terminal
            .draw(|frame| render(frame, frame.area(), &state))
            .unwrap();
    }
}
