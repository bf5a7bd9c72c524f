// History widget: recent matches of both teams of the selected match.
//
// Per team: "{team} Últimos Jogos:" then one row per entry:
//   "V  26/10  2 x 1 Santos (C)"
// The V/E/D marker is green/yellow/red; an unknown result shows a gray "?".

use ratatui::layout::Rect;
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Paragraph, Wrap};
use ratatui::Frame;

use palpites_core::fixture::Fixture;
use palpites_core::history::{format_date, parse_score_line, HistoryEntry, HistoryResult};

use crate::tui::ViewState;

pub const NO_HISTORY: &str = "Sem dados de histórico recente.";

pub fn render(frame: &mut Frame, area: Rect, state: &ViewState) {
    let block = Block::default().borders(Borders::ALL).title("Histórico");
    let lines = match state.selected_fixture() {
        Some(fixture) => history_lines(fixture, state.display.short_dates),
        None => vec![Line::from(Span::styled(
            "  Selecione um jogo.",
            Style::default().fg(Color::DarkGray),
        ))],
    };
    let paragraph = Paragraph::new(lines).wrap(Wrap { trim: false }).block(block);
    frame.render_widget(paragraph, area);
}

pub fn history_lines(fixture: &Fixture, short_dates: bool) -> Vec<Line<'static>> {
    let mut lines = Vec::new();
    for team in [&fixture.teams.0, &fixture.teams.1] {
        lines.push(Line::from(Span::styled(
            format!("{} Últimos Jogos:", team.name),
            Style::default().add_modifier(Modifier::BOLD),
        )));
        let entries = fixture.history_for(&team.name);
        if entries.is_empty() {
            lines.push(Line::from(Span::styled(
                format!("  {NO_HISTORY}"),
                Style::default().fg(Color::DarkGray),
            )));
        }
        for entry in entries {
            lines.push(Line::from(entry_spans(entry, short_dates)));
        }
    }
    lines
}

pub fn entry_spans(entry: &HistoryEntry, short_dates: bool) -> Vec<Span<'static>> {
    let score = parse_score_line(&entry.score);
    let score_text = match (score.goals_for, score.goals_against) {
        (Some(gf), Some(ga)) => format!("{gf} x {ga} {}", score.opponent),
        _ => score.opponent,
    };
    let mut spans = vec![
        Span::styled(
            format!("  {} ", entry.result.marker()),
            Style::default()
                .fg(result_color(entry.result))
                .add_modifier(Modifier::BOLD),
        ),
        Span::styled(
            format!("{:<8}", format_date(&entry.date, short_dates)),
            Style::default().fg(Color::Gray),
        ),
        Span::raw(score_text),
    ];
    if let Some(venue) = entry.venue {
        spans.push(Span::styled(
            format!(" {}", venue.tag()),
            Style::default().fg(Color::DarkGray),
        ));
    }
    spans
}

pub fn result_color(result: HistoryResult) -> Color {
    match result {
        HistoryResult::Win => Color::Green,
        HistoryResult::Draw => Color::Yellow,
        HistoryResult::Loss => Color::Red,
        HistoryResult::Unknown => Color::Gray,
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tui::sample_view_state;

    fn text(spans: &[Span]) -> String {
        spans.iter().map(|s| s.content.as_ref()).collect()
    }

    #[test]
    fn result_colors() {
        assert_eq!(result_color(HistoryResult::Win), Color::Green);
        assert_eq!(result_color(HistoryResult::Draw), Color::Yellow);
        assert_eq!(result_color(HistoryResult::Loss), Color::Red);
        assert_eq!(result_color(HistoryResult::Unknown), Color::Gray);
    }

    #[test]
    fn entry_with_unknown_result_still_renders() {
        let entry = HistoryEntry {
            result: HistoryResult::Unknown,
            score: "1 x 1 Bahia".into(),
            date: String::new(),
            venue: None,
        };
        assert_eq!(text(&entry_spans(&entry, true)), "  ?         1 x 1 Bahia");
    }

    #[test]
    fn entry_with_iso_date_and_venue() {
        let state = sample_view_state();
        let fixture = state.selected_fixture().unwrap();
        let entry = &fixture.history_for("Flamengo")[0];
        assert_eq!(text(&entry_spans(entry, true)), "  V 26/10   2 x 1 Santos (C)");
        assert!(text(&entry_spans(entry, false)).contains("dom, 26/10/2025"));
    }

    #[test]
    fn unparsed_score_is_shown_verbatim() {
        let state = sample_view_state();
        let fixture = state.selected_fixture().unwrap();
        let entry = &fixture.history_for("Flamengo")[1];
        assert_eq!(text(&entry_spans(entry, true)), "  D 19/10   WO");
    }

    #[test]
    fn missing_history_shows_placeholder() {
        let state = sample_view_state();
        let lines = history_lines(state.selected_fixture().unwrap(), true);
        let rendered: Vec<String> = lines.iter().map(|l| l.to_string()).collect();
        assert_eq!(rendered[0], "Flamengo Últimos Jogos:");
        assert_eq!(rendered[3], "Palmeiras Últimos Jogos:");
        assert_eq!(rendered[4], format!("  {NO_HISTORY}"));
        assert_eq!(rendered.len(), 5);
    }

    #[test]
    fn render_does_not_panic() {
        let backend = ratatui::backend::TestBackend::new(50, 12);
        let mut terminal = ratatui::Terminal::new(backend).unwrap();
        let state = sample_view_state();
        terminal
            .draw(|frame| render(frame, frame.area(), &state))
            .unwrap();

        let empty = ViewState::default();
        terminal
            .draw(|frame| render(frame, frame.area(), &empty))
            .unwrap();
    }
}
