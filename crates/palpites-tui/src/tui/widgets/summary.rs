// "Meus Palpites" widget: running summary of every match with a pick.

use ratatui::layout::Rect;
use ratatui::style::{Color, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, List, ListItem, Paragraph};
use ratatui::Frame;

use palpites_core::submission::summary_line;

use crate::tui::ViewState;

pub fn render(frame: &mut Frame, area: Rect, state: &ViewState) {
    let lines = summary_lines(state);
    let title = format!("Meus Palpites ({})", lines.len());
    let block = Block::default().borders(Borders::ALL).title(title);

    if lines.is_empty() {
        let paragraph = Paragraph::new("  Nenhum palpite ainda.")
            .style(Style::default().fg(Color::DarkGray))
            .block(block);
        frame.render_widget(paragraph, area);
        return;
    }

    let items: Vec<ListItem> = lines
        .into_iter()
        .map(|text| ListItem::new(Line::from(Span::styled(text, Style::default().fg(Color::White)))))
        .collect();
    frame.render_widget(List::new(items).block(block), area);
}

/// Summary lines in first-interaction order; matches whose picks were all
/// cleared are left out.
pub fn summary_lines(state: &ViewState) -> Vec<String> {
    state
        .selections
        .active()
        .filter_map(summary_line)
        .collect()
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tui::sample_view_state;
    use palpites_core::market::{FinalResult, GoalsLine, PickUpdate, Threshold};

    #[test]
    fn summary_follows_interaction_order_and_skips_inert() {
        let mut state = sample_view_state();
        let (a, b, c) = (
            state.matches[0].clone(),
            state.matches[1].clone(),
            state.matches[2].clone(),
        );
        state.selections = state
            .selections
            .update(&c, PickUpdate::GoalsLine(Some(GoalsLine::under(Threshold::OneAndHalf))))
            .update(&b, PickUpdate::FinalResult(Some(FinalResult::Draw)))
            .update(&b, PickUpdate::FinalResult(None))
            .update(&a, PickUpdate::FinalResult(Some(FinalResult::Home)));

        assert_eq!(
            summary_lines(&state),
            vec![
                "Domingo 02/11 11:00 - Grêmio x Internacional: Gols: Menos de 1.5",
                "Sábado 01/11 16:00 - Flamengo x Palmeiras: Resultado: 1",
            ]
        );
    }

    #[test]
    fn render_does_not_panic() {
        let backend = ratatui::backend::TestBackend::new(60, 8);
        let mut terminal = ratatui::Terminal::new(backend).unwrap();
        let mut state = sample_view_state();
        terminal
            .draw(|frame| render(frame, frame.area(), &state))
            .unwrap();

        let first = state.matches[0].clone();
        state.selections = state
            .selections
            .update(&first, PickUpdate::FinalResult(Some(FinalResult::Away)));
        terminal
            .draw(|frame| render(frame, frame.area(), &state))
            .unwrap();
    }
}
