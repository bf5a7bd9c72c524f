// Header widget: title, beta warning, market rule and deadline notice.

use ratatui::layout::Rect;
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Paragraph, Wrap};
use ratatui::Frame;

use crate::tui::ViewState;

const TITLE: &str = " Futebol ⚽ Palpites ";
const INTRO: &str = "Palpite nos jogos! Veja o histórico dos times e torne-se o craque das previsões.";
const BETA_WARNING: &str = "Este é um protótipo beta. Anote suas escolhas em caso de falha.";
const MARKET_RULE: &str = "Escolha Resultado OU Dupla Chance (não os dois) + Gols.";

pub fn render(frame: &mut Frame, area: Rect, state: &ViewState) {
    let paragraph = Paragraph::new(header_lines(state.display.deadline_notice.as_deref()))
        .wrap(Wrap { trim: true })
        .block(
            Block::default().borders(Borders::ALL).title(Span::styled(
                TITLE,
                Style::default()
                    .fg(Color::Green)
                    .add_modifier(Modifier::BOLD),
            )),
        );
    frame.render_widget(paragraph, area);
}

/// Header text, one line per notice. The deadline line is omitted when no
/// notice is configured.
pub fn header_lines(deadline_notice: Option<&str>) -> Vec<Line<'_>> {
    let mut lines = vec![
        Line::from(Span::raw(INTRO)),
        Line::from(vec![
            Span::styled(
                "Atenção: ",
                Style::default()
                    .fg(Color::Yellow)
                    .add_modifier(Modifier::BOLD),
            ),
            Span::styled(BETA_WARNING, Style::default().fg(Color::Yellow)),
        ]),
        Line::from(Span::styled(MARKET_RULE, Style::default().fg(Color::Gray))),
    ];
    if let Some(notice) = deadline_notice {
        lines.push(Line::from(Span::styled(
            notice,
            Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
        )));
    }
    lines
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn deadline_line_is_optional() {
        assert_eq!(header_lines(None).len(), 3);
        let lines = header_lines(Some("Envie até as 15h do dia 01/11."));
        assert_eq!(lines.len(), 4);
        assert_eq!(lines[3].to_string(), "Envie até as 15h do dia 01/11.");
    }

    #[test]
    fn warning_line_mentions_beta() {
        let lines = header_lines(None);
        assert!(lines[1].to_string().contains("beta"));
    }

    #[test]
    fn render_does_not_panic() {
        let backend = ratatui::backend::TestBackend::new(100, 6);
        let mut terminal = ratatui::Terminal::new(backend).unwrap();
        let mut state = ViewState::default();
        state.display.deadline_notice = Some("BOA SORTE!".into());
        terminal
            .draw(|frame| render(frame, frame.area(), &state))
            .unwrap();
    }
}
