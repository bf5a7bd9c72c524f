// Status bar widget: submitter name and submission status.
//
// Layout: [Nome: {name}] | [status message]

use ratatui::layout::Rect;
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;
use ratatui::Frame;

use palpites_core::submission::SubmissionStatus;

use crate::tui::ViewState;

pub fn render(frame: &mut Frame, area: Rect, state: &ViewState) {
    let mut spans = vec![Span::styled(" Nome: ", Style::default().fg(Color::Gray))];

    spans.push(name_span(&state.name, state.name_edit));
    spans.push(Span::styled(" | ", Style::default().fg(Color::Gray)));

    let (message, color) = status_message(&state.status);
    spans.push(Span::styled(message, Style::default().fg(color)));

    let paragraph = Paragraph::new(Line::from(spans)).style(Style::default().bg(Color::Black));
    frame.render_widget(paragraph, area);
}

/// The name field: placeholder when empty, a trailing cursor while editing.
pub fn name_span(name: &str, editing: bool) -> Span<'static> {
    if editing {
        return Span::styled(
            format!("{name}_"),
            Style::default()
                .fg(Color::Black)
                .bg(Color::White)
                .add_modifier(Modifier::BOLD),
        );
    }
    if name.trim().is_empty() {
        Span::styled(
            "Seu primeiro nome (n)",
            Style::default()
                .fg(Color::DarkGray)
                .add_modifier(Modifier::ITALIC),
        )
    } else {
        Span::styled(
            name.to_string(),
            Style::default()
                .fg(Color::White)
                .add_modifier(Modifier::BOLD),
        )
    }
}

/// Status text and its color.
pub fn status_message(status: &SubmissionStatus) -> (String, Color) {
    match status {
        SubmissionStatus::Idle => (
            "Escolha seus palpites e pressione s para enviar.".to_string(),
            Color::White,
        ),
        SubmissionStatus::Sending => ("Enviando palpites...".to_string(), Color::Yellow),
        SubmissionStatus::Success => ("✅ Palpites enviados com sucesso!".to_string(), Color::Green),
        SubmissionStatus::Error(err) => (err.user_message(), Color::Red),
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
