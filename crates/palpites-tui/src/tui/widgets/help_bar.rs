// Help bar widget: keyboard hints for the current mode.

use ratatui::layout::Rect;
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;
use ratatui::Frame;

use crate::tui::ViewState;

pub fn render(frame: &mut Frame, area: Rect, state: &ViewState) {
    let paragraph = Paragraph::new(Line::from(Span::styled(
        help_text(state),
        Style::default()
            .fg(Color::White)
            .add_modifier(Modifier::DIM),
    )))
    .style(Style::default().bg(Color::DarkGray));
    frame.render_widget(paragraph, area);
}

pub fn help_text(state: &ViewState) -> &'static str {
    if state.confirm_quit {
        " y:Sair | n/Esc:Cancelar"
    } else if state.name_edit {
        " Digite seu nome | Enter/Esc:Concluir"
    } else {
        " j/k:Jogo | h/l/Tab:Mercado | Espaço/←/→:Escolher | x:Limpar | n:Nome | s:Enviar | q:Sair"
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
