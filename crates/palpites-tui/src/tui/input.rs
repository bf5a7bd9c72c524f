// Keyboard input handling and command dispatch.
//
// Translates crossterm key events into UserCommand messages for the app loop,
// or into local ViewState changes (cursor, focus, modes).

use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

use palpites_app::protocol::UserCommand;
use palpites_core::market::{DoubleChance, Field, FinalResult, GoalsLine, PickUpdate};
use palpites_core::selection::Selection;

use super::ViewState;

/// Direction of a change to the focused market.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Step {
    Forward,
    Back,
    Clear,
}

/// Handle a keyboard event.
///
/// Returns `Some(UserCommand)` when the key press should be forwarded to the
/// app loop. Pick changes are also applied to the local store right away so
/// repeated presses cycle from the value on screen.
pub fn handle_key(key_event: KeyEvent, view_state: &mut ViewState) -> Option<UserCommand> {
    // Windows reports both Press and Release; only act on Press.
    if key_event.kind != KeyEventKind::Press {
        return None;
    }

    // Ctrl+C quits from any mode
    if key_event.modifiers.contains(KeyModifiers::CONTROL) && key_event.code == KeyCode::Char('c')
    {
        return Some(UserCommand::Quit);
    }

    if view_state.confirm_quit {
        return handle_confirm_quit(key_event, view_state);
    }

    if view_state.name_edit {
        return handle_name_edit(key_event, view_state);
    }

    match key_event.code {
        // Match cursor
        KeyCode::Down | KeyCode::Char('j') => {
            move_cursor(view_state, 1);
            None
        }
        KeyCode::Up | KeyCode::Char('k') => {
            move_cursor(view_state, -1);
            None
        }
        KeyCode::PageDown => {
            move_cursor(view_state, 5);
            None
        }
        KeyCode::PageUp => {
            move_cursor(view_state, -5);
            None
        }
        KeyCode::Home => {
            view_state.cursor = 0;
            None
        }
        KeyCode::End => {
            view_state.cursor = view_state.matches.len().saturating_sub(1);
            None
        }

        // Market focus
        KeyCode::Tab | KeyCode::Char('l') => {
            move_focus(view_state, 1);
            None
        }
        KeyCode::BackTab | KeyCode::Char('h') => {
            move_focus(view_state, -1);
            None
        }

        // Pick changes
        KeyCode::Char(' ') | KeyCode::Enter | KeyCode::Right => pick(view_state, Step::Forward),
        KeyCode::Left => pick(view_state, Step::Back),
        KeyCode::Char('x') | KeyCode::Backspace | KeyCode::Delete => {
            pick(view_state, Step::Clear)
        }

        KeyCode::Char('n') => {
            view_state.name_edit = true;
            None
        }
        KeyCode::Char('s') => Some(UserCommand::Submit),

        // Quit: enter confirmation mode instead of quitting immediately
        KeyCode::Char('q') => {
            view_state.confirm_quit = true;
            None
        }

        _ => None,
    }
}

/// In quit confirmation mode `y`/`q` confirm, `n`/`Esc` cancel, and
/// everything else is blocked.
fn handle_confirm_quit(key_event: KeyEvent, view_state: &mut ViewState) -> Option<UserCommand> {
    match key_event.code {
        KeyCode::Char('y') | KeyCode::Char('Y') | KeyCode::Char('q') | KeyCode::Char('Q') => {
            Some(UserCommand::Quit)
        }
        KeyCode::Char('n') | KeyCode::Char('N') | KeyCode::Esc => {
            view_state.confirm_quit = false;
            None
        }
        _ => None,
    }
}

/// Name editing: every change is sent to the app loop; Enter or Esc leave
/// the field and keep the text.
fn handle_name_edit(key_event: KeyEvent, view_state: &mut ViewState) -> Option<UserCommand> {
    match key_event.code {
        KeyCode::Enter | KeyCode::Esc => {
            view_state.name_edit = false;
            None
        }
        KeyCode::Backspace => {
            view_state.name.pop()?;
            Some(UserCommand::SetName(view_state.name.clone()))
        }
        KeyCode::Char(c) => {
            view_state.name.push(c);
            Some(UserCommand::SetName(view_state.name.clone()))
        }
        _ => None,
    }
}

fn move_cursor(view_state: &mut ViewState, delta: isize) {
    let last = view_state.matches.len().saturating_sub(1);
    let next = view_state.cursor.saturating_add_signed(delta);
    view_state.cursor = next.min(last);
}

fn move_focus(view_state: &mut ViewState, delta: isize) {
    let len = Field::ALL.len() as isize;
    let idx = Field::ALL
        .iter()
        .position(|f| *f == view_state.focus)
        .unwrap_or(0) as isize;
    view_state.focus = Field::ALL[(idx + delta).rem_euclid(len) as usize];
}

/// Change the focused market of the selected match.
fn pick(view_state: &mut ViewState, step: Step) -> Option<UserCommand> {
    let match_ref = view_state.selected_match()?.clone();
    let update = next_update(
        view_state.focus,
        view_state.selection_for(&match_ref),
        step,
    );
    view_state.selections = view_state.selections.update(&match_ref, update);
    view_state.picks_sent += 1;
    Some(UserCommand::UpdatePick { match_ref, update })
}

fn next_update(field: Field, selection: Option<&Selection>, step: Step) -> PickUpdate {
    let forward = match step {
        Step::Clear => return PickUpdate::clear(field),
        Step::Forward => true,
        Step::Back => false,
    };
    match field {
        Field::FinalResult => PickUpdate::FinalResult(cycle(
            &FinalResult::OPTIONS,
            selection.and_then(|s| s.final_result),
            forward,
        )),
        Field::DoubleChance => PickUpdate::DoubleChance(cycle(
            &DoubleChance::OPTIONS,
            selection.and_then(|s| s.double_chance),
            forward,
        )),
        Field::GoalsLine => PickUpdate::GoalsLine(cycle(
            &GoalsLine::options(),
            selection.and_then(|s| s.goals_line),
            forward,
        )),
    }
}

/// Step through `options` with the empty choice sitting between the last
/// and the first option.
fn cycle<T: Copy + PartialEq>(options: &[T], current: Option<T>, forward: bool) -> Option<T> {
    let idx = current.and_then(|c| options.iter().position(|o| *o == c));
    match (idx, forward) {
        (None, true) => options.first().copied(),
        (None, false) => options.last().copied(),
        (Some(i), true) => options.get(i + 1).copied(),
        (Some(0), false) => None,
        (Some(i), false) => options.get(i - 1).copied(),
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
