// Terminal form: layout, input handling, and widget rendering.
//
// The TUI owns a `ViewState` holding the fixtures, the cursor and a mirror of
// the session state. The app loop pushes `UiUpdate` messages over an mpsc
// channel; the TUI applies them to `ViewState` and re-renders at ~30 fps.

pub mod input;
pub mod layout;
pub mod widgets;

use std::time::Duration;

use crossterm::event::{Event, EventStream};
use futures_util::StreamExt;
use ratatui::Frame;
use tokio::sync::mpsc;
use tracing::{info, warn};

use palpites_app::protocol::{AppSnapshot, UiUpdate, UserCommand};
use palpites_core::config::DisplayConfig;
use palpites_core::fixture::{Fixture, Fixtures};
use palpites_core::market::Field;
use palpites_core::selection::{MatchRef, Selection, SelectionStore};
use palpites_core::submission::SubmissionStatus;

use layout::build_layout;

// ---------------------------------------------------------------------------
// ViewState
// ---------------------------------------------------------------------------

/// TUI-local state: the static fixtures, cursor/focus, and the latest
/// session state received from the app loop.
pub struct ViewState {
    pub fixtures: Fixtures,
    /// Every match in display order; `cursor` indexes into this.
    pub matches: Vec<MatchRef>,
    pub cursor: usize,
    /// Market column under the cursor.
    pub focus: Field,
    pub selections: SelectionStore,
    /// Pick commands sent to the app loop. Snapshots that have not seen all
    /// of them are older than the local store.
    pub picks_sent: u64,
    pub name: String,
    /// Whether keystrokes go to the name field.
    pub name_edit: bool,
    pub confirm_quit: bool,
    pub status: SubmissionStatus,
    pub display: DisplayConfig,
}

impl ViewState {
    pub fn new(fixtures: Fixtures, display: DisplayConfig) -> Self {
        let matches = fixtures.iter_matches().map(|(r, _)| r).collect();
        ViewState {
            fixtures,
            matches,
            cursor: 0,
            focus: Field::FinalResult,
            selections: SelectionStore::new(),
            picks_sent: 0,
            name: String::new(),
            name_edit: false,
            confirm_quit: false,
            status: SubmissionStatus::Idle,
            display,
        }
    }

    pub fn selected_match(&self) -> Option<&MatchRef> {
        self.matches.get(self.cursor)
    }

    pub fn selected_fixture(&self) -> Option<&Fixture> {
        self.fixtures
            .iter_matches()
            .nth(self.cursor)
            .map(|(_, fixture)| fixture)
    }

    pub fn selection_for(&self, match_ref: &MatchRef) -> Option<&Selection> {
        self.selections.get(&match_ref.key())
    }

    /// Apply a full state snapshot from the app loop.
    ///
    /// Picks applied locally are kept until the app loop has processed them,
    /// and the name is left alone while it is being edited, so a late echo
    /// cannot roll back keystrokes.
    pub fn apply_snapshot(&mut self, snapshot: AppSnapshot) {
        if snapshot.picks_seen >= self.picks_sent {
            self.selections = snapshot.selections;
        }
        if !self.name_edit {
            self.name = snapshot.name;
        }
        self.status = snapshot.status;
    }
}

impl Default for ViewState {
    fn default() -> Self {
        ViewState::new(Fixtures::default(), DisplayConfig::default())
    }
}

// ---------------------------------------------------------------------------
// UiUpdate processing
// ---------------------------------------------------------------------------

fn apply_ui_update(state: &mut ViewState, update: UiUpdate) {
    match update {
        UiUpdate::StateSnapshot(snapshot) => {
            state.apply_snapshot(*snapshot);
        }
        UiUpdate::SubmissionStatus(status) => {
            state.status = status;
        }
    }
}

// ---------------------------------------------------------------------------
// Render frame
// ---------------------------------------------------------------------------

fn render_frame(frame: &mut Frame, state: &ViewState) {
    let layout = build_layout(frame.area());

    widgets::header::render(frame, layout.header, state);
    widgets::matches::render(frame, layout.matches, state);
    widgets::history::render(frame, layout.history, state);
    widgets::summary::render(frame, layout.summary, state);
    widgets::status_bar::render(frame, layout.status_bar, state);
    widgets::help_bar::render(frame, layout.help_bar, state);

    if state.confirm_quit {
        widgets::quit_confirm::render(frame, frame.area());
    }
}

// ---------------------------------------------------------------------------
// Main TUI loop
// ---------------------------------------------------------------------------

/// Run the TUI event loop.
///
/// 1. Initializes the terminal (raw mode, alternate screen).
/// 2. Installs a panic hook to restore the terminal on crash.
/// 3. Runs an async select loop: UI updates, keyboard input, render ticks.
/// 4. Restores the terminal on exit.
pub async fn run(
    fixtures: Fixtures,
    display: DisplayConfig,
    mut ui_rx: mpsc::Receiver<UiUpdate>,
    cmd_tx: mpsc::Sender<UserCommand>,
) -> anyhow::Result<()> {
    // 1. Initialize terminal
    let mut terminal = ratatui::init();

    // 2. Restore the terminal before the default hook prints the panic
    let original_hook = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |panic_info| {
        ratatui::restore();
        original_hook(panic_info);
    }));

    let mut view_state = ViewState::new(fixtures, display);
    let mut event_stream = EventStream::new();

    let mut render_tick = tokio::time::interval(Duration::from_millis(33));
    render_tick.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Skip);

    // 3. Main loop
    let result = loop {
        tokio::select! {
            // UI updates from the app loop
            update = ui_rx.recv() => {
                match update {
                    Some(ui_update) => apply_ui_update(&mut view_state, ui_update),
                    None => {
                        info!("UI channel closed, leaving TUI");
                        break Ok(());
                    }
                }
            }

            // Keyboard input
            maybe_event = event_stream.next() => {
                match maybe_event {
                    Some(Ok(Event::Key(key_event))) => {
                        if let Some(cmd) = input::handle_key(key_event, &mut view_state) {
                            let quit = matches!(cmd, UserCommand::Quit);
                            let _ = cmd_tx.send(cmd).await;
                            if quit {
                                break Ok(());
                            }
                        }
                    }
                    Some(Ok(_)) => {
                        // Mouse and resize events: the next tick redraws
                    }
                    Some(Err(e)) => {
                        warn!("Terminal input error: {}", e);
                        let _ = cmd_tx.send(UserCommand::Quit).await;
                        break Err(e.into());
                    }
                    None => {
                        let _ = cmd_tx.send(UserCommand::Quit).await;
                        break Ok(());
                    }
                }
            }

            // Render tick
            _ = render_tick.tick() => {
                if let Err(e) = terminal.draw(|frame| render_frame(frame, &view_state)) {
                    break Err(e.into());
                }
            }
        }
    };

    // 4. Restore terminal
    ratatui::restore();

    result
}

// ---------------------------------------------------------------------------
// Test helpers
// ---------------------------------------------------------------------------

#[cfg(test)]
pub(crate) const SAMPLE_FIXTURES: &str = r#"{
    "Sábado 01/11": [
        {
            "hora": "16:00",
            "times": [{ "nome": "Flamengo", "posicao": 1 }, { "nome": "Palmeiras", "posicao": 2 }],
            "ultimos": {
                "Flamengo": [
                    { "resultado": "V", "placar": "2 x 1 Santos", "data": "2025-10-26", "local": "casa" },
                    { "resultado": "D", "placar": "WO", "data": "19/10" }
                ]
            }
        },
        { "hora": "18:30", "times": ["Botafogo", "Fortaleza"] }
    ],
    "Domingo 02/11": [
        { "hora": "11:00", "times": ["Grêmio", "Internacional"] }
    ]
}"#;

/// View state over three sample matches on two days.
#[cfg(test)]
pub(crate) fn sample_view_state() -> ViewState {
    let fixtures = palpites_core::fixture::parse_fixtures(SAMPLE_FIXTURES).unwrap();
    ViewState::new(fixtures, DisplayConfig::default())
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
