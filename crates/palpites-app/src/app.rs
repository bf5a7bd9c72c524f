// Application state and the main event loop.

use std::sync::Arc;

use tokio::sync::mpsc;
use tracing::{info, warn};

use palpites_core::fixture::Fixtures;
use palpites_core::market::PickUpdate;
use palpites_core::selection::{MatchRef, SelectionStore};
use palpites_core::submission::{Submission, SubmitDecision};

use crate::protocol::{AppSnapshot, SubmitOutcome, UiUpdate, UserCommand};
use crate::transport::Transport;

// ---------------------------------------------------------------------------
// AppState
// ---------------------------------------------------------------------------

/// Session state owned by the app loop.
pub struct AppState {
    pub fixtures: Fixtures,
    pub selections: SelectionStore,
    pub name: String,
    pub submission: Submission,
    pub picks_seen: u64,
    transport: Arc<dyn Transport>,
    submit_tx: mpsc::Sender<SubmitOutcome>,
}

impl AppState {
    pub fn new(
        fixtures: Fixtures,
        transport: Arc<dyn Transport>,
        submit_tx: mpsc::Sender<SubmitOutcome>,
    ) -> Self {
        AppState {
            fixtures,
            selections: SelectionStore::new(),
            name: String::new(),
            submission: Submission::new(),
            picks_seen: 0,
            transport,
            submit_tx,
        }
    }

    pub fn build_snapshot(&self) -> AppSnapshot {
        AppSnapshot {
            selections: self.selections.clone(),
            name: self.name.clone(),
            status: self.submission.status().clone(),
            picks_seen: self.picks_seen,
        }
    }

    /// Apply a pick to a scheduled match. Returns false when the match is not
    /// in the fixtures and nothing changed.
    pub fn apply_pick(&mut self, match_ref: &MatchRef, update: PickUpdate) -> bool {
        if !self.fixtures.contains(&match_ref.key()) {
            warn!("Pick for unknown match {}, ignoring", match_ref.key());
            return false;
        }
        self.selections = self.selections.update(match_ref, update);
        true
    }

    /// Run the submit guard and, if it lets the request through, spawn the
    /// transport call. The outcome comes back on the submit channel.
    pub fn request_submit(&mut self) -> SubmitDecision {
        let decision = self.submission.request(&self.name, &self.selections);
        if let SubmitDecision::Send(payload) = &decision {
            let transport = Arc::clone(&self.transport);
            let tx = self.submit_tx.clone();
            let payload = payload.clone();
            tokio::spawn(async move {
                let result = transport.send(&payload).await;
                let _ = tx.send(SubmitOutcome { result }).await;
            });
        }
        decision
    }

    pub fn handle_submit_outcome(&mut self, outcome: SubmitOutcome) {
        self.submission
            .resolve(outcome.result.map_err(|e| e.to_string()));
    }
}

// ---------------------------------------------------------------------------
// Main event loop
// ---------------------------------------------------------------------------

/// Run the application event loop.
///
/// Listens on two channels using `tokio::select!`:
/// 1. User commands from the TUI
/// 2. Outcomes of spawned transport calls
///
/// Pushes UI updates through `ui_tx` for the TUI render loop.
pub async fn run(
    mut cmd_rx: mpsc::Receiver<UserCommand>,
    mut submit_rx: mpsc::Receiver<SubmitOutcome>,
    ui_tx: mpsc::Sender<UiUpdate>,
    mut state: AppState,
) -> anyhow::Result<()> {
    info!(
        "Application event loop started ({} matches)",
        state.fixtures.match_count()
    );

    let _ = ui_tx
        .send(UiUpdate::StateSnapshot(Box::new(state.build_snapshot())))
        .await;

    loop {
        tokio::select! {
            // --- User commands ---
            cmd = cmd_rx.recv() => {
                match cmd {
                    Some(UserCommand::Quit) => {
                        info!("Quit command received, shutting down");
                        break;
                    }
                    Some(cmd) => {
                        handle_user_command(&mut state, cmd, &ui_tx).await;
                    }
                    None => {
                        info!("Command channel closed, shutting down");
                        break;
                    }
                }
            }

            // --- Transport outcomes ---
            Some(outcome) = submit_rx.recv() => {
                state.handle_submit_outcome(outcome);
                let status = state.submission.status().clone();
                let _ = ui_tx.send(UiUpdate::SubmissionStatus(status)).await;
            }
        }
    }

    info!("Application event loop exiting");
    Ok(())
}

/// Handle a user command from the TUI.
async fn handle_user_command(
    state: &mut AppState,
    cmd: UserCommand,
    ui_tx: &mpsc::Sender<UiUpdate>,
) {
    match cmd {
        UserCommand::SetName(name) => {
            state.name = name;
            let snapshot = state.build_snapshot();
            let _ = ui_tx
                .send(UiUpdate::StateSnapshot(Box::new(snapshot)))
                .await;
        }
        UserCommand::UpdatePick { match_ref, update } => {
            state.picks_seen += 1;
            if state.apply_pick(&match_ref, update) {
                let snapshot = state.build_snapshot();
                let _ = ui_tx
                    .send(UiUpdate::StateSnapshot(Box::new(snapshot)))
                    .await;
            }
        }
        UserCommand::Submit => {
            if let SubmitDecision::Ignored = state.request_submit() {
                return;
            }
            let status = state.submission.status().clone();
            let _ = ui_tx.send(UiUpdate::SubmissionStatus(status)).await;
        }
        UserCommand::Quit => {
            // Handled in the main loop
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
