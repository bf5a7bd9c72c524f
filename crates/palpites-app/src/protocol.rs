// Messages exchanged between the TUI and the app event loop.

use palpites_core::market::PickUpdate;
use palpites_core::selection::{MatchRef, SelectionStore};
use palpites_core::submission::SubmissionStatus;

use crate::transport::TransportError;

/// Commands sent from the TUI to the app loop.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UserCommand {
    /// The submitter name changed (sent on every edit).
    SetName(String),
    /// One selector of one match changed.
    UpdatePick {
        match_ref: MatchRef,
        update: PickUpdate,
    },
    Submit,
    Quit,
}

/// Everything the TUI needs to redraw after a state change.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppSnapshot {
    pub selections: SelectionStore,
    pub name: String,
    pub status: SubmissionStatus,
    /// Pick commands processed so far, ignored ones included.
    pub picks_seen: u64,
}

/// Updates pushed from the app loop to the TUI.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UiUpdate {
    StateSnapshot(Box<AppSnapshot>),
    SubmissionStatus(SubmissionStatus),
}

/// Result of one transport call, sent back by the spawned submit task.
#[derive(Debug)]
pub struct SubmitOutcome {
    pub result: Result<(), TransportError>,
}
