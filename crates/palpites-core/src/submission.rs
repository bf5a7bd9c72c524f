// Submission payload encoding and the submit state machine.
//
// The payload is an ordered list of form fields: the submitter's name first,
// then one "Palpite N." field per match with at least one pick. The state
// machine guards against duplicate in-flight submissions and records the
// outcome of each attempt for the status bar.

use thiserror::Error;
use tracing::{info, warn};

use crate::selection::{Selection, SelectionStore};

// ---------------------------------------------------------------------------
// Constants
// ---------------------------------------------------------------------------

/// Form field carrying the submitter's name.
pub const NAME_FIELD: &str = "Nome do Apostador";

// ---------------------------------------------------------------------------
// Error types
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("submitter name is blank")]
    MissingName,

    #[error("no match has any pick")]
    NoSelections,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SubmitError {
    #[error("validation failed: {0}")]
    Validation(#[from] ValidationError),

    #[error("transport failure: {0}")]
    Transport(String),
}

impl SubmitError {
    /// Status-bar text shown to the user.
    pub fn user_message(&self) -> String {
        match self {
            SubmitError::Validation(ValidationError::MissingName) => {
                "Por favor, informe seu primeiro nome antes de enviar.".to_string()
            }
            SubmitError::Validation(ValidationError::NoSelections) => {
                "Escolha pelo menos um palpite antes de enviar.".to_string()
            }
            SubmitError::Transport(detail) => {
                format!("Falha ao enviar os palpites ({detail}). Tente novamente.")
            }
        }
    }
}

// ---------------------------------------------------------------------------
// Payload
// ---------------------------------------------------------------------------

/// Ordered `(field name, field value)` pairs ready for a multipart form.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubmissionPayload {
    pub fields: Vec<(String, String)>,
}

impl SubmissionPayload {
    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.fields.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }
}

/// Compose the market part of a selection, e.g. `"Resultado: 1 / Gols: Mais de 2.5"`.
///
/// Returns `None` for an inert selection.
pub fn compose_picks(selection: &Selection) -> Option<String> {
    let mut parts = Vec::new();
    if let Some(fr) = selection.final_result {
        parts.push(format!("Resultado: {fr}"));
    } else if let Some(dc) = selection.double_chance {
        parts.push(format!("Dupla Chance: {dc}"));
    }
    if let Some(gl) = selection.goals_line {
        parts.push(format!("Gols: {gl}"));
    }
    if parts.is_empty() {
        None
    } else {
        Some(parts.join(" / "))
    }
}

/// One line of the running summary: match label plus composed picks.
pub fn summary_line(selection: &Selection) -> Option<String> {
    compose_picks(selection).map(|picks| format!("{}: {}", selection.match_ref.label(), picks))
}

/// Validate the submitter name and the store, then build the payload.
///
/// The name is checked first, so a blank name is reported even when the
/// store is empty.
pub fn build_payload(
    name: &str,
    store: &SelectionStore,
) -> Result<SubmissionPayload, ValidationError> {
    let name = name.trim();
    if name.is_empty() {
        return Err(ValidationError::MissingName);
    }

    let picks: Vec<(String, String)> = store
        .active()
        .filter_map(|sel| compose_picks(sel).map(|value| (sel, value)))
        .enumerate()
        .map(|(i, (sel, value))| (format!("Palpite {}. {}", i + 1, sel.match_ref.label()), value))
        .collect();

    if picks.is_empty() {
        return Err(ValidationError::NoSelections);
    }

    let mut fields = Vec::with_capacity(picks.len() + 1);
    fields.push((NAME_FIELD.to_string(), name.to_string()));
    fields.extend(picks);
    Ok(SubmissionPayload { fields })
}

// ---------------------------------------------------------------------------
// State machine
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum SubmissionStatus {
    #[default]
    Idle,
    Sending,
    Success,
    Error(SubmitError),
}

/// What the caller should do after a submit request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmitDecision {
    /// A submission is already in flight; nothing to do.
    Ignored,
    /// Validation failed; status is now `Error`.
    Rejected(ValidationError),
    /// Status is now `Sending`; hand the payload to the transport.
    Send(SubmissionPayload),
}

/// Submit state for the session: `Idle -> Sending -> Success | Error`.
///
/// `Success` and `Error` accept a fresh request (retry).
#[derive(Debug, Clone, Default)]
pub struct Submission {
    status: SubmissionStatus,
}

impl Submission {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn status(&self) -> &SubmissionStatus {
        &self.status
    }

    pub fn is_sending(&self) -> bool {
        self.status == SubmissionStatus::Sending
    }

    pub fn request(&mut self, name: &str, store: &SelectionStore) -> SubmitDecision {
        if self.is_sending() {
            info!("Submit requested while a submission is in flight, ignoring");
            return SubmitDecision::Ignored;
        }
        match build_payload(name, store) {
            Ok(payload) => {
                info!("Submitting {} pick(s)", payload.len() - 1);
                self.status = SubmissionStatus::Sending;
                SubmitDecision::Send(payload)
            }
            Err(e) => {
                info!("Submission rejected: {}", e);
                self.status = SubmissionStatus::Error(SubmitError::Validation(e.clone()));
                SubmitDecision::Rejected(e)
            }
        }
    }

    /// Record the transport outcome. Ignored unless a submission is in flight.
    pub fn resolve(&mut self, outcome: Result<(), String>) {
        if !self.is_sending() {
            warn!("Transport outcome arrived with status {:?}, ignoring", self.status);
            return;
        }
        self.status = match outcome {
            Ok(()) => {
                info!("Submission accepted by endpoint");
                SubmissionStatus::Success
            }
            Err(message) => {
                warn!("Submission failed: {}", message);
                SubmissionStatus::Error(SubmitError::Transport(message))
            }
        };
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
