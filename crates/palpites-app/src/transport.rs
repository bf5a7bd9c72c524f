// Form transport: posts the submission payload to the Formspree endpoint.
//
// The app loop only sees the `Transport` trait, so tests swap in an
// in-memory implementation.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::multipart::Form;
use thiserror::Error;
use tracing::{debug, info};

use palpites_core::config::Config;
use palpites_core::submission::SubmissionPayload;

// ---------------------------------------------------------------------------
// Constants
// ---------------------------------------------------------------------------

pub const FORM_ENDPOINT: &str = "https://formspree.io/f/xanllngo";

// ---------------------------------------------------------------------------
// Error types
// ---------------------------------------------------------------------------

#[derive(Debug, Error)]
pub enum TransportError {
    #[error("endpoint returned status {0}")]
    Status(u16),

    #[error("network error: {0}")]
    Network(String),

    #[error("failed to build HTTP client: {0}")]
    Client(String),
}

// ---------------------------------------------------------------------------
// Transport trait
// ---------------------------------------------------------------------------

#[async_trait]
pub trait Transport: Send + Sync {
    /// Deliver the payload. Two outcomes only: accepted, or an error.
    async fn send(&self, payload: &SubmissionPayload) -> Result<(), TransportError>;
}

// ---------------------------------------------------------------------------
// FormspreeTransport
// ---------------------------------------------------------------------------

/// Multipart POST to the fixed form endpoint.
pub struct FormspreeTransport {
    http: reqwest::Client,
    endpoint: String,
}

impl FormspreeTransport {
    pub fn new(timeout: Duration) -> Result<Self, TransportError> {
        let http = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| TransportError::Client(e.to_string()))?;
        Ok(Self {
            http,
            endpoint: FORM_ENDPOINT.to_string(),
        })
    }

    pub fn from_config(config: &Config) -> Result<Self, TransportError> {
        Self::new(Duration::from_secs(config.submission.timeout_secs))
    }

    #[cfg(test)]
    fn with_endpoint(endpoint: impl Into<String>) -> Result<Self, TransportError> {
        let mut transport = Self::new(Duration::from_secs(5))?;
        transport.endpoint = endpoint.into();
        Ok(transport)
    }
}

/// One text part per payload field, in payload order. Field names go out as
/// raw UTF-8, the way a browser form posts them.
pub fn build_form(payload: &SubmissionPayload) -> Form {
    payload
        .fields
        .iter()
        .fold(Form::new().percent_encode_noop(), |form, (name, value)| {
            form.text(name.clone(), value.clone())
        })
}

#[async_trait]
impl Transport for FormspreeTransport {
    async fn send(&self, payload: &SubmissionPayload) -> Result<(), TransportError> {
        debug!("Posting {} form fields to {}", payload.len(), self.endpoint);
        let response = self
            .http
            .post(&self.endpoint)
            .header("Accept", "application/json")
            .multipart(build_form(payload))
            .send()
            .await
            .map_err(|e| TransportError::Network(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            return Err(TransportError::Status(status.as_u16()));
        }
        info!("Form endpoint accepted submission ({})", status);
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
