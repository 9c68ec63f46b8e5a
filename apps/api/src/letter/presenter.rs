//! Presenter — turns pipeline outcomes into what the page shows.
//!
//! The busy indicator lives in the page itself (`assets/index.html`); this
//! module owns the wording of every acknowledgment and error banner.

use chrono::{DateTime, Utc};
use serde::Serialize;
use uuid::Uuid;

use crate::letter::generator::Letter;
use crate::llm_client::GenerationError;

pub const SUCCESS_MESSAGE: &str = "Your Buddy Letter has been generated!";
pub const BUSY_MESSAGE: &str = "Generating your Buddy Letter, please wait...";

/// Where a submission ended up.
///
/// `Idle → Validating → {Idle(with warnings) | Generating} → {Rendered | Errored}`
/// Only the resting states are ever reported to the page.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SubmissionState {
    /// Validation failed; the form stays open with warnings.
    Idle,
    Rendered,
    Errored,
}

/// Successful submission as rendered by the page.
#[derive(Debug, Clone, Serialize)]
pub struct LetterView {
    pub state: SubmissionState,
    pub message: &'static str,
    pub letter: String,
    pub submission_id: Uuid,
    pub generated_at: DateTime<Utc>,
}

pub fn render_letter(submission_id: Uuid, letter: Letter) -> LetterView {
    LetterView {
        state: SubmissionState::Rendered,
        message: SUCCESS_MESSAGE,
        letter: letter.body,
        submission_id,
        generated_at: Utc::now(),
    }
}

/// Banner text for a failed generation, with whatever diagnostics exist.
pub fn generation_message(error: &GenerationError) -> String {
    match error {
        GenerationError::NotConfigured => "The OpenAI API key is not configured.".to_string(),
        GenerationError::Transport(e) => format!("Request failed: {e}"),
        GenerationError::Api { status, body } => format!("OpenAI API Error: {status} - {body}"),
        GenerationError::Decode(_) => "Failed to parse response from OpenAI API.".to_string(),
        GenerationError::EmptyResponse => "Unexpected response format from OpenAI API.".to_string(),
    }
}

/// Stable error code the page can switch on.
pub fn generation_code(error: &GenerationError) -> &'static str {
    match error {
        GenerationError::NotConfigured => "CONFIGURATION_ERROR",
        GenerationError::Transport(_) => "TRANSPORT_ERROR",
        GenerationError::Api { .. } => "API_ERROR",
        GenerationError::Decode(_) => "DECODE_ERROR",
        GenerationError::EmptyResponse => "EMPTY_RESPONSE",
    }
}
