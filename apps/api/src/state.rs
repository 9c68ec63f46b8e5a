use std::sync::Arc;

use crate::config::Config;
use crate::llm_client::LetterGenerator;

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    /// Pluggable letter generator. Default: the OpenAI `LlmClient`.
    pub generator: Arc<dyn LetterGenerator>,
    pub config: Config,
}
