// Buddy Letter pipeline.
// Form validation → prompt building → one LLM call → certification → presentation.
// All LLM calls go through llm_client — no direct OpenAI calls here.

pub mod form;
pub mod generator;
pub mod handlers;
pub mod presenter;
pub mod prompts;
