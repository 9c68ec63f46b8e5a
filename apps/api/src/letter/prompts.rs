// All LLM prompt constants for the Buddy Letter pipeline.
// Reuses the shared style directive from llm_client::prompts.

use crate::errors::AppError;
use crate::letter::form::LetterRequest;
use crate::llm_client::prompts::STYLE_INSTRUCTION;

/// System prompt for letter writing.
pub const LETTER_SYSTEM: &str = "You are a helpful assistant skilled in writing Buddy Letters \
    for Veterans Affairs disability claims.";

/// Letter prompt template. Replace: {form_json}, {style_instruction}
pub const LETTER_PROMPT_TEMPLATE: &str = "Write a Buddy Letter based on this information:
{form_json}. {style_instruction}";

/// The system and user prompts for one submission.
#[derive(Debug, Clone)]
pub struct LetterPrompt {
    pub system: &'static str,
    pub user: String,
}

/// Builds the prompts for a validated request.
///
/// The request is embedded as pretty-printed JSON in field order. JSON string
/// escaping keeps quotes, braces and newlines inside each value, so free text
/// cannot change the shape of the block the model sees.
pub fn build_letter_prompt(request: &LetterRequest) -> Result<LetterPrompt, AppError> {
    let form_json = serde_json::to_string_pretty(request)
        .map_err(|e| AppError::Internal(anyhow::anyhow!("Failed to serialize form data: {e}")))?;

    // form_json is substituted last so template markers inside user text stay literal.
    let user = LETTER_PROMPT_TEMPLATE
        .replace("{style_instruction}", STYLE_INSTRUCTION)
        .replace("{form_json}", &form_json);

    Ok(LetterPrompt {
        system: LETTER_SYSTEM,
        user,
    })
}
