//! Letter Generation — orchestrates one submission.
//!
//! Flow: validate → build prompts → one LLM call → append certification.
//!
//! No retries and no partial letters: any failure ends the submission.

use tracing::{error, info};
use uuid::Uuid;

use crate::errors::AppError;
use crate::letter::form::{validate, LetterRequest};
use crate::letter::prompts::build_letter_prompt;
use crate::llm_client::LetterGenerator;

/// Appended verbatim, once, after every generated letter.
pub const CERTIFICATION: &str = "I CERTIFY THAT I have completed this statement and that its \
    information is true and correct to the best of my knowledge and belief.";

/// A finished letter: the model's text plus the certification.
#[derive(Debug, Clone)]
pub struct Letter {
    pub body: String,
}

impl Letter {
    pub fn certify(generated: String) -> Self {
        Self {
            body: format!("{generated}\n\n{CERTIFICATION}"),
        }
    }
}

/// Runs the pipeline for one submission.
///
/// Steps:
/// 1. validate() → field warnings stop here, nothing is sent
/// 2. build_letter_prompt() → system + user prompts
/// 3. generator.generate() → exactly one outbound call
/// 4. Letter::certify() → certification appended
pub async fn compose_letter(
    generator: &dyn LetterGenerator,
    submission_id: Uuid,
    request: &LetterRequest,
) -> Result<Letter, AppError> {
    // Step 1: Validate
    validate(request).map_err(|warnings| {
        info!(
            "Submission {} withheld: {} required field(s) empty",
            submission_id,
            warnings.len()
        );
        AppError::Validation(warnings)
    })?;

    // Step 2: Prompts
    let prompt = build_letter_prompt(request)?;
    info!(
        "Generating letter for submission {} (prompt {} chars)",
        submission_id,
        prompt.user.len()
    );

    // Step 3: Generate
    let generated = generator
        .generate(prompt.system, &prompt.user)
        .await
        .map_err(|e| {
            error!("Generation failed for submission {}: {}", submission_id, e);
            AppError::Generation(e)
        })?;

    // Step 4: Certify
    let letter = Letter::certify(generated);
    info!(
        "Generated letter for submission {} ({} chars)",
        submission_id,
        letter.body.len()
    );

    Ok(letter)
}
