//! Axum route handlers for the Letter API.

use axum::{extract::State, Json};
use uuid::Uuid;

use crate::errors::AppError;
use crate::letter::form::{form_schema, FormSchema, LetterRequest};
use crate::letter::generator::compose_letter;
use crate::letter::presenter::{render_letter, LetterView};
use crate::state::AppState;

/// GET /api/v1/letters/form
///
/// Field catalogue for the page: labels, placeholders, required flags.
pub async fn handle_form_schema() -> Json<FormSchema> {
    Json(form_schema())
}

/// POST /api/v1/letters
///
/// One submission: validate → generate → certify → render.
/// Every failure comes back as the error envelope; nothing is stored.
pub async fn handle_generate_letter(
    State(state): State<AppState>,
    Json(request): Json<LetterRequest>,
) -> Result<Json<LetterView>, AppError> {
    let submission_id = Uuid::new_v4();

    let letter = compose_letter(state.generator.as_ref(), submission_id, &request).await?;

    Ok(Json(render_letter(submission_id, letter)))
}
