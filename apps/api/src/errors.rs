use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

use crate::letter::form::{FieldWarning, MISSING_FIELDS_SUMMARY};
use crate::letter::presenter::{generation_code, generation_message, SubmissionState};
use crate::llm_client::GenerationError;

/// Application-level error type.
/// Implements `IntoResponse` so Axum handlers can return `Result<T, AppError>`.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("Validation error: {} field(s) missing", .0.len())]
    Validation(Vec<FieldWarning>),

    #[error("Generation error: {0}")]
    Generation(#[from] GenerationError),

    #[error("Internal server error: {0}")]
    Internal(#[from] anyhow::Error),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, body) = match &self {
            AppError::Validation(fields) => (
                StatusCode::BAD_REQUEST,
                json!({
                    "code": "VALIDATION_ERROR",
                    "message": MISSING_FIELDS_SUMMARY,
                    "state": SubmissionState::Idle,
                    "fields": fields,
                }),
            ),
            AppError::Generation(e) => {
                let status = match e {
                    GenerationError::NotConfigured => StatusCode::SERVICE_UNAVAILABLE,
                    _ => StatusCode::BAD_GATEWAY,
                };
                let mut error = json!({
                    "code": generation_code(e),
                    "message": generation_message(e),
                    "state": SubmissionState::Errored,
                });
                if let GenerationError::Api {
                    status: upstream, ..
                } = e
                {
                    error["status"] = json!(upstream);
                }
                (status, error)
            }
            AppError::Internal(e) => {
                tracing::error!("Internal error: {e:?}");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    json!({
                        "code": "INTERNAL_ERROR",
                        "message": "An internal server error occurred",
                        "state": SubmissionState::Errored,
                    }),
                )
            }
        };

        (status, Json(json!({ "error": body }))).into_response()
    }
}
