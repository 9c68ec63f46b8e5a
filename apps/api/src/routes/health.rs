use axum::{extract::State, Json};
use serde_json::{json, Value};

use crate::state::AppState;

/// GET /health
/// Returns a simple status object with service version.
/// `api_key_configured` is false when submissions will fail with a configuration error.
pub async fn health_handler(State(state): State<AppState>) -> Json<Value> {
    Json(json!({
        "status": "ok",
        "version": env!("CARGO_PKG_VERSION"),
        "service": "buddy-letter-api",
        "api_key_configured": state.config.has_api_key()
    }))
}
