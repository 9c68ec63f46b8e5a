pub mod health;

use axum::{
    response::Html,
    routing::{get, post},
    Router,
};

use crate::letter::handlers;
use crate::state::AppState;

const INDEX_HTML: &str = include_str!("../../assets/index.html");

/// GET /
/// The form page. Static; the fields come from `/api/v1/letters/form`.
async fn index_handler() -> Html<&'static str> {
    Html(INDEX_HTML)
}

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/", get(index_handler))
        .route("/health", get(health::health_handler))
        // Letter API
        .route("/api/v1/letters/form", get(handlers::handle_form_schema))
        .route("/api/v1/letters", post(handlers::handle_generate_letter))
        .with_state(state)
}
