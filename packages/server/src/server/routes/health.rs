use axum::{extract::Extension, http::StatusCode, Json};
use serde::Serialize;

use crate::server::app::AppState;

#[derive(Serialize)]
pub struct HealthResponse {
    status: String,
    pending_submissions: usize,
}

/// Health check endpoint
///
/// The service holds no connections of its own, so it is healthy whenever it
/// answers. Reports how many submissions await a decision.
pub async fn health_handler(
    Extension(state): Extension<AppState>,
) -> (StatusCode, Json<HealthResponse>) {
    (
        StatusCode::OK,
        Json(HealthResponse {
            status: "healthy".to_string(),
            pending_submissions: state.deps.pending.len(),
        }),
    )
}
