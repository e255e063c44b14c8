use axum::{extract::Extension, Json};
use discord::models::{Interaction, InteractionResponse};

use crate::server::app::AppState;
use crate::server::interactions;

/// Interactions endpoint. Signatures are checked by middleware before this runs.
pub async fn interactions_handler(
    Extension(state): Extension<AppState>,
    Json(interaction): Json<Interaction>,
) -> Json<InteractionResponse> {
    Json(interactions::handle(interaction, &state.deps).await)
}
