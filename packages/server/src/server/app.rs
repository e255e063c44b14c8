//! Application setup and server configuration.

use std::sync::Arc;

use axum::{
    extract::Extension,
    middleware,
    routing::{get, post},
    Router,
};
use ed25519_dalek::VerifyingKey;
use tower_http::trace::TraceLayer;

use crate::kernel::ServerDeps;
use crate::server::middleware::verify_signature;
use crate::server::routes::{health_handler, interactions_handler};

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    pub deps: ServerDeps,
}

/// Build the Axum router.
///
/// Only `/interactions` is signature-checked; `/health` is for the host's liveness checks.
pub fn build_app(deps: ServerDeps, public_key: VerifyingKey) -> Router {
    let public_key = Arc::new(public_key);

    Router::new()
        .route(
            "/interactions",
            post(interactions_handler).layer(middleware::from_fn(move |req, next| {
                verify_signature(public_key.clone(), req, next)
            })),
        )
        .route("/health", get(health_handler))
        .layer(Extension(AppState { deps }))
        .layer(TraceLayer::new_for_http())
}
