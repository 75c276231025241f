//! HTTP routes for the gateway.

use crate::{AppState, chat, generate};
use axum::Router;
use axum::routing::post;

/// Build the gateway router over the given state.
pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/api/generate", post(generate::generate))
        .route("/api/chat", post(chat::chat))
        .with_state(state)
}
