//! Route definitions
//!
//! Maps URLs to handlers. The router carries the request-id layer so it is
//! self-contained for tests; transport layers (CORS, trace, timeout) are
//! added by the server.

use super::handlers::*;
use super::middleware::request_id_middleware;
use axum::{
    routing::{delete, get, post, put},
    Router,
};
use std::sync::Arc;

/// Build the facade router with all endpoints
pub fn create_router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/health", get(health_handler))
        // Round lifecycle
        .route("/wager", post(wager_handler))
        .route("/transaction/:id", put(update_handler))
        .route("/settle", post(settle_handler))
        // Read-only session state
        .route("/session", get(session_handler))
        .route("/display", get(display_handler))
        // Presentation controls
        .route("/wrapper/show", post(show_wrapper_handler))
        .route("/wrapper/hide", post(hide_wrapper_handler))
        .route("/wrapper/info", post(show_info_handler))
        .route("/wrapper/info", delete(dismiss_info_handler))
        .layer(axum::middleware::from_fn(request_id_middleware))
        .with_state(state)
}
