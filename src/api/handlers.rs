//! Request handlers
//!
//! Thin translation layer between the HTTP facade and the session bridge.

use super::{errors::ApiError, middleware::RequestId, models::*};
use crate::presentation::InfoNotice;
use crate::session::Session;
use crate::types::{SettleOutcome, UpdateOutcome, WagerOutcome};
use axum::{
    extract::{Path, State},
    http::StatusCode,
    Extension, Json,
};
use std::sync::Arc;

/// Shared application state
pub struct AppState {
    pub session: Arc<Session>,
    pub version: String,
}

/// GET /health
pub async fn health_handler(State(state): State<Arc<AppState>>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "Running".to_string(),
        version: state.version.clone(),
    })
}

/// POST /wager
pub async fn wager_handler(
    Extension(request_id): Extension<RequestId>,
    State(state): State<Arc<AppState>>,
    Json(body): Json<WagerBody>,
) -> Result<Json<WagerOutcome>, ApiError> {
    state
        .session
        .wager(body.amount, body.lines, body.playback_data)
        .await
        .map(Json)
        .map_err(|e| ApiError::from_wrapper(request_id.0, e))
}

/// PUT /transaction/:id
pub async fn update_handler(
    Extension(request_id): Extension<RequestId>,
    State(state): State<Arc<AppState>>,
    Path(transaction_id): Path<String>,
    Json(body): Json<UpdateBody>,
) -> Result<Json<UpdateOutcome>, ApiError> {
    state
        .session
        .update(&transaction_id, body.data)
        .await
        .map(Json)
        .map_err(|e| ApiError::from_wrapper(request_id.0, e))
}

/// POST /settle
pub async fn settle_handler(
    Extension(request_id): Extension<RequestId>,
    State(state): State<Arc<AppState>>,
    Json(body): Json<SettleBody>,
) -> Result<Json<SettleOutcome>, ApiError> {
    state
        .session
        .settle(body.tickets)
        .await
        .map(Json)
        .map_err(|e| ApiError::from_wrapper(request_id.0, e))
}

/// GET /session
pub async fn session_handler(State(state): State<Arc<AppState>>) -> Json<SessionResponse> {
    let session = &state.session;
    let account = session.account();
    Json(SessionResponse {
        balance: account.balance,
        wins: account.wins,
        cost: account.cost,
        currency_code: session.currency_code().to_string(),
        currency_symbol: session.currency_symbol().to_string(),
        language_code: session.language_code().to_string(),
        play_mode: session.play_mode().to_string(),
        accessibility_mode: session.accessibility_mode().to_string(),
        wrapper_version: session.wrapper_version().to_string(),
        time: session.time(),
        playback_data: session.playback_data(),
        bonus_rounds: session.bonus_rounds(),
    })
}

/// GET /display
pub async fn display_handler(State(state): State<Arc<AppState>>) -> Json<DisplayResponse> {
    Json(DisplayResponse {
        display: state.session.display_size(),
        wrapper: state.session.wrapper_size(),
        footer_visible: state.session.wrapper_visible(),
    })
}

/// POST /wrapper/show
pub async fn show_wrapper_handler(
    State(state): State<Arc<AppState>>,
) -> Json<VisibilityResponse> {
    state.session.show_wrapper();
    Json(VisibilityResponse { visible: true })
}

/// POST /wrapper/hide
pub async fn hide_wrapper_handler(
    State(state): State<Arc<AppState>>,
) -> Json<VisibilityResponse> {
    state.session.hide_wrapper();
    Json(VisibilityResponse { visible: false })
}

/// POST /wrapper/info
pub async fn show_info_handler(
    State(state): State<Arc<AppState>>,
    Json(notice): Json<InfoNotice>,
) -> StatusCode {
    state.session.show_info(notice);
    StatusCode::NO_CONTENT
}

/// DELETE /wrapper/info
pub async fn dismiss_info_handler(
    State(state): State<Arc<AppState>>,
) -> Json<Option<InfoNotice>> {
    Json(state.session.dismiss_info())
}
