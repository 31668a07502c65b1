//! API error handling
//!
//! Structured error responses with request tracking and proper HTTP status
//! codes for every kind of wrapper failure.

use crate::errors::WrapperError;
use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Top-level API error response with request tracking
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub request_id: String,
    pub error: ErrorBody,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorBody {
    /// Error code (BAD_REQUEST, ROUND_IN_PROGRESS, BAD_GATEWAY, ...)
    pub code: String,
    pub message: String,
}

/// API-facing error with the id of the request that produced it
#[derive(Debug)]
pub struct ApiError {
    pub request_id: String,
    pub status: StatusCode,
    pub code: String,
    pub message: String,
}

impl ApiError {
    /// Map a wrapper failure onto an HTTP status and stable error code
    pub fn from_wrapper(request_id: String, err: WrapperError) -> Self {
        let (status, code) = match &err {
            WrapperError::Validation(_) => (StatusCode::BAD_REQUEST, "BAD_REQUEST"),
            WrapperError::RoundInProgress => (StatusCode::CONFLICT, "ROUND_IN_PROGRESS"),
            WrapperError::Transport { .. } | WrapperError::Network(_) => {
                (StatusCode::BAD_GATEWAY, "BAD_GATEWAY")
            }
            WrapperError::Configuration(_) | WrapperError::Io(_) => {
                (StatusCode::INTERNAL_SERVER_ERROR, "INTERNAL_ERROR")
            }
        };
        Self {
            request_id,
            status,
            code: code.to_string(),
            message: err.to_string(),
        }
    }
}

impl fmt::Display for ApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}] {}: {}", self.request_id, self.code, self.message)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let body = ErrorResponse {
            request_id: self.request_id,
            error: ErrorBody {
                code: self.code,
                message: self.message,
            },
        };
        (self.status, Json(body)).into_response()
    }
}
