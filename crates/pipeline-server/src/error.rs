//! Error responses for the HTTP API

use axum::{
    extract::rejection::FormRejection,
    http::StatusCode,
    response::{IntoResponse, Json, Response},
};
use serde_json::json;
use thiserror::Error;

/// Everything that can go wrong while handling a pipeline request.
///
/// Rendered as `{"detail": "<message>"}` with the matching status code.
#[derive(Error, Debug)]
pub enum ApiError {
    /// The `pipeline` field is not a JSON object.
    #[error("Invalid JSON format")]
    InvalidJson,

    /// `nodes` or `edges` is present but not an array.
    #[error("{field} must be a list")]
    NotAList { field: &'static str },

    /// An array element lacks the fields validation needs.
    #[error("Invalid {kind} at index {index}: {message}")]
    InvalidElement {
        kind: &'static str,
        index: usize,
        message: String,
    },

    /// The request body is not a form with a `pipeline` field.
    #[error("Invalid form data: {0}")]
    InvalidForm(#[from] FormRejection),

    #[error("Internal server error: {0}")]
    Internal(String),
}

impl ApiError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            ApiError::InvalidJson | ApiError::NotAList { .. } => StatusCode::BAD_REQUEST,
            ApiError::InvalidElement { .. } => StatusCode::UNPROCESSABLE_ENTITY,
            ApiError::InvalidForm(rejection) => rejection.status(),
            ApiError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        if status.is_server_error() {
            tracing::error!("{}", self);
        } else {
            tracing::warn!("Rejected pipeline: {}", self);
        }
        (status, Json(json!({ "detail": self.to_string() }))).into_response()
    }
}
