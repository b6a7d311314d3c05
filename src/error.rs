use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};

use crate::response::ApiResponse;

/// Failures surfaced at the HTTP boundary.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error("{0}")]
    NotFound(&'static str),
    #[error("{0}")]
    Validation(String),
    /// An AI collaborator failed; the message is passed through to the caller.
    #[error("{0}")]
    Upstream(String),
    #[error("storage error")]
    Storage(#[from] anyhow::Error),
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            Self::NotFound(_) => StatusCode::NOT_FOUND,
            Self::Validation(_) => StatusCode::BAD_REQUEST,
            Self::Upstream(_) => StatusCode::BAD_GATEWAY,
            Self::Storage(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        match &self {
            Self::Storage(e) => tracing::error!(error = ?e, "storage failure"),
            Self::Upstream(msg) => tracing::error!(error = %msg, "upstream failure"),
            Self::NotFound(msg) => tracing::warn!(reason = %msg, "not found"),
            Self::Validation(msg) => tracing::warn!(reason = %msg, "rejected request"),
        }
        (self.status(), ApiResponse::failure(self.to_string())).into_response()
    }
}
