// src/error.rs
use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use thiserror::Error;

use crate::{message::ErrorBody, services::relay::RelayError};

pub const UPSTREAM_FAILURE: &str = "Failed to get AI response";
pub const STUDENT_NOT_FOUND: &str = "Student not found";

#[derive(Debug, Error)]
pub enum AppError {
    #[error("{0}")]
    BadRequest(String),

    #[error("{0}")]
    NotFound(String),

    #[error("{0}")]
    Upstream(String),
}

impl AppError {
    /// Every failure is reported as a 500; the kinds differ only in the body.
    pub fn status(&self) -> StatusCode {
        StatusCode::INTERNAL_SERVER_ERROR
    }

    /// Client-facing message. Upstream detail stays in the logs.
    pub fn public_message(&self) -> String {
        match self {
            AppError::BadRequest(msg) => msg.clone(),
            AppError::NotFound(_) => STUDENT_NOT_FOUND.to_string(),
            AppError::Upstream(_) => UPSTREAM_FAILURE.to_string(),
        }
    }
}

impl From<RelayError> for AppError {
    fn from(err: RelayError) -> Self {
        match err {
            RelayError::NotFound(_) => AppError::NotFound(err.to_string()),
            RelayError::Upstream(_) | RelayError::Timeout(_) => AppError::Upstream(err.to_string()),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        match &self {
            AppError::Upstream(detail) => tracing::error!(%detail, "chat request failed"),
            other => tracing::warn!(error = %other, "chat request rejected"),
        }
        (self.status(), Json(ErrorBody::new(self.public_message()))).into_response()
    }
}
