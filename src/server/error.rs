//! HTTP error mapping
//!
//! Every failure a handler can produce ends up here and is rendered as JSON.
//! Internal detail is logged and never sent to the client.

use axum::{
    extract::rejection::JsonRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use validator::ValidationErrors;
use crate::bookmark::{field_errors, FieldError};

pub const INTERNAL_MESSAGE: &str = "Internal server error";
pub const BOOKMARK_NOT_FOUND: &str = "Bookmark not found";

#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
}

#[derive(Debug, Serialize)]
pub struct ValidationResponse {
    pub errors: Vec<FieldError>,
}

#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error("validation failed: {0:?}")]
    Validation(Vec<FieldError>),

    #[error("{0}")]
    NotFound(&'static str),

    /// Carries the detail for the server log only
    #[error("internal error: {0}")]
    Internal(String),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        match self {
            ApiError::Validation(errors) => {
                tracing::debug!(?errors, "rejected request");
                (StatusCode::BAD_REQUEST, Json(ValidationResponse { errors })).into_response()
            }
            ApiError::NotFound(message) => (
                StatusCode::NOT_FOUND,
                Json(ErrorResponse { error: message.to_string() }),
            )
                .into_response(),
            ApiError::Internal(detail) => {
                tracing::error!(%detail, "request failed");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    Json(ErrorResponse { error: INTERNAL_MESSAGE.to_string() }),
                )
                    .into_response()
            }
        }
    }
}

impl From<crate::Error> for ApiError {
    fn from(err: crate::Error) -> Self {
        match err {
            crate::Error::BookmarkNotFound(_) => ApiError::NotFound(BOOKMARK_NOT_FOUND),
            other => ApiError::Internal(other.to_string()),
        }
    }
}

impl From<ValidationErrors> for ApiError {
    fn from(errors: ValidationErrors) -> Self {
        ApiError::Validation(field_errors(&errors))
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        ApiError::Validation(vec![FieldError::new("body", rejection.body_text())])
    }
}
