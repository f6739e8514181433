pub mod codes;
pub mod handlers;
pub mod responses;

pub use codes::ErrorCode;

use crate::envelope::ErrorResponse;
use axum::{
    Json,
    extract::rejection::JsonRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use std::collections::BTreeSet;
use thiserror::Error;
use validator::ValidationErrors;

/// Application error type rendered as the failure envelope.
///
/// Client errors (4xx) carry only a `message`; server errors (5xx) also carry
/// the underlying cause in `error`.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum AppError {
    #[error("JSON extraction error: {0}")]
    JsonExtractorRejection(#[from] JsonRejection),

    #[error("Validation error: {0}")]
    ValidationError(#[from] ValidationErrors),

    #[error("Bad Request: {0}")]
    BadRequest(String),

    #[error("Not Found: {0}")]
    NotFound(String),

    #[error("{message}: {cause}")]
    Internal {
        code: ErrorCode,
        message: String,
        cause: String,
    },
}

impl AppError {
    /// 500 caused by a storage/upstream backend
    pub fn backend(code: ErrorCode, message: impl Into<String>, cause: impl Into<String>) -> Self {
        Self::Internal {
            code,
            message: message.into(),
            cause: cause.into(),
        }
    }

    pub fn status(&self) -> StatusCode {
        match self {
            AppError::JsonExtractorRejection(_)
            | AppError::ValidationError(_)
            | AppError::BadRequest(_) => StatusCode::BAD_REQUEST,
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            AppError::Internal { .. } => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

/// Flattens validator output into one readable sentence.
///
/// Messages are de-duplicated (several fields may share one message) and
/// sorted so the text is stable across runs.
pub fn validation_message(errors: &ValidationErrors) -> String {
    let messages: BTreeSet<String> = errors
        .field_errors()
        .into_iter()
        .flat_map(|(field, errs)| {
            errs.iter().map(move |err| match &err.message {
                Some(message) => message.to_string(),
                None => format!("Field '{}' is invalid ({})", field, err.code),
            })
        })
        .collect();

    if messages.is_empty() {
        return "Request validation failed".to_string();
    }

    messages.into_iter().collect::<Vec<_>>().join("; ")
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status();

        let body = match self {
            AppError::JsonExtractorRejection(rejection) => {
                tracing::info!(
                    error_code = ErrorCode::InvalidJson.code(),
                    "Rejected request body: {}",
                    rejection.body_text()
                );
                ErrorResponse::new(format!("Invalid JSON body: {}", rejection.body_text()), None)
            }
            AppError::ValidationError(errors) => {
                let message = validation_message(&errors);
                tracing::info!(
                    error_code = ErrorCode::ValidationError.code(),
                    "Validation error: {}",
                    message
                );
                ErrorResponse::new(message, None)
            }
            AppError::BadRequest(message) => {
                tracing::info!(
                    error_code = ErrorCode::ValidationError.code(),
                    "Bad request: {}",
                    message
                );
                ErrorResponse::new(message, None)
            }
            AppError::NotFound(message) => {
                tracing::info!(
                    error_code = ErrorCode::NotFound.code(),
                    "Not found: {}",
                    message
                );
                ErrorResponse::new(message, None)
            }
            AppError::Internal {
                code,
                message,
                cause,
            } => {
                tracing::error!(
                    error_code = code.code(),
                    error_kind = %code,
                    cause = %cause,
                    "{}",
                    message
                );
                ErrorResponse::new(message, Some(cause))
            }
        };

        (status, Json(body)).into_response()
    }
}
