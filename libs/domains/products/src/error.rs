use axum_helpers::{AppError, ErrorCode};
use thiserror::Error;

use crate::models::ProductId;

#[derive(Debug, Error)]
pub enum ProductError {
    #[error("Product not found: {0}")]
    NotFound(ProductId),

    #[error("{0}")]
    Validation(String),

    /// The selected backend is missing a connection setting.
    #[error("{0}")]
    Configuration(String),

    /// The upstream could not be reached or answered with an error.
    #[error("{0}")]
    Transport(String),

    /// The upstream answered with a payload we could not read.
    #[error("{0}")]
    Decode(String),
}

pub type ProductResult<T> = Result<T, ProductError>;

impl ProductError {
    /// Converts into an [`AppError`], naming the failed operation for 5xx responses.
    ///
    /// `operation` becomes the envelope `message` (e.g. "Failed to create product")
    /// while the error itself becomes the `error` field.
    pub fn into_app_error(self, operation: &str) -> AppError {
        match self {
            ProductError::NotFound(_) => AppError::NotFound("Product not found".to_string()),
            ProductError::Validation(msg) => AppError::BadRequest(msg),
            ProductError::Configuration(msg) => {
                AppError::backend(ErrorCode::BackendConfig, operation, msg)
            }
            ProductError::Transport(msg) => {
                AppError::backend(ErrorCode::BackendTransport, operation, msg)
            }
            ProductError::Decode(msg) => AppError::backend(ErrorCode::BackendDecode, operation, msg),
        }
    }
}

impl From<reqwest::Error> for ProductError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_decode() {
            ProductError::Decode(format!("Failed to decode upstream response: {}", err))
        } else {
            ProductError::Transport(format!("Failed to reach upstream: {}", err))
        }
    }
}
