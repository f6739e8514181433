//! Type-safe error codes attached to structured error logs.
//!
//! Codes never appear in response bodies (clients get the envelope); they are
//! emitted as the `error_code` field on every error log line so failures can
//! be grouped in log aggregation.
//!
//! ```rust
//! use axum_helpers::errors::ErrorCode;
//!
//! let code = ErrorCode::ValidationError;
//! assert_eq!(code.as_str(), "VALIDATION_ERROR");
//! assert_eq!(code.code(), 1001);
//! ```

use serde::{Deserialize, Serialize};

/// Error categories, grouped by numeric range:
/// - 1000-1999: client errors
/// - 2000-2999: upstream/backend errors
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ErrorCode {
    /// Request validation failed
    ValidationError,
    /// Request body could not be parsed as JSON
    InvalidJson,
    /// Requested resource was not found
    NotFound,
    /// A backend is missing required configuration
    BackendConfig,
    /// A backend could not be reached or rejected the request
    BackendTransport,
    /// A backend answered with a payload we could not decode
    BackendDecode,
}

impl ErrorCode {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::ValidationError => "VALIDATION_ERROR",
            Self::InvalidJson => "INVALID_JSON",
            Self::NotFound => "NOT_FOUND",
            Self::BackendConfig => "BACKEND_CONFIG",
            Self::BackendTransport => "BACKEND_TRANSPORT",
            Self::BackendDecode => "BACKEND_DECODE",
        }
    }

    /// Integer code used in structured logs
    pub fn code(&self) -> i32 {
        match self {
            Self::ValidationError => 1001,
            Self::InvalidJson => 1003,
            Self::NotFound => 1004,
            Self::BackendConfig => 2002,
            Self::BackendTransport => 2003,
            Self::BackendDecode => 2010,
        }
    }
}

impl std::fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_code_string_representation() {
        assert_eq!(ErrorCode::ValidationError.as_str(), "VALIDATION_ERROR");
        assert_eq!(ErrorCode::BackendConfig.to_string(), "BACKEND_CONFIG");
    }

    #[test]
    fn test_error_code_ranges() {
        assert_eq!(ErrorCode::NotFound.code(), 1004);
        assert!((2000..3000).contains(&ErrorCode::BackendTransport.code()));
    }

    #[test]
    fn test_error_code_serialization_matches_as_str() {
        let json = serde_json::to_string(&ErrorCode::BackendDecode).unwrap();
        assert_eq!(json, "\"BACKEND_DECODE\"");

        let code: ErrorCode = serde_json::from_str("\"INVALID_JSON\"").unwrap();
        assert_eq!(code, ErrorCode::InvalidJson);
    }
}
