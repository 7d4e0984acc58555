//! Error types for the compute API.

use hyper::StatusCode;
use thiserror::Error;

/// Result type alias using [`ApiError`].
pub type Result<T> = std::result::Result<T, ApiError>;

/// Unified error type for request handling.
///
/// Validation errors carry the message returned to the caller. The 500/503
/// categories keep their detail out of the response body; callers get a
/// generic message while the detail goes to the error log.
#[derive(Error, Debug)]
pub enum ApiError {
    /// Request body is absent, not valid JSON, or not a JSON object.
    #[error("Request body must be a JSON object")]
    InvalidBody,

    /// Zero or more than one recognized operation key present.
    #[error("Exactly one operation key is required, found {found}")]
    AmbiguousOrMissingOperation {
        /// Number of recognized keys found in the body.
        found: usize,
    },

    /// The selected operation's value fails its shape contract.
    #[error("{0}")]
    InvalidOperationValue(String),

    /// Every configured model attempt failed.
    #[error("External model service unavailable: {0}")]
    ExternalServiceUnavailable(String),

    /// Unexpected failure during execution.
    #[error("Internal error: {0}")]
    Internal(String),
}

impl ApiError {
    /// HTTP status code for this error.
    pub const fn status(&self) -> StatusCode {
        match self {
            Self::InvalidBody
            | Self::AmbiguousOrMissingOperation { .. }
            | Self::InvalidOperationValue(_) => StatusCode::BAD_REQUEST,
            Self::ExternalServiceUnavailable(_) => StatusCode::SERVICE_UNAVAILABLE,
            Self::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Message placed in the response envelope.
    ///
    /// Validation errors surface as-is; server-side failures are reduced to
    /// fixed messages so internal detail never reaches the caller.
    pub fn public_message(&self) -> String {
        match self {
            Self::InvalidBody
            | Self::AmbiguousOrMissingOperation { .. }
            | Self::InvalidOperationValue(_) => self.to_string(),
            Self::ExternalServiceUnavailable(_) => {
                "AI service is temporarily unavailable".to_string()
            }
            Self::Internal(_) => "Internal server error".to_string(),
        }
    }

    /// Creates an internal error with the given message.
    pub fn internal(message: impl Into<String>) -> Self {
        Self::Internal(message.into())
    }

    /// Creates an invalid-value error with the given message.
    pub fn invalid_value(message: impl Into<String>) -> Self {
        Self::InvalidOperationValue(message.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_mapping() {
        assert_eq!(ApiError::InvalidBody.status(), StatusCode::BAD_REQUEST);
        assert_eq!(
            ApiError::AmbiguousOrMissingOperation { found: 2 }.status(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            ApiError::invalid_value("bad").status(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            ApiError::ExternalServiceUnavailable("quota".into()).status(),
            StatusCode::SERVICE_UNAVAILABLE
        );
        assert_eq!(
            ApiError::internal("boom").status(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn test_public_message_hides_internal_detail() {
        let err = ApiError::internal("lock poisoned at dispatch.rs:42");
        assert_eq!(err.public_message(), "Internal server error");

        let err = ApiError::ExternalServiceUnavailable("model x: 429".into());
        assert_eq!(err.public_message(), "AI service is temporarily unavailable");

        let err = ApiError::invalid_value("'fibonacci' must be a non-negative integer");
        assert_eq!(
            err.public_message(),
            "'fibonacci' must be a non-negative integer"
        );
    }
}
