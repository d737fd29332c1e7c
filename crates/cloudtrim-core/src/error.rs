//! Error types for the CloudTrim client.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// A shared error type for every call that crosses the API boundary.
///
/// The API client never recovers from any of these; they propagate to the
/// calling use case, which records a message in the store.
#[derive(Error, Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum ApiError {
    /// The server answered with a non-2xx status.
    #[error("Request failed with status {status}: {message}")]
    Request { status: u16, message: String },

    /// The request never reached the server (DNS, connect, reset, timeout).
    #[error("Network error: {0}")]
    Network(String),

    /// The response body was not the JSON shape we expected.
    #[error("Decode error: {0}")]
    Decode(String),

    /// The caller's cancellation token fired before the call completed.
    #[error("Request cancelled")]
    Cancelled,

    /// The call was refused locally before any request was sent.
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// Credential or configuration storage failure.
    #[error("Storage error: {0}")]
    Storage(String),
}

impl ApiError {
    // ============================================================================
    // Constructor helpers
    // ============================================================================

    /// Creates a Request error
    pub fn request(status: u16, message: impl Into<String>) -> Self {
        Self::Request {
            status,
            message: message.into(),
        }
    }

    /// Creates a Network error
    pub fn network(message: impl Into<String>) -> Self {
        Self::Network(message.into())
    }

    /// Creates a Decode error
    pub fn decode(message: impl Into<String>) -> Self {
        Self::Decode(message.into())
    }

    /// Creates an InvalidInput error
    pub fn invalid_input(message: impl Into<String>) -> Self {
        Self::InvalidInput(message.into())
    }

    /// Creates a Storage error
    pub fn storage(message: impl Into<String>) -> Self {
        Self::Storage(message.into())
    }

    // ============================================================================
    // Type checking methods
    // ============================================================================

    /// Check if this is a Cancelled error
    pub fn is_cancelled(&self) -> bool {
        matches!(self, Self::Cancelled)
    }

    /// HTTP status carried by a Request error.
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Request { status, .. } => Some(*status),
            _ => None,
        }
    }

    /// Check if the server rejected our credentials.
    pub fn is_unauthorized(&self) -> bool {
        matches!(self.status(), Some(401) | Some(403))
    }

    /// Text suitable for showing to a user and for recording in the store.
    ///
    /// Request errors show the server-supplied message only; every other
    /// variant uses its display form.
    pub fn user_message(&self) -> String {
        match self {
            Self::Request { message, .. } => message.clone(),
            other => other.to_string(),
        }
    }
}

impl From<serde_json::Error> for ApiError {
    fn from(err: serde_json::Error) -> Self {
        Self::Decode(err.to_string())
    }
}

impl From<std::io::Error> for ApiError {
    fn from(err: std::io::Error) -> Self {
        Self::Storage(format!("{} (kind: {:?})", err, err.kind()))
    }
}

/// A type alias for `Result<T, ApiError>`.
pub type Result<T> = std::result::Result<T, ApiError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_user_message_prefers_server_message() {
        let err = ApiError::request(401, "Invalid credentials");
        assert_eq!(err.user_message(), "Invalid credentials");
        assert_eq!(err.status(), Some(401));
        assert!(err.is_unauthorized());
    }

    #[test]
    fn test_user_message_for_other_variants() {
        assert_eq!(ApiError::Cancelled.user_message(), "Request cancelled");
        assert_eq!(
            ApiError::network("connection refused").user_message(),
            "Network error: connection refused"
        );
        assert_eq!(ApiError::decode("eof").status(), None);
    }

    #[test]
    fn test_from_serde_json_error() {
        let err = serde_json::from_str::<u32>("not json").unwrap_err();
        let api_err: ApiError = err.into();
        assert!(matches!(api_err, ApiError::Decode(_)));
    }
}
