//! Error type shared by every [`crate::Backend`] operation.

use thiserror::Error;

/// Fallback text shown when the backend gave no usable message.
pub const GENERIC_ERROR_MESSAGE: &str = "Something went wrong. Please try again.";

/// Errors returned by remote operations.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum BackendError {
    /// The backend answered and rejected the request with a message.
    #[error("{0}")]
    Remote(String),
    /// The request never produced a usable answer (network, CORS, timeout).
    #[error("network error: {0}")]
    Transport(String),
    /// No session, or the session was rejected.
    #[error("not authenticated")]
    Unauthorized,
    #[error("{0} not found")]
    NotFound(String),
    /// The answer arrived but did not have the expected shape.
    #[error("unexpected response: {0}")]
    Decode(String),
}

impl BackendError {
    /// Message suitable for a toast: the server's own text when there is one,
    /// a generic fallback otherwise.
    pub fn user_message(&self) -> String {
        match self {
            BackendError::Remote(msg) if !msg.trim().is_empty() => msg.clone(),
            BackendError::Unauthorized => "Your session has expired. Please sign in again.".to_string(),
            BackendError::NotFound(what) => format!("{what} not found"),
            _ => GENERIC_ERROR_MESSAGE.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn remote_message_is_passed_through() {
        let err = BackendError::Remote("Serial number already exists".into());
        assert_eq!(err.user_message(), "Serial number already exists");
    }

    #[test]
    fn blank_or_internal_errors_use_fallback() {
        assert_eq!(BackendError::Remote("  ".into()).user_message(), GENERIC_ERROR_MESSAGE);
        assert_eq!(
            BackendError::Transport("connection reset".into()).user_message(),
            GENERIC_ERROR_MESSAGE
        );
        assert_eq!(
            BackendError::Decode("missing field `id`".into()).user_message(),
            GENERIC_ERROR_MESSAGE
        );
    }
}
