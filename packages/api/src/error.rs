//! Errors produced by the remote client.

use store::error::GENERIC_ERROR_MESSAGE;
use store::BackendError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ApiError {
    #[error("configuration error: {0}")]
    Config(String),
    #[error("request failed: {0}")]
    Request(#[from] reqwest::Error),
    /// Non-success HTTP status, with the message extracted from the body.
    #[error("{message} (status {status})")]
    Status { status: u16, message: String },
    #[error("invalid response: {0}")]
    Decode(#[from] serde_json::Error),
    #[error("not found: {0}")]
    NotFound(String),
    #[error("not signed in")]
    NotSignedIn,
}

impl ApiError {
    /// Text for a notification: the backend's message when it sent one.
    pub fn user_message(&self) -> String {
        match self {
            ApiError::Status { message, .. } if !message.trim().is_empty() => message.clone(),
            ApiError::NotSignedIn => "Please sign in to continue.".to_string(),
            _ => GENERIC_ERROR_MESSAGE.to_string(),
        }
    }
}

impl From<ApiError> for BackendError {
    fn from(err: ApiError) -> Self {
        match err {
            ApiError::Status { status: 401, .. } | ApiError::NotSignedIn => BackendError::Unauthorized,
            ApiError::Status { message, .. } => BackendError::Remote(message),
            ApiError::Request(e) => BackendError::Transport(e.to_string()),
            ApiError::Decode(e) => BackendError::Decode(e.to_string()),
            ApiError::Config(msg) => BackendError::Transport(msg),
            ApiError::NotFound(what) => BackendError::NotFound(what),
        }
    }
}

/// Pull a human-readable message out of an error body.
///
/// Row endpoints answer `{"message": ...}`, auth endpoints use
/// `{"msg": ...}` or `{"error": ..., "error_description": ...}`.
pub(crate) fn extract_message(body: &str) -> Option<String> {
    let value: serde_json::Value = serde_json::from_str(body).ok()?;
    ["error_description", "msg", "message", "error"]
        .iter()
        .find_map(|key| value.get(*key)?.as_str())
        .map(str::trim)
        .filter(|m| !m.is_empty())
        .map(str::to_string)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extracts_known_shapes() {
        assert_eq!(
            extract_message(r#"{"error":"invalid_grant","error_description":"Invalid login credentials"}"#).as_deref(),
            Some("Invalid login credentials")
        );
        assert_eq!(
            extract_message(r#"{"code":422,"msg":"User already registered"}"#).as_deref(),
            Some("User already registered")
        );
        assert_eq!(
            extract_message(r#"{"code":"23505","message":"duplicate key value","details":null}"#).as_deref(),
            Some("duplicate key value")
        );
        assert_eq!(extract_message("<html>bad gateway</html>"), None);
        assert_eq!(extract_message(r#"{"message":"  "}"#), None);
    }

    #[test]
    fn test_status_maps_to_backend_error() {
        let unauthorized = ApiError::Status {
            status: 401,
            message: "JWT expired".into(),
        };
        assert_eq!(BackendError::from(unauthorized), BackendError::Unauthorized);

        let rejected = ApiError::Status {
            status: 409,
            message: "duplicate key value".into(),
        };
        assert_eq!(
            BackendError::from(rejected),
            BackendError::Remote("duplicate key value".into())
        );
    }

    #[test]
    fn test_user_message_falls_back() {
        let err = ApiError::Status {
            status: 500,
            message: String::new(),
        };
        assert_eq!(err.user_message(), GENERIC_ERROR_MESSAGE);
        assert_eq!(ApiError::Config("x".into()).user_message(), GENERIC_ERROR_MESSAGE);
    }
}
