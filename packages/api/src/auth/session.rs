//! Session types and token parsing.

use reqwest::Url;
use serde::{Deserialize, Serialize};

/// Seconds before expiry at which a session is already treated as expired.
pub const EXPIRY_LEEWAY_SECS: u64 = 60;

/// The authenticated user as returned by the auth service.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AuthUser {
    pub id: String,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub email_confirmed_at: Option<String>,
}

impl AuthUser {
    pub fn is_verified(&self) -> bool {
        self.email_confirmed_at.is_some()
    }
}

/// A signed-in session. Tokens are opaque to the app.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Session {
    pub access_token: String,
    pub refresh_token: String,
    /// Unix seconds.
    pub expires_at: u64,
    pub user: AuthUser,
}

impl Session {
    pub fn is_expired(&self, now_secs: u64) -> bool {
        now_secs + EXPIRY_LEEWAY_SECS >= self.expires_at
    }
}

/// Body of a successful token grant.
#[derive(Debug, Clone, Deserialize)]
pub(crate) struct TokenResponse {
    pub access_token: String,
    pub refresh_token: String,
    pub expires_in: u64,
    #[serde(default)]
    pub expires_at: Option<u64>,
    pub user: AuthUser,
}

impl TokenResponse {
    pub fn into_session(self, now_secs: u64) -> Session {
        Session {
            access_token: self.access_token,
            refresh_token: self.refresh_token,
            expires_at: self.expires_at.unwrap_or(now_secs + self.expires_in),
            user: self.user,
        }
    }
}

/// Why an email link brought the user back to the app.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LinkKind {
    Signup,
    Recovery,
    MagicLink,
    Other,
}

/// Tokens carried in the fragment of a verification or recovery link.
#[derive(Debug, Clone, PartialEq)]
pub struct LinkTokens {
    pub access_token: String,
    pub refresh_token: String,
    pub expires_at: u64,
    pub kind: LinkKind,
}

/// Parse `access_token=…&refresh_token=…&expires_in=…&type=…` (with or
/// without the leading `#`).
///
/// `Ok(None)` when the fragment carries no tokens, `Err` with the service's
/// description when the link itself reports an error (e.g. expired link).
pub fn parse_link_fragment(fragment: &str, now_secs: u64) -> Result<Option<LinkTokens>, String> {
    let fragment = fragment.trim_start_matches('#');
    if fragment.is_empty() {
        return Ok(None);
    }
    // Reuse the query parser for percent-decoding.
    let Ok(url) = Url::parse(&format!("http://link.invalid/?{fragment}")) else {
        return Ok(None);
    };
    let get = |key: &str| {
        url.query_pairs()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.into_owned())
    };

    if let Some(error) = get("error") {
        return Err(get("error_description").unwrap_or(error));
    }

    let (Some(access_token), Some(refresh_token)) = (get("access_token"), get("refresh_token")) else {
        return Ok(None);
    };
    let expires_at = get("expires_at")
        .and_then(|v| v.parse().ok())
        .or_else(|| get("expires_in").and_then(|v| v.parse::<u64>().ok()).map(|secs| now_secs + secs))
        .unwrap_or(now_secs + 3600);
    let kind = match get("type").as_deref() {
        Some("signup") => LinkKind::Signup,
        Some("recovery") => LinkKind::Recovery,
        Some("magiclink") => LinkKind::MagicLink,
        _ => LinkKind::Other,
    };

    Ok(Some(LinkTokens {
        access_token,
        refresh_token,
        expires_at,
        kind,
    }))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_token_response_without_expires_at() {
        let body = r#"{
            "access_token": "at", "token_type": "bearer", "expires_in": 3600,
            "refresh_token": "rt",
            "user": {"id": "u1", "email": "a@b.co", "email_confirmed_at": "2024-01-01T00:00:00Z"}
        }"#;
        let token: TokenResponse = serde_json::from_str(body).unwrap();
        let session = token.into_session(1_000);
        assert_eq!(session.expires_at, 4_600);
        assert!(session.user.is_verified());
        assert!(!session.is_expired(1_000));
        assert!(session.is_expired(4_540));
    }

    #[test]
    fn test_recovery_fragment() {
        let tokens = parse_link_fragment(
            "#access_token=abc&expires_in=3600&refresh_token=def&token_type=bearer&type=recovery",
            100,
        )
        .unwrap()
        .unwrap();
        assert_eq!(tokens.access_token, "abc");
        assert_eq!(tokens.refresh_token, "def");
        assert_eq!(tokens.expires_at, 3_700);
        assert_eq!(tokens.kind, LinkKind::Recovery);
    }

    #[test]
    fn test_fragment_error_is_reported() {
        let err = parse_link_fragment(
            "error=access_denied&error_code=otp_expired&error_description=Email+link+is+invalid+or+has+expired",
            0,
        )
        .unwrap_err();
        assert_eq!(err, "Email link is invalid or has expired");
    }

    #[test]
    fn test_fragment_without_tokens() {
        assert_eq!(parse_link_fragment("", 0), Ok(None));
        assert_eq!(parse_link_fragment("#section-2", 0), Ok(None));
    }
}
