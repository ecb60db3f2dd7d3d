//! # Authentication against the backend's auth service
//!
//! All flows are plain JSON calls under `/auth/v1`. A successful grant is
//! stored on the [`RemoteClient`] with [`RemoteClient::set_session`], which
//! notifies the session listener so the caller can persist it.
//!
//! | Operation | Endpoint |
//! |-----------|----------|
//! | [`sign_in_with_password`](RemoteClient::sign_in_with_password) | `POST token?grant_type=password` |
//! | [`sign_up`](RemoteClient::sign_up) | `POST signup` |
//! | [`refresh_session`](RemoteClient::refresh_session) | `POST token?grant_type=refresh_token` |
//! | [`reset_password_for_email`](RemoteClient::reset_password_for_email) | `POST recover` |
//! | [`update_password`](RemoteClient::update_password) | `PUT user` |
//! | [`resend_verification`](RemoteClient::resend_verification) | `POST resend` |
//! | [`sign_out`](RemoteClient::sign_out) | `POST logout` |

mod oauth;
mod session;

pub use oauth::OAuthProvider;
pub use session::{parse_link_fragment, AuthUser, LinkKind, LinkTokens, Session, EXPIRY_LEEWAY_SECS};

use reqwest::Method;
use serde_json::{json, Value};
use store::forms::Registration;

use crate::client::RemoteClient;
use crate::error::ApiError;
use session::TokenResponse;

/// Result of a sign-up request.
#[derive(Debug, Clone, PartialEq)]
pub enum SignUpOutcome {
    /// Email confirmation is off; the account is usable right away.
    SignedIn(Session),
    /// A verification email was sent; no session until the link is followed.
    VerificationRequired { email: String },
}

/// The signup endpoint answers with a token grant when the account is usable
/// immediately and with the bare user otherwise.
fn parse_sign_up(body: Value, email: &str, now_secs: u64) -> Result<SignUpOutcome, ApiError> {
    if body.get("access_token").is_some_and(|t| !t.is_null()) {
        let token: TokenResponse = serde_json::from_value(body)?;
        return Ok(SignUpOutcome::SignedIn(token.into_session(now_secs)));
    }
    Ok(SignUpOutcome::VerificationRequired {
        email: email.to_string(),
    })
}

impl RemoteClient {
    pub async fn sign_in_with_password(&self, email: &str, password: &str) -> Result<Session, ApiError> {
        let mut url = self.auth_url("token");
        url.query_pairs_mut().append_pair("grant_type", "password");
        let req = self
            .request(Method::POST, url, &self.config().anon_key)
            .json(&json!({ "email": email, "password": password }));
        let token: TokenResponse = self.send(req).await?;
        let session = token.into_session(Self::now_secs());
        tracing::info!("Signed in as {}", session.user.id);
        self.set_session(Some(session.clone()));
        Ok(session)
    }

    /// Create an account. The profile metadata travels as user data so the
    /// backend can create the matching `profiles` row.
    pub async fn sign_up(&self, registration: &Registration, redirect_to: &str) -> Result<SignUpOutcome, ApiError> {
        let mut url = self.auth_url("signup");
        url.query_pairs_mut().append_pair("redirect_to", redirect_to);
        let req = self
            .request(Method::POST, url, &self.config().anon_key)
            .json(&json!({
                "email": registration.email,
                "password": registration.password,
                "data": {
                    "full_name": registration.full_name,
                    "role": registration.role,
                    "company_name": registration.company_name,
                },
            }));
        let body: Value = self.send(req).await?;
        let outcome = parse_sign_up(body, &registration.email, Self::now_secs())?;
        match &outcome {
            SignUpOutcome::SignedIn(session) => {
                tracing::info!("Registered and signed in as {}", session.user.id);
                self.set_session(Some(session.clone()));
            }
            SignUpOutcome::VerificationRequired { .. } => {
                tracing::info!("Registered, waiting for email verification");
            }
        }
        Ok(outcome)
    }

    /// Exchange the stored refresh token for a new session.
    pub async fn refresh_session(&self) -> Result<Session, ApiError> {
        let refresh_token = self.session().ok_or(ApiError::NotSignedIn)?.refresh_token;
        let mut url = self.auth_url("token");
        url.query_pairs_mut().append_pair("grant_type", "refresh_token");
        let req = self
            .request(Method::POST, url, &self.config().anon_key)
            .json(&json!({ "refresh_token": refresh_token }));
        let token: TokenResponse = self.send(req).await?;
        let session = self.store_refreshed(&refresh_token, token.into_session(Self::now_secs()))?;
        tracing::info!("Session refreshed for {}", session.user.id);
        Ok(session)
    }

    /// Send a recovery email whose link lands on `redirect_to`.
    pub async fn reset_password_for_email(&self, email: &str, redirect_to: &str) -> Result<(), ApiError> {
        let mut url = self.auth_url("recover");
        url.query_pairs_mut().append_pair("redirect_to", redirect_to);
        let req = self
            .request(Method::POST, url, &self.config().anon_key)
            .json(&json!({ "email": email }));
        self.send_empty(req).await
    }

    /// Set a new password for the signed-in user (normally the session
    /// established by a recovery link).
    pub async fn update_password(&self, password: &str) -> Result<AuthUser, ApiError> {
        if self.session().is_none() {
            return Err(ApiError::NotSignedIn);
        }
        let req = self
            .authorized(Method::PUT, self.auth_url("user"))
            .await
            .json(&json!({ "password": password }));
        let user = self.send(req).await?;
        tracing::info!("Password updated");
        Ok(user)
    }

    pub async fn get_user(&self, access_token: &str) -> Result<AuthUser, ApiError> {
        let req = self.request(Method::GET, self.auth_url("user"), access_token);
        self.send(req).await
    }

    pub async fn resend_verification(&self, email: &str, redirect_to: &str) -> Result<(), ApiError> {
        let mut url = self.auth_url("resend");
        url.query_pairs_mut().append_pair("redirect_to", redirect_to);
        let req = self
            .request(Method::POST, url, &self.config().anon_key)
            .json(&json!({ "type": "signup", "email": email }));
        self.send_empty(req).await
    }

    /// Complete the session carried by a verification, recovery or OAuth link.
    pub async fn session_from_link(&self, tokens: LinkTokens) -> Result<Session, ApiError> {
        let user = self.get_user(&tokens.access_token).await?;
        let session = Session {
            access_token: tokens.access_token,
            refresh_token: tokens.refresh_token,
            expires_at: tokens.expires_at,
            user,
        };
        tracing::info!("Session established from {:?} link", tokens.kind);
        self.set_session(Some(session.clone()));
        Ok(session)
    }

    /// Revoke the session remotely and forget it locally. The local session is
    /// cleared even when the remote call fails.
    pub async fn sign_out(&self) -> Result<(), ApiError> {
        let Some(session) = self.session() else {
            return Ok(());
        };
        self.set_session(None);
        let req = self.request(Method::POST, self.auth_url("logout"), &session.access_token);
        let result = self.send_empty(req).await;
        match &result {
            Ok(()) => tracing::info!("Signed out {}", session.user.id),
            Err(e) => tracing::warn!("Remote sign-out failed: {}", e),
        }
        result
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sign_up_with_session() {
        let body = json!({
            "access_token": "at",
            "refresh_token": "rt",
            "expires_in": 3600,
            "user": {"id": "u9", "email": "new@lifts.example"}
        });
        match parse_sign_up(body, "new@lifts.example", 50).unwrap() {
            SignUpOutcome::SignedIn(session) => {
                assert_eq!(session.user.id, "u9");
                assert_eq!(session.expires_at, 3_650);
            }
            other => panic!("expected a session, got {other:?}"),
        }
    }

    #[test]
    fn test_sign_up_needing_verification() {
        let body = json!({
            "id": "u9",
            "email": "new@lifts.example",
            "confirmation_sent_at": "2024-05-01T10:00:00Z"
        });
        assert_eq!(
            parse_sign_up(body, "new@lifts.example", 0).unwrap(),
            SignUpOutcome::VerificationRequired {
                email: "new@lifts.example".into()
            }
        );

        let null_session = json!({ "access_token": null, "user": {"id": "u9"} });
        assert!(matches!(
            parse_sign_up(null_session, "x@y.z", 0).unwrap(),
            SignUpOutcome::VerificationRequired { .. }
        ));
    }

    #[tokio::test]
    async fn test_refresh_without_session_is_rejected() {
        let client = RemoteClient::new(crate::config::BackendConfig::new("https://x.example", "k").unwrap());
        assert!(matches!(client.refresh_session().await, Err(ApiError::NotSignedIn)));
        assert!(matches!(client.update_password("long enough").await, Err(ApiError::NotSignedIn)));
        assert!(client.sign_out().await.is_ok());
    }
}
