//! # RemoteClient: HTTP access to the hosted backend
//!
//! One client per app. Clones share the HTTP connection pool, the endpoint
//! configuration and the current session, so the auth context and the list
//! controllers always talk with the same credentials.
//!
//! Every request carries the `apikey` header. The bearer token is the session's
//! access token when signed in and the anon key otherwise. A session that is
//! about to expire is refreshed before the request goes out. Concurrent
//! requests wait for a single refresh, and a refresh that returns after the
//! session was cleared or replaced is dropped.

use std::rc::Rc;
use std::sync::{Arc, RwLock};

use reqwest::{Method, RequestBuilder, Response, Url};
use serde::de::DeserializeOwned;
use store::{Clock, SystemClock};
use tokio::sync::Mutex;

use crate::auth::Session;
use crate::config::BackendConfig;
use crate::error::{extract_message, ApiError};

type SessionListener = Rc<dyn Fn(Option<&Session>)>;

#[derive(Clone)]
pub struct RemoteClient {
    http: reqwest::Client,
    config: Arc<BackendConfig>,
    session: Arc<RwLock<Option<Session>>>,
    refresh_lock: Arc<Mutex<()>>,
    on_session_change: Option<SessionListener>,
}

impl RemoteClient {
    pub fn new(config: BackendConfig) -> Self {
        Self {
            http: reqwest::Client::new(),
            config: Arc::new(config),
            session: Arc::new(RwLock::new(None)),
            refresh_lock: Arc::new(Mutex::new(())),
            on_session_change: None,
        }
    }

    pub fn from_env() -> Result<Self, ApiError> {
        Ok(Self::new(BackendConfig::from_env()?))
    }

    /// Called whenever the session is set, refreshed or cleared. The auth
    /// context uses this to persist the session.
    pub fn with_session_listener(mut self, listener: impl Fn(Option<&Session>) + 'static) -> Self {
        self.on_session_change = Some(Rc::new(listener));
        self
    }

    pub fn config(&self) -> &BackendConfig {
        &self.config
    }

    pub fn session(&self) -> Option<Session> {
        self.session.read().ok().and_then(|s| s.clone())
    }

    pub fn user_id(&self) -> Option<String> {
        self.session().map(|s| s.user.id)
    }

    pub fn set_session(&self, session: Option<Session>) {
        if let Ok(mut slot) = self.session.write() {
            *slot = session.clone();
        }
        if let Some(listener) = &self.on_session_change {
            listener(session.as_ref());
        }
    }

    /// Replace the session with `fresh` only if it still holds
    /// `spent_refresh_token`. A sign-out or another refresh in the meantime
    /// wins, and `fresh` is discarded.
    pub(crate) fn store_refreshed(&self, spent_refresh_token: &str, fresh: Session) -> Result<Session, ApiError> {
        {
            let Ok(mut slot) = self.session.write() else {
                return Err(ApiError::NotSignedIn);
            };
            if slot.as_ref().map(|s| s.refresh_token.as_str()) != Some(spent_refresh_token) {
                tracing::debug!("Session changed during refresh, dropping refreshed tokens");
                return Err(ApiError::NotSignedIn);
            }
            *slot = Some(fresh.clone());
        }
        if let Some(listener) = &self.on_session_change {
            listener(Some(&fresh));
        }
        Ok(fresh)
    }

    /// Clear the session if it is still the one whose refresh failed.
    fn expire_session(&self, failed_refresh_token: &str) {
        let current = self.session().map(|s| s.refresh_token);
        if current.as_deref() == Some(failed_refresh_token) {
            self.set_session(None);
        }
    }

    pub(crate) fn now_secs() -> u64 {
        SystemClock.now_millis() / 1000
    }

    /// Bearer token for the next request, refreshing an expiring session first.
    pub(crate) async fn access_token(&self) -> String {
        match self.session() {
            Some(session) if !session.is_expired(Self::now_secs()) => return session.access_token,
            Some(_) => {}
            None => return self.config.anon_key.clone(),
        }

        let _refreshing = self.refresh_lock.lock().await;
        // Whoever held the lock before may already have refreshed or signed out.
        let Some(session) = self.session() else {
            return self.config.anon_key.clone();
        };
        if !session.is_expired(Self::now_secs()) {
            return session.access_token;
        }
        match self.refresh_session().await {
            Ok(fresh) => fresh.access_token,
            Err(e) => {
                tracing::warn!("Session refresh failed, continuing signed out: {}", e);
                self.expire_session(&session.refresh_token);
                self.config.anon_key.clone()
            }
        }
    }

    pub(crate) fn request(&self, method: Method, url: Url, token: &str) -> RequestBuilder {
        self.http
            .request(method, url)
            .header("apikey", &self.config.anon_key)
            .bearer_auth(token)
    }

    /// A request authorized as the current user (or anonymously when signed out).
    pub(crate) async fn authorized(&self, method: Method, url: Url) -> RequestBuilder {
        let token = self.access_token().await;
        self.request(method, url, &token)
    }

    pub(crate) fn rest_url(&self, path: &str) -> Url {
        self.config.endpoint("rest", path)
    }

    pub(crate) fn auth_url(&self, path: &str) -> Url {
        self.config.endpoint("auth", path)
    }

    pub(crate) async fn send<T: DeserializeOwned>(&self, req: RequestBuilder) -> Result<T, ApiError> {
        let resp = Self::check(req.send().await?).await?;
        let body = resp.text().await?;
        Ok(serde_json::from_str(&body)?)
    }

    pub(crate) async fn send_empty(&self, req: RequestBuilder) -> Result<(), ApiError> {
        Self::check(req.send().await?).await?;
        Ok(())
    }

    async fn check(resp: Response) -> Result<Response, ApiError> {
        let status = resp.status();
        if status.is_success() {
            return Ok(resp);
        }
        let body = resp.text().await.unwrap_or_default();
        let message = extract_message(&body)
            .unwrap_or_else(|| status.canonical_reason().unwrap_or("request failed").to_string());
        tracing::debug!("Backend answered {}: {}", status, message);
        Err(ApiError::Status {
            status: status.as_u16(),
            message,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::auth::AuthUser;
    use std::cell::RefCell;

    fn client() -> RemoteClient {
        RemoteClient::new(BackendConfig::new("https://abc.backend.example", "anon-key").unwrap())
    }

    fn session(expires_at: u64) -> Session {
        Session {
            access_token: "user-token".into(),
            refresh_token: "refresh".into(),
            expires_at,
            user: AuthUser {
                id: "u1".into(),
                email: Some("tech@lifts.example".into()),
                email_confirmed_at: None,
            },
        }
    }

    #[test]
    fn test_headers_for_signed_out_request() {
        let client = client();
        let req = client
            .request(Method::GET, client.rest_url("profiles"), "anon-key")
            .build()
            .unwrap();
        assert_eq!(req.headers()["apikey"], "anon-key");
        assert_eq!(req.headers()["authorization"], "Bearer anon-key");
        assert_eq!(req.url().as_str(), "https://abc.backend.example/rest/v1/profiles");
    }

    #[tokio::test]
    async fn test_valid_session_token_is_used() {
        let client = client();
        assert_eq!(client.access_token().await, "anon-key");

        client.set_session(Some(session(RemoteClient::now_secs() + 3600)));
        assert_eq!(client.access_token().await, "user-token");
        assert_eq!(client.user_id().as_deref(), Some("u1"));
    }

    #[test]
    fn test_clones_share_session_and_notify() {
        let seen = Rc::new(RefCell::new(Vec::new()));
        let sink = seen.clone();
        let client = client().with_session_listener(move |s| {
            sink.borrow_mut().push(s.map(|s| s.user.id.clone()));
        });
        let other = client.clone();

        client.set_session(Some(session(10)));
        assert_eq!(other.user_id().as_deref(), Some("u1"));

        other.set_session(None);
        assert_eq!(client.session(), None);
        assert_eq!(*seen.borrow(), vec![Some("u1".to_string()), None]);
    }

    #[tokio::test]
    async fn test_waiting_request_uses_the_session_refreshed_meanwhile() {
        let client = client();
        client.set_session(Some(session(0)));

        let held = client.refresh_lock.lock().await;
        let (token, ()) = tokio::join!(client.access_token(), async {
            let mut fresh = session(RemoteClient::now_secs() + 3600);
            fresh.access_token = "fresh-token".into();
            client.set_session(Some(fresh));
            drop(held);
        });
        assert_eq!(token, "fresh-token");
    }

    #[test]
    fn test_refresh_landing_after_sign_out_is_dropped() {
        let seen = Rc::new(RefCell::new(Vec::new()));
        let sink = seen.clone();
        let client = client().with_session_listener(move |s| {
            sink.borrow_mut().push(s.map(|s| s.access_token.clone()));
        });
        client.set_session(Some(session(0)));
        client.set_session(None);

        let mut fresh = session(RemoteClient::now_secs() + 3600);
        fresh.access_token = "fresh-token".into();
        fresh.refresh_token = "refresh-2".into();
        assert!(matches!(client.store_refreshed("refresh", fresh), Err(ApiError::NotSignedIn)));

        assert_eq!(client.session(), None);
        assert_eq!(*seen.borrow(), vec![Some("user-token".to_string()), None]);
    }

    #[test]
    fn test_refresh_is_stored_while_its_token_is_current() {
        let seen = Rc::new(RefCell::new(Vec::new()));
        let sink = seen.clone();
        let client = client().with_session_listener(move |s| {
            sink.borrow_mut().push(s.map(|s| s.refresh_token.clone()));
        });
        client.set_session(Some(session(0)));

        let mut fresh = session(RemoteClient::now_secs() + 3600);
        fresh.refresh_token = "refresh-2".into();
        let stored = client.store_refreshed("refresh", fresh).unwrap();
        assert_eq!(stored.refresh_token, "refresh-2");
        assert_eq!(client.session().map(|s| s.refresh_token).as_deref(), Some("refresh-2"));

        // The spent token cannot be used to store a second result.
        let again = session(RemoteClient::now_secs() + 3600);
        assert!(client.store_refreshed("refresh", again).is_err());
        assert_eq!(
            *seen.borrow(),
            vec![Some("refresh".to_string()), Some("refresh-2".to_string())]
        );
    }

    #[test]
    fn test_failed_refresh_only_clears_its_own_session() {
        let client = client();
        let mut newer = session(RemoteClient::now_secs() + 3600);
        newer.refresh_token = "refresh-2".into();
        client.set_session(Some(newer));

        client.expire_session("refresh");
        assert!(client.session().is_some());

        client.expire_session("refresh-2");
        assert_eq!(client.session(), None);
    }
}
