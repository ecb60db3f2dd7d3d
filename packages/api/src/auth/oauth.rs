//! Third-party sign-in providers.
//!
//! The backend runs the provider flow itself; the app only sends the browser
//! to the authorize URL and later picks the tokens out of the return URL's
//! fragment.

use reqwest::Url;

use crate::client::RemoteClient;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OAuthProvider {
    Google,
    GitHub,
}

impl OAuthProvider {
    pub const ALL: [OAuthProvider; 2] = [OAuthProvider::Google, OAuthProvider::GitHub];

    pub fn as_str(&self) -> &'static str {
        match self {
            OAuthProvider::Google => "google",
            OAuthProvider::GitHub => "github",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            OAuthProvider::Google => "Continue with Google",
            OAuthProvider::GitHub => "Continue with GitHub",
        }
    }
}

impl RemoteClient {
    pub fn oauth_authorize_url(&self, provider: OAuthProvider, redirect_to: &str) -> Url {
        let mut url = self.auth_url("authorize");
        url.query_pairs_mut()
            .append_pair("provider", provider.as_str())
            .append_pair("redirect_to", redirect_to);
        url
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::BackendConfig;

    #[test]
    fn test_authorize_url() {
        let client = RemoteClient::new(BackendConfig::new("https://abc.backend.example", "k").unwrap());
        let url = client.oauth_authorize_url(OAuthProvider::GitHub, "http://localhost:8080/dashboard");
        assert_eq!(
            url.as_str(),
            "https://abc.backend.example/auth/v1/authorize?provider=github&redirect_to=http%3A%2F%2Flocalhost%3A8080%2Fdashboard"
        );
    }
}
