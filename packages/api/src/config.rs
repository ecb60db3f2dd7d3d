//! Backend endpoint configuration from environment variables.
//!
//! Native builds read `BACKEND_URL` and `BACKEND_ANON_KEY` at runtime (after
//! loading `.env` with `dotenvy`). The browser has no process environment, so
//! the values are baked in when the WASM bundle is compiled.

use reqwest::Url;

use crate::error::ApiError;

pub const URL_VAR: &str = "BACKEND_URL";
pub const ANON_KEY_VAR: &str = "BACKEND_ANON_KEY";

#[derive(Debug, Clone, PartialEq)]
pub struct BackendConfig {
    pub url: Url,
    /// Public (anon) key sent as `apikey` on every request.
    pub anon_key: String,
}

impl BackendConfig {
    pub fn new(url: &str, anon_key: &str) -> Result<Self, ApiError> {
        let url = Url::parse(url.trim().trim_end_matches('/'))
            .map_err(|e| ApiError::Config(format!("{URL_VAR} is not a valid URL: {e}")))?;
        if anon_key.trim().is_empty() {
            return Err(ApiError::Config(format!("{ANON_KEY_VAR} is empty")));
        }
        Ok(Self {
            url,
            anon_key: anon_key.trim().to_string(),
        })
    }

    pub fn from_env() -> Result<Self, ApiError> {
        #[cfg(not(target_arch = "wasm32"))]
        dotenvy::dotenv().ok();

        let url = lookup(URL_VAR, option_env!("BACKEND_URL"))
            .ok_or_else(|| ApiError::Config(format!("{URL_VAR} not set")))?;
        let anon_key = lookup(ANON_KEY_VAR, option_env!("BACKEND_ANON_KEY"))
            .ok_or_else(|| ApiError::Config(format!("{ANON_KEY_VAR} not set")))?;
        Self::new(&url, &anon_key)
    }

    /// `<base>/<service>/v1/<path>`, e.g. `endpoint("rest", "elevators")`.
    pub fn endpoint(&self, service: &str, path: &str) -> Url {
        let mut url = self.url.clone();
        {
            let base = url.path().trim_end_matches('/').to_string();
            url.set_path(&format!("{base}/{service}/v1/{}", path.trim_start_matches('/')));
        }
        url
    }
}

fn lookup(name: &str, baked: Option<&'static str>) -> Option<String> {
    #[cfg(not(target_arch = "wasm32"))]
    if let Ok(value) = std::env::var(name) {
        return Some(value);
    }
    #[cfg(target_arch = "wasm32")]
    let _ = name;
    baked.map(str::to_string)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_endpoint_paths() {
        let config = BackendConfig::new("https://abc.backend.example/", "anon").unwrap();
        assert_eq!(
            config.endpoint("rest", "elevators").as_str(),
            "https://abc.backend.example/rest/v1/elevators"
        );
        assert_eq!(
            config.endpoint("auth", "/token").as_str(),
            "https://abc.backend.example/auth/v1/token"
        );
    }

    #[test]
    fn test_prefixed_base_is_kept() {
        let config = BackendConfig::new("http://localhost:54321/proxy", "anon").unwrap();
        assert_eq!(
            config.endpoint("rest", "rpc/get_elevators").as_str(),
            "http://localhost:54321/proxy/rest/v1/rpc/get_elevators"
        );
    }

    #[test]
    fn test_rejects_bad_values() {
        assert!(matches!(BackendConfig::new("not a url", "k"), Err(ApiError::Config(_))));
        assert!(matches!(
            BackendConfig::new("https://x.example", " "),
            Err(ApiError::Config(_))
        ));
    }
}
