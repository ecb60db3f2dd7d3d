//! # Application configuration: `liftcare.toml`
//!
//! Tunables for the client, embedded into the web build at compile time.
//!
//! ## Structure
//!
//! ```toml
//! [cache]
//! ttl_secs = 120          # freshness window of the elevator list
//!
//! [refresh]
//! on_resume = true        # re-read the list when the tab becomes visible
//!
//! [auth]
//! site_url = "http://localhost:8080"   # base for reset / verification links
//! ```
//!
//! All structs derive `Default` with the production values, so a missing
//! section (or an empty file) is the default configuration.

use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::cache::DEFAULT_TTL;

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct AppConfig {
    #[serde(default)]
    pub cache: CacheConfig,
    #[serde(default)]
    pub refresh: RefreshConfig,
    #[serde(default)]
    pub auth: AuthConfig,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct CacheConfig {
    #[serde(default = "default_ttl_secs")]
    pub ttl_secs: u64,
}

fn default_ttl_secs() -> u64 {
    DEFAULT_TTL.as_secs()
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            ttl_secs: default_ttl_secs(),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct RefreshConfig {
    #[serde(default = "default_true")]
    pub on_resume: bool,
}

fn default_true() -> bool {
    true
}

impl Default for RefreshConfig {
    fn default() -> Self {
        Self { on_resume: true }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct AuthConfig {
    /// Public origin of the app; email links redirect back here.
    #[serde(default = "default_site_url")]
    pub site_url: String,
}

fn default_site_url() -> String {
    "http://localhost:8080".to_string()
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self {
            site_url: default_site_url(),
        }
    }
}

impl AppConfig {
    pub fn filename() -> &'static str {
        "liftcare.toml"
    }

    pub fn from_toml(s: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(s)
    }

    pub fn to_toml(&self) -> Result<String, toml::ser::Error> {
        toml::to_string_pretty(self)
    }

    pub fn cache_ttl(&self) -> Duration {
        Duration::from_secs(self.cache.ttl_secs)
    }

    /// Absolute URL for an app route, e.g. `redirect_url("/reset-password")`.
    pub fn redirect_url(&self, path: &str) -> String {
        format!("{}{}", self.auth.site_url.trim_end_matches('/'), path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_document_is_default() {
        let config = AppConfig::from_toml("").unwrap();
        assert_eq!(config, AppConfig::default());
        assert_eq!(config.cache_ttl(), Duration::from_secs(120));
        assert!(config.refresh.on_resume);
    }

    #[test]
    fn partial_sections_keep_defaults() {
        let config = AppConfig::from_toml("[refresh]\non_resume = false\n\n[auth]\nsite_url = \"https://lifts.example/\"\n").unwrap();
        assert!(!config.refresh.on_resume);
        assert_eq!(config.cache.ttl_secs, 120);
        assert_eq!(
            config.redirect_url("/reset-password"),
            "https://lifts.example/reset-password"
        );
    }

    #[test]
    fn writes_back_what_it_reads() {
        let mut config = AppConfig::default();
        config.cache.ttl_secs = 30;
        let text = config.to_toml().unwrap();
        assert_eq!(AppConfig::from_toml(&text).unwrap(), config);
    }

    #[test]
    fn bad_types_are_rejected() {
        assert!(AppConfig::from_toml("[cache]\nttl_secs = \"two minutes\"").is_err());
    }
}
