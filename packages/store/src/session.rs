//! # Session persistence
//!
//! Keeps the serialized auth session between page loads so the app can
//! restore it on start. The browser build (`web` feature on WASM) stores it in
//! `localStorage`; everything else uses an in-process slot.
//!
//! Reads are forgiving: a missing, unreadable or malformed entry is treated as
//! "no session", and a malformed entry is removed.

use std::sync::{Arc, Mutex};

use serde::de::DeserializeOwned;
use serde::Serialize;

pub const SESSION_KEY: &str = "liftcare.session";

/// Storage for one serialized session value.
pub trait SessionStore {
    fn load_raw(&self) -> Option<String>;
    fn save_raw(&self, value: &str);
    fn clear(&self);

    fn load<T: DeserializeOwned>(&self) -> Option<T>
    where
        Self: Sized,
    {
        let raw = self.load_raw()?;
        match serde_json::from_str(&raw) {
            Ok(value) => Some(value),
            Err(e) => {
                tracing::warn!("Discarding unreadable stored session: {}", e);
                self.clear();
                None
            }
        }
    }

    fn save<T: Serialize>(&self, value: &T)
    where
        Self: Sized,
    {
        match serde_json::to_string(value) {
            Ok(raw) => self.save_raw(&raw),
            Err(e) => tracing::error!("Failed to serialize session: {}", e),
        }
    }
}

#[derive(Clone, Debug, Default)]
pub struct MemorySessionStore {
    slot: Arc<Mutex<Option<String>>>,
}

impl MemorySessionStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl SessionStore for MemorySessionStore {
    fn load_raw(&self) -> Option<String> {
        self.slot.lock().ok()?.clone()
    }

    fn save_raw(&self, value: &str) {
        if let Ok(mut slot) = self.slot.lock() {
            *slot = Some(value.to_string());
        }
    }

    fn clear(&self) {
        if let Ok(mut slot) = self.slot.lock() {
            *slot = None;
        }
    }
}

/// `window.localStorage` entry under [`SESSION_KEY`].
#[cfg(all(target_arch = "wasm32", feature = "web"))]
#[derive(Clone, Debug, Default)]
pub struct LocalSessionStore;

#[cfg(all(target_arch = "wasm32", feature = "web"))]
impl LocalSessionStore {
    fn storage() -> Option<web_sys::Storage> {
        web_sys::window()?.local_storage().ok()?
    }
}

#[cfg(all(target_arch = "wasm32", feature = "web"))]
impl SessionStore for LocalSessionStore {
    fn load_raw(&self) -> Option<String> {
        Self::storage()?.get_item(SESSION_KEY).ok()?
    }

    fn save_raw(&self, value: &str) {
        if let Some(storage) = Self::storage() {
            if storage.set_item(SESSION_KEY, value).is_err() {
                tracing::warn!("localStorage refused the session entry");
            }
        }
    }

    fn clear(&self) {
        if let Some(storage) = Self::storage() {
            let _ = storage.remove_item(SESSION_KEY);
        }
    }
}

/// The platform's session store.
#[cfg(all(target_arch = "wasm32", feature = "web"))]
pub fn platform_session_store() -> LocalSessionStore {
    LocalSessionStore
}

/// The platform's session store.
#[cfg(not(all(target_arch = "wasm32", feature = "web")))]
pub fn platform_session_store() -> MemorySessionStore {
    MemorySessionStore::new()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::Deserialize;

    #[derive(Debug, PartialEq, Serialize, Deserialize)]
    struct Token {
        access: String,
        expires_at: u64,
    }

    #[test]
    fn test_save_load_clear() {
        let store = MemorySessionStore::new();
        assert_eq!(store.load::<Token>(), None);

        let token = Token {
            access: "abc".into(),
            expires_at: 42,
        };
        store.save(&token);
        assert_eq!(store.load::<Token>(), Some(token));

        store.clear();
        assert_eq!(store.load::<Token>(), None);
    }

    #[test]
    fn test_malformed_entry_is_dropped() {
        let store = MemorySessionStore::new();
        store.save_raw("{not json");
        assert_eq!(store.load::<Token>(), None);
        assert_eq!(store.load_raw(), None);
    }

    #[test]
    fn test_clones_share_the_slot() {
        let store = MemorySessionStore::new();
        let other = store.clone();
        store.save_raw("\"x\"");
        assert_eq!(other.load::<String>().as_deref(), Some("x"));
    }
}
