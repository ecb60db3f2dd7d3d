//! # API crate: remote data client for LiftCare
//!
//! Talks to the hosted backend over HTTP: the auth service, table rows and
//! named procedures. [`RemoteClient`] implements [`store::Backend`], so the
//! list controllers in `store` run unchanged against the real service.
//!
//! ## Modules
//!
//! | Module | Purpose |
//! |--------|---------|
//! | [`auth`] | Password sign-in and sign-up, refresh, recovery, verification links, OAuth redirect URLs |
//! | [`config`] | Endpoint and anon key from the environment |
//! | [`db`] | `profiles` and `elevators` row access |
//! | [`error`] | [`ApiError`] and its mapping onto [`store::BackendError`] |
//! | `rpc` | Named procedures and the `Backend` implementation |

pub mod auth;
mod client;
pub mod config;
pub mod db;
pub mod error;
mod rpc;

pub use auth::{
    parse_link_fragment, AuthUser, LinkKind, LinkTokens, OAuthProvider, Session, SignUpOutcome,
};
pub use client::RemoteClient;
pub use config::BackendConfig;
pub use error::ApiError;
