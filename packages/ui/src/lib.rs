//! Shared UI for the workspace: the session context, form controls, toasts
//! and every page-level view.

use dioxus::prelude::*;

pub mod components;

// Re-export icon library
pub use dioxus_free_icons::Icon;
pub mod icons {
    pub use dioxus_free_icons::icons::fa_solid_icons::*;

    pub mod brands {
        pub use dioxus_free_icons::icons::fa_brands_icons::*;
    }
}

mod auth;
pub use auth::{
    complete_sign_in, sign_out, use_app_config, use_auth, use_client, AuthProvider, AuthState, LogoutButton,
    OAuthButtons,
};

mod resume;
pub use resume::use_resume_count;

pub mod views;

pub const COMPONENTS_CSS: Asset = components::COMPONENTS_CSS;
pub const VIEWS_CSS: Asset = asset!("/assets/styling/views.css");
