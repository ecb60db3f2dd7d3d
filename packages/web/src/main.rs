use dioxus::prelude::*;

use store::AppConfig;
use ui::components::ToastProvider;
use ui::{use_auth, AuthProvider};
use views::{
    Dashboard, ForgotPassword, Login, NotFound, Profile, Protected, Register, ResetPassword, RoleDashboard,
    VerifyEmail,
};

mod views;

#[derive(Debug, Clone, Routable, PartialEq)]
#[rustfmt::skip]
enum Route {
    #[route("/")]
    Root {},
    #[route("/login")]
    Login {},
    #[route("/register")]
    Register {},
    #[route("/forgot-password")]
    ForgotPassword {},
    #[route("/reset-password")]
    ResetPassword {},
    #[route("/verify-email?:email")]
    VerifyEmail { email: String },
    #[layout(Protected)]
        #[route("/profile")]
        Profile {},
        #[route("/dashboard")]
        Dashboard {},
        #[route("/dashboard/:role")]
        RoleDashboard { role: String },
    #[end_layout]
    #[route("/:..segments")]
    NotFound { segments: Vec<String> },
}

/// Tunables baked into the build.
const APP_CONFIG: &str = include_str!("../liftcare.toml");

fn main() {
    dioxus::launch(App);
}

fn app_config() -> AppConfig {
    match AppConfig::from_toml(APP_CONFIG) {
        Ok(config) => config,
        Err(e) => {
            tracing::warn!("Invalid {}, using defaults: {}", AppConfig::filename(), e);
            AppConfig::default()
        }
    }
}

/// Navigate to an app path handed back by a view.
pub(crate) fn go_to(nav: Navigator, path: &str, replace: bool) {
    let route = match path.parse::<Route>() {
        Ok(route) => route,
        Err(_) => {
            tracing::warn!("Unknown route {}", path);
            Route::Root {}
        }
    };
    if replace {
        nav.replace(route);
    } else {
        nav.push(route);
    }
}

#[component]
fn App() -> Element {
    let config = use_hook(app_config);

    rsx! {
        // Global app resources
        document::Link { rel: "stylesheet", href: ui::COMPONENTS_CSS }
        document::Link { rel: "stylesheet", href: ui::VIEWS_CSS }

        ToastProvider {
            AuthProvider {
                config,
                Router::<Route> {}
            }
        }
    }
}

/// Send `/` to the sign-in page or the user's dashboard.
#[component]
fn Root() -> Element {
    let auth = use_auth();
    let nav = use_navigator();
    let state = auth();

    if state.loading {
        return rsx! { div { class: "loading", "Loading..." } };
    }
    if state.is_signed_in() {
        go_to(nav, &state.home_route(), true);
    } else {
        nav.replace(Route::Login {});
    }
    rsx! {}
}
