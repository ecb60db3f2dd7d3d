//! Authentication context and hooks for the UI.
//!
//! [`AuthProvider`] owns the [`RemoteClient`] and the [`AuthState`] signal and
//! runs the session lifecycle:
//!
//! - **init**: take tokens from an email link if the page was opened from
//!   one, otherwise restore the persisted session (refreshing it when
//!   expired), then load the profile row.
//! - **sign-in**: [`complete_sign_in`] loads the profile for a fresh session.
//! - **teardown**: [`sign_out`] revokes the session, clears the persisted
//!   copy and bumps [`AuthState::epoch`]. Components that own cached data are
//!   keyed on the epoch, so their caches go with the session. A session the
//!   client drops on its own (a failed background refresh) ends the same way.

use api::{AuthUser, LinkKind, OAuthProvider, RemoteClient, Session};
use dioxus::prelude::*;
use store::{platform_session_store, AppConfig, Clock, Profile, Role, SessionStore, SystemClock};

use crate::components::{use_toast, ToastOptions};
use crate::icons::brands::{FaGithub, FaGoogle};
use crate::Icon;

/// Authentication state for the application.
#[derive(Debug, Clone, PartialEq)]
pub struct AuthState {
    pub user: Option<AuthUser>,
    /// `None` until loaded, and while the backend has not created the row.
    pub profile: Option<Profile>,
    pub loading: bool,
    /// Incremented on every sign-out.
    pub epoch: u64,
    /// Set when the session came from an email link this page load.
    pub link: Option<LinkKind>,
    /// Error reported by an email link (e.g. expired).
    pub link_error: Option<String>,
}

impl Default for AuthState {
    fn default() -> Self {
        Self {
            user: None,
            profile: None,
            loading: true,
            epoch: 0,
            link: None,
            link_error: None,
        }
    }
}

impl AuthState {
    pub fn is_signed_in(&self) -> bool {
        self.user.is_some()
    }

    pub fn role(&self) -> Option<Role> {
        self.profile.as_ref()?.role
    }

    /// Landing page for a signed-in user: the role dashboard, or the profile
    /// page while the role is unknown.
    pub fn home_route(&self) -> String {
        match self.role() {
            Some(role) => role.dashboard_route(),
            None => "/profile".to_string(),
        }
    }
}

/// Get the current authentication state.
/// Returns a signal that updates when the user signs in or out.
pub fn use_auth() -> Signal<AuthState> {
    use_context::<Signal<AuthState>>()
}

pub fn use_client() -> RemoteClient {
    use_context::<RemoteClient>()
}

pub fn use_app_config() -> AppConfig {
    use_context::<AppConfig>()
}

fn now_secs() -> u64 {
    SystemClock.now_millis() / 1000
}

fn persist_session(session: Option<&Session>) {
    let store = platform_session_store();
    match session {
        Some(session) => store.save(session),
        None => store.clear(),
    }
}

/// Provider component that manages authentication state.
/// Wrap your app with this component to enable authentication.
#[component]
pub fn AuthProvider(config: AppConfig, children: Element) -> Element {
    use_context_provider(|| config.clone());
    let auth_state = use_signal(AuthState::default);
    let client = use_hook(|| match RemoteClient::from_env() {
        Ok(client) => Some(client.with_session_listener(move |session| {
            persist_session(session);
            if session.is_none() {
                end_session(auth_state);
            }
        })),
        Err(e) => {
            tracing::error!("Backend is not configured: {}", e);
            None
        }
    });

    let Some(client) = client else {
        return rsx! { ConfigMissing {} };
    };
    use_context_provider(|| client.clone());
    use_context_provider(|| auth_state);

    use_hook(move || {
        spawn(async move {
            init_session(auth_state, client).await;
        });
    });

    rsx! {
        {children}
    }
}

async fn init_session(mut auth: Signal<AuthState>, client: RemoteClient) {
    match take_link_fragment() {
        Some(Ok(tokens)) => {
            let kind = tokens.kind;
            match client.session_from_link(tokens).await {
                Ok(session) => {
                    complete_sign_in(auth, &client, session).await;
                    auth.write().link = Some(kind);
                    return;
                }
                Err(e) => {
                    tracing::error!("Failed to open session from link: {}", e);
                    auth.write().link_error = Some(e.user_message());
                }
            }
        }
        Some(Err(message)) => {
            tracing::warn!("Email link rejected: {}", message);
            auth.write().link_error = Some(message);
        }
        None => {}
    }

    let Some(session) = platform_session_store().load::<Session>() else {
        auth.write().loading = false;
        return;
    };
    client.set_session(Some(session.clone()));

    let session = if session.is_expired(now_secs()) {
        match client.refresh_session().await {
            Ok(fresh) => fresh,
            Err(e) => {
                tracing::warn!("Stored session could not be refreshed: {}", e);
                client.set_session(None);
                auth.write().loading = false;
                return;
            }
        }
    } else {
        session
    };
    tracing::info!("Restored session for {}", session.user.id);
    complete_sign_in(auth, &client, session).await;
}

/// Tokens from an email link in the URL fragment. The fragment is removed
/// from the address bar so a reload does not replay it.
#[cfg(target_arch = "wasm32")]
fn take_link_fragment() -> Option<Result<api::LinkTokens, String>> {
    let window = web_sys::window()?;
    let location = window.location();
    let hash = location.hash().ok()?;
    let parsed = api::parse_link_fragment(&hash, now_secs()).transpose()?;
    let clean = format!(
        "{}{}",
        location.pathname().unwrap_or_default(),
        location.search().unwrap_or_default()
    );
    if let Ok(history) = window.history() {
        let _ = history.replace_state_with_url(&wasm_bindgen::JsValue::NULL, "", Some(&clean));
    }
    Some(parsed)
}

#[cfg(not(target_arch = "wasm32"))]
fn take_link_fragment() -> Option<Result<api::LinkTokens, String>> {
    None
}

/// Record a freshly established session and load its profile.
pub async fn complete_sign_in(mut auth: Signal<AuthState>, client: &RemoteClient, session: Session) -> AuthState {
    let profile = match client.fetch_profile(&session.user.id).await {
        Ok(Some(profile)) => Some(profile),
        Ok(None) => {
            tracing::warn!("No profile row yet for {}", session.user.id);
            None
        }
        Err(e) => {
            tracing::error!("Failed to load profile: {}", e);
            None
        }
    };
    let mut state = auth.peek().clone();
    state.user = Some(session.user);
    state.profile = profile;
    state.loading = false;
    auth.set(state.clone());
    state
}

/// Session teardown. The remote logout is best effort; local state is
/// cleared regardless.
pub async fn sign_out(auth: Signal<AuthState>, client: &RemoteClient) {
    let _ = client.sign_out().await;
    end_session(auth);
}

/// Forget the signed-in user and bump the epoch. Does nothing when no user
/// is signed in, so the client listener and [`sign_out`] can both call it.
fn end_session(mut auth: Signal<AuthState>) {
    let Some(user) = auth.peek().user.clone() else {
        return;
    };
    tracing::info!("Session ended for {}", user.id);
    let epoch = auth.peek().epoch + 1;
    auth.set(AuthState {
        loading: false,
        epoch,
        ..AuthState::default()
    });
}

/// Buttons that send the browser to a third-party sign-in page.
#[component]
pub fn OAuthButtons() -> Element {
    let client = use_client();
    let config = use_app_config();
    let toasts = use_toast();

    rsx! {
        div {
            class: "oauth-buttons",
            for provider in OAuthProvider::ALL {
                button {
                    key: "{provider.as_str()}",
                    class: "btn btn-oauth oauth-{provider.as_str()}",
                    r#type: "button",
                    onclick: {
                        let client = client.clone();
                        let redirect = config.redirect_url("/dashboard");
                        move |_| {
                            let url = client.oauth_authorize_url(provider, &redirect);
                            tracing::info!("Redirecting to {} sign-in", provider.as_str());
                            #[cfg(target_arch = "wasm32")]
                            {
                                if let Some(window) = web_sys::window() {
                                    if window.location().set_href(url.as_str()).is_err() {
                                        toasts.error("Could not open the sign-in page.".to_string(), ToastOptions::new());
                                    }
                                }
                            }
                            #[cfg(not(target_arch = "wasm32"))]
                            {
                                let _ = url;
                                toasts.info("Provider sign-in is only available in the browser.".to_string(), ToastOptions::new());
                            }
                        }
                    },
                    ProviderIcon { provider }
                    "{provider.label()}"
                }
            }
        }
    }
}

#[component]
fn ProviderIcon(provider: OAuthProvider) -> Element {
    match provider {
        OAuthProvider::Google => rsx! { Icon { icon: FaGoogle, width: 16, height: 16 } },
        OAuthProvider::GitHub => rsx! { Icon { icon: FaGithub, width: 16, height: 16 } },
    }
}

/// Button to sign out the current user.
#[component]
pub fn LogoutButton(
    #[props(default = "Sign out".to_string())] label: String,
    #[props(default = "".to_string())] class: String,
    on_signed_out: EventHandler<()>,
) -> Element {
    let auth_state = use_auth();
    let client = use_client();
    let toasts = use_toast();

    let onclick = move |_| {
        let client = client.clone();
        async move {
            sign_out(auth_state, &client).await;
            toasts.info("You have been signed out.".to_string(), ToastOptions::new());
            on_signed_out.call(());
        }
    };

    rsx! {
        button {
            class: "btn btn-ghost {class}",
            onclick: onclick,
            "{label}"
        }
    }
}

#[component]
fn ConfigMissing() -> Element {
    rsx! {
        div {
            class: "auth-page",
            div {
                class: "auth-card",
                h1 { class: "auth-title", "Configuration required" }
                p {
                    class: "view-muted",
                    "Set BACKEND_URL and BACKEND_ANON_KEY when building the app."
                }
            }
        }
    }
}
