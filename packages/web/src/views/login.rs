use dioxus::prelude::*;
use ui::use_auth;
use ui::views::LoginView;

use crate::go_to;

/// Login page. A user who is already signed in goes straight home.
#[component]
pub fn Login() -> Element {
    let auth = use_auth();
    let nav = use_navigator();
    let state = auth();

    if !state.loading && state.is_signed_in() && state.link_error.is_none() {
        go_to(nav, &state.home_route(), true);
    }

    rsx! {
        LoginView {
            on_signed_in: move |path: String| go_to(nav, &path, false),
        }
    }
}
