use dioxus::prelude::*;
use ui::use_auth;
use ui::views::AppShell;

use crate::{go_to, Route};

/// Layout for every page that needs a session. Without one the user is sent
/// to the login page.
#[component]
pub fn Protected() -> Element {
    let auth = use_auth();
    let nav = use_navigator();
    let state = auth();

    if state.loading {
        return rsx! {
            div { class: "loading", "Loading..." }
        };
    }
    if !state.is_signed_in() {
        nav.replace(Route::Login {});
        return rsx! {};
    }

    rsx! {
        AppShell {
            on_navigate: move |path: String| go_to(nav, &path, false),
            Outlet::<Route> {}
        }
    }
}
