use dioxus::prelude::*;
use ui::views::{RegisterView, Registered, VerifyEmailView};

use crate::{go_to, Route};

#[component]
pub fn Register() -> Element {
    let nav = use_navigator();

    rsx! {
        RegisterView {
            on_registered: move |outcome: Registered| match outcome {
                Registered::SignedIn(path) => go_to(nav, &path, false),
                Registered::VerifyEmail(email) => {
                    nav.push(Route::VerifyEmail { email });
                }
            },
        }
    }
}

/// Landing page after a sign-up that needs email confirmation.
#[component]
pub fn VerifyEmail(email: String) -> Element {
    rsx! {
        VerifyEmailView { email }
    }
}
