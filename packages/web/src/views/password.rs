use dioxus::prelude::*;
use ui::views::{ForgotPasswordView, ResetPasswordView};

use crate::go_to;

#[component]
pub fn ForgotPassword() -> Element {
    rsx! {
        ForgotPasswordView {}
    }
}

/// Target of the recovery email link.
#[component]
pub fn ResetPassword() -> Element {
    let nav = use_navigator();

    rsx! {
        ResetPasswordView {
            on_done: move |path: String| go_to(nav, &path, true),
        }
    }
}
