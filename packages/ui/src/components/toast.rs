//! Notifications. Every asynchronous outcome in the app ends in one toast;
//! stacking, timing and dismissal come from the primitive.

use dioxus::prelude::*;
use dioxus_primitives::toast::{self, ToastProviderProps};

pub use dioxus_primitives::toast::{use_toast, ToastOptions, Toasts};

#[component]
pub fn ToastProvider(props: ToastProviderProps) -> Element {
    rsx! {
        toast::ToastProvider {
            default_duration: props.default_duration,
            max_toasts: props.max_toasts,
            render_toast: props.render_toast,
            {props.children}
        }
    }
}
