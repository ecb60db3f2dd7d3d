use dioxus::prelude::*;

use crate::Route;

#[component]
pub fn NotFound(segments: Vec<String>) -> Element {
    let path = segments.join("/");

    rsx! {
        div {
            class: "auth-page",
            div {
                class: "auth-card",
                h2 { class: "auth-title", "Page not found" }
                p { class: "view-muted", "Nothing lives at /{path}." }
                Link { to: Route::Root {}, "Go to the start page" }
            }
        }
    }
}
