use dioxus::prelude::*;

/// Centered card used by the sign-in, registration and password pages.
#[component]
pub fn AuthCard(title: String, #[props(default)] subtitle: String, children: Element) -> Element {
    rsx! {
        div {
            class: "auth-page",
            div {
                class: "auth-card",
                h1 { class: "auth-brand", "LiftCare" }
                h2 { class: "auth-title", "{title}" }
                if !subtitle.is_empty() {
                    p { class: "auth-subtitle", "{subtitle}" }
                }
                {children}
            }
        }
    }
}
