//! Sign-in page with email/password form and provider buttons.

use dioxus::prelude::*;
use store::forms::LoginForm;
use store::FieldErrors;

use super::AuthCard;
use crate::auth::{complete_sign_in, use_auth, use_client, OAuthButtons};
use crate::components::{use_toast, ToastOptions, Button, ButtonVariant, FieldError, Input, Label};

/// Sign-in view. `on_signed_in` receives the route to continue to.
#[component]
pub fn LoginView(on_signed_in: EventHandler<String>) -> Element {
    let auth = use_auth();
    let client = use_client();
    let toasts = use_toast();
    let mut form = use_signal(LoginForm::default);
    let mut errors = use_signal(FieldErrors::default);
    let mut loading = use_signal(|| false);

    let handle_login = move |evt: FormEvent| {
        evt.prevent_default();
        let client = client.clone();
        spawn(async move {
            let credentials = match form.peek().validate() {
                Ok(credentials) => credentials,
                Err(e) => {
                    errors.set(e);
                    return;
                }
            };
            errors.set(FieldErrors::default());
            loading.set(true);
            match client
                .sign_in_with_password(&credentials.email, &credentials.password)
                .await
            {
                Ok(session) => {
                    let state = complete_sign_in(auth, &client, session).await;
                    toasts.success("Welcome back!".to_string(), ToastOptions::new());
                    on_signed_in.call(state.home_route());
                }
                Err(e) => {
                    tracing::error!("Sign-in failed: {}", e);
                    toasts.error(e.user_message(), ToastOptions::new());
                }
            }
            loading.set(false);
        });
    };

    rsx! {
        AuthCard {
            title: "Sign in",
            subtitle: "Manage your elevators and maintenance records",

            if let Some(message) = auth().link_error {
                div { class: "alert alert-error", "{message}" }
            }

            form {
                class: "auth-form",
                onsubmit: handle_login,

                div {
                    class: "field",
                    Label { html_for: "login-email", "Email" }
                    Input {
                        id: "login-email",
                        r#type: "email",
                        autocomplete: "email",
                        placeholder: "you@company.com",
                        value: form.read().email.clone(),
                        invalid: errors.read().get("email").is_some(),
                        oninput: move |evt: FormEvent| form.write().email = evt.value(),
                    }
                    FieldError { message: errors.read().get("email").map(str::to_string) }
                }

                div {
                    class: "field",
                    div {
                        class: "field-row",
                        Label { html_for: "login-password", "Password" }
                        a { class: "link-muted", href: "/forgot-password", "Forgot password?" }
                    }
                    Input {
                        id: "login-password",
                        r#type: "password",
                        autocomplete: "current-password",
                        value: form.read().password.clone(),
                        invalid: errors.read().get("password").is_some(),
                        oninput: move |evt: FormEvent| form.write().password = evt.value(),
                    }
                    FieldError { message: errors.read().get("password").map(str::to_string) }
                }

                Button {
                    variant: ButtonVariant::Primary,
                    class: "w-full",
                    r#type: "submit",
                    disabled: loading(),
                    if loading() { "Signing in..." } else { "Sign in" }
                }
            }

            div { class: "divider", span { "or" } }
            OAuthButtons {}

            p {
                class: "auth-footer",
                "Don't have an account? "
                a { href: "/register", "Create one" }
            }
        }
    }
}
