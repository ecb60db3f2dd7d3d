use api::LinkKind;
use dioxus::prelude::*;
use store::forms::ResetPasswordForm;
use store::FieldErrors;

use super::AuthCard;
use crate::auth::{use_auth, use_client};
use crate::components::{use_toast, ToastOptions, Button, ButtonVariant, FieldError, Input, Label};

/// Choose a new password. Needs the session opened by a recovery link (or
/// any signed-in session); `on_done` receives the route to continue to.
#[component]
pub fn ResetPasswordView(on_done: EventHandler<String>) -> Element {
    let auth = use_auth();
    let client = use_client();
    let toasts = use_toast();
    let mut form = use_signal(ResetPasswordForm::default);
    let mut errors = use_signal(FieldErrors::default);
    let mut loading = use_signal(|| false);

    let handle_submit = move |evt: FormEvent| {
        evt.prevent_default();
        let client = client.clone();
        spawn(async move {
            let password = match form.peek().validate() {
                Ok(password) => password,
                Err(e) => {
                    errors.set(e);
                    return;
                }
            };
            errors.set(FieldErrors::default());
            loading.set(true);
            match client.update_password(&password).await {
                Ok(_) => {
                    toasts.success("Your password has been updated.".to_string(), ToastOptions::new());
                    on_done.call(auth.peek().home_route());
                }
                Err(e) => {
                    tracing::error!("Password update failed: {}", e);
                    toasts.error(e.user_message(), ToastOptions::new());
                }
            }
            loading.set(false);
        });
    };

    let state = auth();
    if state.loading {
        return rsx! {
            AuthCard { title: "Reset your password", p { class: "view-muted", "Checking your link..." } }
        };
    }
    if !state.is_signed_in() {
        let reason = state
            .link_error
            .unwrap_or_else(|| "This reset link is invalid or has expired.".to_string());
        return rsx! {
            AuthCard {
                title: "Reset your password",
                div { class: "alert alert-error", "{reason}" }
                p {
                    class: "auth-footer",
                    a { href: "/forgot-password", "Request a new link" }
                }
            }
        };
    }

    let subtitle = if state.link == Some(LinkKind::Recovery) {
        "Choose a new password for your account"
    } else {
        "Change the password you sign in with"
    };

    rsx! {
        AuthCard {
            title: "Reset your password",
            subtitle: subtitle.to_string(),

            form {
                class: "auth-form",
                onsubmit: handle_submit,
                div {
                    class: "field",
                    Label { html_for: "reset-password", "New password" }
                    Input {
                        id: "reset-password",
                        r#type: "password",
                        autocomplete: "new-password",
                        placeholder: "At least 8 characters",
                        value: form.read().password.clone(),
                        invalid: errors.read().get("password").is_some(),
                        oninput: move |evt: FormEvent| form.write().password = evt.value(),
                    }
                    FieldError { message: errors.read().get("password").map(str::to_string) }
                }
                div {
                    class: "field",
                    Label { html_for: "reset-confirm", "Confirm new password" }
                    Input {
                        id: "reset-confirm",
                        r#type: "password",
                        autocomplete: "new-password",
                        value: form.read().confirm_password.clone(),
                        invalid: errors.read().get("confirm_password").is_some(),
                        oninput: move |evt: FormEvent| form.write().confirm_password = evt.value(),
                    }
                    FieldError { message: errors.read().get("confirm_password").map(str::to_string) }
                }
                Button {
                    variant: ButtonVariant::Primary,
                    class: "w-full",
                    r#type: "submit",
                    disabled: loading(),
                    if loading() { "Updating..." } else { "Update password" }
                }
            }
        }
    }
}
