use dioxus::prelude::*;
use store::forms::ForgotPasswordForm;
use store::FieldErrors;

use super::AuthCard;
use crate::auth::{use_app_config, use_client};
use crate::components::{use_toast, ToastOptions, Button, ButtonVariant, FieldError, Input, Label};

/// Request a password recovery email. The link lands on `/reset-password`.
#[component]
pub fn ForgotPasswordView() -> Element {
    let client = use_client();
    let config = use_app_config();
    let toasts = use_toast();
    let mut form = use_signal(ForgotPasswordForm::default);
    let mut errors = use_signal(FieldErrors::default);
    let mut loading = use_signal(|| false);
    let mut sent_to = use_signal(|| Option::<String>::None);

    let handle_submit = move |evt: FormEvent| {
        evt.prevent_default();
        let client = client.clone();
        let redirect = config.redirect_url("/reset-password");
        spawn(async move {
            let email = match form.peek().validate() {
                Ok(email) => email,
                Err(e) => {
                    errors.set(e);
                    return;
                }
            };
            errors.set(FieldErrors::default());
            loading.set(true);
            match client.reset_password_for_email(&email, &redirect).await {
                Ok(()) => {
                    tracing::info!("Recovery email requested");
                    toasts.success("Password reset email sent.".to_string(), ToastOptions::new());
                    sent_to.set(Some(email));
                }
                Err(e) => {
                    tracing::error!("Password reset request failed: {}", e);
                    toasts.error(e.user_message(), ToastOptions::new());
                }
            }
            loading.set(false);
        });
    };

    rsx! {
        AuthCard {
            title: "Reset your password",
            subtitle: "We'll email you a link to choose a new password",

            if let Some(email) = sent_to() {
                div {
                    class: "alert alert-success",
                    "If an account exists for {email}, a reset link is on its way."
                }
            } else {
                form {
                    class: "auth-form",
                    onsubmit: handle_submit,
                    div {
                        class: "field",
                        Label { html_for: "forgot-email", "Email" }
                        Input {
                            id: "forgot-email",
                            r#type: "email",
                            autocomplete: "email",
                            value: form.read().email.clone(),
                            invalid: errors.read().get("email").is_some(),
                            oninput: move |evt: FormEvent| form.write().email = evt.value(),
                        }
                        FieldError { message: errors.read().get("email").map(str::to_string) }
                    }
                    Button {
                        variant: ButtonVariant::Primary,
                        class: "w-full",
                        r#type: "submit",
                        disabled: loading(),
                        if loading() { "Sending..." } else { "Send reset link" }
                    }
                }
            }

            p {
                class: "auth-footer",
                a { href: "/login", "Back to sign in" }
            }
        }
    }
}
