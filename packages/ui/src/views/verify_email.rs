use dioxus::prelude::*;

use super::AuthCard;
use crate::auth::{use_app_config, use_client};
use crate::components::{use_toast, ToastOptions, Button, ButtonVariant};

/// Shown after sign-up when the account still needs email verification.
#[component]
pub fn VerifyEmailView(email: String) -> Element {
    let client = use_client();
    let config = use_app_config();
    let toasts = use_toast();
    let mut sending = use_signal(|| false);

    let address = email.clone();
    let resend = move |_| {
        let client = client.clone();
        let email = address.clone();
        let redirect = config.redirect_url("/login");
        spawn(async move {
            sending.set(true);
            match client.resend_verification(&email, &redirect).await {
                Ok(()) => toasts.success("Verification email sent again.".to_string(), ToastOptions::new()),
                Err(e) => {
                    tracing::error!("Resending verification failed: {}", e);
                    toasts.error(e.user_message(), ToastOptions::new());
                }
            }
            sending.set(false);
        });
    };

    rsx! {
        AuthCard {
            title: "Verify your email",
            if email.is_empty() {
                p { class: "auth-subtitle", "We sent you a verification link. Open it to activate your account." }
            } else {
                p { class: "auth-subtitle", "We sent a verification link to {email}. Open it to activate your account." }
                Button {
                    variant: ButtonVariant::Secondary,
                    class: "w-full",
                    disabled: sending(),
                    onclick: resend,
                    if sending() { "Sending..." } else { "Resend verification email" }
                }
            }
            p {
                class: "auth-footer",
                "Already verified? "
                a { href: "/login", "Sign in" }
            }
        }
    }
}
