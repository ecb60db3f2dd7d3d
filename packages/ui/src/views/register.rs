//! Registration page: account type, profile basics and credentials.

use api::SignUpOutcome;
use dioxus::prelude::*;
use store::forms::RegisterForm;
use store::{FieldErrors, Role};

use super::AuthCard;
use crate::auth::{complete_sign_in, use_app_config, use_auth, use_client};
use crate::components::{use_toast, ToastOptions, Button, ButtonVariant, FieldError, Input, Label, Select};

/// Where registration leads.
#[derive(Clone, Debug, PartialEq)]
pub enum Registered {
    /// Signed in right away; continue to this route.
    SignedIn(String),
    /// A verification email went out to this address.
    VerifyEmail(String),
}

#[component]
pub fn RegisterView(on_registered: EventHandler<Registered>) -> Element {
    let auth = use_auth();
    let client = use_client();
    let config = use_app_config();
    let toasts = use_toast();
    let mut form = use_signal(RegisterForm::default);
    let mut errors = use_signal(FieldErrors::default);
    let mut loading = use_signal(|| false);

    let role_options: Vec<(String, String)> = Role::SELF_REGISTERABLE
        .iter()
        .map(|r| (r.as_str().to_string(), r.label().to_string()))
        .collect();
    let is_company = form.read().role == Role::Company.as_str();

    let handle_register = move |evt: FormEvent| {
        evt.prevent_default();
        let client = client.clone();
        let redirect = config.redirect_url("/login");
        spawn(async move {
            let registration = match form.peek().validate() {
                Ok(registration) => registration,
                Err(e) => {
                    errors.set(e);
                    return;
                }
            };
            errors.set(FieldErrors::default());
            loading.set(true);
            match client.sign_up(&registration, &redirect).await {
                Ok(SignUpOutcome::SignedIn(session)) => {
                    let state = complete_sign_in(auth, &client, session).await;
                    toasts.success("Account created.".to_string(), ToastOptions::new());
                    on_registered.call(Registered::SignedIn(state.home_route()));
                }
                Ok(SignUpOutcome::VerificationRequired { email }) => {
                    toasts.info("Check your inbox to verify your email address.".to_string(), ToastOptions::new());
                    on_registered.call(Registered::VerifyEmail(email));
                }
                Err(e) => {
                    tracing::error!("Registration failed: {}", e);
                    toasts.error(e.user_message(), ToastOptions::new());
                }
            }
            loading.set(false);
        });
    };

    let field_error = move |field: &str| errors.read().get(field).map(str::to_string);

    rsx! {
        AuthCard {
            title: "Create account",
            subtitle: "Register your company, or join as a technician or building manager",

            form {
                class: "auth-form",
                onsubmit: handle_register,

                div {
                    class: "field",
                    Label { html_for: "register-role", "Account type" }
                    Select {
                        id: "register-role",
                        value: form.read().role.clone(),
                        options: role_options,
                        onchange: move |evt: FormEvent| form.write().role = evt.value(),
                    }
                    FieldError { message: field_error("role") }
                }

                div {
                    class: "field",
                    Label { html_for: "register-name", "Full name" }
                    Input {
                        id: "register-name",
                        autocomplete: "name",
                        value: form.read().full_name.clone(),
                        invalid: field_error("full_name").is_some(),
                        oninput: move |evt: FormEvent| form.write().full_name = evt.value(),
                    }
                    FieldError { message: field_error("full_name") }
                }

                if is_company {
                    div {
                        class: "field",
                        Label { html_for: "register-company", "Company name" }
                        Input {
                            id: "register-company",
                            autocomplete: "organization",
                            value: form.read().company_name.clone(),
                            invalid: field_error("company_name").is_some(),
                            oninput: move |evt: FormEvent| form.write().company_name = evt.value(),
                        }
                        FieldError { message: field_error("company_name") }
                    }
                }

                div {
                    class: "field",
                    Label { html_for: "register-email", "Email" }
                    Input {
                        id: "register-email",
                        r#type: "email",
                        autocomplete: "email",
                        value: form.read().email.clone(),
                        invalid: field_error("email").is_some(),
                        oninput: move |evt: FormEvent| form.write().email = evt.value(),
                    }
                    FieldError { message: field_error("email") }
                }

                div {
                    class: "field",
                    Label { html_for: "register-password", "Password" }
                    Input {
                        id: "register-password",
                        r#type: "password",
                        autocomplete: "new-password",
                        placeholder: "At least 8 characters",
                        value: form.read().password.clone(),
                        invalid: field_error("password").is_some(),
                        oninput: move |evt: FormEvent| form.write().password = evt.value(),
                    }
                    FieldError { message: field_error("password") }
                }

                div {
                    class: "field",
                    Label { html_for: "register-confirm", "Confirm password" }
                    Input {
                        id: "register-confirm",
                        r#type: "password",
                        autocomplete: "new-password",
                        value: form.read().confirm_password.clone(),
                        invalid: field_error("confirm_password").is_some(),
                        oninput: move |evt: FormEvent| form.write().confirm_password = evt.value(),
                    }
                    FieldError { message: field_error("confirm_password") }
                }

                Button {
                    variant: ButtonVariant::Primary,
                    class: "w-full",
                    r#type: "submit",
                    disabled: loading(),
                    if loading() { "Creating account..." } else { "Create account" }
                }
            }

            p {
                class: "auth-footer",
                "Already have an account? "
                a { href: "/login", "Sign in" }
            }
        }
    }
}
