//! Profile page. Shared fields for everyone, plus the fields of the user's
//! role; the role itself is read-only.

use dioxus::prelude::*;
use store::forms::ProfileForm;
use store::{FieldErrors, Profile, RoleDetails};

use crate::auth::{use_auth, use_client};
use crate::components::{use_toast, ToastOptions, Button, ButtonVariant, FieldError, Input, Label};

#[component]
pub fn ProfileView() -> Element {
    let auth = use_auth();
    let state = auth();

    if state.loading {
        return rsx! {
            div { class: "loading", "Loading profile..." }
        };
    }

    match state.profile {
        Some(profile) => rsx! {
            ProfileEditor { key: "{profile.id}", profile }
        },
        None => rsx! {
            section {
                class: "panel",
                h2 { class: "panel-title", "Profile" }
                p {
                    class: "view-muted",
                    "Your profile is still being set up. Sign out and back in shortly to finish."
                }
            }
        },
    }
}

#[component]
fn ProfileEditor(profile: Profile) -> Element {
    let mut auth = use_auth();
    let client = use_client();
    let toasts = use_toast();
    let mut form = use_signal(|| ProfileForm::from_profile(&profile));
    let mut errors = use_signal(FieldErrors::default);
    let mut saving = use_signal(|| false);

    let handle_save = {
        let profile = profile.clone();
        move |evt: FormEvent| {
            evt.prevent_default();
            let update = match form.peek().validate(&profile) {
                Ok(update) => update,
                Err(e) => {
                    errors.set(e);
                    return;
                }
            };
            errors.set(FieldErrors::default());
            let client = client.clone();
            let user_id = profile.id.clone();
            spawn(async move {
                saving.set(true);
                match client.update_profile(&user_id, &update).await {
                    Ok(updated) => {
                        tracing::info!("Profile {} saved", user_id);
                        form.set(ProfileForm::from_profile(&updated));
                        auth.write().profile = Some(updated);
                        toasts.success("Profile saved.".to_string(), ToastOptions::new());
                    }
                    Err(e) => {
                        tracing::error!("Failed to save profile: {}", e);
                        toasts.error(e.user_message(), ToastOptions::new());
                    }
                }
                saving.set(false);
            });
        }
    };

    let field_error = move |field: &str| errors.read().get(field).map(str::to_string);
    let role_label = profile.role.map(|r| r.label()).unwrap_or("No role assigned");
    let email = profile.email.clone().unwrap_or_default();

    rsx! {
        section {
            class: "panel panel-narrow",
            div {
                class: "panel-header",
                div {
                    h2 { class: "panel-title", "Profile" }
                    p { class: "view-muted", "{email}" }
                }
                span { class: "badge", "{role_label}" }
            }

            form {
                class: "profile-form",
                onsubmit: handle_save,

                div {
                    class: "field",
                    Label { html_for: "profile-name", "Full name" }
                    Input {
                        id: "profile-name",
                        autocomplete: "name",
                        value: form.read().full_name.clone(),
                        invalid: field_error("full_name").is_some(),
                        oninput: move |evt: FormEvent| form.write().full_name = evt.value(),
                    }
                    FieldError { message: field_error("full_name") }
                }
                div {
                    class: "field",
                    Label { html_for: "profile-phone", "Phone" }
                    Input {
                        id: "profile-phone",
                        r#type: "tel",
                        autocomplete: "tel",
                        value: form.read().phone.clone(),
                        invalid: field_error("phone").is_some(),
                        oninput: move |evt: FormEvent| form.write().phone = evt.value(),
                    }
                    FieldError { message: field_error("phone") }
                }
                div {
                    class: "field",
                    Label { html_for: "profile-avatar", "Avatar URL" }
                    Input {
                        id: "profile-avatar",
                        r#type: "url",
                        value: form.read().avatar_url.clone(),
                        oninput: move |evt: FormEvent| form.write().avatar_url = evt.value(),
                    }
                }

                if profile.role.is_some() {
                    RoleFields { form, errors }
                }

                div {
                    class: "form-actions",
                    Button {
                        variant: ButtonVariant::Primary,
                        r#type: "submit",
                        disabled: saving(),
                        if saving() { "Saving..." } else { "Save profile" }
                    }
                }
            }
        }
    }
}

/// Inputs for the role-specific columns, one arm per role.
#[component]
fn RoleFields(form: Signal<ProfileForm>, errors: Signal<FieldErrors>) -> Element {
    let mut form = form;
    let details = form.read().details.clone();
    let company_error = errors.read().get("company_name").map(str::to_string);

    match details {
        RoleDetails::Company { company_name, address } => rsx! {
            div {
                class: "field",
                Label { html_for: "profile-company", "Company name" }
                Input {
                    id: "profile-company",
                    value: company_name,
                    invalid: company_error.is_some(),
                    oninput: move |evt: FormEvent| {
                        if let RoleDetails::Company { company_name, .. } = &mut form.write().details {
                            *company_name = evt.value();
                        }
                    },
                }
                FieldError { message: company_error }
            }
            div {
                class: "field",
                Label { html_for: "profile-address", "Address" }
                Input {
                    id: "profile-address",
                    autocomplete: "street-address",
                    value: address,
                    oninput: move |evt: FormEvent| {
                        if let RoleDetails::Company { address, .. } = &mut form.write().details {
                            *address = evt.value();
                        }
                    },
                }
            }
        },
        RoleDetails::CompanyAdmin { company_name } => rsx! {
            div {
                class: "field",
                Label { html_for: "profile-company", "Company name" }
                Input {
                    id: "profile-company",
                    value: company_name,
                    invalid: company_error.is_some(),
                    oninput: move |evt: FormEvent| {
                        if let RoleDetails::CompanyAdmin { company_name } = &mut form.write().details {
                            *company_name = evt.value();
                        }
                    },
                }
                FieldError { message: company_error }
            }
        },
        RoleDetails::Technician { specialization, certification_number } => rsx! {
            div {
                class: "field",
                Label { html_for: "profile-specialization", "Specialization" }
                Input {
                    id: "profile-specialization",
                    value: specialization,
                    oninput: move |evt: FormEvent| {
                        if let RoleDetails::Technician { specialization, .. } = &mut form.write().details {
                            *specialization = evt.value();
                        }
                    },
                }
            }
            div {
                class: "field",
                Label { html_for: "profile-certification", "Certification number" }
                Input {
                    id: "profile-certification",
                    value: certification_number,
                    oninput: move |evt: FormEvent| {
                        if let RoleDetails::Technician { certification_number, .. } = &mut form.write().details {
                            *certification_number = evt.value();
                        }
                    },
                }
            }
        },
        RoleDetails::BuildingManager { managed_building } => rsx! {
            div {
                class: "field",
                Label { html_for: "profile-building", "Managed building" }
                Input {
                    id: "profile-building",
                    value: managed_building,
                    oninput: move |evt: FormEvent| {
                        if let RoleDetails::BuildingManager { managed_building } = &mut form.write().details {
                            *managed_building = evt.value();
                        }
                    },
                }
            }
        },
        RoleDetails::Admin => rsx! {},
    }
}
