use dioxus::prelude::*;
use store::forms::PartForm;
use store::{ElevatorPart, FieldErrors, PartInput, PartStatus};

use super::ModalOverlay;
use crate::components::{Button, ButtonVariant, FieldError, Input, Label, Select, Textarea};

/// Add or edit one part. Layered above the parts modal.
#[component]
pub fn PartFormModal(
    #[props(!optional)] existing: Option<ElevatorPart>,
    busy: bool,
    on_submit: EventHandler<PartInput>,
    on_cancel: EventHandler<()>,
) -> Element {
    let is_new = existing.is_none();
    let mut form = use_signal(|| existing.as_ref().map(PartForm::from).unwrap_or_default());
    let mut errors = use_signal(FieldErrors::default);

    let handle_submit = move |evt: FormEvent| {
        evt.prevent_default();
        match form.peek().validate() {
            Ok(input) => {
                errors.set(FieldErrors::default());
                on_submit.call(input);
            }
            Err(e) => errors.set(e),
        }
    };

    let status_options: Vec<(String, String)> = PartStatus::ALL
        .iter()
        .map(|s| (s.as_str().to_string(), s.label().to_string()))
        .collect();
    let field_error = move |field: &str| errors.read().get(field).map(str::to_string);

    rsx! {
        ModalOverlay {
            title: if is_new { "Add part".to_string() } else { "Edit part".to_string() },
            layer: 2,
            on_close: move |_| on_cancel.call(()),
            form {
                class: "modal-form",
                onsubmit: handle_submit,

                div {
                    class: "form-grid",
                    div {
                        class: "field",
                        Label { html_for: "part-name", "Name" }
                        Input {
                            id: "part-name",
                            value: form.read().name.clone(),
                            invalid: field_error("name").is_some(),
                            oninput: move |evt: FormEvent| form.write().name = evt.value(),
                        }
                        FieldError { message: field_error("name") }
                    }
                    div {
                        class: "field",
                        Label { html_for: "part-number", "Part number" }
                        Input {
                            id: "part-number",
                            value: form.read().part_number.clone(),
                            invalid: field_error("part_number").is_some(),
                            oninput: move |evt: FormEvent| form.write().part_number = evt.value(),
                        }
                        FieldError { message: field_error("part_number") }
                    }
                    div {
                        class: "field",
                        Label { html_for: "part-manufacturer", "Manufacturer" }
                        Input {
                            id: "part-manufacturer",
                            value: form.read().manufacturer.clone(),
                            oninput: move |evt: FormEvent| form.write().manufacturer = evt.value(),
                        }
                    }
                    div {
                        class: "field",
                        Label { html_for: "part-status", "Status" }
                        Select {
                            id: "part-status",
                            value: form.read().status.clone(),
                            options: status_options,
                            onchange: move |evt: FormEvent| form.write().status = evt.value(),
                        }
                        FieldError { message: field_error("status") }
                    }
                    div {
                        class: "field",
                        Label { html_for: "part-installed", "Installed on" }
                        Input {
                            id: "part-installed",
                            r#type: "date",
                            value: form.read().installation_date.clone(),
                            invalid: field_error("installation_date").is_some(),
                            oninput: move |evt: FormEvent| form.write().installation_date = evt.value(),
                        }
                        FieldError { message: field_error("installation_date") }
                    }
                    div {
                        class: "field",
                        Label { html_for: "part-serviced", "Last maintenance" }
                        Input {
                            id: "part-serviced",
                            r#type: "date",
                            value: form.read().last_maintenance_date.clone(),
                            invalid: field_error("last_maintenance_date").is_some(),
                            oninput: move |evt: FormEvent| form.write().last_maintenance_date = evt.value(),
                        }
                        FieldError { message: field_error("last_maintenance_date") }
                    }
                    div {
                        class: "field field-wide",
                        Label { html_for: "part-description", "Description" }
                        Textarea {
                            id: "part-description",
                            value: form.read().description.clone(),
                            oninput: move |evt: FormEvent| form.write().description = evt.value(),
                        }
                    }
                }

                div {
                    class: "modal-actions",
                    Button {
                        variant: ButtonVariant::Secondary,
                        disabled: busy,
                        onclick: move |_| on_cancel.call(()),
                        "Cancel"
                    }
                    Button {
                        variant: ButtonVariant::Primary,
                        r#type: "submit",
                        disabled: busy,
                        if busy { "Saving..." } else if is_new { "Add part" } else { "Save changes" }
                    }
                }
            }
        }
    }
}
