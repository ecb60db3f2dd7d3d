use dioxus::prelude::*;
use store::forms::ElevatorForm;
use store::{Building, Elevator, ElevatorInput, ElevatorStatus, FieldErrors};

use super::ModalOverlay;
use crate::components::{Button, ButtonVariant, FieldError, Input, Label, Select};

/// Create or edit an elevator. The modal stays open until the parent closes
/// it, so a rejected save can be corrected in place.
#[component]
pub fn ElevatorFormModal(
    #[props(!optional)] existing: Option<Elevator>,
    buildings: Vec<Building>,
    busy: bool,
    on_submit: EventHandler<ElevatorInput>,
    on_cancel: EventHandler<()>,
) -> Element {
    let is_new = existing.is_none();
    let mut form = use_signal(|| existing.as_ref().map(ElevatorForm::from).unwrap_or_default());
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

    let status_options: Vec<(String, String)> = ElevatorStatus::ALL
        .iter()
        .map(|s| (s.as_str().to_string(), s.label().to_string()))
        .collect();
    let building_options: Vec<(String, String)> = std::iter::once((String::new(), "No building".to_string()))
        .chain(buildings.iter().map(|b| (b.id.clone(), b.name.clone())))
        .collect();
    let field_error = move |field: &str| errors.read().get(field).map(str::to_string);

    rsx! {
        ModalOverlay {
            title: if is_new { "Add elevator".to_string() } else { "Edit elevator".to_string() },
            on_close: move |_| on_cancel.call(()),
            form {
                class: "modal-form",
                onsubmit: handle_submit,

                div {
                    class: "form-grid",
                    div {
                        class: "field",
                        Label { html_for: "elevator-serial", "Serial number" }
                        Input {
                            id: "elevator-serial",
                            value: form.read().serial_number.clone(),
                            invalid: field_error("serial_number").is_some(),
                            oninput: move |evt: FormEvent| form.write().serial_number = evt.value(),
                        }
                        FieldError { message: field_error("serial_number") }
                    }
                    div {
                        class: "field",
                        Label { html_for: "elevator-model", "Model" }
                        Input {
                            id: "elevator-model",
                            value: form.read().model.clone(),
                            invalid: field_error("model").is_some(),
                            oninput: move |evt: FormEvent| form.write().model = evt.value(),
                        }
                        FieldError { message: field_error("model") }
                    }
                    div {
                        class: "field",
                        Label { html_for: "elevator-capacity", "Capacity (kg)" }
                        Input {
                            id: "elevator-capacity",
                            r#type: "number",
                            value: form.read().capacity.clone(),
                            invalid: field_error("capacity").is_some(),
                            oninput: move |evt: FormEvent| form.write().capacity = evt.value(),
                        }
                        FieldError { message: field_error("capacity") }
                    }
                    div {
                        class: "field",
                        Label { html_for: "elevator-status", "Status" }
                        Select {
                            id: "elevator-status",
                            value: form.read().status.clone(),
                            options: status_options,
                            onchange: move |evt: FormEvent| form.write().status = evt.value(),
                        }
                        FieldError { message: field_error("status") }
                    }
                    div {
                        class: "field field-wide",
                        Label { html_for: "elevator-building", "Building" }
                        Select {
                            id: "elevator-building",
                            value: form.read().building_id.clone(),
                            options: building_options,
                            onchange: move |evt: FormEvent| form.write().building_id = evt.value(),
                        }
                    }
                    div {
                        class: "field",
                        Label { html_for: "elevator-last-inspection", "Last inspection" }
                        Input {
                            id: "elevator-last-inspection",
                            r#type: "date",
                            value: form.read().last_inspection.clone(),
                            invalid: field_error("last_inspection").is_some(),
                            oninput: move |evt: FormEvent| form.write().last_inspection = evt.value(),
                        }
                        FieldError { message: field_error("last_inspection") }
                    }
                    div {
                        class: "field",
                        Label { html_for: "elevator-next-inspection", "Next inspection" }
                        Input {
                            id: "elevator-next-inspection",
                            r#type: "date",
                            value: form.read().next_inspection.clone(),
                            invalid: field_error("next_inspection").is_some(),
                            oninput: move |evt: FormEvent| form.write().next_inspection = evt.value(),
                        }
                        FieldError { message: field_error("next_inspection") }
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
                        if busy { "Saving..." } else if is_new { "Add elevator" } else { "Save changes" }
                    }
                }
            }
        }
    }
}
