//! Nested modal listing the parts of one elevator.
//!
//! Parts are never cached: opening the modal and every successful write read
//! the list again.

use api::RemoteClient;
use dioxus::prelude::*;
use store::{DeleteConfirmation, Elevator, ElevatorPart, LoadOutcome, PartInput, PartStatus, PartsList, PartsView};

use super::{ConfirmDialog, ModalOverlay, PartFormModal};
use crate::auth::use_client;
use crate::components::{use_toast, ToastOptions, Button, ButtonVariant, IconButton};
use crate::icons::{FaPen, FaPlus, FaTrash};
use crate::Icon;

#[derive(Clone, Debug, PartialEq)]
enum EditingPart {
    New,
    Existing(ElevatorPart),
}

fn part_badge(status: PartStatus) -> &'static str {
    match status {
        PartStatus::Operational => "badge badge-ok",
        PartStatus::NeedsMaintenance => "badge badge-warn",
        PartStatus::Defective => "badge badge-danger",
    }
}

fn date_cell<D: std::fmt::Display>(date: Option<D>) -> String {
    date.map(|d| d.to_string()).unwrap_or_else(|| "-".to_string())
}

#[component]
pub fn PartsModal(elevator: Elevator, on_close: EventHandler<()>) -> Element {
    let client = use_client();
    let toasts = use_toast();
    let view = use_signal(PartsView::default);

    let parts = use_hook(|| {
        PartsList::<RemoteClient>::new(client.clone()).with_listener(move |snapshot| {
            let mut view = view;
            view.set(snapshot);
        })
    });

    let mut editing = use_signal(|| Option::<EditingPart>::None);
    let mut saving = use_signal(|| false);
    let mut confirm = use_signal(DeleteConfirmation::<ElevatorPart>::default);
    let mut deleting = use_signal(|| false);

    use_hook({
        let parts = parts.clone();
        let elevator_id = elevator.id.clone();
        move || {
            spawn(async move {
                if let LoadOutcome::Failed(e) = parts.open(&elevator_id).await {
                    toasts.error(e.user_message(), ToastOptions::new());
                }
            });
        }
    });

    let close = {
        let parts = parts.clone();
        move |_: ()| {
            parts.close();
            on_close.call(());
        }
    };

    let retry = {
        let parts = parts.clone();
        move |_: MouseEvent| {
            let parts = parts.clone();
            spawn(async move {
                if let LoadOutcome::Failed(e) = parts.reload().await {
                    toasts.error(e.user_message(), ToastOptions::new());
                }
            });
        }
    };

    let submit = {
        let parts = parts.clone();
        move |input: PartInput| {
            let parts = parts.clone();
            let target = editing.peek().clone();
            spawn(async move {
                saving.set(true);
                let result = match target {
                    Some(EditingPart::Existing(part)) => parts.update(&part.id, &input).await.map(|_| "Part updated."),
                    _ => parts.add(&input).await.map(|_| "Part added."),
                };
                saving.set(false);
                match result {
                    Ok(message) => {
                        toasts.success(message.to_string(), ToastOptions::new());
                        editing.set(None);
                    }
                    Err(e) => toasts.error(e.user_message(), ToastOptions::new()),
                }
            });
        }
    };

    let confirm_delete = {
        let parts = parts.clone();
        move |_: ()| {
            let Some(part) = confirm.write().confirm() else {
                return;
            };
            let parts = parts.clone();
            spawn(async move {
                deleting.set(true);
                match parts.delete(&part.id).await {
                    Ok(()) => toasts.success(format!("Part {} deleted.", part.name), ToastOptions::new()),
                    Err(e) => toasts.error(e.user_message(), ToastOptions::new()),
                }
                deleting.set(false);
            });
        }
    };

    let snapshot = view();

    rsx! {
        ModalOverlay {
            title: format!("Parts of {}", elevator.serial_number),
            wide: true,
            layer: 1,
            on_close: close.clone(),

            div {
                class: "panel-header",
                p { class: "view-muted", "{elevator.model}, {elevator.capacity} kg" }
                Button {
                    variant: ButtonVariant::Primary,
                    disabled: snapshot.is_loading(),
                    onclick: move |_| editing.set(Some(EditingPart::New)),
                    Icon { icon: FaPlus, width: 14, height: 14 }
                    " Add part"
                }
            }

            if let Some(message) = snapshot.error() {
                div {
                    class: "alert alert-error",
                    span { "{message}" }
                    Button { variant: ButtonVariant::Secondary, onclick: retry, "Try again" }
                }
            }

            if snapshot.is_loading() && snapshot.parts.is_empty() {
                div { class: "loading", "Loading parts..." }
            } else if snapshot.parts.is_empty() && snapshot.error().is_none() {
                div { class: "empty-state", "No parts recorded for this elevator." }
            } else if !snapshot.parts.is_empty() {
                table {
                    class: "data-table",
                    thead {
                        tr {
                            th { "Name" }
                            th { "Part number" }
                            th { "Manufacturer" }
                            th { "Status" }
                            th { "Installed" }
                            th { "Last maintenance" }
                            th { class: "col-actions", "" }
                        }
                    }
                    tbody {
                        for part in snapshot.parts.iter().cloned() {
                            tr {
                                key: "{part.id}",
                                td {
                                    div { "{part.name}" }
                                    if let Some(description) = &part.description {
                                        div { class: "view-muted cell-note", "{description}" }
                                    }
                                }
                                td { class: "mono", "{part.part_number}" }
                                td { {part.manufacturer.clone().unwrap_or_else(|| "-".to_string())} }
                                td { span { class: part_badge(part.status), "{part.status.label()}" } }
                                td { {date_cell(part.installation_date)} }
                                td { {date_cell(part.last_maintenance_date)} }
                                td {
                                    class: "col-actions",
                                    IconButton {
                                        title: "Edit",
                                        variant: ButtonVariant::Ghost,
                                        onclick: {
                                            let part = part.clone();
                                            move |_| editing.set(Some(EditingPart::Existing(part.clone())))
                                        },
                                        Icon { icon: FaPen, width: 14, height: 14 }
                                    }
                                    IconButton {
                                        title: "Delete",
                                        variant: ButtonVariant::Ghost,
                                        onclick: {
                                            let part = part.clone();
                                            move |_| confirm.write().request(part.clone())
                                        },
                                        Icon { icon: FaTrash, width: 14, height: 14 }
                                    }
                                }
                            }
                        }
                    }
                }
            }

            div {
                class: "modal-actions",
                Button {
                    variant: ButtonVariant::Secondary,
                    onclick: {
                        let close = close.clone();
                        move |_| close(())
                    },
                    "Close"
                }
            }
        }

        if let Some(target) = editing() {
            PartFormModal {
                existing: match target {
                    EditingPart::Existing(part) => Some(part),
                    EditingPart::New => None,
                },
                busy: saving(),
                on_submit: submit,
                on_cancel: move |_| editing.set(None),
            }
        }

        if let Some(part) = confirm.read().pending().cloned() {
            ConfirmDialog {
                title: "Delete part",
                message: format!("Delete part {} ({})? This cannot be undone.", part.name, part.part_number),
                busy: deleting(),
                layer: 3,
                on_confirm: confirm_delete,
                on_cancel: move |_| confirm.write().cancel(),
            }
        }
    }
}
