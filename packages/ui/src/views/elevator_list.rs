//! Elevator table: filters, status summary, create/edit/delete and the entry
//! point into the parts of each elevator.
//!
//! All state lives in a [`store::ElevatorList`] created once per mount; the
//! controller pushes a fresh [`ListView`] into a signal after every change.
//! Mount it keyed on the session epoch: a sign-out unmounts the view, which
//! resets the controller and drops its cache.

use api::RemoteClient;
use dioxus::prelude::*;
use store::{
    DeleteConfirmation, Elevator, ElevatorInput, ElevatorList, ElevatorStatus, ListView, LoadOutcome, Phase,
    Profile, StatusFilter, SystemClock,
};

use super::{ConfirmDialog, ElevatorFormModal, PartsModal};
use crate::auth::{use_app_config, use_client};
use crate::components::{use_toast, ToastOptions, Button, ButtonVariant, IconButton, Input, Select};
use crate::icons::{FaArrowsRotate, FaPen, FaPlus, FaTrash, FaWrench};
use crate::resume::use_resume_count;
use crate::Icon;

type Controller = ElevatorList<RemoteClient, SystemClock>;

#[derive(Clone, Debug, PartialEq)]
enum Editing {
    New,
    Existing(Elevator),
}

fn chip_class(active: bool) -> &'static str {
    if active {
        "chip chip-active"
    } else {
        "chip"
    }
}

pub(crate) fn status_badge(status: ElevatorStatus) -> &'static str {
    match status {
        ElevatorStatus::Operational => "badge badge-ok",
        ElevatorStatus::Maintenance => "badge badge-warn",
        ElevatorStatus::OutOfOrder => "badge badge-danger",
    }
}

#[component]
pub fn ElevatorListView(profile: Profile) -> Element {
    let client = use_client();
    let config = use_app_config();
    let toasts = use_toast();
    let view = use_signal(ListView::default);

    let list = use_hook(|| {
        let list = Controller::new(client.clone(), config.cache_ttl())
            .with_refresh_on_resume(config.refresh.on_resume)
            .with_listener(move |snapshot| {
                // The last snapshot arrives from the teardown below, when the
                // signal may already be gone.
                let mut view = view;
                if let Ok(mut slot) = view.try_write() {
                    *slot = snapshot;
                }
            });
        list.set_scope(Controller::scope_for(&profile));
        list
    });

    use_drop({
        let list = list.clone();
        move || list.reset()
    });

    let mut editing = use_signal(|| Option::<Editing>::None);
    let mut saving = use_signal(|| false);
    let mut confirm = use_signal(DeleteConfirmation::<Elevator>::default);
    let mut deleting = use_signal(|| false);
    let mut parts_for = use_signal(|| Option::<Elevator>::None);

    use_hook({
        let list = list.clone();
        move || {
            spawn(async move {
                if let LoadOutcome::Failed(e) = list.load().await {
                    toasts.error(e.user_message(), ToastOptions::new());
                }
            });
        }
    });

    let resumes = use_resume_count();
    use_effect({
        let list = list.clone();
        move || {
            if resumes() == 0 {
                return;
            }
            let list = list.clone();
            spawn(async move {
                if let Some(LoadOutcome::Failed(e)) = list.resume().await {
                    toasts.error(e.user_message(), ToastOptions::new());
                }
            });
        }
    });

    let refresh = {
        let list = list.clone();
        move |_: MouseEvent| {
            let list = list.clone();
            spawn(async move {
                match list.refresh().await {
                    LoadOutcome::Failed(e) => toasts.error(e.user_message(), ToastOptions::new()),
                    LoadOutcome::Suppressed => {}
                    _ => toasts.info("Elevator list refreshed.".to_string(), ToastOptions::new()),
                }
            });
        }
    };

    let retry = {
        let list = list.clone();
        move |_: MouseEvent| {
            let list = list.clone();
            spawn(async move {
                if let LoadOutcome::Failed(e) = list.load().await {
                    toasts.error(e.user_message(), ToastOptions::new());
                }
            });
        }
    };

    let submit = {
        let list = list.clone();
        move |input: ElevatorInput| {
            let list = list.clone();
            let target = editing.peek().clone();
            spawn(async move {
                saving.set(true);
                let result = match target {
                    Some(Editing::Existing(elevator)) => {
                        list.update(&elevator.id, &input).await.map(|_| "Elevator updated.")
                    }
                    _ => list.create(&input).await.map(|_| "Elevator created."),
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
        let list = list.clone();
        move |_: ()| {
            let Some(elevator) = confirm.write().confirm() else {
                return;
            };
            let list = list.clone();
            spawn(async move {
                deleting.set(true);
                match list.delete(&elevator.id).await {
                    Ok(()) => toasts.success(format!("Elevator {} deleted.", elevator.serial_number), ToastOptions::new()),
                    Err(e) => toasts.error(e.user_message(), ToastOptions::new()),
                }
                deleting.set(false);
            });
        }
    };

    let search_list = list.clone();
    let status_list = list.clone();
    let chip_list = list.clone();

    let snapshot = view();
    let status_options: Vec<(String, String)> = std::iter::once(("all".to_string(), "All statuses".to_string()))
        .chain(
            ElevatorStatus::ALL
                .iter()
                .map(|s| (s.as_str().to_string(), s.label().to_string())),
        )
        .collect();

    rsx! {
        section {
            class: "panel",
            div {
                class: "panel-header",
                div {
                    h2 { class: "panel-title", "Elevators" }
                    p { class: "view-muted", "{snapshot.rows.len()} of {snapshot.total} shown" }
                }
                div {
                    class: "panel-actions",
                    Button {
                        variant: ButtonVariant::Secondary,
                        disabled: snapshot.is_loading(),
                        onclick: refresh,
                        Icon { icon: FaArrowsRotate, width: 14, height: 14 }
                        " Refresh"
                    }
                    Button {
                        variant: ButtonVariant::Primary,
                        onclick: move |_| editing.set(Some(Editing::New)),
                        Icon { icon: FaPlus, width: 14, height: 14 }
                        " Add elevator"
                    }
                }
            }

            div {
                class: "status-chips",
                for status in ElevatorStatus::ALL {
                    button {
                        key: "{status.as_str()}",
                        class: chip_class(snapshot.status == StatusFilter::Only(status)),
                        onclick: {
                            let list = chip_list.clone();
                            let current = snapshot.status;
                            move |_| {
                                if current == StatusFilter::Only(status) {
                                    list.set_status(StatusFilter::All);
                                } else {
                                    list.set_status(StatusFilter::Only(status));
                                }
                            }
                        },
                        span { class: status_badge(status), "{status.label()}" }
                        span { class: "chip-count", "{snapshot.status_count(status)}" }
                    }
                }
            }

            div {
                class: "filters",
                Input {
                    class: "filter-search",
                    r#type: "search",
                    placeholder: "Search serial number or model",
                    value: snapshot.search.clone(),
                    oninput: move |evt: FormEvent| search_list.set_search(evt.value()),
                }
                Select {
                    class: "filter-status",
                    value: snapshot.status.as_str().to_string(),
                    options: status_options,
                    onchange: move |evt: FormEvent| status_list.set_status(StatusFilter::parse(&evt.value())),
                }
            }

            if let Phase::Error(message) = &snapshot.phase {
                div {
                    class: "alert alert-error",
                    span { "{message}" }
                    Button { variant: ButtonVariant::Secondary, onclick: retry, "Try again" }
                }
            }

            if snapshot.is_loading() && snapshot.total == 0 {
                div { class: "loading", "Loading elevators..." }
            } else if snapshot.rows.is_empty() && snapshot.phase == Phase::Ready {
                div {
                    class: "empty-state",
                    if snapshot.total == 0 {
                        "No elevators yet. Add the first one to start tracking maintenance."
                    } else {
                        "No elevators match the current filters."
                    }
                }
            } else if !snapshot.rows.is_empty() {
                if snapshot.is_loading() {
                    div { class: "loading-inline", "Refreshing..." }
                }
                table {
                    class: "data-table",
                    thead {
                        tr {
                            th { "Serial number" }
                            th { "Model" }
                            th { "Capacity" }
                            th { "Status" }
                            th { "Building" }
                            th { "Next inspection" }
                            th { class: "col-actions", "" }
                        }
                    }
                    tbody {
                        for elevator in snapshot.rows.iter().cloned() {
                            tr {
                                key: "{elevator.id}",
                                td { class: "mono", "{elevator.serial_number}" }
                                td { "{elevator.model}" }
                                td { "{elevator.capacity} kg" }
                                td { span { class: status_badge(elevator.status), "{elevator.status.label()}" } }
                                td {
                                    {snapshot.building_name(elevator.building_id.as_deref()).unwrap_or("-").to_string()}
                                }
                                td {
                                    {elevator.next_inspection.map(|d| d.to_string()).unwrap_or_else(|| "-".to_string())}
                                }
                                td {
                                    class: "col-actions",
                                    IconButton {
                                        title: "Parts",
                                        variant: ButtonVariant::Ghost,
                                        onclick: {
                                            let elevator = elevator.clone();
                                            move |_| parts_for.set(Some(elevator.clone()))
                                        },
                                        Icon { icon: FaWrench, width: 14, height: 14 }
                                    }
                                    IconButton {
                                        title: "Edit",
                                        variant: ButtonVariant::Ghost,
                                        onclick: {
                                            let elevator = elevator.clone();
                                            move |_| editing.set(Some(Editing::Existing(elevator.clone())))
                                        },
                                        Icon { icon: FaPen, width: 14, height: 14 }
                                    }
                                    IconButton {
                                        title: "Delete",
                                        variant: ButtonVariant::Ghost,
                                        onclick: {
                                            let elevator = elevator.clone();
                                            move |_| confirm.write().request(elevator.clone())
                                        },
                                        Icon { icon: FaTrash, width: 14, height: 14 }
                                    }
                                }
                            }
                        }
                    }
                }
            }
        }

        if let Some(target) = editing() {
            ElevatorFormModal {
                existing: match target {
                    Editing::Existing(elevator) => Some(elevator),
                    Editing::New => None,
                },
                buildings: snapshot.buildings.clone(),
                busy: saving(),
                on_submit: submit,
                on_cancel: move |_| editing.set(None),
            }
        }

        if let Some(elevator) = confirm.read().pending().cloned() {
            ConfirmDialog {
                title: "Delete elevator",
                message: format!(
                    "Delete elevator {} ({})? Its parts and history go with it. This cannot be undone.",
                    elevator.serial_number, elevator.model
                ),
                busy: deleting(),
                on_confirm: confirm_delete,
                on_cancel: move |_| confirm.write().cancel(),
            }
        }

        if let Some(elevator) = parts_for() {
            PartsModal {
                key: "{elevator.id}",
                elevator,
                on_close: move |_| parts_for.set(None),
            }
        }
    }
}
