use dioxus::prelude::*;

use super::ModalOverlay;
use crate::components::{Button, ButtonVariant};

/// Second step of a destructive action. Nothing happens until the user
/// presses the confirm button.
#[component]
pub fn ConfirmDialog(
    title: String,
    message: String,
    #[props(default = "Delete".to_string())] confirm_label: String,
    #[props(default)] busy: bool,
    #[props(default)] layer: u8,
    on_confirm: EventHandler<()>,
    on_cancel: EventHandler<()>,
) -> Element {
    rsx! {
        ModalOverlay {
            title,
            layer,
            on_close: move |_| {
                if !busy {
                    on_cancel.call(());
                }
            },
            p { class: "confirm-message", "{message}" }
            div {
                class: "modal-actions",
                Button {
                    variant: ButtonVariant::Secondary,
                    disabled: busy,
                    onclick: move |_| on_cancel.call(()),
                    "Cancel"
                }
                Button {
                    variant: ButtonVariant::Destructive,
                    disabled: busy,
                    onclick: move |_| on_confirm.call(()),
                    if busy { "Deleting..." } else { "{confirm_label}" }
                }
            }
        }
    }
}
