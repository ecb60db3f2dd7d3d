use dioxus::prelude::*;

/// A full-screen overlay that centers its children in a modal card.
/// Clicking outside the card, or the close button, triggers `on_close`.
///
/// Modals nest: a later overlay stacks above an earlier one through `layer`.
#[component]
pub fn ModalOverlay(
    title: String,
    on_close: EventHandler<()>,
    #[props(default)] wide: bool,
    #[props(default)] layer: u8,
    children: Element,
) -> Element {
    let z_index = 2000 + u32::from(layer) * 10;
    let card = if wide { "modal-card modal-card-wide" } else { "modal-card" };

    rsx! {
        div {
            class: "modal-backdrop",
            style: "z-index: {z_index}",
            onclick: move |_| on_close.call(()),
            div {
                class: card,
                role: "dialog",
                aria_modal: "true",
                onclick: move |evt: Event<MouseData>| evt.stop_propagation(),
                div {
                    class: "modal-header",
                    h2 { class: "modal-title", "{title}" }
                    button {
                        class: "modal-close",
                        r#type: "button",
                        aria_label: "Close",
                        onclick: move |_| on_close.call(()),
                        "×"
                    }
                }
                div { class: "modal-body", {children} }
            }
        }
    }
}
