use dioxus::prelude::*;

#[component]
pub fn Label(html_for: String, children: Element) -> Element {
    rsx! {
        label { class: "field-label", r#for: html_for, {children} }
    }
}

#[component]
pub fn Input(
    #[props(default)] id: String,
    #[props(default)] class: String,
    #[props(default = "text".to_string())] r#type: String,
    #[props(default)] placeholder: String,
    #[props(default)] value: String,
    #[props(default)] autocomplete: String,
    #[props(default)] disabled: bool,
    /// Draws the field in the error colour.
    #[props(default)]
    invalid: bool,
    oninput: Option<EventHandler<FormEvent>>,
) -> Element {
    let state = if invalid { "input input-invalid" } else { "input" };
    rsx! {
        input {
            id: id,
            class: "{state} {class}",
            r#type: r#type,
            placeholder: placeholder,
            value: value,
            autocomplete: autocomplete,
            disabled,
            oninput: move |evt| {
                if let Some(handler) = &oninput {
                    handler.call(evt);
                }
            },
        }
    }
}

#[component]
pub fn Textarea(
    #[props(default)] id: String,
    #[props(default)] class: String,
    #[props(default)] placeholder: String,
    #[props(default)] value: String,
    #[props(default = 3)] rows: u32,
    oninput: Option<EventHandler<FormEvent>>,
) -> Element {
    rsx! {
        textarea {
            id: id,
            class: "input textarea {class}",
            placeholder: placeholder,
            rows: "{rows}",
            value: value,
            oninput: move |evt| {
                if let Some(handler) = &oninput {
                    handler.call(evt);
                }
            },
        }
    }
}

/// `<select>` over `(value, label)` pairs.
#[component]
pub fn Select(
    #[props(default)] id: String,
    #[props(default)] class: String,
    value: String,
    options: Vec<(String, String)>,
    onchange: EventHandler<FormEvent>,
) -> Element {
    rsx! {
        select {
            id: id,
            class: "input select {class}",
            value: value.clone(),
            onchange: move |evt| onchange.call(evt),
            for (option_value, label) in options {
                option {
                    key: "{option_value}",
                    value: "{option_value}",
                    selected: option_value == value,
                    "{label}"
                }
            }
        }
    }
}

/// Inline validation message under a field.
#[component]
pub fn FieldError(#[props(!optional)] message: Option<String>) -> Element {
    match message {
        Some(message) => rsx! {
            p { class: "field-error", role: "alert", "{message}" }
        },
        None => rsx! {},
    }
}
