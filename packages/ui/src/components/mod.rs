//! Form controls, buttons and the toast surface shared by every view.

mod button;
mod form;
mod toast;

pub use button::{Button, ButtonVariant, IconButton};
pub use form::{FieldError, Input, Label, Select, Textarea};
pub use toast::{use_toast, ToastOptions, ToastProvider, Toasts};

use dioxus::prelude::*;

pub const COMPONENTS_CSS: Asset = asset!("/assets/styling/components.css");
