//! Page-visibility hook behind the refresh-on-resume policy.
//!
//! The browser fires `visibilitychange` when the tab is hidden or shown. The
//! hook counts the transitions back to visible; a component reacts to the
//! counter in an effect, which keeps the actual refresh inside the Dioxus
//! runtime instead of the raw DOM callback.

use dioxus::prelude::*;

/// Number of times the page became visible again since the component mounted.
pub fn use_resume_count() -> Signal<u64> {
    let count = use_signal(|| 0u64);

    #[cfg(target_arch = "wasm32")]
    {
        let guard = use_hook(move || visibility::listen(count).map(std::rc::Rc::new));
        use_drop(move || {
            if let Some(guard) = &guard {
                guard.remove();
            }
        });
    }

    count
}

#[cfg(target_arch = "wasm32")]
mod visibility {
    use dioxus::prelude::*;
    use wasm_bindgen::closure::Closure;
    use wasm_bindgen::JsCast;
    use web_sys::{Document, VisibilityState};

    pub struct Listener {
        document: Document,
        callback: Closure<dyn FnMut()>,
    }

    impl Listener {
        pub fn remove(&self) {
            let _ = self
                .document
                .remove_event_listener_with_callback("visibilitychange", self.callback.as_ref().unchecked_ref());
        }
    }

    pub fn listen(count: Signal<u64>) -> Option<Listener> {
        let document = web_sys::window()?.document()?;
        let target = document.clone();
        let callback = Closure::<dyn FnMut()>::new(move || {
            if target.visibility_state() == VisibilityState::Visible {
                let mut count = count;
                count += 1;
            }
        });
        document
            .add_event_listener_with_callback("visibilitychange", callback.as_ref().unchecked_ref())
            .ok()?;
        Some(Listener { document, callback })
    }
}
