//! Toasts from `dioxus-primitives`, styled for the feed.
//!
//! Wrap the app in [`ToastProvider`]; any descendant calls [`use_toast`] and
//! passes [`toast_options`] so every notice shares the same lifetime.

use std::time::Duration;

use dioxus::prelude::*;
use dioxus_primitives::toast;

pub use dioxus_primitives::toast::{use_toast, ToastOptions};

const TOAST_CSS: Asset = asset!("/src/components/toast.css");

/// How long a toast stays on screen.
pub const TOAST_DURATION: Duration = Duration::from_secs(3);

/// Options used for every toast in the client.
pub fn toast_options() -> ToastOptions {
    ToastOptions::new().duration(TOAST_DURATION)
}

#[component]
pub fn ToastProvider(children: Element) -> Element {
    rsx! {
        document::Link { rel: "stylesheet", href: TOAST_CSS }
        toast::ToastProvider {
            {children}
        }
    }
}
