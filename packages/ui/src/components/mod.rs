//! Small styled building blocks shared by every view.

mod button;
mod input;
mod textarea;
mod toast;

pub use button::{Button, ButtonVariant};
pub use input::Input;
pub use textarea::Textarea;
pub use toast::{toast_options, use_toast, ToastOptions, ToastProvider, TOAST_DURATION};
