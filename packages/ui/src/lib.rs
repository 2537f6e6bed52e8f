//! This crate contains all shared UI for the workspace.

pub mod components;

// Re-export icon library
pub use dioxus_free_icons::Icon;
pub mod icons {
    pub use dioxus_free_icons::icons::fa_solid_icons::*;
}

mod token_store;
pub use token_store::{make_token_store, PlatformTokenStore};

pub mod views;

mod navbar;
pub use navbar::Navbar;

mod session;
pub use session::{use_services, use_session, Services, SessionProvider};

mod feed_item;
pub use feed_item::FeedItem;

mod create_post_dialog;
pub use create_post_dialog::CreatePostDialog;

/// Platform-appropriate async sleep.
pub(crate) async fn sleep(duration: std::time::Duration) {
    #[cfg(target_arch = "wasm32")]
    gloo_timers::future::sleep(duration).await;
    #[cfg(not(target_arch = "wasm32"))]
    tokio::time::sleep(duration).await;
}
