mod modal_overlay;
pub use modal_overlay::ModalOverlay;

mod auth;
pub use auth::AuthView;

mod feed;
pub use feed::FeedView;
