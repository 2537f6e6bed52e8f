mod auth;
pub use auth::Auth;

mod feed;
pub use feed::Feed;
