//! Authentication: credential validation and session bootstrap.

mod credentials;
mod session;

pub use credentials::{AuthMode, Credentials};
pub use session::{decode_user_id, Session, DEFAULT_DISPLAY_NAME};
