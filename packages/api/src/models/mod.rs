//! Data models for the application.

mod post;
mod user;
mod wire;

pub(crate) use post::parse_timestamp;
pub use post::{Post, RawPost};
pub use user::User;
pub use wire::{
    CreatedPost, ErrorResponse, FeedResponse, FollowResponse, FollowingResponse, LoginResponse,
    PostRequest, UsersResponse,
};
