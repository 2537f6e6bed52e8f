use api::{format_relative_time, Post};
use dioxus::prelude::*;

/// One post in the feed.
///
/// The follow toggle is hidden when `show_follow` is false (own posts, or an
/// anonymous session).
#[component]
pub fn FeedItem(
    post: Post,
    show_follow: bool,
    /// Called with `(author_id, currently_following)`.
    on_toggle_follow: EventHandler<(i64, bool)>,
) -> Element {
    let author_id = post.author.id;
    let following = post.is_following_author;
    let age = format_relative_time(&post.created_at, chrono::Utc::now());

    rsx! {
        div {
            class: "feed-item",
            div {
                class: "feed-item-header",
                span { class: "feed-item-author", "{post.author.display_name()}" }
                if show_follow {
                    button {
                        class: if following { "follow-btn follow-btn--following" } else { "follow-btn" },
                        onclick: move |_| on_toggle_follow.call((author_id, following)),
                        if following { "Unfollow" } else { "Follow" }
                    }
                }
            }
            p { class: "feed-item-content", "{post.content}" }
            p { class: "feed-item-time", title: "{post.created_at}", "{age}" }
        }
    }
}
