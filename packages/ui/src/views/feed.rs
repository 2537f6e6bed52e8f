//! The infinite-scroll feed screen.

use api::{finish_load, start_load, FeedFilter, FeedState, FollowNotice, Post};
use dioxus::prelude::*;

use super::ModalOverlay;
use crate::components::{toast_options, use_toast, Button, ButtonVariant};
use crate::icons::FaPenToSquare;
use crate::{use_services, use_session, CreatePostDialog, FeedItem, Icon, Navbar};

const VIEWS_CSS: Asset = asset!("/src/views/views.css");

/// Shared feed view. `on_sign_out` lets the platform navigate back to auth.
#[component]
pub fn FeedView(on_sign_out: EventHandler<()>) -> Element {
    let services = use_services();
    let mut session = use_session();
    let toasts = use_toast();
    let mut feed = use_signal(FeedState::new);
    let mut filter = use_signal(|| FeedFilter::All);
    let mut composing = use_signal(|| false);

    let load_services = services.clone();
    let load_page = use_callback(move |_: ()| {
        let Some(page) = start_load(&mut feed.write(), &session.peek()) else {
            return;
        };
        let loader = load_services.loader.clone();
        let current = session.peek().clone();
        spawn(async move {
            let fetched = loader.fetch_page(&current, page).await;
            // Errors are logged and the page re-armed by finish_load
            let _ = finish_load(&mut feed.write(), &mut session.write(), fetched);
        });
    });

    // The sensor element pulls the next page when it scrolls into view. Its key
    // changes after every applied page, so it remounts and reports again.
    let mut on_sensor = move |evt: VisibleEvent| {
        if !evt.is_intersecting().unwrap_or(false) {
            return;
        }
        if feed.write().advance() {
            load_page.call(());
        }
    };

    // First page on mount
    use_effect(move || {
        load_page.call(());
    });

    let toggle_services = services.clone();
    let toggle_follow = use_callback(move |(user_id, following): (i64, bool)| {
        let loader = toggle_services.loader.clone();
        let current = session.peek().clone();
        spawn(async move {
            match loader.toggle_follow(&current, user_id, following).await {
                Ok(response) => {
                    feed.write().set_following(user_id, !following);
                    match FollowNotice::for_reply(following, response) {
                        Some(FollowNotice::Followed(message)) => {
                            toasts.success(message, toast_options());
                        }
                        Some(notice) => toasts.info(notice.message().to_string(), toast_options()),
                        None => {}
                    }
                }
                Err(e) => {
                    tracing::error!("Error toggling follow for user {}: {}", user_id, e);
                }
            }
        });
    });

    let handle_sign_out = move |_: ()| {
        session.set(services.sign_out());
        tracing::info!("Signed out");
        on_sign_out.call(());
    };

    let handle_created = move |post: Post| {
        feed.write().prepend(post);
        composing.set(false);
        toasts.success("Post uploaded successfully.".to_string(), toast_options());
    };

    let current_session = session();
    let (visible, loading, has_more, sensor_key) = {
        let state = feed.read();
        let sensor_key = state.sensor_key(filter());
        let posts = state.visible(filter());
        let last = posts.len().checked_sub(1);
        let visible: Vec<(Post, bool, String)> = posts
            .into_iter()
            .enumerate()
            .map(|(index, post)| {
                let show_follow = current_session.is_authenticated()
                    && !current_session.is_own(post.author.id);
                let key = if Some(index) == last {
                    sensor_key.clone()
                } else {
                    post.id.to_string()
                };
                (post.clone(), show_follow, key)
            })
            .collect();
        (visible, state.loading, state.has_more, sensor_key)
    };
    let last_index = visible.len().checked_sub(1);
    // Nothing passes the filter yet, but later pages may add posts
    let waiting = current_session.is_authenticated() && has_more && !loading;
    let empty_sensor = (waiting && last_index.is_none()).then_some(sensor_key);

    rsx! {
        document::Link { rel: "stylesheet", href: VIEWS_CSS }
        div {
            class: "feed-screen",
            Navbar {
                filter: filter(),
                on_filter: move |option| filter.set(option),
                on_sign_out: handle_sign_out,
            }

            div {
                class: "feed-list",
                if !current_session.is_authenticated() {
                    div {
                        class: "feed-empty",
                        p { "Sign in to see your feed." }
                        Button {
                            variant: ButtonVariant::Primary,
                            onclick: move |_| on_sign_out.call(()),
                            "Sign In"
                        }
                    }
                } else if visible.is_empty() && !loading {
                    div { class: "feed-empty", "No posts yet" }
                }

                for key in empty_sensor {
                    div {
                        key: "{key}",
                        class: "feed-sensor",
                        onvisible: on_sensor,
                    }
                }

                for (index, (post, show_follow, key)) in visible.into_iter().enumerate() {
                    div {
                        key: "{key}",
                        onvisible: move |evt: VisibleEvent| {
                            if Some(index) == last_index {
                                on_sensor(evt);
                            }
                        },
                        FeedItem {
                            show_follow,
                            on_toggle_follow: move |args| toggle_follow.call(args),
                            post,
                        }
                    }
                }

                if loading {
                    div { class: "feed-loading", "Loading more..." }
                }
            }

            if current_session.is_authenticated() {
                button {
                    class: "compose-fab",
                    title: "New post",
                    onclick: move |_| composing.set(true),
                    Icon { icon: FaPenToSquare, width: 22, height: 22 }
                }
            }

            if composing() {
                ModalOverlay {
                    on_close: move |_| composing.set(false),
                    CreatePostDialog {
                        on_created: handle_created,
                        on_cancel: move |_| composing.set(false),
                    }
                }
            }
        }
    }
}
