use api::{Composer, Post};
use dioxus::prelude::*;

use crate::components::{Button, ButtonVariant, Textarea};
use crate::{use_services, use_session};

/// Create-post form shown inside the modal overlay.
///
/// The draft is truncated to 200 characters as it is typed. Blank drafts
/// cannot be submitted. Failures are only logged; the draft stays so the user
/// can resubmit.
#[component]
pub fn CreatePostDialog(on_created: EventHandler<Post>, on_cancel: EventHandler<()>) -> Element {
    let services = use_services();
    let session = use_session();
    let mut composer = use_signal(Composer::new);
    let mut submitting = use_signal(|| false);

    let handle_post = move |_| {
        let Some(content) = composer.peek().submission().map(str::to_string) else {
            return;
        };
        if submitting() {
            return;
        }
        let current = session.peek().clone();
        let loader = services.loader.clone();
        submitting.set(true);
        spawn(async move {
            match loader.create_post(&current, &content, chrono::Utc::now()).await {
                Ok(post) => {
                    composer.write().clear();
                    on_created.call(post);
                }
                Err(e) => {
                    tracing::error!("Error creating post: {}", e);
                }
            }
            submitting.set(false);
        });
    };

    let draft = composer();
    let blank = draft.submission().is_none();

    rsx! {
        div {
            class: "create-post",
            h2 { class: "create-post-title", "Create Post" }
            Textarea {
                class: "create-post-input",
                placeholder: "What's on your mind?",
                rows: 4,
                value: draft.text().to_string(),
                oninput: move |evt: FormEvent| composer.write().set_text(&evt.value()),
            }
            div {
                class: "create-post-footer",
                span {
                    class: if draft.at_limit() { "char-counter char-counter--limit" } else { "char-counter" },
                    "{draft.counter()}"
                }
                div {
                    class: "create-post-actions",
                    Button {
                        variant: ButtonVariant::Outline,
                        onclick: move |_| on_cancel.call(()),
                        "Cancel"
                    }
                    Button {
                        variant: ButtonVariant::Primary,
                        disabled: blank || submitting(),
                        onclick: handle_post,
                        "Post"
                    }
                }
            }
        }
    }
}
