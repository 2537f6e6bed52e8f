use api::FeedFilter;
use dioxus::prelude::*;

use crate::components::{Button, ButtonVariant};
use crate::icons::{FaNewspaper, FaRightFromBracket};
use crate::Icon;

const VIEWS_CSS: Asset = asset!("/src/views/views.css");

/// Feed header: title, All/Following filter and sign-out.
#[component]
pub fn Navbar(
    filter: FeedFilter,
    on_filter: EventHandler<FeedFilter>,
    on_sign_out: EventHandler<()>,
) -> Element {
    rsx! {
        document::Link { rel: "stylesheet", href: VIEWS_CSS }
        div {
            class: "navbar",
            h1 {
                class: "navbar-title",
                span { class: "navbar-icon", Icon { icon: FaNewspaper, width: 24, height: 24 } }
                "News Feed"
            }
            div {
                class: "navbar-actions",
                for option in [FeedFilter::All, FeedFilter::Following] {
                    Button {
                        key: "{option.label()}",
                        variant: if filter == option { ButtonVariant::Primary } else { ButtonVariant::Outline },
                        onclick: move |_| on_filter.call(option),
                        "{option.label()}"
                    }
                }
                Button {
                    variant: ButtonVariant::Ghost,
                    title: "Sign out",
                    onclick: move |_| on_sign_out.call(()),
                    Icon { icon: FaRightFromBracket, width: 16, height: 16 }
                }
            }
        }
    }
}
