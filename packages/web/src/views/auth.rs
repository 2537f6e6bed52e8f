use dioxus::prelude::*;
use ui::views::AuthView;

use crate::Route;

/// Landing page: sign in or register, then go to the feed.
#[component]
pub fn Auth() -> Element {
    let nav = use_navigator();

    rsx! {
        AuthView {
            on_authenticated: move |_| {
                nav.replace(Route::Feed {});
            },
        }
    }
}
