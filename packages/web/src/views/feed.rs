use dioxus::prelude::*;
use ui::views::FeedView;

use crate::Route;

#[component]
pub fn Feed() -> Element {
    let nav = use_navigator();

    rsx! {
        FeedView {
            on_sign_out: move |_| {
                nav.replace(Route::Auth {});
            },
        }
    }
}
