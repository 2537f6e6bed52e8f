use dioxus::prelude::*;

use store::ClientConfig;
use ui::components::ToastProvider;
use ui::SessionProvider;
use views::{Auth, Feed};

mod views;

#[derive(Debug, Clone, Routable, PartialEq)]
#[rustfmt::skip]
enum Route {
    #[route("/")]
    Auth {},
    #[route("/feed")]
    Feed {},
}

const MAIN_CSS: Asset = asset!("/assets/main.css");

/// Build-time client configuration; a broken file falls back to defaults.
const CONFIG_TOML: &str = include_str!("../newsfeed.toml");

fn main() {
    dioxus::logger::initialize_default();
    tracing::info!("Starting news feed client");
    dioxus::launch(App);
}

#[component]
fn App() -> Element {
    let config = ClientConfig::from_toml_or_default(CONFIG_TOML);

    rsx! {
        document::Link { rel: "stylesheet", href: MAIN_CSS }

        SessionProvider {
            config,
            ToastProvider {
                Router::<Route> {}
            }
        }
    }
}
