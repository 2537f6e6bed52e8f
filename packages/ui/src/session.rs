//! Session context and hooks for the UI.

use std::rc::Rc;

use api::{ApiClient, FeedLoader, Session};
use dioxus::prelude::*;
use store::{ClientConfig, TokenStore};

use crate::token_store::{make_token_store, PlatformTokenStore};

/// Long-lived client objects shared through context.
#[derive(Clone)]
pub struct Services {
    pub loader: Rc<FeedLoader<ApiClient>>,
    pub tokens: Rc<PlatformTokenStore>,
}

impl Services {
    pub fn new(config: &ClientConfig) -> Self {
        let client = ApiClient::from_config(config);
        let loader = FeedLoader::from_config(client, config);
        let tokens = make_token_store(config);
        Self {
            loader: Rc::new(loader),
            tokens: Rc::new(tokens),
        }
    }

    /// Persist a freshly issued token and derive the session from it.
    pub fn sign_in(&self, token: String) -> Session {
        self.tokens.save(&token);
        Session::from_token(Some(token))
    }

    /// Forget the stored token.
    pub fn sign_out(&self) -> Session {
        self.tokens.clear();
        Session::anonymous()
    }
}

/// Get the shared client services.
pub fn use_services() -> Services {
    use_context::<Services>()
}

/// Get the current session.
/// Returns a signal that updates when the user signs in or out.
pub fn use_session() -> Signal<Session> {
    use_context::<Signal<Session>>()
}

/// Provider component that bootstraps the session from the stored token.
/// Wrap your app with this component to enable the feed and auth views.
#[component]
pub fn SessionProvider(config: ClientConfig, children: Element) -> Element {
    let services = use_context_provider(|| Services::new(&config));
    use_context_provider(|| {
        let session = Session::from_token(services.tokens.load());
        if session.token.is_some() && !session.is_authenticated() {
            tracing::warn!("Stored token did not yield a user id; continuing anonymously");
        }
        Signal::new(session)
    });

    rsx! {
        {children}
    }
}
