//! Sign-in and registration screen.

use std::time::Duration;

use api::{AuthMode, Credentials, NewsFeedBackend};
use dioxus::prelude::*;

use crate::components::{Button, ButtonVariant, Input};
use crate::{use_services, use_session};

const VIEWS_CSS: Asset = asset!("/src/views/views.css");

const REDIRECT_DELAY: Duration = Duration::from_millis(800);

#[derive(Debug, Clone, PartialEq)]
struct AuthMessage {
    text: String,
    success: bool,
}

/// Shared auth view.
///
/// Platform packages navigate to the feed from `on_authenticated`, which fires
/// shortly after a successful login, or immediately when a session already
/// exists.
#[component]
pub fn AuthView(on_authenticated: EventHandler<()>) -> Element {
    let services = use_services();
    let mut session = use_session();
    let mut mode = use_signal(AuthMode::default);
    let mut username = use_signal(String::new);
    let mut password = use_signal(String::new);
    let mut confirmation = use_signal(String::new);
    let mut loading = use_signal(|| false);
    let mut message = use_signal(|| Option::<AuthMessage>::None);

    // If already signed in, go straight to the feed
    use_effect(move || {
        if session.peek().is_authenticated() {
            on_authenticated.call(());
        }
    });

    let handle_submit = move |evt: FormEvent| {
        evt.prevent_default();
        let services = services.clone();
        spawn(async move {
            message.set(None);
            let current_mode = mode();

            let credentials = match Credentials::validate(
                current_mode,
                &username(),
                &password(),
                &confirmation(),
            ) {
                Ok(credentials) => credentials,
                Err(e) => {
                    message.set(Some(AuthMessage { text: e.to_string(), success: false }));
                    return;
                }
            };

            loading.set(true);
            let backend = services.loader.backend();
            let outcome = match current_mode {
                AuthMode::Login => backend.login(&credentials).await.map(Some),
                AuthMode::Register => backend.register(&credentials).await.map(|_| None),
            };
            loading.set(false);

            match outcome {
                Ok(token) => {
                    message.set(Some(AuthMessage {
                        text: current_mode.success_message().to_string(),
                        success: true,
                    }));
                    match token {
                        Some(token) => {
                            tracing::info!("Signed in as {}", credentials.username);
                            session.set(services.sign_in(token));
                            crate::sleep(REDIRECT_DELAY).await;
                            on_authenticated.call(());
                        }
                        None => {
                            password.set(String::new());
                            confirmation.set(String::new());
                            mode.set(AuthMode::Login);
                        }
                    }
                }
                Err(e) => {
                    tracing::error!("{} failed: {}", current_mode.submit_label(false), e);
                    message.set(Some(AuthMessage { text: e.user_message(), success: false }));
                }
            }
        });
    };

    let current_mode = mode();
    let (prompt, switch_label) = current_mode.switch_prompt();

    rsx! {
        document::Link { rel: "stylesheet", href: VIEWS_CSS }
        div {
            class: "auth-screen",
            div {
                class: "auth-card",
                div {
                    class: "auth-header",
                    h1 { "{current_mode.title()}" }
                    p { "{current_mode.subtitle()}" }
                }

                form {
                    class: "auth-form",
                    onsubmit: handle_submit,

                    Input {
                        name: "username",
                        placeholder: "Username",
                        value: username(),
                        oninput: move |evt: FormEvent| username.set(evt.value()),
                    }

                    div {
                        class: "auth-passwords",
                        Input {
                            name: "password",
                            r#type: "password",
                            placeholder: "Password",
                            value: password(),
                            oninput: move |evt: FormEvent| password.set(evt.value()),
                        }
                        if current_mode == AuthMode::Register {
                            Input {
                                name: "passwordConfirmation",
                                r#type: "password",
                                placeholder: "Confirm",
                                value: confirmation(),
                                oninput: move |evt: FormEvent| confirmation.set(evt.value()),
                            }
                        }
                    }

                    if let Some(msg) = message() {
                        p {
                            class: if msg.success { "auth-message auth-message--success" } else { "auth-message auth-message--error" },
                            "{msg.text}"
                        }
                    }

                    Button {
                        variant: ButtonVariant::Primary,
                        class: "auth-submit",
                        r#type: "submit",
                        disabled: loading(),
                        "{current_mode.submit_label(loading())}"
                    }
                }

                p {
                    class: "auth-footer",
                    "{prompt} "
                    button {
                        class: "link-btn",
                        r#type: "button",
                        onclick: move |_| {
                            message.set(None);
                            mode.set(current_mode.toggle());
                        },
                        "{switch_label}"
                    }
                }
            }
        }
    }
}
