use dioxus::prelude::*;
use dioxus_router::{Link, Routable, Router};

use crate::chrome::{PlayerHeader, PlayerWindow, PromptLine};
use crate::config::use_runtime_config;
use crate::consent::CONSENT_COOKIE_NAME;
use crate::view::RadioPlayerView;

const MAIN_CSS: Asset = asset!("/assets/main.css");

#[component]
pub fn App() -> Element {
    let config_resource = use_runtime_config();
    let Some(config) = config_resource() else {
        return rsx! {
            document::Title { "Radio Player" }
            div { class: "page loading",
                h1 { "Loading config..." }
            }
        };
    };

    use_context_provider(|| config);

    rsx! {
        document::Title { "Radio Player" }
        document::Link { rel: "stylesheet", href: MAIN_CSS }
        Router::<Route> {}
    }
}

#[derive(Clone, PartialEq, Routable)]
pub enum Route {
    #[route("/")]
    Radio {},
    #[route("/privacy")]
    Privacy {},
}

#[component]
fn Radio() -> Element {
    rsx! { RadioPlayerView {} }
}

#[component]
fn Privacy() -> Element {
    rsx! {
        div { class: "terminal-screen",
            PlayerWindow { aria_label: Some("Privacy note".to_string()),
                PlayerHeader { title: "radio@player:~ privacy".to_string(), on_air: false }
                div { class: "terminal-body terminal-stack",
                    PromptLine { command: "cat privacy.txt".to_string(),
                        p {
                            "Accepting stores a single cookie, "
                            code { "{CONSENT_COOKIE_NAME}=true" }
                            ", valid for the whole site until you clear it. It only records that you agreed."
                        }
                        p { "After you accept, the browser is asked for your position once. It is shown on the page and never sent anywhere." }
                        p { "Declining stores nothing and the location is never requested." }
                    }
                    PromptLine { command: "cd ..".to_string(),
                        Link { to: Route::Radio {}, class: "terminal-link text-terminal-yellow", "Back to the player" }
                    }
                }
            }
        }
    }
}
