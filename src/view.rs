use std::rc::Rc;

use dioxus::prelude::*;
use dioxus_router::Link;

use crate::chrome::{PlayerHeader, PlayerWindow, PromptLine};
use crate::config::RuntimeConfig;
use crate::error::Result;
use crate::platform::host_capabilities;
use crate::radio::{Dispatch, RadioPlayer};
use crate::routes::Route;

type PlayerSlot = Signal<Option<RadioPlayer>>;

fn with_player(mut player: PlayerSlot, action: impl FnOnce(&mut RadioPlayer) -> Result<()>) {
    let mut slot = player.write();
    let Some(radio) = slot.as_mut() else {
        return;
    };
    if let Err(err) = action(radio) {
        tracing::warn!(error = %err, "radio: control change rejected");
    }
}

#[component]
pub fn RadioPlayerView() -> Element {
    let config = use_context::<RuntimeConfig>();
    let mut player: PlayerSlot = use_signal(|| None);

    use_effect(move || {
        if player.peek().is_some() {
            return;
        }
        let dispatch: Dispatch = Rc::new(move |event| {
            let mut player = player;
            let slot = player.try_write();
            match slot {
                Ok(mut slot) => {
                    if let Some(radio) = slot.as_mut() {
                        radio.handle(event);
                    }
                }
                Err(_) => tracing::debug!("radio: event dropped, view is gone"),
            }
        });
        let mut radio = RadioPlayer::new(
            config.registry(),
            config.clone(),
            host_capabilities(),
            dispatch,
        );
        radio.mount();
        player.set(Some(radio));
    });

    use_drop(move || {
        let mut player = player;
        let slot = player.try_write();
        if let Ok(mut slot) = slot {
            if let Some(mut radio) = slot.take() {
                radio.unmount();
            }
        }
    });

    let Some(view) = player.read().as_ref().map(RadioPlayer::view_model) else {
        return rsx! {
            div { class: "terminal-screen",
                p { class: "terminal-muted", "Tuning in…" }
            }
        };
    };
    let selected_url = view
        .stations
        .iter()
        .find(|station| station.selected)
        .map(|station| station.url.clone())
        .unwrap_or_default();
    let on_air = view.play_label == "Pause";

    rsx! {
        div { class: "terminal-screen",
            if view.consent_popup {
                div { class: "cookie-consent",
                    div { class: "cookie-consent-card",
                        p { class: "text-terminal-green cookie-consent-title", "Cookies & location" }
                        p { class: "cookie-consent-text",
                            "This player stores a consent cookie and, if you agree, asks your browser for your location once. Do you agree to this data being processed?"
                        }
                        Link { to: Route::Privacy {}, class: "terminal-link text-terminal-cyan", "Privacy note" }
                        div { class: "cookie-consent-actions",
                            button {
                                r#type: "button",
                                class: "cookie-consent-button ghost",
                                onclick: move |_| with_player(player, |radio| {
                                    radio.decline_consent();
                                    Ok(())
                                }),
                                "Decline"
                            }
                            button {
                                r#type: "button",
                                class: "cookie-consent-button primary",
                                onclick: move |_| with_player(player, |radio| {
                                    radio.accept_consent();
                                    Ok(())
                                }),
                                "Accept"
                            }
                        }
                    }
                }
            }
            PlayerWindow { aria_label: Some("Radio player".to_string()),
                PlayerHeader { title: "radio@player:~ live".to_string(), on_air }
                div { class: "terminal-body terminal-stack",
                    h2 { class: "radio-title text-terminal-yellow", "Radio Player" }
                    PromptLine { command: "radio toggle".to_string(),
                        button {
                            r#type: "button",
                            class: "radio-play-button",
                            onclick: move |_| with_player(player, |radio| {
                                radio.toggle_play_pause();
                                Ok(())
                            }),
                            "{view.play_label}"
                        }
                        if let Some(status) = view.playback_status.clone() {
                            p { class: "terminal-error", "{status}" }
                        }
                    }
                    PromptLine { command: "radio tune".to_string(),
                        label { r#for: "stations", "Station: " }
                        select {
                            id: "stations",
                            value: "{selected_url}",
                            onchange: move |event| {
                                let url = event.value();
                                with_player(player, |radio| radio.select_station(&url));
                            },
                            for station in view.stations.iter() {
                                option {
                                    key: "{station.url}",
                                    value: "{station.url}",
                                    selected: station.selected,
                                    "{station.name}"
                                }
                            }
                        }
                    }
                    PromptLine { command: "radio volume".to_string(),
                        label { r#for: "volume", "Volume: " }
                        input {
                            id: "volume",
                            r#type: "range",
                            min: "0",
                            max: "1",
                            step: "0.01",
                            value: "{view.volume}",
                            oninput: move |event| match event.value().parse::<f64>() {
                                Ok(volume) => with_player(player, |radio| radio.set_volume(volume)),
                                Err(err) => tracing::warn!(error = %err, "radio: unreadable volume input"),
                            },
                        }
                        span { class: "radio-muted", " {view.volume_percent}%" }
                    }
                    PromptLine { command: "date".to_string(),
                        p { "Date: {view.date}" }
                        p { "Time: {view.time}" }
                    }
                    PromptLine { command: "uname --browser".to_string(),
                        p { "Browser: {view.browser_info}" }
                    }
                    if let Some(location) = view.location_line.clone() {
                        PromptLine { command: "whereami".to_string(),
                            p { class: "location-info", "Location: {location}" }
                        }
                    }
                }
            }
        }
    }
}
