mod chrome;
mod clock;
mod config;
mod consent;
mod environment;
mod error;
mod location;
mod logging;
mod platform;
mod playback;
mod radio;
mod routes;
mod stations;
mod view;

fn main() {
    // Fails only when a subscriber is already installed.
    let _ = dioxus::logger::init(logging::max_level());
    dioxus::launch(routes::App);
}
