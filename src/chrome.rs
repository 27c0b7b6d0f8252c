use dioxus::prelude::*;

#[component]
pub fn PlayerWindow(children: Element, aria_label: Option<String>) -> Element {
    let label = aria_label.unwrap_or_else(|| "Radio player".to_string());
    rsx! {
        div { class: "terminal-window radio-player", role: "main", aria_label: "{label}",
            {children}
        }
    }
}

#[component]
pub fn PlayerHeader(title: String, on_air: bool) -> Element {
    rsx! {
        div { class: "terminal-header",
            span { class: "text-terminal-red", "●" }
            span { class: "text-terminal-yellow", "●" }
            span { class: "text-terminal-green", "●" }
            span { class: "terminal-header-label text-terminal-cyan", "{title}" }
            if on_air {
                span { class: "radio-on-air text-terminal-red", "ON AIR" }
            }
        }
    }
}

/// A `$ command` line introducing the panel rendered as children.
#[component]
pub fn PromptLine(command: String, children: Element) -> Element {
    rsx! {
        div { class: "terminal-prompt",
            span { class: "text-terminal-green", "listener@radio" }
            span { class: "text-terminal-white", ":~$ " }
            span { class: "text-terminal-yellow", "{command}" }
        }
        div { class: "radio-panel terminal-indent", {children} }
    }
}
