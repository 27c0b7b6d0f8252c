use tracing::Level;

/// Level baked in at build time from `RADIO_LOG_LEVEL`.
pub fn max_level() -> Level {
    parse_level(option_env!("RADIO_LOG_LEVEL").unwrap_or("info"))
}

fn parse_level(value: &str) -> Level {
    match value.trim().to_ascii_lowercase().as_str() {
        "error" => Level::ERROR,
        "warn" | "warning" => Level::WARN,
        "debug" => Level::DEBUG,
        "trace" => Level::TRACE,
        _ => Level::INFO,
    }
}
