use chrono::format::{Item, StrftimeItems};
use dioxus::prelude::*;
use serde::Deserialize;

use crate::stations::{Station, StationRegistry};

#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(default)]
pub struct RuntimeConfig {
    pub initial_volume: f64,
    pub remember_consent: bool,
    /// Replaces the built-in station list when present.
    pub stations: Option<Vec<Station>>,
    /// Station name selected at mount. Falls back to the first station.
    pub default_station: Option<String>,
    /// strftime overrides. Unset means the host's locale format.
    pub date_format: Option<String>,
    pub time_format: Option<String>,
}

impl Default for RuntimeConfig {
    fn default() -> Self {
        Self {
            initial_volume: 0.5,
            remember_consent: true,
            stations: None,
            default_station: None,
            date_format: None,
            time_format: None,
        }
    }
}

impl RuntimeConfig {
    pub fn sanitized(mut self) -> Self {
        if !self.initial_volume.is_finite() {
            tracing::warn!(value = self.initial_volume, "config: initial_volume ignored");
            self.initial_volume = RuntimeConfig::default().initial_volume;
        }
        self.initial_volume = self.initial_volume.clamp(0.0, 1.0);
        self.date_format = checked_format("date_format", self.date_format);
        self.time_format = checked_format("time_format", self.time_format);
        self
    }

    pub fn registry(&self) -> StationRegistry {
        let Some(stations) = self.stations.clone() else {
            return StationRegistry::builtin();
        };
        StationRegistry::new(stations).unwrap_or_else(|err| {
            tracing::warn!(error = %err, "config: stations ignored, using built-in list");
            StationRegistry::builtin()
        })
    }

    pub fn initial_station<'a>(&self, registry: &'a StationRegistry) -> &'a Station {
        self.default_station
            .as_deref()
            .and_then(|name| {
                let found = registry.find_by_name(name);
                if found.is_none() {
                    tracing::warn!(name, "config: default_station not in registry");
                }
                found
            })
            .unwrap_or_else(|| registry.default_station())
    }
}

fn checked_format(field: &str, format: Option<String>) -> Option<String> {
    let format = format?;
    if StrftimeItems::new(&format).any(|item| item == Item::Error) {
        tracing::warn!(field, %format, "config: clock format ignored, using locale");
        return None;
    }
    Some(format)
}

pub fn use_runtime_config() -> Resource<RuntimeConfig> {
    use_resource(|| async move { fetch_runtime_config().await.sanitized() })
}

#[cfg(target_arch = "wasm32")]
async fn fetch_runtime_config() -> RuntimeConfig {
    match fetch_config_from("/config.json").await {
        Ok(config) => config,
        Err(first) => match fetch_config_from("/assets/config.json").await {
            Ok(config) => config,
            Err(second) => {
                tracing::warn!(%first, %second, "config: using defaults");
                RuntimeConfig::default()
            }
        },
    }
}

#[cfg(target_arch = "wasm32")]
async fn fetch_config_from(path: &str) -> Result<RuntimeConfig, String> {
    let response = gloo_net::http::Request::get(path)
        .send()
        .await
        .map_err(|err| format!("config fetch failed: {err}"))?;
    if !response.ok() {
        return Err(format!("config fetch failed: status {}", response.status()));
    }
    response
        .json::<RuntimeConfig>()
        .await
        .map_err(|err| format!("config decode failed: {err}"))
}

#[cfg(not(target_arch = "wasm32"))]
async fn fetch_runtime_config() -> RuntimeConfig {
    config_or_default(std::env::var("RADIO_PLAYER_CONFIG").ok().as_deref())
}

#[cfg(not(target_arch = "wasm32"))]
fn config_or_default(raw: Option<&str>) -> RuntimeConfig {
    let Some(raw) = raw else {
        return RuntimeConfig::default();
    };
    parse_config(raw).unwrap_or_else(|message| {
        tracing::warn!(%message, "config: using defaults");
        RuntimeConfig::default()
    })
}

pub fn parse_config(raw: &str) -> Result<RuntimeConfig, String> {
    serde_json::from_str(raw).map_err(|err| format!("config decode failed: {err}"))
}
