use serde::Deserialize;

use crate::error::{RadioError, Result};

#[derive(Clone, Debug, PartialEq, Deserialize)]
pub struct Station {
    pub name: String,
    pub url: String,
}

impl Station {
    pub fn new(name: impl Into<String>, url: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            url: url.into(),
        }
    }
}

const BUILTIN_STATIONS: [(&str, &str); 4] = [
    (
        "Antyradio",
        "http://redir.atmcdn.pl/sc/o2/Eurozet/live/antyradio.livx",
    ),
    ("RMF FM", "https://www.rmfon.pl/n/rmf_fm.pls"),
    ("Radio ZET", "https://zetstream.radiozet.pl/RadioZET"),
    ("Eska", "https://www.eskago.pl/radio/eska-warszawa"),
];

/// Ordered station list. Never empty and every url appears once, so the
/// first entry is always a valid default selection.
#[derive(Clone, Debug, PartialEq)]
pub struct StationRegistry {
    stations: Vec<Station>,
}

impl StationRegistry {
    pub fn new(stations: Vec<Station>) -> Result<Self> {
        if stations.is_empty() {
            return Err(RadioError::EmptyRegistry);
        }
        for (index, station) in stations.iter().enumerate() {
            if stations[..index].iter().any(|other| other.url == station.url) {
                return Err(RadioError::DuplicateStation {
                    url: station.url.clone(),
                });
            }
        }
        Ok(Self { stations })
    }

    pub fn builtin() -> Self {
        Self {
            stations: BUILTIN_STATIONS
                .iter()
                .map(|(name, url)| Station::new(*name, *url))
                .collect(),
        }
    }

    pub fn stations(&self) -> &[Station] {
        &self.stations
    }

    pub fn default_station(&self) -> &Station {
        &self.stations[0]
    }

    pub fn find_by_url(&self, url: &str) -> Option<&Station> {
        self.stations.iter().find(|station| station.url == url)
    }

    pub fn contains(&self, url: &str) -> bool {
        self.find_by_url(url).is_some()
    }

    pub fn find_by_name(&self, name: &str) -> Option<&Station> {
        self.stations
            .iter()
            .find(|station| station.name.eq_ignore_ascii_case(name))
    }
}

impl Default for StationRegistry {
    fn default() -> Self {
        Self::builtin()
    }
}
