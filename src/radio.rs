use std::rc::Rc;

use chrono::NaiveDateTime;

use crate::clock::{ClockState, Scheduler, TimeSource, TimerGuard, TICK_PERIOD};
use crate::config::RuntimeConfig;
use crate::consent::{ConsentFlow, ConsentStore};
use crate::environment::{BrowserInfo, EnvironmentProbe};
use crate::error::{LocationError, PlaybackError, Result};
use crate::location::{Coordinates, Geolocation, LocationState};
use crate::platform::Capabilities;
use crate::playback::{PlaybackController, PlayerState, RejectCallback};
use crate::stations::StationRegistry;

/// Completions that arrive after the request that caused them.
#[derive(Clone, Debug, PartialEq)]
pub enum RadioEvent {
    Tick(NaiveDateTime),
    PositionResolved(std::result::Result<Coordinates, LocationError>),
    PlaybackRejected { url: String, error: PlaybackError },
}

/// Routes an event back into the player that owns the state. Supplied by
/// the host, which decides how the player is reached after an await.
pub type Dispatch = Rc<dyn Fn(RadioEvent)>;

#[derive(Clone, Debug, PartialEq)]
pub struct StationOption {
    pub name: String,
    pub url: String,
    pub selected: bool,
}

#[derive(Clone, Debug, PartialEq)]
pub struct ViewModel {
    pub consent_popup: bool,
    pub play_label: &'static str,
    pub stations: Vec<StationOption>,
    pub volume: f64,
    pub volume_percent: u32,
    pub date: String,
    pub time: String,
    pub browser_info: String,
    pub location_line: Option<String>,
    pub playback_status: Option<String>,
}

pub struct RadioPlayer {
    registry: StationRegistry,
    config: RuntimeConfig,
    playback: PlaybackController,
    clock: ClockState,
    consent: ConsentFlow,
    location: LocationState,
    browser: BrowserInfo,
    scheduler: Box<dyn Scheduler>,
    time: Rc<dyn TimeSource>,
    geolocation: Box<dyn Geolocation>,
    environment: Box<dyn EnvironmentProbe>,
    consent_store: Box<dyn ConsentStore>,
    dispatch: Dispatch,
    ticker: Option<TimerGuard>,
    mounted: bool,
}

impl RadioPlayer {
    pub fn new(
        registry: StationRegistry,
        config: RuntimeConfig,
        capabilities: Capabilities,
        dispatch: Dispatch,
    ) -> Self {
        let Capabilities {
            media,
            scheduler,
            time,
            geolocation,
            environment,
            consent_store,
        } = capabilities;
        let time: Rc<dyn TimeSource> = Rc::from(time);
        let station_url = config.initial_station(&registry).url.clone();
        let playback = PlaybackController::new(media, station_url, config.initial_volume);
        let consent = ConsentFlow::initial(consent_store.as_ref(), config.remember_consent);
        Self {
            clock: ClockState { now: time.now() },
            registry,
            config,
            playback,
            consent,
            location: LocationState::default(),
            browser: BrowserInfo::default(),
            scheduler,
            time,
            geolocation,
            environment,
            consent_store,
            dispatch,
            ticker: None,
            mounted: false,
        }
    }

    pub fn mount(&mut self) {
        if self.mounted {
            return;
        }
        self.mounted = true;
        tracing::debug!("radio: mount");
        self.browser = BrowserInfo::probe(self.environment.as_ref());

        let time = self.time.clone();
        let dispatch = self.dispatch.clone();
        self.ticker = Some(self.scheduler.every(
            TICK_PERIOD,
            Box::new(move || dispatch(RadioEvent::Tick(time.now()))),
        ));

        if self.consent.consent_given() {
            self.request_location();
        }
    }

    /// Cancels the clock, releases the media handle and stops accepting events.
    pub fn unmount(&mut self) {
        if !self.mounted {
            return;
        }
        self.mounted = false;
        self.ticker = None;
        self.playback.release();
        tracing::debug!("radio: unmount");
    }

    pub fn handle(&mut self, event: RadioEvent) {
        if !self.mounted {
            tracing::debug!(?event, "radio: event after unmount ignored");
            return;
        }
        match event {
            RadioEvent::Tick(now) => self.clock.now = now,
            RadioEvent::PositionResolved(result) => self.location.resolve(result),
            RadioEvent::PlaybackRejected { url, error } => {
                let state = self.playback.state();
                if state.is_playing && state.current_station_url == url {
                    self.playback.playback_failed(&error);
                } else {
                    tracing::debug!(%url, "radio: stale playback rejection ignored");
                }
            }
        }
    }

    pub fn toggle_play_pause(&mut self) {
        let on_rejected = self.rejection_for(&self.playback.state().current_station_url);
        self.playback.toggle_play_pause(on_rejected);
    }

    pub fn select_station(&mut self, url: &str) -> Result<()> {
        let on_rejected = self.rejection_for(url);
        self.playback.set_source(&self.registry, url, on_rejected)
    }

    pub fn set_volume(&mut self, volume: f64) -> Result<()> {
        self.playback.set_volume(volume)
    }

    pub fn accept_consent(&mut self) {
        if !self.consent.accept() {
            return;
        }
        tracing::info!("consent: accepted");
        if let Err(err) = self.consent_store.record_consent() {
            tracing::warn!(error = %err, "consent: cookie not written");
        }
        self.request_location();
    }

    pub fn decline_consent(&mut self) {
        if self.consent.decline() {
            tracing::info!("consent: declined");
        }
    }

    pub fn registry(&self) -> &StationRegistry {
        &self.registry
    }

    pub fn player_state(&self) -> &PlayerState {
        self.playback.state()
    }

    pub fn consent(&self) -> ConsentFlow {
        self.consent
    }

    pub fn location(&self) -> Option<Coordinates> {
        self.location.position()
    }

    pub fn view_model(&self) -> ViewModel {
        let state = self.playback.state();
        let (date, time) = self.clock.render(
            self.time.as_ref(),
            self.config.date_format.as_deref(),
            self.config.time_format.as_deref(),
        );
        ViewModel {
            consent_popup: self.consent.popup_visible(),
            play_label: if state.is_playing { "Pause" } else { "Play" },
            stations: self
                .registry
                .stations()
                .iter()
                .map(|station| StationOption {
                    name: station.name.clone(),
                    url: station.url.clone(),
                    selected: station.url == state.current_station_url,
                })
                .collect(),
            volume: state.volume,
            volume_percent: (state.volume * 100.0).round() as u32,
            date,
            time,
            browser_info: self.browser.as_str().to_string(),
            location_line: self.location.position().map(|coords| coords.display()),
            playback_status: state
                .last_error
                .as_ref()
                .map(|message| format!("Couldn't play this station ({message})")),
        }
    }

    fn request_location(&mut self) {
        if !self.location.begin_request() {
            return;
        }
        if !self.geolocation.is_available() {
            tracing::warn!("location: geolocation not supported");
            return;
        }
        tracing::debug!("location: requesting position");
        let dispatch = self.dispatch.clone();
        self.geolocation.request_position(Box::new(move |result| {
            dispatch(RadioEvent::PositionResolved(result))
        }));
    }

    fn rejection_for(&self, url: &str) -> RejectCallback {
        let dispatch = self.dispatch.clone();
        let url = url.to_string();
        Box::new(move |error| dispatch(RadioEvent::PlaybackRejected { url, error }))
    }
}
