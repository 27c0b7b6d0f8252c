//! Recording stand-ins for every capability, driven by hand from tests.

use std::cell::{Cell, RefCell};
use std::rc::Rc;
use std::time::Duration;

use chrono::{NaiveDate, NaiveDateTime, TimeDelta};

use crate::clock::{Scheduler, TimeSource, TimerGuard};
use crate::consent::ConsentStore;
use crate::environment::EnvironmentProbe;
use crate::error::{LocationError, PlaybackError, RadioError, Result};
use crate::location::{Coordinates, Geolocation, PositionCallback};
use crate::playback::{MediaFactory, MediaHandle, RejectCallback};

use super::Capabilities;

#[derive(Clone, Debug, PartialEq)]
pub enum MediaCall {
    Acquire(String),
    Source(String),
    Play,
    Pause,
    Volume(f64),
}

#[derive(Default)]
struct MediaLog {
    calls: Vec<MediaCall>,
    source: Option<String>,
    acquired: usize,
    live: usize,
    rejections: Vec<RejectCallback>,
    acquire_error: Option<String>,
}

#[derive(Clone, Default)]
pub struct FakeMedia {
    log: Rc<RefCell<MediaLog>>,
}

impl FakeMedia {
    pub fn failing(message: &str) -> Self {
        let media = FakeMedia::default();
        media.log.borrow_mut().acquire_error = Some(message.to_string());
        media
    }

    pub fn calls(&self) -> Vec<MediaCall> {
        self.log.borrow().calls.clone()
    }

    pub fn clear(&self) {
        self.log.borrow_mut().calls.clear();
    }

    pub fn acquired(&self) -> usize {
        self.log.borrow().acquired
    }

    pub fn live_handles(&self) -> usize {
        self.log.borrow().live
    }

    pub fn source(&self) -> Option<String> {
        self.log.borrow().source.clone()
    }

    /// Rejects the earliest play request still waiting. Returns false when
    /// none is left.
    pub fn reject_oldest(&self, message: &str) -> bool {
        let mut log = self.log.borrow_mut();
        if log.rejections.is_empty() {
            return false;
        }
        let on_rejected = log.rejections.remove(0);
        drop(log);
        on_rejected(PlaybackError::Rejected(message.to_string()));
        true
    }

    /// Rejects every play request issued so far.
    pub fn reject_pending(&self, message: &str) {
        let pending: Vec<RejectCallback> = self.log.borrow_mut().rejections.drain(..).collect();
        for on_rejected in pending {
            on_rejected(PlaybackError::Rejected(message.to_string()));
        }
    }
}

impl MediaFactory for FakeMedia {
    fn acquire(&self, url: &str) -> std::result::Result<Box<dyn MediaHandle>, PlaybackError> {
        let mut log = self.log.borrow_mut();
        if let Some(message) = log.acquire_error.clone() {
            return Err(PlaybackError::Unavailable(message));
        }
        log.calls.push(MediaCall::Acquire(url.to_string()));
        log.source = Some(url.to_string());
        log.acquired += 1;
        log.live += 1;
        Ok(Box::new(FakeHandle {
            log: self.log.clone(),
        }))
    }
}

struct FakeHandle {
    log: Rc<RefCell<MediaLog>>,
}

impl MediaHandle for FakeHandle {
    fn set_source(&mut self, url: &str) {
        let mut log = self.log.borrow_mut();
        log.calls.push(MediaCall::Source(url.to_string()));
        log.source = Some(url.to_string());
    }

    fn play(&mut self, on_rejected: RejectCallback) {
        let mut log = self.log.borrow_mut();
        log.calls.push(MediaCall::Play);
        log.rejections.push(on_rejected);
    }

    fn pause(&mut self) {
        self.log.borrow_mut().calls.push(MediaCall::Pause);
    }

    fn set_volume(&mut self, volume: f64) {
        self.log.borrow_mut().calls.push(MediaCall::Volume(volume));
    }
}

impl Drop for FakeHandle {
    fn drop(&mut self) {
        self.log.borrow_mut().live -= 1;
    }
}

struct Timer {
    period: Duration,
    tick: Box<dyn FnMut()>,
    cancelled: Rc<Cell<bool>>,
}

#[derive(Clone, Default)]
pub struct FakeScheduler {
    timers: Rc<RefCell<Vec<Timer>>>,
}

impl FakeScheduler {
    pub fn active(&self) -> usize {
        self.timers
            .borrow()
            .iter()
            .filter(|timer| !timer.cancelled.get())
            .count()
    }

    pub fn periods(&self) -> Vec<Duration> {
        self.timers.borrow().iter().map(|timer| timer.period).collect()
    }

    /// Fires every live timer once. Returns how many fired.
    pub fn fire(&self) -> usize {
        let mut timers = std::mem::take(&mut *self.timers.borrow_mut());
        let mut fired = 0;
        for timer in timers.iter_mut().filter(|timer| !timer.cancelled.get()) {
            (timer.tick)();
            fired += 1;
        }
        let mut current = self.timers.borrow_mut();
        timers.append(&mut *current);
        *current = timers;
        fired
    }
}

impl Scheduler for FakeScheduler {
    fn every(&self, period: Duration, tick: Box<dyn FnMut()>) -> TimerGuard {
        let cancelled = Rc::new(Cell::new(false));
        self.timers.borrow_mut().push(Timer {
            period,
            tick,
            cancelled: cancelled.clone(),
        });
        TimerGuard::new(move || cancelled.set(true))
    }
}

#[derive(Clone)]
pub struct FakeTime {
    now: Rc<Cell<NaiveDateTime>>,
}

impl Default for FakeTime {
    fn default() -> Self {
        let start = NaiveDate::from_ymd_opt(2024, 5, 1)
            .and_then(|date| date.and_hms_opt(12, 0, 0))
            .unwrap_or_default();
        Self {
            now: Rc::new(Cell::new(start)),
        }
    }
}

impl FakeTime {
    pub fn advance(&self, seconds: i64) {
        self.now.set(self.now.get() + TimeDelta::seconds(seconds));
    }
}

impl TimeSource for FakeTime {
    fn now(&self) -> NaiveDateTime {
        self.now.get()
    }

    /// Renders like an en-US browser.
    fn locale_strings(&self, at: NaiveDateTime) -> (String, String) {
        (
            at.format("%-m/%-d/%Y").to_string(),
            at.format("%-I:%M:%S %p").to_string(),
        )
    }
}

#[derive(Clone)]
pub struct FakeGeolocation {
    available: bool,
    pending: Rc<RefCell<Vec<PositionCallback>>>,
    requests: Rc<Cell<usize>>,
}

impl Default for FakeGeolocation {
    fn default() -> Self {
        Self {
            available: true,
            pending: Rc::default(),
            requests: Rc::default(),
        }
    }
}

impl FakeGeolocation {
    pub fn unsupported() -> Self {
        Self {
            available: false,
            ..Self::default()
        }
    }

    pub fn requests(&self) -> usize {
        self.requests.get()
    }

    pub fn succeed(&self, latitude: f64, longitude: f64) {
        self.complete(Ok(Coordinates {
            latitude,
            longitude,
        }));
    }

    pub fn fail(&self, err: LocationError) {
        self.complete(Err(err));
    }

    fn complete(&self, result: std::result::Result<Coordinates, LocationError>) {
        let pending: Vec<PositionCallback> = self.pending.borrow_mut().drain(..).collect();
        for on_result in pending {
            on_result(result.clone());
        }
    }
}

impl Geolocation for FakeGeolocation {
    fn is_available(&self) -> bool {
        self.available
    }

    fn request_position(&self, on_result: PositionCallback) {
        self.requests.set(self.requests.get() + 1);
        self.pending.borrow_mut().push(on_result);
    }
}

pub struct FakeEnvironment(pub Option<String>);

impl EnvironmentProbe for FakeEnvironment {
    fn identification(&self) -> Option<String> {
        self.0.clone()
    }
}

#[derive(Clone, Default)]
pub struct FakeConsentStore {
    granted: Rc<Cell<bool>>,
    writes: Rc<Cell<usize>>,
    broken: bool,
}

impl FakeConsentStore {
    pub fn granted() -> Self {
        let store = Self::default();
        store.granted.set(true);
        store
    }

    pub fn broken() -> Self {
        Self {
            broken: true,
            ..Self::default()
        }
    }

    pub fn writes(&self) -> usize {
        self.writes.get()
    }

    pub fn is_granted(&self) -> bool {
        self.granted.get()
    }
}

impl ConsentStore for FakeConsentStore {
    fn has_consent(&self) -> bool {
        self.granted.get()
    }

    fn record_consent(&self) -> Result<()> {
        if self.broken {
            return Err(RadioError::ConsentStore("cookies disabled".to_string()));
        }
        self.writes.set(self.writes.get() + 1);
        self.granted.set(true);
        Ok(())
    }
}

/// Handles kept by a test after the capabilities move into the player.
#[derive(Clone, Default)]
pub struct FakeHost {
    pub media: FakeMedia,
    pub scheduler: FakeScheduler,
    pub time: FakeTime,
    pub geolocation: FakeGeolocation,
    pub consent: FakeConsentStore,
}

impl FakeHost {
    pub fn capabilities(&self) -> Capabilities {
        Capabilities {
            media: Box::new(self.media.clone()),
            scheduler: Box::new(self.scheduler.clone()),
            time: Box::new(self.time.clone()),
            geolocation: Box::new(self.geolocation.clone()),
            environment: Box::new(FakeEnvironment(Some(
                "Mozilla/5.0 (X11; Linux x86_64) Firefox/128.0".to_string(),
            ))),
            consent_store: Box::new(self.consent.clone()),
        }
    }
}
