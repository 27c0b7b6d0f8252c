//! Host-side capabilities for non-browser builds such as `cargo test`.
//! Nothing here can reach audio output, geolocation or an event loop.

use std::cell::Cell;
use std::time::Duration;

use chrono::NaiveDateTime;

use crate::clock::{Scheduler, TimeSource, TimerGuard};
use crate::consent::ConsentStore;
use crate::environment::EnvironmentProbe;
use crate::error::{PlaybackError, Result};
use crate::location::{Geolocation, PositionCallback};
use crate::playback::{MediaFactory, MediaHandle};

pub struct SilentMedia;

impl MediaFactory for SilentMedia {
    fn acquire(&self, url: &str) -> std::result::Result<Box<dyn MediaHandle>, PlaybackError> {
        tracing::debug!(url, "native: no audio output");
        Err(PlaybackError::Unavailable(
            "no audio output on this target".to_string(),
        ))
    }
}

/// Never fires. The clock keeps the time read at construction.
pub struct IdleScheduler;

impl Scheduler for IdleScheduler {
    fn every(&self, period: Duration, _tick: Box<dyn FnMut()>) -> TimerGuard {
        tracing::debug!(?period, "native: no event loop, timer not started");
        TimerGuard::inert()
    }
}

pub struct SystemClock;

impl TimeSource for SystemClock {
    fn now(&self) -> NaiveDateTime {
        chrono::Local::now().naive_local()
    }

    fn locale_strings(&self, at: NaiveDateTime) -> (String, String) {
        (at.format("%x").to_string(), at.format("%X").to_string())
    }
}

pub struct NoGeolocation;

impl Geolocation for NoGeolocation {
    fn is_available(&self) -> bool {
        false
    }

    fn request_position(&self, _on_result: PositionCallback) {}
}

pub struct TargetProbe;

impl EnvironmentProbe for TargetProbe {
    fn identification(&self) -> Option<String> {
        Some(format!(
            "{}/{}",
            std::env::consts::OS,
            std::env::consts::ARCH
        ))
    }
}

#[derive(Default)]
pub struct MemoryConsentStore {
    granted: Cell<bool>,
}

impl ConsentStore for MemoryConsentStore {
    fn has_consent(&self) -> bool {
        self.granted.get()
    }

    fn record_consent(&self) -> Result<()> {
        self.granted.set(true);
        Ok(())
    }
}
