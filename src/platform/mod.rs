use crate::clock::{Scheduler, TimeSource};
use crate::consent::ConsentStore;
use crate::environment::EnvironmentProbe;
use crate::location::Geolocation;
use crate::playback::MediaFactory;

#[cfg(test)]
pub mod fake;
#[cfg(not(target_arch = "wasm32"))]
mod native;
#[cfg(target_arch = "wasm32")]
mod web;

/// Everything the player needs from its host environment.
pub struct Capabilities {
    pub media: Box<dyn MediaFactory>,
    pub scheduler: Box<dyn Scheduler>,
    pub time: Box<dyn TimeSource>,
    pub geolocation: Box<dyn Geolocation>,
    pub environment: Box<dyn EnvironmentProbe>,
    pub consent_store: Box<dyn ConsentStore>,
}

#[cfg(target_arch = "wasm32")]
pub fn host_capabilities() -> Capabilities {
    Capabilities {
        media: Box::new(web::AudioElementFactory),
        scheduler: Box::new(web::IntervalScheduler),
        time: Box::new(web::BrowserClock),
        geolocation: Box::new(web::BrowserGeolocation),
        environment: Box::new(web::NavigatorProbe),
        consent_store: Box::new(web::CookieConsentStore),
    }
}

#[cfg(not(target_arch = "wasm32"))]
pub fn host_capabilities() -> Capabilities {
    Capabilities {
        media: Box::new(native::SilentMedia),
        scheduler: Box::new(native::IdleScheduler),
        time: Box::new(native::SystemClock),
        geolocation: Box::new(native::NoGeolocation),
        environment: Box::new(native::TargetProbe),
        consent_store: Box::new(native::MemoryConsentStore::default()),
    }
}
