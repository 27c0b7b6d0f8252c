use std::cell::RefCell;
use std::rc::Rc;
use std::time::Duration;

use gloo_timers::callback::Interval;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::{JsCast, JsValue};
use wasm_bindgen_futures::{spawn_local, JsFuture};

use chrono::NaiveDateTime;

use crate::clock::{Scheduler, TimeSource, TimerGuard};
use crate::consent::{consent_cookie, cookie_grants_consent, ConsentStore};
use crate::environment::EnvironmentProbe;
use crate::error::{LocationError, PlaybackError, RadioError, Result};
use crate::location::{Coordinates, Geolocation, PositionCallback};
use crate::playback::{MediaFactory, MediaHandle, RejectCallback};

fn describe(value: &JsValue) -> String {
    if let Some(text) = value.as_string() {
        return text;
    }
    js_sys::Reflect::get(value, &JsValue::from_str("name"))
        .ok()
        .and_then(|name| name.as_string())
        .unwrap_or_else(|| format!("{value:?}"))
}

pub struct AudioElementFactory;

impl MediaFactory for AudioElementFactory {
    fn acquire(&self, url: &str) -> std::result::Result<Box<dyn MediaHandle>, PlaybackError> {
        let audio = web_sys::HtmlAudioElement::new_with_src(url)
            .map_err(|err| PlaybackError::Unavailable(describe(&err)))?;
        tracing::debug!(url, "web: audio element created");
        Ok(Box::new(AudioHandle { audio }))
    }
}

struct AudioHandle {
    audio: web_sys::HtmlAudioElement,
}

impl MediaHandle for AudioHandle {
    fn set_source(&mut self, url: &str) {
        self.audio.set_src(url);
    }

    fn play(&mut self, on_rejected: RejectCallback) {
        let started = self.audio.play();
        spawn_local(async move {
            let outcome = match started {
                Ok(promise) => JsFuture::from(promise).await.map(|_| ()),
                Err(err) => Err(err),
            };
            if let Err(err) = outcome {
                on_rejected(PlaybackError::Rejected(describe(&err)));
            }
        });
    }

    fn pause(&mut self) {
        let _ = self.audio.pause();
    }

    fn set_volume(&mut self, volume: f64) {
        self.audio.set_volume(volume);
    }
}

impl Drop for AudioHandle {
    fn drop(&mut self) {
        let _ = self.audio.pause();
        let _ = self.audio.remove_attribute("src");
        self.audio.load();
    }
}

pub struct IntervalScheduler;

impl Scheduler for IntervalScheduler {
    fn every(&self, period: Duration, tick: Box<dyn FnMut()>) -> TimerGuard {
        let millis = u32::try_from(period.as_millis()).unwrap_or(u32::MAX);
        let interval = Interval::new(millis, tick);
        TimerGuard::new(move || drop(interval))
    }
}

pub struct BrowserClock;

impl TimeSource for BrowserClock {
    fn now(&self) -> NaiveDateTime {
        chrono::Local::now().naive_local()
    }

    fn locale_strings(&self, at: NaiveDateTime) -> (String, String) {
        let Some(local) = at.and_local_timezone(chrono::Local).earliest() else {
            return (at.format("%x").to_string(), at.format("%X").to_string());
        };
        let date = js_sys::Date::new(&JsValue::from_f64(local.timestamp_millis() as f64));
        let locale = web_sys::window()
            .and_then(|window| window.navigator().language())
            .unwrap_or_else(|| "default".to_string());
        (
            String::from(date.to_locale_date_string(&locale, &JsValue::UNDEFINED)),
            String::from(date.to_locale_time_string(&locale)),
        )
    }
}

pub struct BrowserGeolocation;

impl Geolocation for BrowserGeolocation {
    fn is_available(&self) -> bool {
        let Some(window) = web_sys::window() else {
            return false;
        };
        js_sys::Reflect::has(&window.navigator(), &JsValue::from_str("geolocation"))
            .unwrap_or(false)
    }

    fn request_position(&self, on_result: PositionCallback) {
        let pending = Rc::new(RefCell::new(Some(on_result)));
        let geolocation = match web_sys::window()
            .ok_or_else(|| "window missing".to_string())
            .and_then(|window| window.navigator().geolocation().map_err(|err| describe(&err)))
        {
            Ok(geolocation) => geolocation,
            Err(message) => {
                tracing::debug!(%message, "web: geolocation lookup failed");
                deliver_later(pending, Err(LocationError::Unsupported));
                return;
            }
        };

        let on_success = {
            let pending = pending.clone();
            Closure::once_into_js(move |position: web_sys::GeolocationPosition| {
                let coords = position.coords();
                deliver(
                    &pending,
                    Ok(Coordinates {
                        latitude: coords.latitude(),
                        longitude: coords.longitude(),
                    }),
                );
            })
        };
        let on_error = {
            let pending = pending.clone();
            Closure::once_into_js(move |error: web_sys::GeolocationPositionError| {
                deliver(
                    &pending,
                    Err(LocationError::from_code(error.code(), error.message())),
                );
            })
        };

        if let Err(err) = geolocation.get_current_position_with_error_callback(
            on_success.unchecked_ref(),
            Some(on_error.unchecked_ref()),
        ) {
            deliver_later(pending, Err(LocationError::Other(describe(&err))));
        }
    }
}

type PendingPosition = Rc<RefCell<Option<PositionCallback>>>;

fn deliver(pending: &PendingPosition, result: std::result::Result<Coordinates, LocationError>) {
    let callback = pending.borrow_mut().take();
    if let Some(callback) = callback {
        callback(result);
    }
}

fn deliver_later(pending: PendingPosition, result: std::result::Result<Coordinates, LocationError>) {
    spawn_local(async move {
        deliver(&pending, result);
    });
}

pub struct NavigatorProbe;

impl EnvironmentProbe for NavigatorProbe {
    fn identification(&self) -> Option<String> {
        web_sys::window()?.navigator().user_agent().ok()
    }
}

pub struct CookieConsentStore;

impl ConsentStore for CookieConsentStore {
    fn has_consent(&self) -> bool {
        let Some(document) = web_sys::window().and_then(|window| window.document()) else {
            return false;
        };
        js_sys::Reflect::get(&document, &JsValue::from_str("cookie"))
            .ok()
            .and_then(|value| value.as_string())
            .map(|cookies| cookie_grants_consent(&cookies))
            .unwrap_or(false)
    }

    fn record_consent(&self) -> Result<()> {
        let document = web_sys::window()
            .and_then(|window| window.document())
            .ok_or_else(|| RadioError::ConsentStore("document missing".to_string()))?;
        js_sys::Reflect::set(
            &document,
            &JsValue::from_str("cookie"),
            &JsValue::from_str(&consent_cookie()),
        )
        .map_err(|err| RadioError::ConsentStore(describe(&err)))?;
        Ok(())
    }
}
