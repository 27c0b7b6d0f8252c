use std::time::Duration;

use chrono::NaiveDateTime;

pub const TICK_PERIOD: Duration = Duration::from_secs(1);

/// Repeating timer. The returned guard cancels the timer when dropped.
pub trait Scheduler {
    fn every(&self, period: Duration, tick: Box<dyn FnMut()>) -> TimerGuard;
}

pub trait TimeSource {
    fn now(&self) -> NaiveDateTime;
    /// Date and time rendered the way the host's locale writes them.
    fn locale_strings(&self, at: NaiveDateTime) -> (String, String);
}

#[must_use = "dropping the guard cancels the timer"]
pub struct TimerGuard {
    cancel: Option<Box<dyn FnOnce()>>,
}

impl TimerGuard {
    pub fn new(cancel: impl FnOnce() + 'static) -> Self {
        Self {
            cancel: Some(Box::new(cancel)),
        }
    }

    pub fn inert() -> Self {
        Self { cancel: None }
    }
}

impl Drop for TimerGuard {
    fn drop(&mut self) {
        if let Some(cancel) = self.cancel.take() {
            cancel();
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct ClockState {
    pub now: NaiveDateTime,
}

impl ClockState {
    /// Locale rendering unless a strftime pattern overrides that half.
    pub fn render(
        &self,
        time: &dyn TimeSource,
        date_format: Option<&str>,
        time_format: Option<&str>,
    ) -> (String, String) {
        let (locale_date, locale_time) = time.locale_strings(self.now);
        (
            date_format.map_or(locale_date, |format| self.now.format(format).to_string()),
            time_format.map_or(locale_time, |format| self.now.format(format).to_string()),
        )
    }
}
