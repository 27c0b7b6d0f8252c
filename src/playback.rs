use crate::error::{PlaybackError, RadioError, Result};
use crate::stations::StationRegistry;

pub type RejectCallback = Box<dyn FnOnce(PlaybackError)>;

/// Creates media handles bound to a stream address.
pub trait MediaFactory {
    fn acquire(&self, url: &str) -> std::result::Result<Box<dyn MediaHandle>, PlaybackError>;
}

/// A single playable stream. Dropping the handle releases it.
pub trait MediaHandle {
    fn set_source(&mut self, url: &str);
    /// Starts playback. A rejection that only becomes known later is reported
    /// through `on_rejected`, never from inside this call.
    fn play(&mut self, on_rejected: RejectCallback);
    fn pause(&mut self);
    fn set_volume(&mut self, volume: f64);
}

#[derive(Clone, Debug, PartialEq)]
pub struct PlayerState {
    pub is_playing: bool,
    pub volume: f64,
    pub current_station_url: String,
    pub last_error: Option<String>,
}

pub fn clamp_volume(value: f64) -> Result<f64> {
    if !value.is_finite() {
        return Err(RadioError::InvalidVolume { value });
    }
    Ok(value.clamp(0.0, 1.0))
}

pub struct PlaybackController {
    factory: Box<dyn MediaFactory>,
    handle: Option<Box<dyn MediaHandle>>,
    state: PlayerState,
}

impl PlaybackController {
    pub fn new(factory: Box<dyn MediaFactory>, station_url: String, volume: f64) -> Self {
        Self {
            factory,
            handle: None,
            state: PlayerState {
                is_playing: false,
                volume: volume.clamp(0.0, 1.0),
                current_station_url: station_url,
                last_error: None,
            },
        }
    }

    pub fn state(&self) -> &PlayerState {
        &self.state
    }

    /// Switches the stream. Keeps playing if it was playing.
    pub fn set_source(
        &mut self,
        registry: &StationRegistry,
        url: &str,
        on_rejected: RejectCallback,
    ) -> Result<()> {
        if !registry.contains(url) {
            return Err(RadioError::UnknownStation {
                url: url.to_string(),
            });
        }
        self.state.current_station_url = url.to_string();
        self.state.last_error = None;
        let Some(handle) = self.handle.as_mut() else {
            tracing::debug!(url, "radio: source stored until first play");
            return Ok(());
        };
        handle.set_source(url);
        if self.state.is_playing {
            tracing::debug!(url, "radio: switching live stream");
            handle.play(on_rejected);
        }
        Ok(())
    }

    /// A media element that cannot be created is recorded in `last_error`
    /// like a rejected play, not returned to the caller.
    pub fn toggle_play_pause(&mut self, on_rejected: RejectCallback) {
        if self.state.is_playing {
            if let Some(handle) = self.handle.as_mut() {
                handle.pause();
            }
            self.state.is_playing = false;
            tracing::debug!("radio: paused");
            return;
        }

        self.state.last_error = None;
        if self.handle.is_none() {
            match self.factory.acquire(&self.state.current_station_url) {
                Ok(mut handle) => {
                    handle.set_volume(self.state.volume);
                    self.handle = Some(handle);
                }
                Err(err) => {
                    self.fail(&err);
                    return;
                }
            }
        }
        if let Some(handle) = self.handle.as_mut() {
            handle.play(on_rejected);
        }
        self.state.is_playing = true;
        tracing::debug!(url = %self.state.current_station_url, "radio: play requested");
    }

    pub fn set_volume(&mut self, volume: f64) -> Result<()> {
        let volume = clamp_volume(volume)?;
        self.state.volume = volume;
        if let Some(handle) = self.handle.as_mut() {
            handle.set_volume(volume);
        }
        Ok(())
    }

    /// Records a rejected play request for the currently bound stream.
    pub fn playback_failed(&mut self, err: &PlaybackError) {
        self.fail(err);
    }

    pub fn release(&mut self) {
        if let Some(mut handle) = self.handle.take() {
            handle.pause();
            tracing::debug!("radio: media released");
        }
        self.state.is_playing = false;
    }

    fn fail(&mut self, err: &PlaybackError) {
        tracing::warn!(error = %err, url = %self.state.current_station_url, "radio: playback failed");
        self.state.is_playing = false;
        self.state.last_error = Some(err.to_string());
    }
}
