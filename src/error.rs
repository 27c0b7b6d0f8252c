use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq)]
pub enum RadioError {
    #[error("station list is empty")]
    EmptyRegistry,
    #[error("station url registered twice: {url}")]
    DuplicateStation { url: String },
    #[error("unknown station url: {url}")]
    UnknownStation { url: String },
    #[error("volume must be a finite number, got {value}")]
    InvalidVolume { value: f64 },
    #[error("consent record could not be written: {0}")]
    ConsentStore(String),
}

#[derive(Debug, Error, Clone, PartialEq)]
pub enum PlaybackError {
    #[error("media element unavailable: {0}")]
    Unavailable(String),
    #[error("playback rejected: {0}")]
    Rejected(String),
}

#[derive(Debug, Error, Clone, PartialEq)]
pub enum LocationError {
    #[error("geolocation is not supported")]
    Unsupported,
    #[error("permission denied")]
    PermissionDenied,
    #[error("position unavailable")]
    PositionUnavailable,
    #[error("position request timed out")]
    Timeout,
    #[error("geolocation failed: {0}")]
    Other(String),
}

impl LocationError {
    /// Maps a `GeolocationPositionError.code` value.
    pub fn from_code(code: u16, message: String) -> Self {
        match code {
            1 => LocationError::PermissionDenied,
            2 => LocationError::PositionUnavailable,
            3 => LocationError::Timeout,
            _ => LocationError::Other(message),
        }
    }
}

pub type Result<T> = std::result::Result<T, RadioError>;
