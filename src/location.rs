use crate::error::LocationError;

pub type PositionCallback = Box<dyn FnOnce(Result<Coordinates, LocationError>)>;

pub trait Geolocation {
    fn is_available(&self) -> bool;
    /// One-shot position request. `on_result` is invoked at most once, later.
    fn request_position(&self, on_result: PositionCallback);
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Coordinates {
    pub latitude: f64,
    pub longitude: f64,
}

impl Coordinates {
    /// Integral values keep their `.0` so `21.0` does not render as `21`.
    pub fn display(&self) -> String {
        format!("{:?}, {:?}", self.latitude, self.longitude)
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct LocationState {
    requested: bool,
    position: Option<Coordinates>,
}

impl LocationState {
    pub fn position(&self) -> Option<Coordinates> {
        self.position
    }

    /// Marks the single request for this session. Returns false if one was
    /// already issued.
    pub fn begin_request(&mut self) -> bool {
        if self.requested {
            return false;
        }
        self.requested = true;
        true
    }

    pub fn resolve(&mut self, result: Result<Coordinates, LocationError>) {
        if self.position.is_some() {
            return;
        }
        match result {
            Ok(coordinates) => {
                tracing::debug!(
                    latitude = coordinates.latitude,
                    longitude = coordinates.longitude,
                    "location: resolved"
                );
                self.position = Some(coordinates);
            }
            Err(err) => {
                tracing::warn!(error = %err, "location: request failed");
            }
        }
    }
}
