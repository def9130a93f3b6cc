use std::fmt;

use serde::{Deserialize, Serialize};

/// A geographic point in decimal degrees.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CoordinatePair {
    pub lat: f64,
    pub lon: f64,
}

impl CoordinatePair {
    pub fn new(lat: f64, lon: f64) -> Self {
        Self { lat, lon }
    }

    pub fn is_valid(&self) -> bool {
        self.lat.is_finite()
            && self.lon.is_finite()
            && (-90.0..=90.0).contains(&self.lat)
            && (-180.0..=180.0).contains(&self.lon)
    }
}

impl From<(f64, f64)> for CoordinatePair {
    fn from((lat, lon): (f64, f64)) -> Self {
        Self { lat, lon }
    }
}

impl fmt::Display for CoordinatePair {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({:.4}, {:.4})", self.lat, self.lon)
    }
}

/// What a caller knows about a place before it has coordinates.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LocationDescriptor {
    Place { city: String, state: String },
    Name(String),
}

impl LocationDescriptor {
    pub fn place(city: impl Into<String>, state: impl Into<String>) -> Self {
        Self::Place {
            city: city.into(),
            state: state.into(),
        }
    }

    pub fn name(name: impl Into<String>) -> Self {
        Self::Name(name.into())
    }
}
