//! Geographic point value type.

use serde::{Deserialize, Serialize};

use crate::error::{MatchError, Result};

/// A latitude/longitude pair in degrees.
///
/// Construct with [`GeoPoint::new`] to get range checking; the fields stay
/// public so literals in tests and fixtures remain terse.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GeoPoint {
    pub lat: f64,
    pub lon: f64,
}

impl GeoPoint {
    /// Creates a point, rejecting non-finite or out-of-range coordinates.
    pub fn new(lat: f64, lon: f64) -> Result<Self> {
        let point = Self { lat, lon };
        if point.is_valid() {
            Ok(point)
        } else {
            Err(MatchError::InvalidCoordinate { lat, lon })
        }
    }

    /// Builds a point from the `[lon, lat]` order used on routing wire formats.
    pub fn from_lon_lat(pair: [f64; 2]) -> Result<Self> {
        Self::new(pair[1], pair[0])
    }

    pub fn is_valid(&self) -> bool {
        self.lat.is_finite()
            && self.lon.is_finite()
            && (-90.0..=90.0).contains(&self.lat)
            && (-180.0..=180.0).contains(&self.lon)
    }

    pub fn to_lon_lat(self) -> [f64; 2] {
        [self.lon, self.lat]
    }
}
