//! Great-circle distance and a straight-line routing provider.
//!
//! `distance_km` is the distance primitive every proximity test goes
//! through. `HaversineRouter` is a fallback provider for when no road
//! network is reachable: it ignores roads and estimates travel time from an
//! assumed speed.

use crate::error::RouteError;
use crate::point::GeoPoint;
use crate::polyline::RoutePolyline;
use crate::traits::RouteProvider;

/// Average driving speed assumption for time estimation.
const DEFAULT_SPEED_KMH: f64 = 40.0;

/// Spacing between generated vertices along each straight leg.
const DEFAULT_STEP_KM: f64 = 1.0;

/// Earth radius in kilometers.
const EARTH_RADIUS_KM: f64 = 6371.0;

/// Haversine distance between two points in kilometers.
///
/// Spherical model, so expect errors up to ~0.5% against ellipsoidal
/// distance.
pub fn distance_km(a: GeoPoint, b: GeoPoint) -> f64 {
    let lat1_rad = a.lat.to_radians();
    let lat2_rad = b.lat.to_radians();
    let delta_lat = (b.lat - a.lat).to_radians();
    let delta_lon = (b.lon - a.lon).to_radians();

    let h = (delta_lat / 2.0).sin().powi(2)
        + lat1_rad.cos() * lat2_rad.cos() * (delta_lon / 2.0).sin().powi(2);
    // Rounding can push h a hair above 1 for antipodal points.
    let c = 2.0 * h.sqrt().min(1.0).asin();

    EARTH_RADIUS_KM * c
}

/// Straight-line routing provider.
///
/// Each leg between consecutive waypoints is split into vertices roughly
/// `step_km` apart so the polyline index has something to match against.
#[derive(Debug, Clone)]
pub struct HaversineRouter {
    /// Assumed average driving speed in km/h.
    pub speed_kmh: f64,
    pub step_km: f64,
}

impl Default for HaversineRouter {
    fn default() -> Self {
        Self {
            speed_kmh: DEFAULT_SPEED_KMH,
            step_km: DEFAULT_STEP_KM,
        }
    }
}

impl HaversineRouter {
    pub fn new(speed_kmh: f64) -> Self {
        Self {
            speed_kmh,
            ..Self::default()
        }
    }

    /// Convert distance in km to travel time in seconds.
    fn km_to_seconds(&self, km: f64) -> f64 {
        km / self.speed_kmh * 3600.0
    }
}

impl RouteProvider for HaversineRouter {
    fn route(&self, waypoints: &[GeoPoint]) -> Result<RoutePolyline, RouteError> {
        if waypoints.len() < 2 {
            return Err(RouteError::TooFewWaypoints(waypoints.len()));
        }

        let mut points = vec![waypoints[0]];
        let mut total_km = 0.0;

        for leg in waypoints.windows(2) {
            let (from, to) = (leg[0], leg[1]);
            let km = distance_km(from, to);
            total_km += km;

            let steps = (km / self.step_km).ceil().max(1.0) as usize;
            for step in 1..=steps {
                let t = step as f64 / steps as f64;
                points.push(GeoPoint {
                    lat: from.lat + (to.lat - from.lat) * t,
                    lon: from.lon + (to.lon - from.lon) * t,
                });
            }
        }

        Ok(RoutePolyline::new(points, self.km_to_seconds(total_km)))
    }
}
