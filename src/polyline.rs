//! Route geometry and the nearest-vertex index built on it.
//!
//! Routing providers hand geometry over as GeoJSON `[lon, lat]` pairs;
//! [`decode_lon_lat`] turns those into validated [`GeoPoint`]s at the
//! boundary so everything past the adapters works on decoded points.

use serde::{Deserialize, Serialize};

use crate::error::{MatchError, Result, RouteError};
use crate::eta;
use crate::haversine::distance_km;
use crate::point::GeoPoint;

/// A driving route: ordered vertices plus the provider's total duration.
///
/// Owned by a single matching request and never mutated once built.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(from = "RoutePolylineFields")]
pub struct RoutePolyline {
    points: Vec<GeoPoint>,
    total_duration_seconds: f64,
}

/// Wire shape of [`RoutePolyline`]; deserializing goes through
/// [`RoutePolyline::new`] so the duration is clamped the same way.
#[derive(Deserialize)]
struct RoutePolylineFields {
    points: Vec<GeoPoint>,
    total_duration_seconds: f64,
}

impl From<RoutePolylineFields> for RoutePolyline {
    fn from(fields: RoutePolylineFields) -> Self {
        Self::new(fields.points, fields.total_duration_seconds)
    }
}

/// The route vertex closest to a query point.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct VertexMatch {
    pub index: usize,
    pub distance_km: f64,
}

impl RoutePolyline {
    /// Creates a route from decoded vertices and a duration in seconds.
    ///
    /// Negative or NaN durations are stored as zero.
    pub fn new(points: Vec<GeoPoint>, total_duration_seconds: f64) -> Self {
        Self {
            points,
            total_duration_seconds: total_duration_seconds.max(0.0),
        }
    }

    pub fn points(&self) -> &[GeoPoint] {
        &self.points
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub fn total_duration_seconds(&self) -> f64 {
        self.total_duration_seconds
    }

    pub fn total_duration_minutes(&self) -> f64 {
        self.total_duration_seconds / 60.0
    }

    /// Total duration rounded to whole minutes.
    pub fn rounded_minutes(&self) -> u32 {
        self.total_duration_minutes().round() as u32
    }

    /// Fails with `DegenerateRoute` unless the route has at least two vertices.
    pub fn ensure_matchable(&self) -> Result<()> {
        if self.points.len() < 2 {
            return Err(MatchError::DegenerateRoute {
                points: self.points.len(),
            });
        }
        Ok(())
    }

    /// Finds the vertex closest to `query` by linear scan.
    ///
    /// The first vertex reaching the minimum wins ties.
    pub fn closest_vertex(&self, query: GeoPoint) -> Result<VertexMatch> {
        self.ensure_matchable()?;

        let mut best = VertexMatch {
            index: 0,
            distance_km: distance_km(self.points[0], query),
        };
        for (index, vertex) in self.points.iter().enumerate().skip(1) {
            let distance = distance_km(*vertex, query);
            if distance < best.distance_km {
                best = VertexMatch {
                    index,
                    distance_km: distance,
                };
            }
        }

        Ok(best)
    }

    /// Estimated minutes from the route start to the given vertex.
    pub fn eta_minutes(&self, index: usize) -> u32 {
        eta::eta_minutes(index, self.points.len(), self.total_duration_minutes())
    }
}

/// Decodes GeoJSON `[lon, lat]` coordinates, rejecting out-of-range values.
pub(crate) fn decode_lon_lat(coordinates: Vec<[f64; 2]>) -> std::result::Result<Vec<GeoPoint>, RouteError> {
    coordinates
        .into_iter()
        .map(|pair| {
            GeoPoint::from_lon_lat(pair)
                .map_err(|_| RouteError::Malformed(format!("coordinate {:?} out of range", pair)))
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn point(lat: f64, lon: f64) -> GeoPoint {
        GeoPoint { lat, lon }
    }

    fn straight_route() -> RoutePolyline {
        RoutePolyline::new(vec![point(0.0, 0.0), point(0.0, 1.0), point(0.0, 2.0)], 1200.0)
    }

    #[test]
    fn test_closest_vertex_middle() {
        let found = straight_route().closest_vertex(point(0.01, 1.0)).unwrap();
        assert_eq!(found.index, 1);
        assert!(found.distance_km > 1.0 && found.distance_km < 1.2);
    }

    #[test]
    fn test_closest_vertex_on_vertex() {
        let found = straight_route().closest_vertex(point(0.0, 2.0)).unwrap();
        assert_eq!(found.index, 2);
        assert_eq!(found.distance_km, 0.0);
    }

    #[test]
    fn test_tie_prefers_lowest_index() {
        let route = RoutePolyline::new(vec![point(0.0, 0.0), point(0.0, 2.0)], 60.0);
        let found = route.closest_vertex(point(0.0, 1.0)).unwrap();
        assert_eq!(found.index, 0);
    }

    #[test]
    fn test_repeated_vertex_keeps_first() {
        let route = RoutePolyline::new(
            vec![point(1.0, 1.0), point(0.0, 0.0), point(0.0, 0.0)],
            60.0,
        );
        assert_eq!(route.closest_vertex(point(0.0, 0.0)).unwrap().index, 1);
    }

    #[test]
    fn test_single_point_route_is_degenerate() {
        let route = RoutePolyline::new(vec![point(0.0, 0.0)], 0.0);
        assert!(matches!(
            route.closest_vertex(point(0.0, 0.0)),
            Err(MatchError::DegenerateRoute { points: 1 })
        ));
    }

    #[test]
    fn test_empty_route_is_degenerate() {
        let route = RoutePolyline::new(vec![], 0.0);
        assert!(route.is_empty());
        assert!(route.ensure_matchable().is_err());
    }

    #[test]
    fn test_negative_duration_clamped() {
        let route = RoutePolyline::new(vec![point(0.0, 0.0), point(0.0, 1.0)], -5.0);
        assert_eq!(route.total_duration_seconds(), 0.0);
    }

    #[test]
    fn test_decode_lon_lat() {
        let points = decode_lon_lat(vec![[-1.55, 47.21], [-1.54, 47.22]]).unwrap();
        assert_eq!(points[0], point(47.21, -1.55));
        assert!(matches!(
            decode_lon_lat(vec![[47.21, -100.0]]),
            Err(RouteError::Malformed(_))
        ));
    }

    #[test]
    fn test_deserialized_negative_duration_clamped() {
        let json = r#"{"points": [{"lat": 0.0, "lon": 0.0}, {"lat": 0.0, "lon": 1.0}], "total_duration_seconds": -30.0}"#;
        let route: RoutePolyline = serde_json::from_str(json).unwrap();
        assert_eq!(route.len(), 2);
        assert_eq!(route.total_duration_seconds(), 0.0);
    }

    #[test]
    fn test_durations() {
        let route = straight_route();
        assert_eq!(route.total_duration_minutes(), 20.0);
        assert_eq!(route.rounded_minutes(), 20);
        assert_eq!(route.eta_minutes(1), 7);
    }
}
