//! Matching points of interest against a driving route.
//!
//! A request runs in three steps:
//! 1. measure every located point against the route vertices and drop the
//!    ones beyond the proximity threshold,
//! 2. rank the rest by distance and keep the best `max_results`,
//! 3. fan the detour lookups out on a bounded worker pool and merge in the
//!    visited flags.
//!
//! Ranking only depends on distance, so cutting the list before step 3
//! returns the same candidates while sparing the provider calls for points
//! that would be truncated anyway.

use rayon::prelude::*;
use rayon::{ThreadPool, ThreadPoolBuilder};
use serde::{Serialize, Serializer};
use tracing::debug;

use crate::detour::estimate_detour;
use crate::error::{MatchError, Result};
use crate::point::GeoPoint;
use crate::poi::{PoiTable, PointOfInterest};
use crate::polyline::{RoutePolyline, VertexMatch};
use crate::traits::{RouteProvider, VisitedSet};

#[derive(Debug, Clone)]
pub struct MatchOptions {
    /// Candidates farther than this from every route vertex are dropped.
    pub proximity_threshold_km: f64,
    pub max_results: usize,
    /// Upper bound on detour requests in flight at once.
    pub max_concurrent_detours: usize,
}

impl Default for MatchOptions {
    fn default() -> Self {
        Self {
            proximity_threshold_km: 10.0,
            max_results: 5,
            max_concurrent_detours: 8,
        }
    }
}

/// A point of interest close enough to the route to be worth a stop.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MatchCandidate {
    pub poi: PointOfInterest,
    #[serde(serialize_with = "two_decimals")]
    pub distance_to_route_km: f64,
    pub route_vertex_index: usize,
    pub eta_minutes: u32,
    /// `None` when the provider could not price the detour.
    pub detour_minutes: Option<u32>,
    pub visited: bool,
}

impl MatchCandidate {
    /// Deep link that starts Waze navigation to this point.
    pub fn waze_url(&self) -> Option<String> {
        self.poi.location.map(|location| {
            format!(
                "https://waze.com/ul?ll={},{}&navigate=yes&from=Current+Location",
                location.lat, location.lon
            )
        })
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MatchResult {
    pub candidates: Vec<MatchCandidate>,
    pub total_duration_minutes: u32,
}

fn two_decimals<S: Serializer>(value: &f64, serializer: S) -> std::result::Result<S::Ok, S::Error> {
    serializer.serialize_f64((value * 100.0).round() / 100.0)
}

/// A located point of interest measured against the route.
#[derive(Debug, Clone, Copy)]
struct Nearby<'a> {
    poi: &'a PointOfInterest,
    location: GeoPoint,
    vertex: VertexMatch,
}

/// Located points within `threshold_km` of the route, in input order.
fn nearby<'a>(
    route: &RoutePolyline,
    pois: &'a PoiTable,
    threshold_km: f64,
) -> Result<Vec<Nearby<'a>>> {
    let mut found = Vec::new();
    for (poi, location) in pois.located() {
        let vertex = route.closest_vertex(location)?;
        if vertex.distance_km <= threshold_km {
            found.push(Nearby { poi, location, vertex });
        }
    }
    Ok(found)
}

/// Finds the points of interest worth stopping at along a route.
///
/// Holds the injected dataset, the routing provider, and the worker pool the
/// detour lookups run on. The dataset is never mutated, so one matcher can
/// serve concurrent requests.
pub struct RouteMatcher<P> {
    provider: P,
    pois: PoiTable,
    options: MatchOptions,
    pool: ThreadPool,
}

impl<P> RouteMatcher<P>
where
    P: RouteProvider + Sync,
{
    pub fn new(provider: P, pois: PoiTable, options: MatchOptions) -> Result<Self> {
        let pool = ThreadPoolBuilder::new()
            .num_threads(options.max_concurrent_detours.max(1))
            .thread_name(|index| format!("detour-{}", index))
            .build()?;

        Ok(Self {
            provider,
            pois,
            options,
            pool,
        })
    }

    pub fn options(&self) -> &MatchOptions {
        &self.options
    }

    pub fn pois(&self) -> &PoiTable {
        &self.pois
    }

    pub fn provider(&self) -> &P {
        &self.provider
    }

    /// Fetches the `start → end` route and matches against it.
    ///
    /// Failing to get the base route fails the whole request with
    /// `RouteUnavailable`.
    pub fn find_along_route<S>(&self, start: GeoPoint, end: GeoPoint, visited: &S) -> Result<MatchResult>
    where
        S: VisitedSet + ?Sized,
    {
        let route = self
            .provider
            .route(&[start, end])
            .map_err(MatchError::RouteUnavailable)?;
        self.match_route(start, end, &route, visited)
    }

    /// Ranks the points of interest near an already fetched route.
    ///
    /// `start` and `end` are the endpoints the route was requested for;
    /// detours are priced as `start → candidate → end`.
    pub fn match_route<S>(
        &self,
        start: GeoPoint,
        end: GeoPoint,
        route: &RoutePolyline,
        visited: &S,
    ) -> Result<MatchResult>
    where
        S: VisitedSet + ?Sized,
    {
        route.ensure_matchable()?;

        let mut ranked = nearby(route, &self.pois, self.options.proximity_threshold_km)?;
        let within_threshold = ranked.len();
        // Stable, so exact ties keep dataset order.
        ranked.sort_by(|a, b| a.vertex.distance_km.total_cmp(&b.vertex.distance_km));
        ranked.truncate(self.options.max_results);

        let direct_minutes = route.rounded_minutes();
        let provider = &self.provider;

        let mut candidates: Vec<MatchCandidate> = self.pool.install(|| {
            ranked
                .par_iter()
                .map(|near| MatchCandidate {
                    poi: near.poi.clone(),
                    distance_to_route_km: near.vertex.distance_km,
                    route_vertex_index: near.vertex.index,
                    eta_minutes: route.eta_minutes(near.vertex.index),
                    detour_minutes: estimate_detour(provider, start, end, near.location, direct_minutes),
                    visited: false,
                })
                .collect()
        });

        for candidate in &mut candidates {
            candidate.visited = visited.contains(&candidate.poi.cip);
        }

        debug!(
            route_points = route.len(),
            within_threshold,
            returned = candidates.len(),
            unpriced = candidates.iter().filter(|c| c.detour_minutes.is_none()).count(),
            "matched points of interest along route"
        );

        Ok(MatchResult {
            candidates,
            total_duration_minutes: direct_minutes,
        })
    }
}
