//! Seams between the matching core and its collaborators.
//!
//! The routing provider and the visited store are external systems. The core
//! only needs the narrow views below, so tests can swap in scripted fakes.

use std::collections::{BTreeSet, HashSet};
use std::sync::Arc;

use crate::error::RouteError;
use crate::point::GeoPoint;
use crate::polyline::RoutePolyline;

/// Computes driving routes through an ordered list of waypoints.
///
/// Used both for the base start→end route and for the three-point
/// start→candidate→end detour routes. Implementations make a single attempt
/// per call; retry policy belongs to the caller.
pub trait RouteProvider {
    fn route(&self, waypoints: &[GeoPoint]) -> Result<RoutePolyline, RouteError>;
}

impl<P: RouteProvider + ?Sized> RouteProvider for &P {
    fn route(&self, waypoints: &[GeoPoint]) -> Result<RoutePolyline, RouteError> {
        (**self).route(waypoints)
    }
}

impl<P: RouteProvider + ?Sized> RouteProvider for Arc<P> {
    fn route(&self, waypoints: &[GeoPoint]) -> Result<RoutePolyline, RouteError> {
        (**self).route(waypoints)
    }
}

/// Read-only view of the identifiers a user has already visited.
pub trait VisitedSet {
    fn contains(&self, id: &str) -> bool;
}

impl VisitedSet for HashSet<String> {
    fn contains(&self, id: &str) -> bool {
        HashSet::contains(self, id)
    }
}

impl VisitedSet for BTreeSet<String> {
    fn contains(&self, id: &str) -> bool {
        BTreeSet::contains(self, id)
    }
}

impl<S: VisitedSet + ?Sized> VisitedSet for &S {
    fn contains(&self, id: &str) -> bool {
        (**self).contains(id)
    }
}
