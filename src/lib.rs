//! poi-route-matcher
//!
//! Finds points of interest worth stopping at along a driving route and
//! prices the detour each one would add, using an external routing provider.

pub mod config;
pub mod detour;
pub mod error;
pub mod eta;
pub mod haversine;
pub mod matcher;
pub mod ors;
pub mod osrm;
pub mod poi;
pub mod point;
pub mod polyline;
pub mod traits;
pub mod visited;

pub use error::{MatchError, Result, RouteError};
pub use matcher::{MatchCandidate, MatchOptions, MatchResult, RouteMatcher};
pub use point::GeoPoint;
pub use poi::{PoiTable, PointOfInterest};
pub use polyline::RoutePolyline;
pub use traits::{RouteProvider, VisitedSet};
