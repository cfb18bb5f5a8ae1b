//! Error taxonomy for route matching.
//!
//! Fatal conditions abort a whole matching request and surface as a
//! [`MatchError`]. A failed detour lookup is not an error at this level: it
//! is absorbed into the candidate as `detour_minutes: None`.

use std::io;

use thiserror::Error;

/// Failure of a single call to a routing provider.
#[derive(Debug, Error)]
pub enum RouteError {
    /// Network error, timeout, or non-success HTTP status.
    #[error("routing request failed: {0}")]
    Http(#[from] reqwest::Error),
    /// The provider answered but reported an error code.
    #[error("routing provider returned {code}: {message}")]
    Provider { code: String, message: String },
    /// The provider found no route between the waypoints.
    #[error("no route found between waypoints")]
    NoRoute,
    /// The response was missing fields or carried invalid coordinates.
    #[error("malformed routing response: {0}")]
    Malformed(String),
    #[error("a route needs at least 2 waypoints, got {0}")]
    TooFewWaypoints(usize),
}

#[derive(Debug, Error)]
pub enum MatchError {
    #[error("route geometry has {points} point(s), at least 2 are required")]
    DegenerateRoute { points: usize },
    #[error("route unavailable: {0}")]
    RouteUnavailable(#[source] RouteError),
    #[error("invalid coordinate ({lat}, {lon})")]
    InvalidCoordinate { lat: f64, lon: f64 },
    #[error("failed to build detour worker pool: {0}")]
    ThreadPool(#[from] rayon::ThreadPoolBuildError),
}

/// Failure loading the point-of-interest dataset or the visited store.
#[derive(Debug, Error)]
pub enum DatasetError {
    #[error("dataset IO error: {0}")]
    Io(#[from] io::Error),
    #[error("dataset JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

#[derive(Debug, Error, PartialEq)]
pub enum ConfigError {
    #[error("invalid value {value:?} for {key}")]
    Invalid { key: &'static str, value: String },
    #[error("missing required setting {0}")]
    Missing(&'static str),
    #[error("unknown routing provider {0:?} (expected osrm, ors or haversine)")]
    UnknownProvider(String),
}

pub type Result<T> = std::result::Result<T, MatchError>;
