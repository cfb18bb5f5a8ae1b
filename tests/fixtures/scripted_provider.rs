//! Deterministic in-process routing provider.

use std::sync::Mutex;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::thread;
use std::time::Duration;

use poi_route_matcher::{GeoPoint, RouteError, RouteProvider, RoutePolyline};

/// Serves a fixed base route and prices detours from a per-stop table.
///
/// Two-waypoint requests get `base`. Three-waypoint requests look up the
/// middle waypoint in `via_seconds`; a stop with no entry fails like an
/// unreachable provider would. Detour requests can be slowed down with
/// `detour_delay`, and the most detour requests seen in flight at once is
/// kept in `peak_in_flight`.
pub struct ScriptedProvider {
    pub base: Option<RoutePolyline>,
    pub via_seconds: Vec<(GeoPoint, f64)>,
    pub detour_delay: Duration,
    pub calls: AtomicUsize,
    pub in_flight: AtomicUsize,
    pub peak_in_flight: AtomicUsize,
    pub seen_stops: Mutex<Vec<GeoPoint>>,
}

impl ScriptedProvider {
    pub fn new(base: RoutePolyline) -> Self {
        Self {
            base: Some(base),
            via_seconds: Vec::new(),
            detour_delay: Duration::ZERO,
            calls: AtomicUsize::new(0),
            in_flight: AtomicUsize::new(0),
            peak_in_flight: AtomicUsize::new(0),
            seen_stops: Mutex::new(Vec::new()),
        }
    }

    /// A provider whose base route request always fails.
    pub fn unreachable() -> Self {
        Self {
            base: None,
            ..Self::new(RoutePolyline::new(Vec::new(), 0.0))
        }
    }

    pub fn with_via(mut self, stop: GeoPoint, seconds: f64) -> Self {
        self.via_seconds.push((stop, seconds));
        self
    }

    pub fn with_detour_delay(mut self, delay: Duration) -> Self {
        self.detour_delay = delay;
        self
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    pub fn peak_in_flight(&self) -> usize {
        self.peak_in_flight.load(Ordering::SeqCst)
    }

    fn price_detour(&self, start: GeoPoint, stop: GeoPoint, end: GeoPoint) -> Result<RoutePolyline, RouteError> {
        let now = self.in_flight.fetch_add(1, Ordering::SeqCst) + 1;
        self.peak_in_flight.fetch_max(now, Ordering::SeqCst);
        if !self.detour_delay.is_zero() {
            thread::sleep(self.detour_delay);
        }
        self.seen_stops.lock().unwrap().push(stop);
        let result = self
            .via_seconds
            .iter()
            .find(|(known, _)| *known == stop)
            .map(|(_, seconds)| RoutePolyline::new(vec![start, stop, end], *seconds))
            .ok_or(RouteError::NoRoute);
        self.in_flight.fetch_sub(1, Ordering::SeqCst);
        result
    }
}

impl RouteProvider for ScriptedProvider {
    fn route(&self, waypoints: &[GeoPoint]) -> Result<RoutePolyline, RouteError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        match waypoints {
            [_, _] => self.base.clone().ok_or_else(|| RouteError::Provider {
                code: "503".to_string(),
                message: "service unavailable".to_string(),
            }),
            [start, stop, end] => self.price_detour(*start, *stop, *end),
            [_] | [] => Err(RouteError::TooFewWaypoints(waypoints.len())),
            other => Err(RouteError::Malformed(format!("unexpected {} waypoints", other.len()))),
        }
    }
}
