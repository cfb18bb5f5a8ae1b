//! Route-relative arrival estimates.

/// Estimated minutes to reach vertex `closest_index` of a route with
/// `route_len` vertices and the given total duration.
///
/// Assumes constant speed and evenly spaced vertices, so the result is a
/// position-proportional approximation rather than a traffic-aware ETA.
pub fn eta_minutes(closest_index: usize, route_len: usize, total_duration_minutes: f64) -> u32 {
    if route_len == 0 {
        return 0;
    }
    let fraction = closest_index as f64 / route_len as f64;
    (fraction * total_duration_minutes.max(0.0)).round() as u32
}
