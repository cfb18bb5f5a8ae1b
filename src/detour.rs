//! Marginal driving time of a single extra stop.

use tracing::warn;

use crate::error::RouteError;
use crate::point::GeoPoint;
use crate::traits::RouteProvider;

/// Minutes added by routing `start → candidate → end` instead of the direct
/// route that takes `direct_minutes`.
///
/// Clamped at zero: provider rounding can make the via route a little faster
/// than the direct one.
pub fn detour_minutes<P: RouteProvider + ?Sized>(
    provider: &P,
    start: GeoPoint,
    end: GeoPoint,
    candidate: GeoPoint,
    direct_minutes: u32,
) -> Result<u32, RouteError> {
    let via = provider.route(&[start, candidate, end])?;
    Ok(via.rounded_minutes().saturating_sub(direct_minutes))
}

/// Like [`detour_minutes`], but a provider failure only costs this one
/// figure: it is logged and reported as `None`.
pub fn estimate_detour<P: RouteProvider + ?Sized>(
    provider: &P,
    start: GeoPoint,
    end: GeoPoint,
    candidate: GeoPoint,
    direct_minutes: u32,
) -> Option<u32> {
    match detour_minutes(provider, start, end, candidate, direct_minutes) {
        Ok(minutes) => Some(minutes),
        Err(err) => {
            warn!(
                lat = candidate.lat,
                lon = candidate.lon,
                error = %err,
                "detour unavailable"
            );
            None
        }
    }
}
