//! OSRM HTTP adapter for driving routes.

use serde::Deserialize;

use crate::error::RouteError;
use crate::point::GeoPoint;
use crate::polyline::{RoutePolyline, decode_lon_lat};
use crate::traits::RouteProvider;

#[derive(Debug, Clone)]
pub struct OsrmConfig {
    pub base_url: String,
    pub profile: String,
    pub timeout_secs: u64,
}

impl Default for OsrmConfig {
    fn default() -> Self {
        Self {
            base_url: "http://localhost:5000".to_string(),
            profile: "car".to_string(),
            timeout_secs: 10,
        }
    }
}

#[derive(Debug, Clone)]
pub struct OsrmClient {
    config: OsrmConfig,
    client: reqwest::blocking::Client,
}

impl OsrmClient {
    pub fn new(config: OsrmConfig) -> Result<Self, reqwest::Error> {
        let client = reqwest::blocking::Client::builder()
            .timeout(std::time::Duration::from_secs(config.timeout_secs))
            .build()?;

        Ok(Self { config, client })
    }

    fn route_url(&self, waypoints: &[GeoPoint]) -> String {
        let coords = waypoints
            .iter()
            .map(|point| format!("{:.6},{:.6}", point.lon, point.lat))
            .collect::<Vec<_>>()
            .join(";");

        format!(
            "{}/route/v1/{}/{}?overview=full&geometries=geojson",
            self.config.base_url.trim_end_matches('/'),
            self.config.profile,
            coords
        )
    }
}

impl RouteProvider for OsrmClient {
    fn route(&self, waypoints: &[GeoPoint]) -> Result<RoutePolyline, RouteError> {
        if waypoints.len() < 2 {
            return Err(RouteError::TooFewWaypoints(waypoints.len()));
        }

        let response = self.client.get(self.route_url(waypoints)).send()?;
        let status = response.status();
        let body = response.text()?;

        parse_route_response(status.is_success(), status.as_str(), &body)
    }
}

/// Interprets an OSRM `/route` body.
///
/// OSRM reports failures such as `NoRoute` in the JSON `code` field, often
/// alongside a 400 status, so the body is read before the status is judged.
fn parse_route_response(
    status_ok: bool,
    status: &str,
    body: &str,
) -> Result<RoutePolyline, RouteError> {
    let parsed: OsrmRouteResponse = match serde_json::from_str(body) {
        Ok(parsed) => parsed,
        Err(err) if status_ok => return Err(RouteError::Malformed(err.to_string())),
        Err(_) => {
            return Err(RouteError::Provider {
                code: status.to_string(),
                message: body.chars().take(200).collect(),
            });
        }
    };

    match parsed.code.as_str() {
        "Ok" => {}
        "NoRoute" => return Err(RouteError::NoRoute),
        _ => {
            return Err(RouteError::Provider {
                code: parsed.code,
                message: parsed.message.unwrap_or_default(),
            });
        }
    }

    let route = parsed.routes.into_iter().next().ok_or(RouteError::NoRoute)?;
    let duration = route
        .duration
        .ok_or_else(|| RouteError::Malformed("route without duration".to_string()))?;
    let geometry = route
        .geometry
        .ok_or_else(|| RouteError::Malformed("route without geometry".to_string()))?;

    Ok(RoutePolyline::new(decode_lon_lat(geometry.coordinates)?, duration))
}

#[derive(Debug, Deserialize)]
struct OsrmRouteResponse {
    code: String,
    message: Option<String>,
    #[serde(default)]
    routes: Vec<OsrmRoute>,
}

#[derive(Debug, Deserialize)]
struct OsrmRoute {
    duration: Option<f64>,
    geometry: Option<OsrmGeometry>,
}

#[derive(Debug, Deserialize)]
struct OsrmGeometry {
    coordinates: Vec<[f64; 2]>,
}
