//! OpenRouteService directions adapter.
//!
//! Uses the GeoJSON flavour of the directions endpoint so geometry arrives
//! as plain coordinates instead of an encoded polyline.

use serde::Deserialize;
use serde_json::json;

use crate::error::RouteError;
use crate::point::GeoPoint;
use crate::polyline::{RoutePolyline, decode_lon_lat};
use crate::traits::RouteProvider;

/// ORS error code for "route could not be found between the points".
const ORS_ROUTE_NOT_FOUND: i64 = 2009;

#[derive(Debug, Clone)]
pub struct OrsConfig {
    pub base_url: String,
    pub profile: String,
    pub api_key: String,
    pub timeout_secs: u64,
}

impl Default for OrsConfig {
    fn default() -> Self {
        Self {
            base_url: "https://api.openrouteservice.org".to_string(),
            profile: "driving-car".to_string(),
            api_key: String::new(),
            timeout_secs: 10,
        }
    }
}

#[derive(Debug, Clone)]
pub struct OrsClient {
    config: OrsConfig,
    client: reqwest::blocking::Client,
}

impl OrsClient {
    pub fn new(config: OrsConfig) -> Result<Self, reqwest::Error> {
        let client = reqwest::blocking::Client::builder()
            .timeout(std::time::Duration::from_secs(config.timeout_secs))
            .build()?;

        Ok(Self { config, client })
    }

    fn directions_url(&self) -> String {
        format!(
            "{}/v2/directions/{}/geojson",
            self.config.base_url.trim_end_matches('/'),
            self.config.profile
        )
    }
}

impl RouteProvider for OrsClient {
    fn route(&self, waypoints: &[GeoPoint]) -> Result<RoutePolyline, RouteError> {
        if waypoints.len() < 2 {
            return Err(RouteError::TooFewWaypoints(waypoints.len()));
        }

        let coordinates = waypoints
            .iter()
            .map(|point| point.to_lon_lat())
            .collect::<Vec<_>>();

        let response = self
            .client
            .post(self.directions_url())
            .header("Authorization", &self.config.api_key)
            .json(&json!({ "coordinates": coordinates }))
            .send()?;
        let status = response.status();
        let body = response.text()?;

        parse_directions_response(status.is_success(), status.as_str(), &body)
    }
}

fn parse_directions_response(
    status_ok: bool,
    status: &str,
    body: &str,
) -> Result<RoutePolyline, RouteError> {
    if !status_ok {
        return Err(match serde_json::from_str::<OrsErrorResponse>(body) {
            Ok(OrsErrorResponse {
                error: OrsError::Detailed { code, .. },
            }) if code == ORS_ROUTE_NOT_FOUND => RouteError::NoRoute,
            Ok(OrsErrorResponse {
                error: OrsError::Detailed { code, message },
            }) => RouteError::Provider {
                code: code.to_string(),
                message,
            },
            Ok(OrsErrorResponse {
                error: OrsError::Text(message),
            }) => RouteError::Provider {
                code: status.to_string(),
                message,
            },
            Err(_) => RouteError::Provider {
                code: status.to_string(),
                message: body.chars().take(200).collect(),
            },
        });
    }

    let parsed: OrsDirectionsResponse =
        serde_json::from_str(body).map_err(|err| RouteError::Malformed(err.to_string()))?;
    let feature = parsed.features.into_iter().next().ok_or(RouteError::NoRoute)?;

    Ok(RoutePolyline::new(
        decode_lon_lat(feature.geometry.coordinates)?,
        feature.properties.summary.duration,
    ))
}

#[derive(Debug, Deserialize)]
struct OrsDirectionsResponse {
    #[serde(default)]
    features: Vec<OrsFeature>,
}

#[derive(Debug, Deserialize)]
struct OrsFeature {
    geometry: OrsGeometry,
    properties: OrsProperties,
}

#[derive(Debug, Deserialize)]
struct OrsGeometry {
    coordinates: Vec<[f64; 2]>,
}

#[derive(Debug, Deserialize)]
struct OrsProperties {
    summary: OrsSummary,
}

/// ORS leaves out `duration` for zero-length routes.
#[derive(Debug, Deserialize)]
struct OrsSummary {
    #[serde(default)]
    duration: f64,
}

#[derive(Debug, Deserialize)]
struct OrsErrorResponse {
    error: OrsError,
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum OrsError {
    Detailed { code: i64, message: String },
    Text(String),
}
