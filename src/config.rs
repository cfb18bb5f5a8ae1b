//! Environment-driven configuration.
//!
//! | Variable | Default |
//! |---|---|
//! | `ROUTING_PROVIDER` | `osrm` (`ors`, `haversine`) |
//! | `OSRM_BASE_URL`, `OSRM_PROFILE` | `http://localhost:5000`, `car` |
//! | `ORS_BASE_URL`, `ORS_PROFILE` | `https://api.openrouteservice.org`, `driving-car` |
//! | `ORS_API_KEY` | required for `ors` |
//! | `ROUTING_TIMEOUT_SECS` | `10` |
//! | `HAVERSINE_SPEED_KMH` | `40` |
//! | `PROXIMITY_THRESHOLD_KM` | `10` |
//! | `MAX_RESULTS` | `5` |
//! | `MAX_CONCURRENT_DETOURS` | `8` |

use std::str::FromStr;

use crate::error::{ConfigError, RouteError};
use crate::haversine::HaversineRouter;
use crate::matcher::MatchOptions;
use crate::ors::{OrsClient, OrsConfig};
use crate::osrm::{OsrmClient, OsrmConfig};
use crate::point::GeoPoint;
use crate::polyline::RoutePolyline;
use crate::traits::RouteProvider;

#[derive(Debug, Clone)]
pub enum ProviderSettings {
    Osrm(OsrmConfig),
    Ors(OrsConfig),
    Haversine(HaversineRouter),
}

#[derive(Debug, Clone)]
pub struct Settings {
    pub provider: ProviderSettings,
    pub matching: MatchOptions,
}

impl Settings {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Builds settings from any key lookup, e.g. a map in tests.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let timeout_secs = parse_or(&lookup, "ROUTING_TIMEOUT_SECS", 10u64)?;

        let provider_name = lookup("ROUTING_PROVIDER").unwrap_or_else(|| "osrm".to_string());
        let provider = match provider_name.trim().to_ascii_lowercase().as_str() {
            "osrm" => {
                let defaults = OsrmConfig::default();
                ProviderSettings::Osrm(OsrmConfig {
                    base_url: lookup("OSRM_BASE_URL").unwrap_or(defaults.base_url),
                    profile: lookup("OSRM_PROFILE").unwrap_or(defaults.profile),
                    timeout_secs,
                })
            }
            "ors" | "openrouteservice" => {
                let defaults = OrsConfig::default();
                let api_key = lookup("ORS_API_KEY")
                    .filter(|key| !key.trim().is_empty())
                    .ok_or(ConfigError::Missing("ORS_API_KEY"))?;
                ProviderSettings::Ors(OrsConfig {
                    base_url: lookup("ORS_BASE_URL").unwrap_or(defaults.base_url),
                    profile: lookup("ORS_PROFILE").unwrap_or(defaults.profile),
                    api_key,
                    timeout_secs,
                })
            }
            "haversine" => {
                let speed_kmh = parse_or(&lookup, "HAVERSINE_SPEED_KMH", HaversineRouter::default().speed_kmh)?;
                if !(speed_kmh.is_finite() && speed_kmh > 0.0) {
                    return Err(ConfigError::Invalid {
                        key: "HAVERSINE_SPEED_KMH",
                        value: speed_kmh.to_string(),
                    });
                }
                ProviderSettings::Haversine(HaversineRouter::new(speed_kmh))
            }
            _ => return Err(ConfigError::UnknownProvider(provider_name)),
        };

        let defaults = MatchOptions::default();
        let proximity_threshold_km = parse_or(&lookup, "PROXIMITY_THRESHOLD_KM", defaults.proximity_threshold_km)?;
        if !(proximity_threshold_km.is_finite() && proximity_threshold_km >= 0.0) {
            return Err(ConfigError::Invalid {
                key: "PROXIMITY_THRESHOLD_KM",
                value: proximity_threshold_km.to_string(),
            });
        }

        Ok(Self {
            provider,
            matching: MatchOptions {
                proximity_threshold_km,
                max_results: parse_or(&lookup, "MAX_RESULTS", defaults.max_results)?,
                max_concurrent_detours: parse_or(&lookup, "MAX_CONCURRENT_DETOURS", defaults.max_concurrent_detours)?,
            },
        })
    }

    pub fn build_provider(&self) -> Result<AnyProvider, reqwest::Error> {
        Ok(match &self.provider {
            ProviderSettings::Osrm(config) => AnyProvider::Osrm(OsrmClient::new(config.clone())?),
            ProviderSettings::Ors(config) => AnyProvider::Ors(OrsClient::new(config.clone())?),
            ProviderSettings::Haversine(router) => AnyProvider::Haversine(router.clone()),
        })
    }
}

fn parse_or<F, T>(lookup: &F, key: &'static str, default: T) -> Result<T, ConfigError>
where
    F: Fn(&str) -> Option<String>,
    T: FromStr,
{
    match lookup(key) {
        None => Ok(default),
        Some(value) => value
            .trim()
            .parse()
            .map_err(|_| ConfigError::Invalid { key, value }),
    }
}

/// The routing provider picked by configuration.
#[derive(Debug, Clone)]
pub enum AnyProvider {
    Osrm(OsrmClient),
    Ors(OrsClient),
    Haversine(HaversineRouter),
}

impl RouteProvider for AnyProvider {
    fn route(&self, waypoints: &[GeoPoint]) -> Result<RoutePolyline, RouteError> {
        match self {
            AnyProvider::Osrm(client) => client.route(waypoints),
            AnyProvider::Ors(client) => client.route(waypoints),
            AnyProvider::Haversine(router) => router.route(waypoints),
        }
    }
}
