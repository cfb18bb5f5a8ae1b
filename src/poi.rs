//! Points of interest and the read-only table they are served from.
//!
//! The table is loaded once at startup and shared between requests. Rows
//! that were never geocoded stay in the table but are skipped by matching.

use std::fs;
use std::path::Path;
use std::sync::Arc;

use serde::{Deserialize, Deserializer, Serialize};
use tracing::{info, warn};

use crate::error::DatasetError;
use crate::point::GeoPoint;

/// A point of interest with its descriptive fields passed through untouched.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PointOfInterest {
    pub cip: String,
    pub name: String,
    /// `None` when the address was never geocoded.
    pub location: Option<GeoPoint>,
    pub city: String,
    pub group: String,
    pub chain: String,
    pub address: Option<String>,
    pub postal_code: Option<String>,
}

impl PointOfInterest {
    pub fn new(cip: impl Into<String>, name: impl Into<String>, location: Option<GeoPoint>) -> Self {
        Self {
            cip: cip.into(),
            name: name.into(),
            location,
            city: String::new(),
            group: String::new(),
            chain: String::new(),
            address: None,
            postal_code: None,
        }
    }

    pub fn with_city(mut self, city: impl Into<String>) -> Self {
        self.city = city.into();
        self
    }

    pub fn with_group(mut self, group: impl Into<String>) -> Self {
        self.group = group.into();
        self
    }

    pub fn with_chain(mut self, chain: impl Into<String>) -> Self {
        self.chain = chain.into();
        self
    }
}

/// Immutable, cheaply cloneable table of points of interest.
#[derive(Debug, Clone, Default)]
pub struct PoiTable {
    entries: Arc<[PointOfInterest]>,
}

impl PoiTable {
    pub fn new(entries: Vec<PointOfInterest>) -> Self {
        Self {
            entries: entries.into(),
        }
    }

    pub fn entries(&self) -> &[PointOfInterest] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Entries that can be measured against a route.
    pub fn located(&self) -> impl Iterator<Item = (&PointOfInterest, GeoPoint)> {
        self.entries
            .iter()
            .filter_map(|poi| poi.location.map(|location| (poi, location)))
    }

    pub fn get(&self, cip: &str) -> Option<&PointOfInterest> {
        self.entries.iter().find(|poi| poi.cip == cip)
    }

    /// Loads the geocoded dataset file.
    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self, DatasetError> {
        let path = path.as_ref();
        let table = Self::from_json_str(&fs::read_to_string(path)?)?;
        info!(
            path = %path.display(),
            total = table.len(),
            located = table.located().count(),
            "loaded points of interest"
        );
        Ok(table)
    }

    pub fn from_json_str(json: &str) -> Result<Self, DatasetError> {
        let records: Vec<DatasetRecord> = serde_json::from_str(json)?;
        Ok(Self::new(records.into_iter().map(DatasetRecord::into_poi).collect()))
    }
}

impl From<Vec<PointOfInterest>> for PoiTable {
    fn from(entries: Vec<PointOfInterest>) -> Self {
        Self::new(entries)
    }
}

/// One row of the geocoded dataset, keyed by the spreadsheet's column names.
#[derive(Debug, Deserialize)]
struct DatasetRecord {
    #[serde(deserialize_with = "text_or_number")]
    cip: String,
    #[serde(rename = "INTITULE_CLIENT", default, deserialize_with = "text_or_number")]
    name: String,
    #[serde(rename = "VILLE", default, deserialize_with = "text_or_number")]
    city: String,
    #[serde(rename = "GROUPEMENT", default, deserialize_with = "text_or_number")]
    group: String,
    #[serde(rename = "MATRICE", default, deserialize_with = "text_or_number")]
    chain: String,
    #[serde(rename = "adresse", default, deserialize_with = "text_or_number")]
    address: String,
    #[serde(rename = "cp", default, deserialize_with = "text_or_number")]
    postal_code: String,
    #[serde(default)]
    latitude: Option<f64>,
    #[serde(default)]
    longitude: Option<f64>,
}

impl DatasetRecord {
    fn into_poi(self) -> PointOfInterest {
        let location = match (self.latitude, self.longitude) {
            // A 0/0 pair marks a failed geocode in the source data.
            (Some(lat), Some(lon)) if !(lat == 0.0 && lon == 0.0) => match GeoPoint::new(lat, lon) {
                Ok(point) => Some(point),
                Err(err) => {
                    warn!(cip = %self.cip, error = %err, "ignoring out-of-range location");
                    None
                }
            },
            _ => None,
        };

        PointOfInterest {
            cip: self.cip,
            name: self.name,
            location,
            city: self.city,
            group: self.group,
            chain: self.chain,
            address: non_empty(self.address),
            postal_code: non_empty(self.postal_code),
        }
    }
}

fn non_empty(value: String) -> Option<String> {
    let trimmed = value.trim();
    (!trimmed.is_empty()).then(|| trimmed.to_string())
}

/// Spreadsheet exports type identifiers and postcodes as numbers or text
/// depending on the cell, so accept both.
fn text_or_number<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Cell {
        Text(String),
        Integer(i64),
        Float(f64),
        Empty,
    }

    Ok(match Cell::deserialize(deserializer)? {
        Cell::Text(text) => text,
        Cell::Integer(value) => value.to_string(),
        Cell::Float(value) => value.to_string(),
        Cell::Empty => String::new(),
    })
}
