//! Pharmacy-like locations around Nantes and along the road to Angers.
//!
//! Coordinates are real places taken from OpenStreetMap. They route with the
//! OSRM `pays-de-la-loire` extract.

use poi_route_matcher::{GeoPoint, PoiTable, PointOfInterest};

/// A named location with coordinates.
#[derive(Debug, Clone)]
pub struct Location {
    pub cip: &'static str,
    pub name: &'static str,
    pub city: &'static str,
    pub lat: f64,
    pub lon: f64,
}

impl Location {
    pub const fn new(cip: &'static str, name: &'static str, city: &'static str, lat: f64, lon: f64) -> Self {
        Self { cip, name, city, lat, lon }
    }

    pub fn point(&self) -> GeoPoint {
        GeoPoint { lat: self.lat, lon: self.lon }
    }

    pub fn to_poi(&self) -> PointOfInterest {
        PointOfInterest::new(self.cip, self.name, Some(self.point()))
            .with_city(self.city)
            .with_group("GIPHAR")
    }
}

// ============================================================================
// Trip endpoints
// ============================================================================

pub const NANTES_CENTRE: Location = Location::new("-", "Place du Commerce", "NANTES", 47.2130, -1.5594);
pub const ANGERS_CENTRE: Location = Location::new("-", "Place du Ralliement", "ANGERS", 47.4719, -0.5518);

// ============================================================================
// Along the Nantes → Angers corridor
// ============================================================================

pub const CORRIDOR: &[Location] = &[
    Location::new("2000001", "PHARMACIE DE LA BEAUJOIRE", "NANTES", 47.2560, -1.5230),
    Location::new("2000002", "PHARMACIE DU BOURG", "CARQUEFOU", 47.2977, -1.4912),
    Location::new("2000003", "PHARMACIE CENTRALE", "ANCENIS", 47.3656, -1.1776),
    Location::new("2000004", "PHARMACIE DE LA LOIRE", "VARADES", 47.3850, -1.0290),
    Location::new("2000005", "PHARMACIE DU MARCHE", "SAINT-GEORGES-SUR-LOIRE", 47.4075, -0.7620),
    Location::new("2000006", "PHARMACIE DE LA GARE", "ANGERS", 47.4645, -0.5570),
];

// ============================================================================
// Off the corridor
// ============================================================================

pub const ELSEWHERE: &[Location] = &[
    Location::new("3000001", "PHARMACIE DE L'OCEAN", "PORNIC", 47.1153, -2.1035),
    Location::new("3000002", "PHARMACIE DES HALLES", "CHOLET", 47.0600, -0.8790),
    Location::new("3000003", "PHARMACIE DU PORT", "SAINT-NAZAIRE", 47.2735, -2.2138),
];

/// Every fixture location as a table, plus one never-geocoded entry.
pub fn pharmacy_table() -> PoiTable {
    let mut entries: Vec<PointOfInterest> = CORRIDOR
        .iter()
        .chain(ELSEWHERE.iter())
        .map(Location::to_poi)
        .collect();
    entries.push(PointOfInterest::new("4000001", "PHARMACIE NON GEOCODEE", None).with_city("NANTES"));
    PoiTable::new(entries)
}
