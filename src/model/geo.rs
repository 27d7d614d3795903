//! Geographic types for the emergency-facility pipeline

use serde::Deserialize;

/// A latitude/longitude pair in degrees
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GeoCoordinate {
    /// Latitude in [-90, 90]
    pub lat: f64,
    /// Longitude in [-180, 180]
    pub lng: f64,
}

impl GeoCoordinate {
    pub fn new(lat: f64, lng: f64) -> Self {
        Self { lat, lng }
    }

    /// Whether the coordinate lies within valid geographic bounds
    pub fn is_valid(&self) -> bool {
        (-90.0..=90.0).contains(&self.lat) && (-180.0..=180.0).contains(&self.lng)
    }
}

/// Raw match returned by the place-search service
///
/// Coordinates arrive as strings and are parsed by the lookup client.
#[derive(Debug, Clone, Deserialize)]
pub struct PlaceMatch {
    pub display_name: String,
    pub lat: String,
    pub lon: String,
}

/// A nearby medical facility with its computed distance from the user
///
/// Derived per search invocation, never persisted.
#[derive(Debug, Clone, PartialEq)]
pub struct FacilityCandidate {
    pub name: String,
    pub address: String,
    pub coordinate: GeoCoordinate,
    /// Great-circle distance from the search origin, rounded to one decimal
    pub distance_km: f64,
}
