//! Geolocation pipeline: distance computation, proximity ranking and the
//! directions deep link
//!
//! Feeds only the emergency-facility panel and runs independently of the
//! advisory API gateway.

pub mod locator;
pub mod lookup;

use std::cmp::Ordering;

use url::Url;

use crate::model::{FacilityCandidate, GeoCoordinate};

pub use locator::{EnvLocationProvider, FixedLocationProvider, LocationError, LocationProvider};
pub use lookup::{FacilityLookup, LookupError};

const EARTH_RADIUS_KM: f64 = 6371.0;

/// Great-circle distance between two coordinates in kilometers
///
/// Spherical-earth Haversine, rounded to one decimal place.
pub fn haversine_km(a: GeoCoordinate, b: GeoCoordinate) -> f64 {
    let d_lat = (b.lat - a.lat).to_radians();
    let d_lng = (b.lng - a.lng).to_radians();

    let h = (d_lat / 2.0).sin().powi(2)
        + a.lat.to_radians().cos() * b.lat.to_radians().cos() * (d_lng / 2.0).sin().powi(2);
    // Floating-point error can push h a hair past 1.0 for near-antipodal
    // points, which would make the square root below NaN.
    let h = h.clamp(0.0, 1.0);

    let c = 2.0 * h.sqrt().atan2((1.0 - h).sqrt());
    (EARTH_RADIUS_KM * c * 10.0).round() / 10.0
}

/// Sort candidates ascending by distance
///
/// The sort is stable: ties keep the lookup service's original order.
pub fn rank_by_distance(mut candidates: Vec<FacilityCandidate>) -> Vec<FacilityCandidate> {
    candidates.sort_by(|a, b| {
        a.distance_km
            .partial_cmp(&b.distance_km)
            .unwrap_or(Ordering::Equal)
    });
    candidates
}

/// Deep link opening a mapping service with turn-by-turn driving directions
pub fn directions_url(destination: GeoCoordinate) -> Url {
    let raw = format!(
        "https://www.google.com/maps/dir/?api=1&destination={},{}&travelmode=driving",
        destination.lat, destination.lng
    );
    // The format string always yields a valid URL for finite coordinates.
    Url::parse(&raw).expect("directions URL is well-formed")
}
