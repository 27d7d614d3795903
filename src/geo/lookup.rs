//! Third-party place-search client
//!
//! Queries a Nominatim-style search endpoint around a coordinate and shapes
//! the raw matches into distance-ranked facility candidates.

use reqwest::Client;

use crate::model::{ClientConfig, FacilityCandidate, GeoCoordinate, PlaceMatch};

use super::{haversine_km, rank_by_distance};

const SEARCH_RADIUS_M: u32 = 5000;

#[derive(Debug, thiserror::Error)]
pub enum LookupError {
    #[error("facility lookup failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Failed to parse lookup response: {0}")]
    Parse(String),
}

/// Client for the place-search service
pub struct FacilityLookup {
    client: Client,
    base_url: String,
}

impl FacilityLookup {
    pub fn new(config: &ClientConfig) -> Result<Self, LookupError> {
        let client = Client::builder()
            .user_agent("medlens-client/0.1")
            .build()?;

        Ok(Self {
            client,
            base_url: config.geo_base.clone(),
        })
    }

    /// Search for facilities around `origin`, ranked nearest first
    ///
    /// Zero matches yield an empty vector, not an error. Matches whose
    /// coordinates cannot be parsed are skipped.
    pub async fn find_nearby(
        &self,
        origin: GeoCoordinate,
        query: &str,
        limit: u32,
    ) -> Result<Vec<FacilityCandidate>, LookupError> {
        let url = format!("{}/search", self.base_url);
        tracing::debug!(query, lat = origin.lat, lng = origin.lng, "Searching nearby facilities");

        let response = self
            .client
            .get(&url)
            .query(&[
                ("q", query),
                ("format", "json"),
                ("lat", &origin.lat.to_string()),
                ("lon", &origin.lng.to_string()),
                ("radius", &SEARCH_RADIUS_M.to_string()),
                ("limit", &limit.to_string()),
            ])
            .send()
            .await?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(LookupError::Parse(format!(
                "Unexpected status {}: {}",
                status, body
            )));
        }

        let matches: Vec<PlaceMatch> = response
            .json()
            .await
            .map_err(|e| LookupError::Parse(format!("Failed to deserialize matches: {}", e)))?;

        let candidates = candidates_from_matches(origin, &matches);
        tracing::debug!(found = candidates.len(), "Facility search complete");
        Ok(candidates)
    }
}

/// Shape raw matches into distance-ranked candidates
///
/// Zero matches yield an empty vector; unparsable matches are dropped.
fn candidates_from_matches(
    origin: GeoCoordinate,
    matches: &[PlaceMatch],
) -> Vec<FacilityCandidate> {
    let candidates: Vec<FacilityCandidate> = matches
        .iter()
        .filter_map(|place| facility_from_place(origin, place))
        .collect();
    rank_by_distance(candidates)
}

/// Shape one raw match into a candidate with its computed distance
///
/// The facility name is the first comma-delimited segment of `display_name`.
fn facility_from_place(origin: GeoCoordinate, place: &PlaceMatch) -> Option<FacilityCandidate> {
    let lat: f64 = place.lat.trim().parse().ok()?;
    let lng: f64 = place.lon.trim().parse().ok()?;
    let coordinate = GeoCoordinate::new(lat, lng);

    let name = place
        .display_name
        .split(',')
        .next()
        .unwrap_or(&place.display_name)
        .trim()
        .to_string();

    Some(FacilityCandidate {
        name,
        address: place.display_name.clone(),
        coordinate,
        distance_km: haversine_km(origin, coordinate),
    })
}
