//! Device-coordinate acquisition
//!
//! Modelled as a single asynchronous operation returning either a coordinate
//! or a classified failure, which callers compose sequentially with the
//! facility lookup.

use std::env;

use async_trait::async_trait;

use crate::model::GeoCoordinate;

const ENV_DEVICE_LAT: &str = "MEDLENS_DEVICE_LAT";
const ENV_DEVICE_LNG: &str = "MEDLENS_DEVICE_LNG";

#[derive(Debug, thiserror::Error)]
pub enum LocationError {
    /// The platform offers no coordinate source at all
    #[error("no location capability is available")]
    Unavailable,

    /// A source exists but declined or produced an unusable coordinate
    #[error("location access denied: {0}")]
    Denied(String),
}

/// Source of the device's current coordinate
#[async_trait]
pub trait LocationProvider: Send + Sync {
    async fn locate(&self) -> Result<GeoCoordinate, LocationError>;
}

/// Provider backed by `MEDLENS_DEVICE_LAT` / `MEDLENS_DEVICE_LNG`
///
/// Unset variables mean the platform has no location capability; set but
/// unparsable or out-of-range values count as a denied acquisition.
pub struct EnvLocationProvider;

#[async_trait]
impl LocationProvider for EnvLocationProvider {
    async fn locate(&self) -> Result<GeoCoordinate, LocationError> {
        let (lat_raw, lng_raw) = match (env::var(ENV_DEVICE_LAT), env::var(ENV_DEVICE_LNG)) {
            (Ok(lat), Ok(lng)) => (lat, lng),
            _ => return Err(LocationError::Unavailable),
        };

        let lat: f64 = lat_raw
            .trim()
            .parse()
            .map_err(|_| LocationError::Denied(format!("invalid latitude: {}", lat_raw)))?;
        let lng: f64 = lng_raw
            .trim()
            .parse()
            .map_err(|_| LocationError::Denied(format!("invalid longitude: {}", lng_raw)))?;

        let coordinate = GeoCoordinate::new(lat, lng);
        if !coordinate.is_valid() {
            return Err(LocationError::Denied(format!(
                "coordinate out of range: {}, {}",
                lat, lng
            )));
        }

        tracing::debug!(lat, lng, "Resolved device coordinate from environment");
        Ok(coordinate)
    }
}

/// Provider wrapping a known coordinate, e.g. one passed on the command line
pub struct FixedLocationProvider {
    coordinate: GeoCoordinate,
}

impl FixedLocationProvider {
    pub fn new(coordinate: GeoCoordinate) -> Self {
        Self { coordinate }
    }
}

#[async_trait]
impl LocationProvider for FixedLocationProvider {
    async fn locate(&self) -> Result<GeoCoordinate, LocationError> {
        if !self.coordinate.is_valid() {
            return Err(LocationError::Denied(format!(
                "coordinate out of range: {}, {}",
                self.coordinate.lat, self.coordinate.lng
            )));
        }
        Ok(self.coordinate)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_fixed_provider_returns_coordinate() {
        let provider = FixedLocationProvider::new(GeoCoordinate::new(19.076, 72.8777));
        let coordinate = provider.locate().await.unwrap();
        assert_eq!(coordinate, GeoCoordinate::new(19.076, 72.8777));
    }

    #[tokio::test]
    async fn test_fixed_provider_rejects_out_of_range() {
        let provider = FixedLocationProvider::new(GeoCoordinate::new(120.0, 0.0));
        let result = provider.locate().await;
        assert!(matches!(result, Err(LocationError::Denied(_))));
    }
}
