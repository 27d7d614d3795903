pub mod advisory;
pub mod config;
pub mod geo;

pub use advisory::*;
pub use config::ClientConfig;
pub use geo::{FacilityCandidate, GeoCoordinate, PlaceMatch};
