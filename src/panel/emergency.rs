//! Emergency panel: nearest-facility search
//!
//! Sequences coordinate acquisition and the facility lookup. A location
//! failure is surfaced as a notice and the search simply does not proceed;
//! the controller only ever reflects lookup outcomes.

use std::sync::Arc;

use url::Url;

use crate::controller::{RequestController, RequestState};
use crate::geo::{directions_url, FacilityLookup, LocationProvider};
use crate::model::FacilityCandidate;

use super::{Notice, Notifier};

/// The consumer displays at most this many candidates
pub const MAX_DISPLAYED: usize = 5;

const DEFAULT_QUERY: &str = "hospital";
const DEFAULT_LIMIT: u32 = 10;

pub struct EmergencyPanel {
    locator: Arc<dyn LocationProvider>,
    lookup: FacilityLookup,
    notifier: Arc<dyn Notifier>,
    controller: RequestController<Vec<FacilityCandidate>>,
    query: String,
    limit: u32,
}

impl EmergencyPanel {
    pub fn new(
        locator: Arc<dyn LocationProvider>,
        lookup: FacilityLookup,
        notifier: Arc<dyn Notifier>,
    ) -> Self {
        Self {
            locator,
            lookup,
            notifier,
            controller: RequestController::new(),
            query: DEFAULT_QUERY.to_string(),
            limit: DEFAULT_LIMIT,
        }
    }

    pub fn controller(&self) -> &RequestController<Vec<FacilityCandidate>> {
        &self.controller
    }

    /// Locate the device, then search for facilities around it
    pub async fn find_nearby(&self) -> RequestState<Vec<FacilityCandidate>> {
        let origin = match self.locator.locate().await {
            Ok(coordinate) => coordinate,
            Err(e) => {
                self.notifier.notify(Notice::Error(e.to_string()));
                return self.controller.state();
            }
        };

        let state = self
            .controller
            .run(self.lookup.find_nearby(origin, &self.query, self.limit))
            .await;

        if let Some(notice) = lookup_notice(&state) {
            self.notifier.notify(notice);
        }
        state
    }

    /// The display slice: nearest candidates, at most [`MAX_DISPLAYED`]
    pub fn nearest(&self) -> Vec<FacilityCandidate> {
        match self.controller.state() {
            RequestState::Success(candidates) => {
                candidates.into_iter().take(MAX_DISPLAYED).collect()
            }
            _ => Vec::new(),
        }
    }

    /// Turn-by-turn driving directions link for one candidate
    pub fn directions(&self, candidate: &FacilityCandidate) -> Url {
        directions_url(candidate.coordinate)
    }
}

/// Notice raised for a terminal lookup state
///
/// A successful search with zero candidates is still a success, worded so the
/// consumer does not mistake it for a failure.
fn lookup_notice(state: &RequestState<Vec<FacilityCandidate>>) -> Option<Notice> {
    match state {
        RequestState::Success(candidates) if candidates.is_empty() => {
            Some(Notice::Success("No facilities found nearby".to_string()))
        }
        RequestState::Success(candidates) => Some(Notice::Success(format!(
            "Found {} facilities nearby",
            candidates.len()
        ))),
        RequestState::Error(message) => Some(Notice::Error(message.clone())),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geo::FixedLocationProvider;
    use crate::model::{ClientConfig, GeoCoordinate};
    use crate::panel::testing::RecordingNotifier;

    fn candidate(name: &str, distance_km: f64) -> FacilityCandidate {
        FacilityCandidate {
            name: name.to_string(),
            address: name.to_string(),
            coordinate: GeoCoordinate::new(0.0, 0.0),
            distance_km,
        }
    }

    fn panel_with(locator: Arc<dyn LocationProvider>) -> (EmergencyPanel, Arc<RecordingNotifier>) {
        let lookup = FacilityLookup::new(&ClientConfig::default()).unwrap();
        let notifier = Arc::new(RecordingNotifier::default());
        let panel = EmergencyPanel::new(locator, lookup, notifier.clone());
        (panel, notifier)
    }

    #[tokio::test]
    async fn test_location_failure_leaves_controller_untouched() {
        // Out-of-range coordinate makes the provider report a denial.
        let locator = Arc::new(FixedLocationProvider::new(GeoCoordinate::new(200.0, 0.0)));
        let (panel, notifier) = panel_with(locator);

        let state = panel.find_nearby().await;

        assert_eq!(state, RequestState::Idle);
        assert!(matches!(notifier.notices()[0], Notice::Error(_)));
    }

    #[tokio::test]
    async fn test_nearest_caps_the_display_slice() {
        let locator = Arc::new(FixedLocationProvider::new(GeoCoordinate::new(0.0, 0.0)));
        let (panel, _notifier) = panel_with(locator);

        let ticket = panel.controller().begin();
        let candidates: Vec<FacilityCandidate> = (0..8)
            .map(|i| candidate(&format!("facility-{}", i), i as f64))
            .collect();
        panel.controller().resolve(ticket, Ok(candidates));

        let shown = panel.nearest();
        assert_eq!(shown.len(), MAX_DISPLAYED);
        assert_eq!(shown[0].name, "facility-0");
    }

    #[test]
    fn test_zero_candidates_notice_is_a_success() {
        let state = RequestState::Success(Vec::new());
        assert_eq!(
            lookup_notice(&state),
            Some(Notice::Success("No facilities found nearby".to_string()))
        );

        let state = RequestState::Success(vec![candidate("clinic", 1.2)]);
        assert_eq!(
            lookup_notice(&state),
            Some(Notice::Success("Found 1 facilities nearby".to_string()))
        );

        let state: RequestState<Vec<FacilityCandidate>> = RequestState::Pending;
        assert_eq!(lookup_notice(&state), None);
    }

    #[tokio::test]
    async fn test_nearest_is_empty_before_any_search() {
        let locator = Arc::new(FixedLocationProvider::new(GeoCoordinate::new(0.0, 0.0)));
        let (panel, _notifier) = panel_with(locator);
        assert!(panel.nearest().is_empty());
    }
}
