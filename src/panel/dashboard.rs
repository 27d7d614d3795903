//! Dashboard panel: symptom-pattern summary and recent-activity feed
//!
//! Two independent controllers; a failure in one load leaves the other
//! untouched. A failed load renders as an empty section, so errors here are
//! logged rather than raised as notices.

use std::sync::Arc;

use crate::controller::{RequestController, RequestState};
use crate::gateway::ApiGateway;
use crate::model::{ActivityLogEntry, SymptomPatternCluster};

pub struct DashboardPanel {
    gateway: Arc<ApiGateway>,
    patterns: RequestController<Vec<SymptomPatternCluster>>,
    activity: RequestController<Vec<ActivityLogEntry>>,
}

impl DashboardPanel {
    pub fn new(gateway: Arc<ApiGateway>) -> Self {
        Self {
            gateway,
            patterns: RequestController::new(),
            activity: RequestController::new(),
        }
    }

    pub fn patterns(&self) -> &RequestController<Vec<SymptomPatternCluster>> {
        &self.patterns
    }

    pub fn activity(&self) -> &RequestController<Vec<ActivityLogEntry>> {
        &self.activity
    }

    /// Load the symptom-pattern summary
    pub async fn load_patterns(
        &self,
        n_clusters: u32,
        limit: u32,
    ) -> RequestState<Vec<SymptomPatternCluster>> {
        let state = self
            .patterns
            .run(self.gateway.symptom_patterns(n_clusters, limit))
            .await;
        if let RequestState::Error(message) = &state {
            tracing::debug!(%message, "Pattern summary unavailable");
        }
        state
    }

    /// Load the recent-activity feed
    pub async fn load_activity(&self, limit: u32) -> RequestState<Vec<ActivityLogEntry>> {
        let state = self.activity.run(self.gateway.recent_logs(limit)).await;
        if let RequestState::Error(message) = &state {
            tracing::debug!(%message, "Activity feed unavailable");
        }
        state
    }

    /// Clusters in display order: largest first
    ///
    /// Ordering by count descending is a display concern, not a wire invariant.
    pub fn display_clusters(&self) -> Vec<SymptomPatternCluster> {
        match self.patterns.state() {
            RequestState::Success(mut clusters) => {
                clusters.sort_by(|a, b| b.count.cmp(&a.count));
                clusters
            }
            _ => Vec::new(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::ClientConfig;

    fn cluster(label: i64, count: u64) -> SymptomPatternCluster {
        SymptomPatternCluster {
            label,
            count,
            terms: vec!["fever".to_string()],
        }
    }

    #[tokio::test]
    async fn test_display_clusters_sorts_by_count_descending() {
        let gateway = Arc::new(ApiGateway::new(&ClientConfig::default()).unwrap());
        let panel = DashboardPanel::new(gateway);

        let ticket = panel.patterns().begin();
        panel
            .patterns()
            .resolve(ticket, Ok(vec![cluster(0, 3), cluster(1, 9), cluster(2, 5)]));

        let labels: Vec<i64> = panel.display_clusters().iter().map(|c| c.label).collect();
        assert_eq!(labels, vec![1, 2, 0]);
    }

    #[tokio::test]
    async fn test_display_clusters_is_empty_without_a_result() {
        let gateway = Arc::new(ApiGateway::new(&ClientConfig::default()).unwrap());
        let panel = DashboardPanel::new(gateway);

        assert!(panel.display_clusters().is_empty());
    }
}
