//! Misinformation-scan panel

use std::sync::Arc;

use crate::controller::{validate_text, RequestController, RequestState};
use crate::gateway::ApiGateway;
use crate::model::{MisinformationScanRequest, MisinformationScanResult};

use super::{Notice, Notifier};

pub struct MisinformationPanel {
    gateway: Arc<ApiGateway>,
    notifier: Arc<dyn Notifier>,
    controller: RequestController<MisinformationScanResult>,
}

impl MisinformationPanel {
    pub fn new(gateway: Arc<ApiGateway>, notifier: Arc<dyn Notifier>) -> Self {
        Self {
            gateway,
            notifier,
            controller: RequestController::new(),
        }
    }

    pub fn controller(&self) -> &RequestController<MisinformationScanResult> {
        &self.controller
    }

    /// Scan a block of medical-claim text
    pub async fn submit(&self, text: String) -> RequestState<MisinformationScanResult> {
        if let Err(e) = validate_text(&text) {
            self.notifier.notify(Notice::Warning(e.to_string()));
            return self.controller.state();
        }

        let request = MisinformationScanRequest { text };
        let state = self
            .controller
            .run(self.gateway.misinformation_scan(&request))
            .await;

        match &state {
            RequestState::Success(result) => {
                let summary = if result.high_risk_count > 0 {
                    format!("{} high-risk claims detected", result.high_risk_count)
                } else {
                    "No high-risk claims detected".to_string()
                };
                self.notifier.notify(Notice::Success(summary));
            }
            RequestState::Error(message) => {
                self.notifier.notify(Notice::Error(message.clone()));
            }
            _ => {}
        }
        state
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::ClientConfig;
    use crate::panel::testing::RecordingNotifier;

    #[tokio::test]
    async fn test_blank_text_is_rejected_before_the_gateway() {
        let gateway = Arc::new(ApiGateway::new(&ClientConfig::default()).unwrap());
        let notifier = Arc::new(RecordingNotifier::default());
        let panel = MisinformationPanel::new(gateway, notifier.clone());

        let state = panel.submit("\n".to_string()).await;

        assert_eq!(state, RequestState::Idle);
        assert!(matches!(notifier.notices()[0], Notice::Warning(_)));
    }
}
