//! Symptom-check panel

use std::sync::Arc;

use crate::controller::{validate_text, RequestController, RequestState, ValidationError};
use crate::gateway::ApiGateway;
use crate::model::{SymptomCheckRequest, SymptomCheckResult};

use super::{Notice, Notifier};

/// Age bound accepted by the backend contract
const MAX_AGE: u32 = 120;

pub struct SymptomPanel {
    gateway: Arc<ApiGateway>,
    notifier: Arc<dyn Notifier>,
    controller: RequestController<SymptomCheckResult>,
    prefer_model: bool,
}

impl SymptomPanel {
    pub fn new(gateway: Arc<ApiGateway>, notifier: Arc<dyn Notifier>, prefer_model: bool) -> Self {
        Self {
            gateway,
            notifier,
            controller: RequestController::new(),
            prefer_model,
        }
    }

    pub fn controller(&self) -> &RequestController<SymptomCheckResult> {
        &self.controller
    }

    fn validate(request: &SymptomCheckRequest) -> Result<(), ValidationError> {
        validate_text(&request.text)?;
        if let Some(age) = request.age {
            if age > MAX_AGE {
                return Err(ValidationError::Invalid(format!(
                    "age must be at most {}",
                    MAX_AGE
                )));
            }
        }
        Ok(())
    }

    /// Submit one symptom description for analysis
    ///
    /// Invalid input emits a warning and returns without any network call,
    /// leaving the controller's prior state in place.
    pub async fn submit(&self, request: SymptomCheckRequest) -> RequestState<SymptomCheckResult> {
        if let Err(e) = Self::validate(&request) {
            self.notifier.notify(Notice::Warning(e.to_string()));
            return self.controller.state();
        }

        let state = self
            .controller
            .run(self.gateway.symptom_check(&request, self.prefer_model))
            .await;

        match &state {
            RequestState::Success(result) => {
                self.notifier.notify(Notice::Success(format!(
                    "Identified {} symptom(s)",
                    result.extracted_symptoms.len()
                )));
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

    fn panel_with_notifier() -> (SymptomPanel, Arc<RecordingNotifier>) {
        let gateway = Arc::new(ApiGateway::new(&ClientConfig::default()).unwrap());
        let notifier = Arc::new(RecordingNotifier::default());
        let panel = SymptomPanel::new(gateway, notifier.clone(), true);
        (panel, notifier)
    }

    #[tokio::test]
    async fn test_empty_text_never_reaches_the_network() {
        let (panel, notifier) = panel_with_notifier();

        let state = panel
            .submit(SymptomCheckRequest {
                text: "   ".to_string(),
                age: None,
                sex: None,
            })
            .await;

        // The controller was never invoked, so no transition happened.
        assert_eq!(state, RequestState::Idle);
        assert_eq!(
            notifier.notices(),
            vec![Notice::Warning("input text must not be empty".to_string())]
        );
    }

    #[tokio::test]
    async fn test_out_of_range_age_is_rejected_locally() {
        let (panel, notifier) = panel_with_notifier();

        let state = panel
            .submit(SymptomCheckRequest {
                text: "fever".to_string(),
                age: Some(200),
                sex: None,
            })
            .await;

        assert_eq!(state, RequestState::Idle);
        assert!(matches!(notifier.notices()[0], Notice::Warning(_)));
    }
}
