//! Fire-and-forget feedback submission
//!
//! One sender instance is shared across panels. Failures produce a notice and
//! nothing else; they can never block or alter a panel's primary result.

use std::sync::Arc;

use crate::controller::{RequestController, RequestState};
use crate::gateway::ApiGateway;
use crate::model::FeedbackEvent;

use super::{Notice, Notifier};

#[derive(Clone)]
pub struct FeedbackSender {
    gateway: Arc<ApiGateway>,
    notifier: Arc<dyn Notifier>,
    controller: RequestController<()>,
}

impl FeedbackSender {
    pub fn new(gateway: Arc<ApiGateway>, notifier: Arc<dyn Notifier>) -> Self {
        Self {
            gateway,
            notifier,
            controller: RequestController::new(),
        }
    }

    /// Submit one feedback event; never returns an error
    pub async fn send(&self, event: FeedbackEvent) {
        let context = event.context.clone();
        let state = self
            .controller
            .run(self.gateway.send_feedback(&event))
            .await;

        match state {
            RequestState::Success(()) => {
                self.notifier
                    .notify(Notice::Success("Thanks for the feedback!".to_string()));
            }
            RequestState::Error(message) => {
                tracing::debug!(context = %context, %message, "Feedback submission failed");
                self.notifier
                    .notify(Notice::Error("Failed to send feedback".to_string()));
            }
            _ => {}
        }
    }
}
