//! Feature panels
//!
//! Each panel owns exactly one request controller, supplies its input-validity
//! check, and maps terminal states to notices. Panels share no mutable state;
//! the feedback sender is the one deliberately shared collaborator and its
//! failures never touch a panel's primary controller.

pub mod dashboard;
pub mod emergency;
pub mod feedback;
pub mod misinformation;
pub mod symptoms;

pub use dashboard::DashboardPanel;
pub use emergency::EmergencyPanel;
pub use feedback::FeedbackSender;
pub use misinformation::MisinformationPanel;
pub use symptoms::SymptomPanel;

/// Transient user-facing notification, the toast analog
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Notice {
    Success(String),
    Warning(String),
    Error(String),
}

/// Sink for panel notices
pub trait Notifier: Send + Sync {
    fn notify(&self, notice: Notice);
}

/// Notifier that renders notices through the tracing pipeline
pub struct LogNotifier;

impl Notifier for LogNotifier {
    fn notify(&self, notice: Notice) {
        match notice {
            Notice::Success(message) => tracing::info!("{}", message),
            Notice::Warning(message) => tracing::warn!("{}", message),
            Notice::Error(message) => tracing::error!("{}", message),
        }
    }
}
