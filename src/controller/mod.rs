//! Asynchronous request state machine
//!
//! Wraps a single outstanding request per feature panel. Each invocation is
//! tagged with a monotonically increasing sequence number; a resolution is
//! applied only while its invocation is still the latest one, so out-of-order
//! network completion can never surface a stale result.

use std::future::Future;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use tokio::sync::watch;

/// State of one request lifecycle
///
/// Payload-carrying variants make the state invariants hold by construction:
/// data exists only in `Success`, a message only in `Error`.
#[derive(Debug, Clone, PartialEq)]
pub enum RequestState<T> {
    Idle,
    Pending,
    Success(T),
    Error(String),
}

impl<T> RequestState<T> {
    pub fn is_pending(&self) -> bool {
        matches!(self, RequestState::Pending)
    }
}

/// Locally resolved input failure; blocks the request before any network call
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    #[error("input text must not be empty")]
    EmptyText,

    #[error("invalid input: {0}")]
    Invalid(String),
}

/// Handle for resolving one specific invocation
///
/// Deliberately not `Clone`: each invocation resolves at most once.
#[derive(Debug)]
pub struct InvocationTicket {
    seq: u64,
}

/// State machine wrapping any single outstanding request
///
/// Shared by cloning; all clones observe the same state. There is no cancel
/// transition: superseded requests keep running and their resolutions are
/// discarded on arrival.
#[derive(Debug, Clone)]
pub struct RequestController<T> {
    state: watch::Sender<RequestState<T>>,
    seq: Arc<AtomicU64>,
}

impl<T: Clone> RequestController<T> {
    pub fn new() -> Self {
        let (state, _) = watch::channel(RequestState::Idle);
        Self {
            state,
            seq: Arc::new(AtomicU64::new(0)),
        }
    }

    /// Snapshot of the current state
    pub fn state(&self) -> RequestState<T> {
        self.state.borrow().clone()
    }

    /// Observe state transitions
    pub fn subscribe(&self) -> watch::Receiver<RequestState<T>> {
        self.state.subscribe()
    }

    /// Start a new invocation, superseding any prior one
    ///
    /// Replaces the state with `Pending` and returns the ticket the caller
    /// must present on resolution. The counter bump happens inside the
    /// channel's critical section, so it cannot interleave with a concurrent
    /// resolution's staleness check.
    pub fn begin(&self) -> InvocationTicket {
        let mut seq = 0;
        self.state.send_modify(|state| {
            seq = self.seq.fetch_add(1, Ordering::SeqCst) + 1;
            *state = RequestState::Pending;
        });
        InvocationTicket { seq }
    }

    /// Resolve an invocation with its terminal outcome
    ///
    /// Returns `false` when the ticket is stale, i.e. a newer invocation has
    /// been issued since; the outcome is then discarded.
    pub fn resolve(&self, ticket: InvocationTicket, outcome: Result<T, String>) -> bool {
        // The staleness check and the state write share one critical section
        // with `begin`: a ticket that passes the check here cannot be
        // superseded before its state lands.
        let applied = self.state.send_if_modified(|state| {
            if ticket.seq != self.seq.load(Ordering::SeqCst) {
                return false;
            }
            *state = match outcome {
                Ok(data) => RequestState::Success(data),
                Err(message) => RequestState::Error(message),
            };
            true
        });

        if !applied {
            tracing::debug!(
                seq = ticket.seq,
                latest = self.seq.load(Ordering::SeqCst),
                "Discarding stale resolution"
            );
        }
        applied
    }

    /// Drive one invocation end to end
    ///
    /// Begins a new invocation, awaits the supplied future, resolves with its
    /// outcome and returns the state observed afterwards. When a concurrent
    /// invocation superseded this one, the returned state is the latest one,
    /// not this invocation's discarded outcome.
    pub async fn run<F, E>(&self, fut: F) -> RequestState<T>
    where
        F: Future<Output = Result<T, E>>,
        E: std::fmt::Display,
    {
        let ticket = self.begin();
        let outcome = fut.await.map_err(|e| e.to_string());
        self.resolve(ticket, outcome);
        self.state()
    }
}

impl<T: Clone> Default for RequestController<T> {
    fn default() -> Self {
        Self::new()
    }
}

/// Validate free-text input the panels submit
///
/// Empty or whitespace-only text never produces a network call.
pub fn validate_text(text: &str) -> Result<(), ValidationError> {
    if text.trim().is_empty() {
        return Err(ValidationError::EmptyText);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tokio::sync::oneshot;

    #[test]
    fn test_initial_state_is_idle() {
        let controller: RequestController<u32> = RequestController::new();
        assert_eq!(controller.state(), RequestState::Idle);
    }

    #[test]
    fn test_begin_moves_to_pending() {
        let controller: RequestController<u32> = RequestController::new();
        let _ticket = controller.begin();
        assert!(controller.state().is_pending());
    }

    #[test]
    fn test_resolve_success_and_error() {
        let controller: RequestController<u32> = RequestController::new();

        let ticket = controller.begin();
        assert!(controller.resolve(ticket, Ok(7)));
        assert_eq!(controller.state(), RequestState::Success(7));

        let ticket = controller.begin();
        assert!(controller.resolve(ticket, Err("boom".to_string())));
        assert_eq!(controller.state(), RequestState::Error("boom".to_string()));
    }

    #[test]
    fn test_stale_resolution_is_discarded() {
        let controller: RequestController<&str> = RequestController::new();

        // First invocation's network promise resolves after the second's.
        let first = controller.begin();
        let second = controller.begin();

        assert!(controller.resolve(second, Ok("second")));
        assert!(!controller.resolve(first, Ok("first")));

        assert_eq!(controller.state(), RequestState::Success("second"));
    }

    #[test]
    fn test_stale_error_cannot_clobber_newer_success() {
        let controller: RequestController<&str> = RequestController::new();

        let first = controller.begin();
        let second = controller.begin();

        assert!(controller.resolve(second, Ok("fresh")));
        assert!(!controller.resolve(first, Err("old failure".to_string())));

        assert_eq!(controller.state(), RequestState::Success("fresh"));
    }

    #[tokio::test]
    async fn test_run_reflects_latest_invocation_under_reordering() {
        let controller: RequestController<&str> = RequestController::new();

        let (first_tx, first_rx) = oneshot::channel::<Result<&str, String>>();
        let (second_tx, second_rx) = oneshot::channel::<Result<&str, String>>();

        let c1 = controller.clone();
        let slow = tokio::spawn(async move {
            c1.run(async { first_rx.await.expect("sender dropped") }).await
        });
        // Make sure the slow invocation has begun before superseding it.
        tokio::task::yield_now().await;

        let c2 = controller.clone();
        let fast = tokio::spawn(async move {
            c2.run(async { second_rx.await.expect("sender dropped") }).await
        });
        tokio::task::yield_now().await;

        // Second invocation resolves first, then the stale first one arrives.
        second_tx.send(Ok("newer")).unwrap();
        let fast_state = fast.await.unwrap();
        assert_eq!(fast_state, RequestState::Success("newer"));

        first_tx.send(Ok("older")).unwrap();
        let slow_state = slow.await.unwrap();

        // The stale outcome was discarded on both the shared state and the
        // state reported back to the superseded call site.
        assert_eq!(slow_state, RequestState::Success("newer"));
        assert_eq!(controller.state(), RequestState::Success("newer"));
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn test_concurrent_invocations_settle_on_latest() {
        let controller: RequestController<u64> = RequestController::new();

        let mut handles = Vec::new();
        for _ in 0..64 {
            let c = controller.clone();
            handles.push(tokio::spawn(async move {
                let ticket = c.begin();
                tokio::task::yield_now().await;
                let seq = ticket.seq;
                c.resolve(ticket, Ok(seq));
                seq
            }));
        }

        let mut latest = 0;
        for handle in handles {
            latest = latest.max(handle.await.unwrap());
        }

        // The highest-sequence invocation is never superseded, so its
        // resolution must win regardless of how the tasks interleaved.
        assert_eq!(controller.state(), RequestState::Success(latest));
    }

    #[test]
    fn test_validate_text_rejects_blank_input() {
        assert_eq!(validate_text(""), Err(ValidationError::EmptyText));
        assert_eq!(validate_text("   \n\t"), Err(ValidationError::EmptyText));
        assert!(validate_text("fever for 2 days").is_ok());
    }

    #[tokio::test]
    async fn test_subscribe_sees_transitions() {
        let controller: RequestController<u32> = RequestController::new();
        let mut rx = controller.subscribe();

        let ticket = controller.begin();
        rx.changed().await.unwrap();
        assert!(rx.borrow().is_pending());

        controller.resolve(ticket, Ok(1));
        rx.changed().await.unwrap();
        assert_eq!(*rx.borrow(), RequestState::Success(1));
    }
}
