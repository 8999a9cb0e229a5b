//! Single-flight gate around the credential refresh.
//!
//! When many in-flight requests hit 401 at the same moment (typical right
//! after token expiry), exactly one of them may run the refresh grant. The
//! first caller to find the gate idle becomes the initiator; everyone else
//! subscribes to the same outcome and never issues a second grant.

use apibridge_types::error::Result;
use std::sync::{Arc, Mutex};
use tokio::sync::watch;

/// Shared result of one refresh cycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RefreshOutcome {
    /// The refresh grant succeeded; waiters should replay with the new credential.
    Refreshed,
    /// The refresh grant failed; waiters must terminate as unauthorized.
    Failed,
}

type OutcomeSlot = Arc<Mutex<Option<watch::Receiver<Option<RefreshOutcome>>>>>;

/// Single-flight coordinator.
///
/// States: idle (slot empty), refresh-in-flight (slot holds the cycle's
/// receiver). The refresh itself runs on a detached task that clears the
/// slot before publishing, so the cycle settles and the gate reopens even
/// when every caller abandons its future mid-wait, and a 401 arriving after
/// publication starts a fresh cycle instead of consuming a stale result.
pub struct RefreshGate {
    inflight: OutcomeSlot,
}

impl RefreshGate {
    #[must_use]
    pub fn new() -> Self {
        Self {
            inflight: Arc::new(Mutex::new(None)),
        }
    }

    /// `true` while a refresh cycle is outstanding.
    #[must_use]
    pub fn in_flight(&self) -> bool {
        self.inflight.lock().unwrap().is_some()
    }

    /// Runs `refresh` if no cycle is outstanding, otherwise waits for the
    /// outstanding cycle. Every caller of the same cycle observes the same
    /// outcome, and `refresh` runs at most once per cycle.
    ///
    /// Must be called from within a tokio runtime.
    pub async fn run_once<F, Fut>(&self, refresh: F) -> RefreshOutcome
    where
        F: FnOnce() -> Fut,
        Fut: Future<Output = Result<()>> + Send + 'static,
    {
        let mut rx = {
            let mut slot = self.inflight.lock().unwrap();
            if let Some(rx) = slot.as_ref() {
                rx.clone()
            } else {
                let (tx, rx) = watch::channel(None);
                *slot = Some(rx.clone());
                let inflight = Arc::clone(&self.inflight);
                let fut = refresh();
                tokio::spawn(async move {
                    let outcome = match fut.await {
                        Ok(()) => RefreshOutcome::Refreshed,
                        Err(e) => {
                            tracing::warn!(error = %e, "credential refresh failed");
                            RefreshOutcome::Failed
                        }
                    };
                    // Clear before publishing so late 401s open a new cycle.
                    *inflight.lock().unwrap() = None;
                    let _ = tx.send(Some(outcome));
                });
                rx
            }
        };

        loop {
            if let Some(outcome) = *rx.borrow_and_update() {
                break outcome;
            }
            if rx.changed().await.is_err() {
                // Refresh task died without publishing.
                break RefreshOutcome::Failed;
            }
        }
    }
}

impl Default for RefreshGate {
    fn default() -> Self {
        Self::new()
    }
}
