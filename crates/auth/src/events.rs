//! Process-wide auth event fan-out over a tokio broadcast channel.

use tokio::sync::broadcast;

/// Events emitted by the token service.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AuthEvent {
    /// `true` after a successful login, `false` after logout.
    LoginStateChanged(bool),
}

/// Broadcast/subscribe bus for [`AuthEvent`]s.
///
/// Emitting with no live subscribers is not an error; events are simply
/// dropped, like a toast nobody is looking at.
#[derive(Clone)]
pub struct EventBus {
    tx: broadcast::Sender<AuthEvent>,
}

impl EventBus {
    /// Creates a bus retaining up to `capacity` undelivered events per subscriber.
    #[must_use]
    pub fn new(capacity: usize) -> Self {
        let (tx, _) = broadcast::channel(capacity);
        Self { tx }
    }

    /// Opens a new subscription; only events emitted after this call are seen.
    #[must_use]
    pub fn subscribe(&self) -> broadcast::Receiver<AuthEvent> {
        self.tx.subscribe()
    }

    /// Emits an event to all current subscribers.
    pub fn emit(&self, event: AuthEvent) {
        let _ = self.tx.send(event);
    }
}

impl Default for EventBus {
    fn default() -> Self {
        Self::new(16)
    }
}
