//! Cart change notifications
//!
//! Published after every successful local or server write so cart badges and
//! mini-carts can refresh without polling.

use mockall::automock;
use tokio::sync::broadcast::{self, Receiver, Sender};
use tracing::trace;

/// What changed.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum CartEvent {
    /// The device's cart was written.
    LocalUpdated,

    /// The server cart was written.
    ServerUpdated,
}

#[automock]
pub trait CartEvents: Send + Sync {
    /// Notify listeners. Never fails; with no listeners the event is dropped.
    fn publish(&self, event: CartEvent);
}

/// Fan-out of cart events over a tokio broadcast channel.
#[derive(Debug, Clone)]
pub struct BroadcastCartEvents {
    sender: Sender<CartEvent>,
}

impl BroadcastCartEvents {
    #[must_use]
    pub fn new(capacity: usize) -> Self {
        let (sender, _receiver) = broadcast::channel(capacity);

        Self { sender }
    }

    /// Listen for events published from now on.
    pub fn subscribe(&self) -> Receiver<CartEvent> {
        self.sender.subscribe()
    }
}

impl Default for BroadcastCartEvents {
    fn default() -> Self {
        Self::new(64)
    }
}

impl CartEvents for BroadcastCartEvents {
    fn publish(&self, event: CartEvent) {
        // an error only means nobody is listening
        if let Ok(listeners) = self.sender.send(event) {
            trace!(?event, listeners, "published cart event");
        }
    }
}

#[cfg(test)]
mod tests {
    use testresult::TestResult;

    use super::*;

    #[test]
    fn publish_without_listeners_is_fine() {
        BroadcastCartEvents::default().publish(CartEvent::LocalUpdated);
    }

    #[tokio::test]
    async fn subscribers_receive_events_in_order() -> TestResult {
        let events = BroadcastCartEvents::default();
        let mut receiver = events.subscribe();

        events.publish(CartEvent::LocalUpdated);
        events.publish(CartEvent::ServerUpdated);

        assert_eq!(receiver.recv().await?, CartEvent::LocalUpdated);
        assert_eq!(receiver.recv().await?, CartEvent::ServerUpdated);

        Ok(())
    }
}
