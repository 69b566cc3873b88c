//! In-process event bus for revalidation events.

use tokio::sync::broadcast;
use tracing::debug;

use storeit_core::events::DomainEvent;
use storeit_entity::file::File;

/// Broadcasts domain events to every live subscriber.
///
/// Publishing never fails: with no subscribers the event is dropped, and
/// lagging subscribers skip what they missed.
#[derive(Debug, Clone)]
pub struct EventBus {
    sender: broadcast::Sender<DomainEvent>,
}

impl EventBus {
    /// Creates a bus buffering up to `capacity` events per subscriber.
    pub fn new(capacity: usize) -> Self {
        let (sender, _) = broadcast::channel(capacity.max(1));
        Self { sender }
    }

    /// Publishes an event.
    pub fn publish(&self, event: DomainEvent) {
        let path = event.revalidate_path().map(str::to_owned);
        match self.sender.send(event) {
            Ok(receivers) => debug!(receivers, path = ?path, "Event published"),
            Err(_) => debug!(path = ?path, "Event dropped, no subscribers"),
        }
    }

    /// Subscribes to events published from now on.
    pub fn subscribe(&self) -> broadcast::Receiver<DomainEvent> {
        self.sender.subscribe()
    }

    /// Number of live subscribers.
    pub fn subscriber_count(&self) -> usize {
        self.sender.receiver_count()
    }
}

/// Owner id plus every email the file is shared with.
pub fn file_audience(file: &File) -> Vec<String> {
    let mut audience = Vec::with_capacity(file.users.len() + 1);
    audience.push(file.owner.clone());
    audience.extend(file.users.iter().cloned());
    audience
}
