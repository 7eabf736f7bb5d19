use super::types::RegistryEvent;
use crate::constants::DEFAULT_EVENT_CHANNEL_CAPACITY;
use tokio::sync::broadcast;

/// Broadcast publisher for registry lifecycle events
///
/// Cloning shares the underlying channel. Receivers that fall behind by more
/// than the channel capacity observe `RecvError::Lagged` and skip ahead.
#[derive(Debug, Clone)]
pub struct EventPublisher {
    sender: broadcast::Sender<PublishedEvent>,
}

/// Event that has been published
#[derive(Debug, Clone)]
pub struct PublishedEvent {
    pub event: RegistryEvent,
    pub published_at: chrono::DateTime<chrono::Utc>,
}

impl EventPublisher {
    /// Create a new event publisher with the specified channel capacity
    ///
    /// # Panics
    ///
    /// Panics if `capacity` is zero; `EngineConfig::validate` rejects that value.
    pub fn new(capacity: usize) -> Self {
        let (sender, _) = broadcast::channel(capacity);
        Self { sender }
    }

    /// Publish an event to every current subscriber, returning how many received it
    pub fn publish(&self, event: RegistryEvent) -> usize {
        let published = PublishedEvent {
            event,
            published_at: chrono::Utc::now(),
        };

        // send() only fails when nobody is subscribed, which is fine for lifecycle events
        self.sender.send(published).unwrap_or(0)
    }

    /// Subscribe to events published from now on
    pub fn subscribe(&self) -> broadcast::Receiver<PublishedEvent> {
        self.sender.subscribe()
    }

    /// Get the number of active subscribers
    pub fn subscriber_count(&self) -> usize {
        self.sender.receiver_count()
    }
}

impl Default for EventPublisher {
    fn default() -> Self {
        Self::new(DEFAULT_EVENT_CHANNEL_CAPACITY)
    }
}
