//! In-process event bus backed by a `tokio::sync::broadcast` channel.
//!
//! [`EventBus`] is shared via `Arc<EventBus>` in the application state.
//! Publishing never blocks and never fails the caller: events published
//! while nobody is subscribed are dropped.

use mosstroi_core::types::{DbId, Timestamp};
use serde::{Serialize, Serializer};
use tokio::sync::broadcast;

// ---------------------------------------------------------------------------
// Events
// ---------------------------------------------------------------------------

/// A chat message as announced to real-time subscribers.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ChatMessage {
    pub message_id: DbId,
    pub chat_id: DbId,
    pub text: String,
    pub from_specialist: bool,
    pub is_read: bool,
    /// Whole seconds in UTC without an offset; the broadcast service parses
    /// `yyyy-MM-dd'T'HH:mm:ss` strictly.
    #[serde(serialize_with = "serialize_whole_seconds")]
    pub sent_at: Timestamp,
}

fn serialize_whole_seconds<S>(at: &Timestamp, serializer: S) -> Result<S::Ok, S::Error>
where
    S: Serializer,
{
    serializer.collect_str(&at.format("%Y-%m-%dT%H:%M:%S"))
}

/// Something that happened after a transaction committed.
#[derive(Debug, Clone, PartialEq)]
pub enum DomainEvent {
    /// A message was appended to a chat.
    ChatMessageCreated(ChatMessage),
}

impl DomainEvent {
    /// Dot-separated event name, used in logs.
    pub fn event_type(&self) -> &'static str {
        match self {
            DomainEvent::ChatMessageCreated(_) => "chat.message_created",
        }
    }
}

// ---------------------------------------------------------------------------
// EventBus
// ---------------------------------------------------------------------------

/// Default buffer capacity for the broadcast channel.
const DEFAULT_CAPACITY: usize = 256;

/// In-process fan-out event bus.
///
/// When the buffer is full, the oldest unconsumed events are dropped and
/// slow receivers observe `RecvError::Lagged`.
pub struct EventBus {
    sender: broadcast::Sender<DomainEvent>,
}

impl EventBus {
    pub fn new(capacity: usize) -> Self {
        let (sender, _) = broadcast::channel(capacity);
        Self { sender }
    }

    /// Publish an event to all current subscribers.
    pub fn publish(&self, event: DomainEvent) {
        let event_type = event.event_type();
        if self.sender.send(event).is_err() {
            tracing::debug!(event_type, "No event subscribers, event dropped");
        }
    }

    pub fn subscribe(&self) -> broadcast::Receiver<DomainEvent> {
        self.sender.subscribe()
    }
}

impl Default for EventBus {
    fn default() -> Self {
        Self::new(DEFAULT_CAPACITY)
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
