//! In-process domain events and their external delivery.
//!
//! - [`EventBus`]: publish/subscribe hub backed by `tokio::sync::broadcast`.
//! - [`DomainEvent`]: the events the API publishes after a commit.
//! - [`delivery`]: outbound channels (the real-time chat broadcast service).
//! - [`ChatRelay`]: background consumer forwarding new chat messages.

pub mod bus;
pub mod delivery;
pub mod relay;

pub use bus::{ChatMessage, DomainEvent, EventBus};
pub use delivery::broadcast::{BroadcastDelivery, BroadcastError};
pub use relay::ChatRelay;
