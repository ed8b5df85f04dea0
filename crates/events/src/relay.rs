//! Background task forwarding new chat messages to the broadcast service.
//!
//! [`ChatRelay`] subscribes to the [`EventBus`](crate::bus::EventBus) and
//! delivers every [`DomainEvent::ChatMessageCreated`]. Delivery failures are
//! logged and dropped; the request that created the message has already
//! returned. The loop exits when the bus is dropped.

use tokio::sync::broadcast;

use crate::bus::DomainEvent;
use crate::delivery::broadcast::BroadcastDelivery;

pub struct ChatRelay;

impl ChatRelay {
    pub async fn run(delivery: BroadcastDelivery, mut receiver: broadcast::Receiver<DomainEvent>) {
        tracing::info!(endpoint = delivery.endpoint(), "Chat relay started");
        loop {
            match receiver.recv().await {
                Ok(DomainEvent::ChatMessageCreated(message)) => {
                    match delivery.deliver(&message).await {
                        Ok(()) => tracing::debug!(
                            message_id = %message.message_id,
                            chat_id = %message.chat_id,
                            "Chat message broadcast"
                        ),
                        Err(e) => tracing::warn!(
                            error = %e,
                            message_id = %message.message_id,
                            chat_id = %message.chat_id,
                            "Chat message broadcast failed, dropping"
                        ),
                    }
                }
                Err(broadcast::error::RecvError::Lagged(n)) => {
                    tracing::warn!(skipped = n, "Chat relay lagged, some messages were not broadcast");
                }
                Err(broadcast::error::RecvError::Closed) => {
                    tracing::info!("Event bus closed, chat relay shutting down");
                    break;
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use axum::extract::State;
    use axum::http::StatusCode;
    use axum::routing::post;
    use axum::{Json, Router};
    use chrono::Utc;
    use tokio::sync::mpsc;
    use uuid::Uuid;

    use super::*;
    use crate::bus::{ChatMessage, EventBus};

    /// Start a receiver that records every posted body and answers `status`.
    async fn spawn_receiver(status: StatusCode) -> (String, mpsc::UnboundedReceiver<serde_json::Value>) {
        let (tx, rx) = mpsc::unbounded_channel();
        let app = Router::new()
            .route(
                "/api/broadcast/message",
                post(
                    move |State(tx): State<mpsc::UnboundedSender<serde_json::Value>>,
                          Json(body): Json<serde_json::Value>| async move {
                        let _ = tx.send(body);
                        status
                    },
                ),
            )
            .with_state(tx);
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });
        (format!("http://{addr}"), rx)
    }

    fn message(text: &str) -> ChatMessage {
        ChatMessage {
            message_id: Uuid::new_v4(),
            chat_id: Uuid::new_v4(),
            text: text.to_string(),
            from_specialist: false,
            is_read: false,
            sent_at: Utc::now(),
        }
    }

    #[tokio::test]
    async fn forwards_messages_and_stops_when_bus_closes() {
        let (base_url, mut received) = spawn_receiver(StatusCode::OK).await;
        let bus = Arc::new(EventBus::default());
        let relay = tokio::spawn(ChatRelay::run(
            BroadcastDelivery::new(&base_url).unwrap(),
            bus.subscribe(),
        ));

        let sent = message("Hello");
        bus.publish(DomainEvent::ChatMessageCreated(sent.clone()));

        let body = received.recv().await.expect("receiver should get the message");
        assert_eq!(body["messageId"], sent.message_id.to_string());
        assert_eq!(body["text"], "Hello");
        assert_eq!(body["fromSpecialist"], false);

        drop(bus);
        relay.await.expect("relay should exit cleanly");
    }

    #[tokio::test]
    async fn failed_delivery_does_not_stop_the_relay() {
        let (base_url, mut received) = spawn_receiver(StatusCode::INTERNAL_SERVER_ERROR).await;
        let bus = EventBus::default();
        let relay = tokio::spawn(ChatRelay::run(
            BroadcastDelivery::new(&base_url).unwrap(),
            bus.subscribe(),
        ));

        bus.publish(DomainEvent::ChatMessageCreated(message("first")));
        bus.publish(DomainEvent::ChatMessageCreated(message("second")));

        assert_eq!(received.recv().await.unwrap()["text"], "first");
        assert_eq!(received.recv().await.unwrap()["text"], "second");

        drop(bus);
        relay.await.unwrap();
    }

    #[tokio::test]
    async fn unreachable_service_is_swallowed() {
        // Nothing listens on port 9 of localhost.
        let bus = EventBus::default();
        let relay = tokio::spawn(ChatRelay::run(
            BroadcastDelivery::new("http://127.0.0.1:9").unwrap(),
            bus.subscribe(),
        ));
        bus.publish(DomainEvent::ChatMessageCreated(message("lost")));
        drop(bus);
        relay.await.unwrap();
    }
}
