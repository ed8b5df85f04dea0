//! Delivery of chat messages to the real-time broadcast service.
//!
//! Best-effort: one attempt per message with a short timeout. There is no
//! retry and no dead-letter queue; a failed delivery is reported to the
//! caller, which logs it and moves on.

use std::time::Duration;

use crate::bus::ChatMessage;

/// HTTP request timeout for a delivery attempt.
pub const REQUEST_TIMEOUT: Duration = Duration::from_secs(5);

/// Path of the broadcast endpoint, relative to the service base URL.
const BROADCAST_PATH: &str = "/api/broadcast/message";

#[derive(Debug, thiserror::Error)]
pub enum BroadcastError {
    /// The underlying HTTP request failed (network, DNS, timeout, etc.).
    #[error("HTTP request failed: {0}")]
    Request(#[from] reqwest::Error),

    /// The broadcast service answered with a non-2xx status code.
    #[error("Broadcast service returned HTTP {0}")]
    HttpStatus(u16),
}

/// Posts chat messages to `{base_url}/api/broadcast/message`.
pub struct BroadcastDelivery {
    client: reqwest::Client,
    endpoint: String,
}

impl BroadcastDelivery {
    pub fn new(base_url: &str) -> Result<Self, BroadcastError> {
        let client = reqwest::Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()?;
        Ok(Self {
            client,
            endpoint: format!("{}{BROADCAST_PATH}", base_url.trim_end_matches('/')),
        })
    }

    /// Full URL messages are posted to.
    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    /// Send one message. Single attempt.
    pub async fn deliver(&self, message: &ChatMessage) -> Result<(), BroadcastError> {
        let response = self.client.post(&self.endpoint).json(message).send().await?;
        if !response.status().is_success() {
            return Err(BroadcastError::HttpStatus(response.status().as_u16()));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn endpoint_joins_base_url_without_double_slash() {
        let delivery = BroadcastDelivery::new("http://ws.local:8080/").unwrap();
        assert_eq!(
            delivery.endpoint(),
            "http://ws.local:8080/api/broadcast/message"
        );
    }

    #[test]
    fn http_status_error_display() {
        let err = BroadcastError::HttpStatus(503);
        assert_eq!(err.to_string(), "Broadcast service returned HTTP 503");
    }
}
