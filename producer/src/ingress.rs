//! Boundary-facing submit operation.

use crate::error::Result;
use crate::publisher::Publisher;
use crate::transport::Transport;
use serde::Serialize;
use text_messages::{translate, InboundTextMessage};

/// Status reported once a message has been handed to the transport.
pub const ACCEPTED_STATUS: &str = "Message sent to Kafka topic";

/// Echo used when the message carries no identifier.
pub const MISSING_ID: &str = "N/A";

/// Acknowledgment of a successful enqueue. Says nothing about delivery.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Acknowledgment {
    pub status: String,
    pub message_id: String,
}

impl Acknowledgment {
    pub fn accepted(message_id: Option<i32>) -> Self {
        let message_id = match message_id {
            Some(id) => id.to_string(),
            None => MISSING_ID.to_string(),
        };
        Self {
            status: ACCEPTED_STATUS.to_string(),
            message_id,
        }
    }
}

/// Translates an inbound message and publishes it.
///
/// # Errors
///
/// Returns an error if the record could not be enqueued.
pub fn submit<T: Transport>(
    publisher: &Publisher<T>,
    message: InboundTextMessage,
) -> Result<Acknowledgment> {
    let message_id = message.message_id;
    publisher.publish(translate(message))?;
    Ok(Acknowledgment::accepted(message_id))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_acknowledgment_echoes_id() {
        let ack = Acknowledgment::accepted(Some(5555));
        assert_eq!(ack.status, ACCEPTED_STATUS);
        assert_eq!(ack.message_id, "5555");
    }

    #[test]
    fn test_acknowledgment_without_id() {
        assert_eq!(Acknowledgment::accepted(None).message_id, MISSING_ID);
    }

    #[test]
    fn test_acknowledgment_json_shape() {
        let json = serde_json::to_value(Acknowledgment::accepted(Some(1001))).unwrap();
        assert_eq!(json["status"], "Message sent to Kafka topic");
        assert_eq!(json["messageId"], "1001");
    }
}
