//! Delivery outcomes and where they are reported.

use crate::key::PublishKey;
use crate::transport::Delivery;
use text_messages::TextMessage;
use tracing::{error, info};

/// Result of one publish attempt, observed after enqueue.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PublishOutcome {
    Delivered {
        topic: String,
        partition: i32,
        offset: i64,
    },
    Failed {
        cause: String,
    },
}

impl PublishOutcome {
    pub fn is_delivered(&self) -> bool {
        matches!(self, PublishOutcome::Delivered { .. })
    }
}

impl From<Delivery> for PublishOutcome {
    fn from(delivery: Delivery) -> Self {
        PublishOutcome::Delivered {
            topic: delivery.topic,
            partition: delivery.partition,
            offset: delivery.offset,
        }
    }
}

/// Receives exactly one outcome per enqueued record.
///
/// Called from the completion task, never from the publishing caller.
/// Implementations must not panic.
pub trait OutcomeSink: Send + Sync + 'static {
    fn record(&self, key: &PublishKey, message: &TextMessage, outcome: &PublishOutcome);
}

/// Sink that writes outcomes to `tracing`.
#[derive(Debug, Default, Clone, Copy)]
pub struct LogSink;

impl OutcomeSink for LogSink {
    fn record(&self, key: &PublishKey, message: &TextMessage, outcome: &PublishOutcome) {
        match outcome {
            PublishOutcome::Delivered {
                topic,
                partition,
                offset,
            } => {
                info!(
                    key = %key,
                    message_id = ?message.message_id,
                    title = %message.title,
                    sender = %message.sender,
                    receiver = %message.receiver,
                    is_important = message.is_important,
                    topic = %topic,
                    partition = partition,
                    offset = offset,
                    "Sent message with offset {}",
                    offset
                );
            }
            PublishOutcome::Failed { cause } => {
                error!(
                    key = %key,
                    message_id = ?message.message_id,
                    title = %message.title,
                    sender = %message.sender,
                    receiver = %message.receiver,
                    is_important = message.is_important,
                    "Unable to send message due to: {}",
                    cause
                );
            }
        }
    }
}
