//! Error types for the text message producer.

use rdkafka::error::RDKafkaErrorCode;
use thiserror::Error;

/// Result type alias for producer operations.
pub type Result<T> = std::result::Result<T, PublishError>;

/// Errors that can occur while publishing text messages.
///
/// Everything returned from [`Publisher::publish`](crate::Publisher::publish)
/// is an enqueue failure. Delivery failures only ever reach the outcome sink.
#[derive(Error, Debug)]
pub enum PublishError {
    /// Error from the underlying rdkafka library.
    #[error("Kafka error: {0}")]
    Kafka(#[from] rdkafka::error::KafkaError),

    /// Error encoding a record to its wire format.
    #[error("Serialization error: {0}")]
    Serialization(String),

    /// The transport refused to take the record into its send queue.
    #[error("Enqueue error: {0}")]
    Enqueue(String),

    /// The record was enqueued but never confirmed by the broker.
    #[error("Delivery error: {0}")]
    Delivery(String),

    /// Error talking to the schema registry.
    #[error("Schema registry error: {0}")]
    SchemaRegistry(String),

    /// No async runtime is available to observe completions.
    #[error("Runtime error: {0}")]
    Runtime(String),

    /// Invalid producer configuration.
    #[error("Configuration error: {0}")]
    Config(String),
}

impl PublishError {
    /// Whether retrying the same enqueue later can succeed.
    ///
    /// Only a full local send queue is transient; everything else fails the
    /// same way on every attempt.
    pub fn is_retryable(&self) -> bool {
        match self {
            PublishError::Kafka(err) => {
                err.rdkafka_error_code() == Some(RDKafkaErrorCode::QueueFull)
            }
            _ => false,
        }
    }
}
