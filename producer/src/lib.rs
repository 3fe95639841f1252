//! Fire-and-forget Kafka publisher for text messages.
//!
//! This crate turns [`InboundTextMessage`]s into Avro-encoded records on the
//! `text_message` topic, built on top of `rdkafka` and `tokio`.
//!
//! # Features
//!
//! - Partition key derived from the message id (`"unknown"` when absent)
//! - Non-blocking `publish`: returns once the record is enqueued
//! - Delivery outcomes reported once per record to an [`OutcomeSink`]
//! - Avro encoding with Confluent framing and schema registration
//! - Opt-in bounded retry for transient enqueue failures
//! - Integrated tracing
//!
//! # Example
//!
//! ```no_run
//! use std::sync::Arc;
//! use text_messages::{InboundTextMessage, TextMessage};
//! use text_producer::{
//!     submit, AvroEncoder, KafkaTransport, ProducerConfig, Publisher, SchemaRegistryClient,
//! };
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let config = ProducerConfig::from_env()?;
//!     let registry = SchemaRegistryClient::new(&config.schema_registry_url)?;
//!     let schema_id = registry.register_value_schema::<TextMessage>().await?;
//!
//!     let encoder = AvroEncoder::for_message::<TextMessage>(schema_id)?;
//!     let transport = Arc::new(KafkaTransport::new(&config, encoder)?);
//!     let publisher = Publisher::new(transport)?;
//!
//!     let ack = submit(
//!         &publisher,
//!         InboundTextMessage {
//!             title: "Test".to_string(),
//!             message_id: Some(1001),
//!             ..Default::default()
//!         },
//!     )?;
//!     println!("{}: {}", ack.status, ack.message_id);
//!     Ok(())
//! }
//! ```

mod config;
mod encoding;
mod error;
mod ingress;
mod key;
mod outcome;
mod publisher;
mod registry;
mod retry;
mod transport;

pub use config::ProducerConfig;
pub use encoding::{frame, AvroEncoder, HEADER_LEN, MAGIC_BYTE};
pub use error::{PublishError, Result};
pub use ingress::{submit, Acknowledgment, ACCEPTED_STATUS, MISSING_ID};
pub use key::{PublishKey, UNKNOWN_KEY};
pub use outcome::{LogSink, OutcomeSink, PublishOutcome};
pub use publisher::{PublishHandle, Publisher};
pub use registry::SchemaRegistryClient;
pub use retry::{retry_enqueue, RetryPolicy};
pub use transport::{Delivery, DeliveryFuture, KafkaTransport, Transport};

/// Re-export the message types for convenience
pub use text_messages::{InboundTextMessage, KafkaMessage, TextMessage};
