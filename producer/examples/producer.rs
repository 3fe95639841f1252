//! Example publishing a handful of text messages.
//!
//! This example shows how to:
//! - Register the `text_message` value schema
//! - Create a Kafka transport and a shared Publisher
//! - Publish messages without waiting for the broker
//! - Flush before exiting
//!
//! To run this example:
//! ```bash
//! cargo run --example producer
//! ```
//!
//! Make sure a Kafka broker and a schema registry are running
//! (`KAFKA_BROKERS`, `SCHEMA_REGISTRY_URL`).

use std::sync::Arc;
use std::time::Duration;
use text_producer::{
    submit, AvroEncoder, InboundTextMessage, KafkaTransport, ProducerConfig, Publisher,
    SchemaRegistryClient, TextMessage,
};
use tracing::{info, Level};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt().with_max_level(Level::INFO).init();

    info!("Starting text message producer example");

    let config = ProducerConfig::from_env()?;
    let schema_id = match config.schema_id {
        Some(id) => id,
        None => {
            SchemaRegistryClient::new(&config.schema_registry_url)?
                .register_value_schema::<TextMessage>()
                .await?
        }
    };

    let encoder = AvroEncoder::for_message::<TextMessage>(schema_id)?;
    let transport = Arc::new(KafkaTransport::new(&config, encoder)?);
    let publisher = Publisher::new(Arc::clone(&transport))?;
    info!("Publisher created successfully");

    for i in 1..=5 {
        let message = InboundTextMessage {
            title: format!("Message {}", i),
            body: format!("Body of message {}", i),
            sender: "user 1".to_string(),
            receiver: "user 2".to_string(),
            message_id: Some(i),
            is_important: Some(i % 2 == 0),
        };

        let ack = submit(&publisher, message)?;
        info!("{} (messageId: {})", ack.status, ack.message_id);
    }

    // Without an id the record is keyed "unknown"
    let ack = submit(
        &publisher,
        InboundTextMessage {
            title: "Anonymous".to_string(),
            body: "No identifier".to_string(),
            ..Default::default()
        },
    )?;
    info!("{} (messageId: {})", ack.status, ack.message_id);

    info!("Flushing pending messages");
    transport.flush(Duration::from_secs(5))?;

    // Let the completion tasks log their outcomes
    tokio::time::sleep(Duration::from_millis(200)).await;
    Ok(())
}
