//! Text message ingress server.
//!
//! Environment:
//! - `KAFKA_BROKERS`, `SCHEMA_REGISTRY_URL`, `SCHEMA_ID` and the other
//!   producer settings (see `ProducerConfig::from_env`)
//! - `BIND_ADDR` (default `0.0.0.0:8080`)
//! - `RUST_LOG` (default `info`)

use anyhow::Context;
use std::sync::Arc;
use std::time::Duration;
use text_producer::{
    AvroEncoder, KafkaTransport, ProducerConfig, Publisher, SchemaRegistryClient, TextMessage,
};
use tokio::net::TcpListener;
use tokio::signal;
use tracing::info;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .init();

    let config = ProducerConfig::from_env()?;
    let bind_addr = std::env::var("BIND_ADDR").unwrap_or_else(|_| "0.0.0.0:8080".to_string());

    info!("Configuration:");
    info!("  Brokers: {}", config.brokers);
    info!("  Schema registry: {}", config.schema_registry_url);
    info!("  Bind address: {}", bind_addr);

    let schema_id = match config.schema_id {
        Some(id) => id,
        None => SchemaRegistryClient::new(&config.schema_registry_url)?
            .register_value_schema::<TextMessage>()
            .await
            .context("registering the text_message value schema")?,
    };

    let encoder = AvroEncoder::for_message::<TextMessage>(schema_id)?;
    let transport = Arc::new(KafkaTransport::new(&config, encoder)?);
    let publisher = Publisher::new(Arc::clone(&transport))?;

    let listener = TcpListener::bind(&bind_addr)
        .await
        .with_context(|| format!("binding {}", bind_addr))?;
    info!("Listening on {}", bind_addr);

    axum::serve(listener, text_producer_server::router(publisher))
        .with_graceful_shutdown(text_producer_server::shutdown_signal(signal::ctrl_c()))
        .await?;

    info!("Flushing pending messages");
    transport.flush(Duration::from_secs(5))?;

    info!("Server stopped");
    Ok(())
}
