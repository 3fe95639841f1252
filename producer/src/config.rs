//! Producer configuration.

use crate::error::{PublishError, Result};
use rdkafka::ClientConfig;
use std::time::Duration;

/// Configuration for the Kafka transport and its schema registry.
#[derive(Debug, Clone)]
pub struct ProducerConfig {
    /// Comma-separated list of Kafka brokers.
    pub brokers: String,

    /// Client identifier reported to the brokers.
    pub client_id: String,

    /// Upper bound on how long the transport tries to deliver a record.
    pub message_timeout: Duration,

    /// Maximum number of records buffered locally before enqueue fails.
    pub queue_buffering_max_messages: u32,

    /// Broker acknowledgment level (`0`, `1` or `all`).
    pub acks: String,

    /// Base URL of the schema registry.
    pub schema_registry_url: String,

    /// Pre-registered schema id; when set the registry is not contacted.
    pub schema_id: Option<u32>,
}

impl ProducerConfig {
    /// Creates a new producer configuration.
    ///
    /// # Arguments
    ///
    /// * `brokers` - Comma-separated list of Kafka brokers
    pub fn new(brokers: impl Into<String>) -> Self {
        Self {
            brokers: brokers.into(),
            client_id: "text-producer".to_string(),
            message_timeout: Duration::from_secs(5),
            queue_buffering_max_messages: 100_000,
            acks: "all".to_string(),
            schema_registry_url: "http://localhost:8081".to_string(),
            schema_id: None,
        }
    }

    /// Builds the configuration from environment variables.
    ///
    /// Reads `KAFKA_BROKERS` (default `localhost:9092`), `KAFKA_CLIENT_ID`,
    /// `KAFKA_MESSAGE_TIMEOUT_MS`, `SCHEMA_REGISTRY_URL` and `SCHEMA_ID`.
    ///
    /// # Errors
    ///
    /// Returns an error if a numeric variable cannot be parsed.
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    pub(crate) fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let brokers = lookup("KAFKA_BROKERS").unwrap_or_else(|| "localhost:9092".to_string());
        let mut config = Self::new(brokers);

        if let Some(client_id) = lookup("KAFKA_CLIENT_ID") {
            config = config.with_client_id(client_id);
        }
        if let Some(raw) = lookup("KAFKA_MESSAGE_TIMEOUT_MS") {
            let millis = raw.parse::<u64>().map_err(|e| {
                PublishError::Config(format!("KAFKA_MESSAGE_TIMEOUT_MS '{}': {}", raw, e))
            })?;
            config = config.with_message_timeout(Duration::from_millis(millis));
        }
        if let Some(url) = lookup("SCHEMA_REGISTRY_URL") {
            config = config.with_schema_registry_url(url);
        }
        if let Some(raw) = lookup("SCHEMA_ID") {
            let id = raw
                .parse::<u32>()
                .map_err(|e| PublishError::Config(format!("SCHEMA_ID '{}': {}", raw, e)))?;
            config = config.with_schema_id(id);
        }

        Ok(config)
    }

    /// Sets the client identifier.
    pub fn with_client_id(mut self, client_id: impl Into<String>) -> Self {
        self.client_id = client_id.into();
        self
    }

    /// Sets the delivery timeout.
    pub fn with_message_timeout(mut self, timeout: Duration) -> Self {
        self.message_timeout = timeout;
        self
    }

    /// Sets the local queue capacity.
    pub fn with_queue_buffering_max_messages(mut self, max: u32) -> Self {
        self.queue_buffering_max_messages = max;
        self
    }

    /// Sets the broker acknowledgment level.
    pub fn with_acks(mut self, acks: impl Into<String>) -> Self {
        self.acks = acks.into();
        self
    }

    /// Sets the schema registry URL.
    pub fn with_schema_registry_url(mut self, url: impl Into<String>) -> Self {
        self.schema_registry_url = url.into();
        self
    }

    /// Uses an already registered schema id instead of registering at startup.
    pub fn with_schema_id(mut self, id: u32) -> Self {
        self.schema_id = Some(id);
        self
    }

    /// Builds the rdkafka client configuration.
    pub fn to_client_config(&self) -> ClientConfig {
        let mut client_config = ClientConfig::new();
        client_config
            .set("bootstrap.servers", &self.brokers)
            .set("client.id", &self.client_id)
            .set(
                "message.timeout.ms",
                self.message_timeout.as_millis().to_string(),
            )
            .set(
                "queue.buffering.max.messages",
                self.queue_buffering_max_messages.to_string(),
            )
            .set("queue.buffering.max.kbytes", "1048576")
            .set(
                "batch.num.messages",
                self.queue_buffering_max_messages.min(10_000).to_string(),
            )
            .set("acks", &self.acks);
        client_config
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup_from(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |name| vars.get(name).cloned()
    }

    #[test]
    fn test_defaults() {
        let config = ProducerConfig::from_lookup(lookup_from(&[])).unwrap();
        assert_eq!(config.brokers, "localhost:9092");
        assert_eq!(config.message_timeout, Duration::from_secs(5));
        assert_eq!(config.schema_id, None);
    }

    #[test]
    fn test_env_overrides() {
        let config = ProducerConfig::from_lookup(lookup_from(&[
            ("KAFKA_BROKERS", "kafka-1:19092,kafka-2:19092"),
            ("KAFKA_MESSAGE_TIMEOUT_MS", "1500"),
            ("SCHEMA_REGISTRY_URL", "http://localhost:18081"),
            ("SCHEMA_ID", "7"),
        ]))
        .unwrap();

        assert_eq!(config.brokers, "kafka-1:19092,kafka-2:19092");
        assert_eq!(config.message_timeout, Duration::from_millis(1500));
        assert_eq!(config.schema_registry_url, "http://localhost:18081");
        assert_eq!(config.schema_id, Some(7));
    }

    #[test]
    fn test_invalid_timeout_is_rejected() {
        let result =
            ProducerConfig::from_lookup(lookup_from(&[("KAFKA_MESSAGE_TIMEOUT_MS", "soon")]));
        assert!(matches!(result, Err(PublishError::Config(_))));
    }

    #[test]
    fn test_client_config_carries_settings() {
        let config = ProducerConfig::new("localhost:19092")
            .with_message_timeout(Duration::from_secs(2))
            .with_acks("1");
        let client_config = config.to_client_config();

        assert_eq!(client_config.get("bootstrap.servers"), Some("localhost:19092"));
        assert_eq!(client_config.get("message.timeout.ms"), Some("2000"));
        assert_eq!(client_config.get("acks"), Some("1"));
    }
}
