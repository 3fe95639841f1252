//! The seam between the publisher and the stream broker.

use crate::config::ProducerConfig;
use crate::encoding::AvroEncoder;
use crate::error::{PublishError, Result};
use rdkafka::producer::{FutureProducer, FutureRecord, Producer as RdProducer};
use rdkafka::ClientConfig;
use std::future::Future;
use std::pin::Pin;
use std::time::Duration;
use text_messages::TextMessage;
use tracing::{debug, info};

/// Broker confirmation of a delivered record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Delivery {
    pub topic: String,
    pub partition: i32,
    pub offset: i64,
}

/// Future resolving once the broker has confirmed or rejected a record.
pub type DeliveryFuture = Pin<Box<dyn Future<Output = Result<Delivery>> + Send>>;

/// Asynchronous send capability of a stream broker client.
///
/// `send` only enqueues: it returns as soon as the record is in the client's
/// send buffer, and errors returned from it are enqueue failures. Delivery
/// failures come out of the returned future.
pub trait Transport: Send + Sync + 'static {
    fn send(&self, topic: &str, key: &str, record: &TextMessage) -> Result<DeliveryFuture>;
}

/// Kafka transport encoding records as framed Avro.
pub struct KafkaTransport {
    inner: FutureProducer,
    encoder: AvroEncoder,
}

impl KafkaTransport {
    /// Creates a new Kafka transport.
    ///
    /// # Errors
    ///
    /// Returns an error if the producer cannot be created.
    pub fn new(config: &ProducerConfig, encoder: AvroEncoder) -> Result<Self> {
        info!(
            "Creating Kafka producer with brokers: {}, schema id: {}",
            config.brokers,
            encoder.schema_id()
        );
        Self::from_client_config(config.to_client_config(), encoder)
    }

    /// Creates a new Kafka transport from a pre-configured `ClientConfig`.
    ///
    /// # Errors
    ///
    /// Returns an error if the producer cannot be created.
    pub fn from_client_config(config: ClientConfig, encoder: AvroEncoder) -> Result<Self> {
        let producer: FutureProducer = config.create()?;
        Ok(Self {
            inner: producer,
            encoder,
        })
    }

    /// Flushes any pending records.
    ///
    /// Called by the application before shutdown so queued records are not lost.
    ///
    /// # Errors
    ///
    /// Returns an error if the flush operation times out.
    pub fn flush(&self, timeout: Duration) -> Result<()> {
        RdProducer::flush(&self.inner, timeout)?;
        Ok(())
    }
}

impl Transport for KafkaTransport {
    fn send(&self, topic: &str, key: &str, record: &TextMessage) -> Result<DeliveryFuture> {
        let payload = self.encoder.encode(record)?;

        debug!(
            "Enqueueing record to topic '{}' with key '{}' ({} bytes)",
            topic,
            key,
            payload.len()
        );

        let kafka_record = FutureRecord::to(topic).key(key).payload(payload.as_slice());
        let delivery = self
            .inner
            .send_result(kafka_record)
            .map_err(|(kafka_err, _record)| PublishError::Kafka(kafka_err))?;

        let topic = topic.to_string();
        Ok(Box::pin(async move {
            match delivery.await {
                Ok(Ok((partition, offset))) => Ok(Delivery {
                    topic,
                    partition,
                    offset,
                }),
                Ok(Err((kafka_err, _message))) => Err(PublishError::Kafka(kafka_err)),
                Err(_canceled) => Err(PublishError::Delivery(
                    "producer dropped before delivery was confirmed".to_string(),
                )),
            }
        }))
    }
}
