//! Fire-and-forget publisher for text messages.

use crate::error::{PublishError, Result};
use crate::key::PublishKey;
use crate::outcome::{LogSink, OutcomeSink, PublishOutcome};
use crate::retry::{retry_enqueue, RetryPolicy};
use crate::transport::Transport;
use std::sync::Arc;
use text_messages::{KafkaMessage, TextMessage};
use tokio::runtime::Handle;
use tokio::task::JoinHandle;
use tracing::{debug, warn};

/// Publishes text messages to the `text_message` topic.
///
/// `publish` hands the record to the transport and returns as soon as it is
/// enqueued. Broker acknowledgment is awaited on a spawned completion task,
/// which reports exactly one [`PublishOutcome`] to the sink. Delivery
/// failures never reach the caller.
///
/// The publisher is cheap to clone and safe to share between tasks; all
/// clones use the same transport handle.
///
/// # Example
///
/// ```no_run
/// use std::sync::Arc;
/// use text_messages::{InboundTextMessage, TextMessage};
/// use text_producer::{AvroEncoder, KafkaTransport, ProducerConfig, Publisher};
///
/// #[tokio::main]
/// async fn main() -> anyhow::Result<()> {
///     let config = ProducerConfig::from_env()?;
///     let encoder = AvroEncoder::for_message::<TextMessage>(1)?;
///     let transport = Arc::new(KafkaTransport::new(&config, encoder)?);
///     let publisher = Publisher::new(transport)?;
///
///     let message = InboundTextMessage {
///         title: "Test".to_string(),
///         message_id: Some(1001),
///         ..Default::default()
///     };
///     publisher.publish(message.into())?;
///     Ok(())
/// }
/// ```
pub struct Publisher<T: Transport> {
    topic: &'static str,
    transport: Arc<T>,
    sink: Arc<dyn OutcomeSink>,
    runtime: Handle,
}

impl<T: Transport> Clone for Publisher<T> {
    fn clone(&self) -> Self {
        Self {
            topic: self.topic,
            transport: Arc::clone(&self.transport),
            sink: Arc::clone(&self.sink),
            runtime: self.runtime.clone(),
        }
    }
}

impl<T: Transport> Publisher<T> {
    /// Creates a publisher that logs outcomes through `tracing`.
    ///
    /// # Errors
    ///
    /// Returns an error if called outside a tokio runtime.
    pub fn new(transport: Arc<T>) -> Result<Self> {
        Self::with_sink(transport, Arc::new(LogSink))
    }

    /// Creates a publisher reporting outcomes to `sink`.
    ///
    /// Completion tasks run on the runtime that is current at construction.
    ///
    /// # Errors
    ///
    /// Returns an error if called outside a tokio runtime.
    pub fn with_sink(transport: Arc<T>, sink: Arc<dyn OutcomeSink>) -> Result<Self> {
        let runtime = Handle::try_current().map_err(|e| PublishError::Runtime(e.to_string()))?;

        Ok(Self {
            topic: TextMessage::TOPIC,
            transport,
            sink,
            runtime,
        })
    }

    /// The destination topic, fixed for the lifetime of the publisher.
    pub fn topic(&self) -> &str {
        self.topic
    }

    /// Publishes a record without waiting for the broker.
    ///
    /// # Errors
    ///
    /// Returns an error only if the transport refuses to enqueue the record.
    pub fn publish(&self, record: TextMessage) -> Result<PublishHandle> {
        let key = PublishKey::for_record(&record);

        let delivery = match self.transport.send(self.topic, key.as_str(), &record) {
            Ok(delivery) => delivery,
            Err(e) => {
                warn!(
                    "Failed to enqueue message to topic '{}' with key '{}': {}",
                    self.topic, key, e
                );
                return Err(e);
            }
        };

        debug!("Enqueued message to topic '{}' with key '{}'", self.topic, key);

        let sink = Arc::clone(&self.sink);
        let task_key = key.clone();
        let completion = self.runtime.spawn(async move {
            let outcome = match delivery.await {
                Ok(delivery) => PublishOutcome::from(delivery),
                Err(e) => PublishOutcome::Failed {
                    cause: e.to_string(),
                },
            };
            sink.record(&task_key, &record, &outcome);
            outcome
        });

        Ok(PublishHandle { key, completion })
    }

    /// Publishes a record, retrying transient enqueue failures.
    ///
    /// Only enqueue is retried; the delivery outcome is still reported to the
    /// sink exactly once and never retried.
    ///
    /// # Errors
    ///
    /// Returns the last enqueue error once the policy is exhausted, or the
    /// first non-retryable one.
    pub async fn publish_with_retry(
        &self,
        record: TextMessage,
        policy: &RetryPolicy,
    ) -> Result<PublishHandle> {
        retry_enqueue(policy, || self.publish(record.clone())).await
    }
}

/// Handle to an enqueued record.
///
/// Dropping it detaches the completion task; the outcome is still reported.
#[derive(Debug)]
pub struct PublishHandle {
    key: PublishKey,
    completion: JoinHandle<PublishOutcome>,
}

impl PublishHandle {
    /// Key the record was published with.
    pub fn key(&self) -> &PublishKey {
        &self.key
    }

    /// Whether the outcome has already been reported.
    pub fn is_finished(&self) -> bool {
        self.completion.is_finished()
    }

    /// Waits for the outcome that was reported to the sink.
    ///
    /// # Errors
    ///
    /// Returns an error if the completion task panicked.
    pub async fn outcome(self) -> Result<PublishOutcome> {
        self.completion
            .await
            .map_err(|e| PublishError::Runtime(format!("completion task failed: {}", e)))
    }
}
