//! Text message shapes exchanged with the `text_message` Kafka topic.
//!
//! This crate provides the `KafkaMessage` trait that binds a wire record to its
//! topic and Avro schema, the caller-facing [`InboundTextMessage`], the
//! schema-bound [`TextMessage`], and the translation between the two.

mod text_message;

pub use text_message::{translate, InboundTextMessage, TextMessage, IS_IMPORTANT_DEFAULT};

use serde::{Deserialize, Serialize};

/// Trait for types that are published as Kafka records.
///
/// Implementors name the topic their records go to and the Avro schema their
/// serde representation must conform to.
///
/// # Example
///
/// ```
/// use text_messages::KafkaMessage;
/// use serde::{Deserialize, Serialize};
///
/// #[derive(Debug, Serialize, Deserialize)]
/// struct UserCreated {
///     user_id: String,
/// }
///
/// impl KafkaMessage for UserCreated {
///     const TOPIC: &'static str = "user.created";
///     const SCHEMA: &'static str = r#"{"type":"record","name":"UserCreated","fields":[{"name":"user_id","type":"string"}]}"#;
/// }
/// ```
pub trait KafkaMessage: Serialize + for<'de> Deserialize<'de> + Send + Sync {
    /// The Kafka topic where messages of this type are sent.
    const TOPIC: &'static str;

    /// Avro schema (JSON form) of the record value.
    const SCHEMA: &'static str;

    /// Schema registry subject under the topic name strategy.
    fn value_subject() -> String {
        format!("{}-value", Self::TOPIC)
    }
}
