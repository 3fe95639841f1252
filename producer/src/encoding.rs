//! Avro encoding with Confluent wire framing.
//!
//! Format: `[magic_byte(1)][schema_id(4, big-endian)][avro datum(N)]`

use crate::error::{PublishError, Result};
use apache_avro::Schema;
use serde::Serialize;
use text_messages::KafkaMessage;

/// Magic byte indicating a schema id follows.
pub const MAGIC_BYTE: u8 = 0x00;

/// Length of the framing header.
pub const HEADER_LEN: usize = 5;

/// Encodes records against one Avro schema registered under `schema_id`.
#[derive(Debug, Clone)]
pub struct AvroEncoder {
    schema: Schema,
    schema_id: u32,
}

impl AvroEncoder {
    /// Parses the schema of `M` and binds it to a registry id.
    ///
    /// # Errors
    ///
    /// Returns an error if the schema is not valid Avro.
    pub fn for_message<M: KafkaMessage>(schema_id: u32) -> Result<Self> {
        Self::new(M::SCHEMA, schema_id)
    }

    pub fn new(schema: &str, schema_id: u32) -> Result<Self> {
        let schema = Schema::parse_str(schema)
            .map_err(|e| PublishError::Serialization(format!("invalid Avro schema: {}", e)))?;
        Ok(Self { schema, schema_id })
    }

    pub fn schema(&self) -> &Schema {
        &self.schema
    }

    pub fn schema_id(&self) -> u32 {
        self.schema_id
    }

    /// Encodes a record into a framed Avro payload.
    ///
    /// # Errors
    ///
    /// Returns an error if the record does not conform to the schema.
    pub fn encode<T: Serialize>(&self, record: &T) -> Result<Vec<u8>> {
        let value = apache_avro::to_value(record)
            .map_err(|e| PublishError::Serialization(e.to_string()))?;
        let datum = apache_avro::to_avro_datum(&self.schema, value)
            .map_err(|e| PublishError::Serialization(e.to_string()))?;

        Ok(frame(self.schema_id, &datum))
    }
}

/// Prefixes an Avro datum with the magic byte and schema id.
pub fn frame(schema_id: u32, datum: &[u8]) -> Vec<u8> {
    let mut payload = Vec::with_capacity(HEADER_LEN + datum.len());
    payload.push(MAGIC_BYTE);
    payload.extend_from_slice(&schema_id.to_be_bytes());
    payload.extend_from_slice(datum);
    payload
}

#[cfg(test)]
mod tests {
    use super::*;
    use apache_avro::types::Value;
    use text_messages::TextMessage;

    fn record(message_id: Option<i32>) -> TextMessage {
        TextMessage {
            title: "Test".to_string(),
            body: "Test Body Content".to_string(),
            sender: "sender123".to_string(),
            receiver: "receiver456".to_string(),
            message_id,
            is_important: true,
        }
    }

    fn decode(encoder: &AvroEncoder, payload: &[u8]) -> Vec<(String, Value)> {
        let value =
            apache_avro::from_avro_datum(encoder.schema(), &mut &payload[HEADER_LEN..], None)
                .unwrap();
        match value {
            Value::Record(fields) => fields,
            other => panic!("expected record, got {:?}", other),
        }
    }

    fn field<'a>(fields: &'a [(String, Value)], name: &str) -> &'a Value {
        &fields.iter().find(|(n, _)| n == name).unwrap().1
    }

    #[test]
    fn test_header_carries_schema_id() {
        let encoder = AvroEncoder::for_message::<TextMessage>(258).unwrap();
        let payload = encoder.encode(&record(Some(1001))).unwrap();

        assert_eq!(payload[0], MAGIC_BYTE);
        assert_eq!(&payload[1..HEADER_LEN], &[0, 0, 1, 2]);
        assert!(payload.len() > HEADER_LEN);
    }

    #[test]
    fn test_encoded_record_fields() {
        let encoder = AvroEncoder::for_message::<TextMessage>(1).unwrap();
        let payload = encoder.encode(&record(Some(1001))).unwrap();
        let fields = decode(&encoder, &payload);

        assert_eq!(field(&fields, "title"), &Value::String("Test".to_string()));
        assert_eq!(
            field(&fields, "messageId"),
            &Value::Union(1, Box::new(Value::Int(1001)))
        );
        assert_eq!(field(&fields, "isImportant"), &Value::Boolean(true));
    }

    #[test]
    fn test_absent_id_encodes_as_null() {
        let encoder = AvroEncoder::for_message::<TextMessage>(1).unwrap();
        let payload = encoder.encode(&record(None)).unwrap();
        let fields = decode(&encoder, &payload);

        assert_eq!(
            field(&fields, "messageId"),
            &Value::Union(0, Box::new(Value::Null))
        );
    }

    #[test]
    fn test_mismatched_record_is_serialization_error() {
        #[derive(Serialize)]
        struct Other {
            name: String,
        }

        let encoder = AvroEncoder::for_message::<TextMessage>(1).unwrap();
        let result = encoder.encode(&Other {
            name: "x".to_string(),
        });
        assert!(matches!(result, Err(PublishError::Serialization(_))));
    }

    #[test]
    fn test_invalid_schema_is_rejected() {
        assert!(AvroEncoder::new("{not a schema", 1).is_err());
    }
}
