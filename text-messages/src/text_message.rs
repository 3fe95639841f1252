use crate::KafkaMessage;
use serde::{Deserialize, Serialize};

/// Value substituted for a missing `isImportant` flag, matching the schema default.
pub const IS_IMPORTANT_DEFAULT: bool = false;

/// Text message as submitted by callers.
///
/// Nothing is required here: absent strings deserialize as empty and absent
/// optional fields stay `None` until translation.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct InboundTextMessage {
    pub title: String,
    pub body: String,
    pub sender: String,
    pub receiver: String,
    pub message_id: Option<i32>,
    pub is_important: Option<bool>,
}

/// Schema-bound record written to the `text_message` topic.
///
/// `message_id` maps to the nullable `messageId` union whose default is
/// `null`; an absent identifier is carried as `None` rather than invented.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TextMessage {
    pub title: String,
    pub body: String,
    pub sender: String,
    pub receiver: String,
    pub message_id: Option<i32>,
    pub is_important: bool,
}

impl KafkaMessage for TextMessage {
    const TOPIC: &'static str = "text_message";

    const SCHEMA: &'static str = r#"{
  "type": "record",
  "name": "TextMessage",
  "namespace": "com.badrri.playground.avro",
  "fields": [
    {"name": "title", "type": "string"},
    {"name": "body", "type": "string"},
    {"name": "sender", "type": "string"},
    {"name": "receiver", "type": "string"},
    {"name": "messageId", "type": ["null", "int"], "default": null},
    {"name": "isImportant", "type": "boolean", "default": false}
  ]
}"#;
}

/// Converts an inbound message into its wire record.
///
/// Every field is copied; missing optional fields take the schema defaults.
pub fn translate(message: InboundTextMessage) -> TextMessage {
    let InboundTextMessage {
        title,
        body,
        sender,
        receiver,
        message_id,
        is_important,
    } = message;

    let is_important = match is_important {
        Some(flag) => flag,
        None => IS_IMPORTANT_DEFAULT,
    };

    TextMessage {
        title,
        body,
        sender,
        receiver,
        message_id,
        is_important,
    }
}

impl From<InboundTextMessage> for TextMessage {
    fn from(message: InboundTextMessage) -> Self {
        translate(message)
    }
}
