//! Partition key derivation.

use std::fmt;
use text_messages::TextMessage;

/// Key used when a record carries no message identifier.
pub const UNKNOWN_KEY: &str = "unknown";

/// Partition/ordering key of a published record.
///
/// Records with the same `message_id` always get the same key, so the broker
/// keeps them on one partition and in order.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct PublishKey(String);

impl PublishKey {
    /// Derives the key from an optional message identifier.
    pub fn from_message_id(message_id: Option<i32>) -> Self {
        match message_id {
            Some(id) => PublishKey(id.to_string()),
            None => PublishKey(UNKNOWN_KEY.to_string()),
        }
    }

    /// Derives the key for a wire record.
    pub fn for_record(record: &TextMessage) -> Self {
        Self::from_message_id(record.message_id)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for PublishKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_present_id_renders_decimal() {
        assert_eq!(PublishKey::from_message_id(Some(1001)).as_str(), "1001");
        assert_eq!(PublishKey::from_message_id(Some(0)).as_str(), "0");
        assert_eq!(PublishKey::from_message_id(Some(-42)).as_str(), "-42");
        assert_eq!(
            PublishKey::from_message_id(Some(i32::MAX)).as_str(),
            "2147483647"
        );
    }

    #[test]
    fn test_absent_id_uses_sentinel() {
        let key = PublishKey::from_message_id(None);
        assert_eq!(key.as_str(), UNKNOWN_KEY);
        assert_eq!(key.to_string(), "unknown");
    }

    #[test]
    fn test_same_id_same_key() {
        for id in [1, 5, 7, 9999] {
            assert_eq!(
                PublishKey::from_message_id(Some(id)),
                PublishKey::from_message_id(Some(id))
            );
        }
        assert_ne!(
            PublishKey::from_message_id(Some(5)),
            PublishKey::from_message_id(Some(7))
        );
    }
}
