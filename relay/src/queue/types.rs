//! Queue and message types for the transfer engine.
//!
//! These types decouple the engine from the raw SDK surface: a received
//! message is converted once at the client boundary and flows through
//! transform/forward/acknowledge without touching SDK request builders.

use std::collections::HashMap;

use aws_sdk_sqs::types::{Message as SqsMessage, MessageAttributeValue};

/// SQS returns at most 10 messages per receive call.
pub const MAX_BATCH_SIZE: i32 = 10;

/// System attribute key carrying the FIFO message group id.
pub const GROUP_ID_ATTRIBUTE: &str = "MessageGroupId";

/// System attribute key carrying the FIFO deduplication id.
pub const DEDUPLICATION_ID_ATTRIBUTE: &str = "MessageDeduplicationId";

/// Queue semantics of the destination.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QueueMode {
    /// Unordered queue; group/dedup ids are not recognized.
    Standard,
    /// Ordered, deduplicated queue; every message needs group and dedup ids.
    Fifo,
}

/// An SQS queue endpoint plus its semantics.
///
/// Two of these exist per run (source and destination); both are shared
/// read-only across all workers.
#[derive(Debug, Clone)]
pub struct QueueRef {
    /// Full queue URL.
    pub url: String,
    /// Standard or FIFO.
    pub mode: QueueMode,
}

impl QueueRef {
    pub fn new(url: impl Into<String>, mode: QueueMode) -> Self {
        Self { url: url.into(), mode }
    }
}

/// A message received from the source queue.
#[derive(Debug, Clone)]
pub struct Message {
    /// Queue-assigned message id, used for log correlation only.
    pub message_id: String,
    /// Single-use credential for deleting this delivery from the source.
    pub receipt_token: String,
    /// Opaque payload.
    pub body: String,
    /// Custom (user-set) message attributes, carried to the destination.
    pub attributes: HashMap<String, MessageAttributeValue>,
    /// Queue-assigned system attributes; holds group/dedup ids on FIFO sources.
    pub system_attributes: HashMap<String, String>,
}

impl Message {
    /// FIFO message group id, if the source queue assigned one.
    pub fn group_id(&self) -> Option<&str> {
        self.system_attributes
            .get(GROUP_ID_ATTRIBUTE)
            .map(String::as_str)
            .filter(|v| !v.is_empty())
    }

    /// FIFO deduplication id, if the source queue assigned one.
    pub fn deduplication_id(&self) -> Option<&str> {
        self.system_attributes
            .get(DEDUPLICATION_ID_ATTRIBUTE)
            .map(String::as_str)
            .filter(|v| !v.is_empty())
    }
}

impl From<SqsMessage> for Message {
    fn from(msg: SqsMessage) -> Self {
        let system_attributes = msg
            .attributes
            .unwrap_or_default()
            .into_iter()
            .map(|(k, v)| (k.as_str().to_string(), v))
            .collect();

        Self {
            message_id: msg.message_id.unwrap_or_default(),
            receipt_token: msg.receipt_handle.unwrap_or_default(),
            body: msg.body.unwrap_or_default(),
            attributes: msg.message_attributes.unwrap_or_default(),
            system_attributes,
        }
    }
}

/// A message ready to be sent to the destination queue.
///
/// Group and deduplication ids are populated only in FIFO mode; standard
/// queues reject them.
#[derive(Debug, Clone)]
pub struct OutboundMessage {
    pub body: String,
    pub attributes: HashMap<String, MessageAttributeValue>,
    pub group_id: Option<String>,
    pub deduplication_id: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use aws_sdk_sqs::types::MessageSystemAttributeName;

    #[test]
    fn test_message_from_sqs_message() {
        let attr = MessageAttributeValue::builder()
            .data_type("String")
            .string_value("blue")
            .build()
            .unwrap();

        let sqs_msg = SqsMessage::builder()
            .message_id("m-1")
            .receipt_handle("rh-1")
            .body("payload")
            .attributes(MessageSystemAttributeName::MessageGroupId, "g-1")
            .attributes(MessageSystemAttributeName::MessageDeduplicationId, "d-1")
            .message_attributes("color", attr)
            .build();

        let msg = Message::from(sqs_msg);
        assert_eq!(msg.message_id, "m-1");
        assert_eq!(msg.receipt_token, "rh-1");
        assert_eq!(msg.body, "payload");
        assert_eq!(msg.group_id(), Some("g-1"));
        assert_eq!(msg.deduplication_id(), Some("d-1"));
        assert!(msg.attributes.contains_key("color"));
    }

    #[test]
    fn test_missing_fifo_attributes_are_none() {
        let msg = Message::from(SqsMessage::builder().message_id("m-2").build());
        assert_eq!(msg.group_id(), None);
        assert_eq!(msg.deduplication_id(), None);
    }

    #[test]
    fn test_empty_fifo_attributes_are_none() {
        let sqs_msg = SqsMessage::builder()
            .attributes(MessageSystemAttributeName::MessageGroupId, "")
            .build();
        let msg = Message::from(sqs_msg);
        assert_eq!(msg.group_id(), None);
    }
}
