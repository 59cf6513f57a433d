//! Conversion of received messages into outbound messages.
//!
//! Standard destinations get the body and custom attributes only; FIFO
//! destinations additionally require the group and deduplication ids the
//! source queue recorded as system attributes.

use thiserror::Error;

use crate::queue::types::{Message, OutboundMessage, QueueMode};

/// A message that cannot be represented on the destination queue.
///
/// Only FIFO mode can fail: a FIFO source is contractually required to
/// stamp group and deduplication ids on every message, so a missing id
/// means a malformed delivery. The caller skips the message (it stays on
/// the source) rather than sending broken FIFO fields downstream.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum TransformError {
    #[error("message {message_id} has no group id; cannot forward to a FIFO queue")]
    MissingGroupId { message_id: String },

    #[error("message {message_id} has no deduplication id; cannot forward to a FIFO queue")]
    MissingDeduplicationId { message_id: String },
}

/// Build the outbound message for `mode` from a received message.
pub fn transform(message: &Message, mode: QueueMode) -> Result<OutboundMessage, TransformError> {
    let (group_id, deduplication_id) = match mode {
        QueueMode::Standard => (None, None),
        QueueMode::Fifo => {
            let group = message
                .group_id()
                .ok_or_else(|| TransformError::MissingGroupId {
                    message_id: message.message_id.clone(),
                })?;
            let dedup =
                message
                    .deduplication_id()
                    .ok_or_else(|| TransformError::MissingDeduplicationId {
                        message_id: message.message_id.clone(),
                    })?;
            (Some(group.to_string()), Some(dedup.to_string()))
        }
    };

    Ok(OutboundMessage {
        body: message.body.clone(),
        attributes: message.attributes.clone(),
        group_id,
        deduplication_id,
    })
}
