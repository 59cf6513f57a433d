//! Queue service client: the receive/send/delete contract and its SQS adapter.
//!
//! The transfer engine only ever talks to the [`QueueClient`] trait, so the
//! engine's policies (termination, failure containment) are testable against
//! a scripted in-memory double. [`SqsQueueClient`] is the thin production
//! adapter over `aws-sdk-sqs`.

use std::collections::HashMap;

use async_trait::async_trait;
use aws_sdk_sqs::types::MessageSystemAttributeName;
use thiserror::Error;

use super::types::{Message, OutboundMessage, QueueRef};

type BoxError = Box<dyn std::error::Error + Send + Sync + 'static>;

/// A queue operation failure, tagged by the operation that produced it.
///
/// Only `Receive` is fatal to a worker; `Send` and `Delete` are contained
/// per-message and surface through logs and batch reports.
#[derive(Debug, Error)]
pub enum QueueError {
    #[error("receive failed on {queue_url}")]
    Receive {
        queue_url: String,
        #[source]
        source: BoxError,
    },

    #[error("send failed on {queue_url}")]
    Send {
        queue_url: String,
        #[source]
        source: BoxError,
    },

    #[error("delete failed on {queue_url}")]
    Delete {
        queue_url: String,
        #[source]
        source: BoxError,
    },
}

/// The queue service contract the engine relies on.
///
/// Implementations must be safe for concurrent use: one instance is shared
/// by every worker and every per-message unit.
#[async_trait]
pub trait QueueClient: Send + Sync {
    /// Receive up to `max_messages` from `queue`, waiting at most
    /// `wait_seconds` (0 = return immediately). All custom and system
    /// attributes are included on the returned messages.
    async fn receive(
        &self,
        queue: &QueueRef,
        max_messages: i32,
        wait_seconds: i32,
    ) -> Result<Vec<Message>, QueueError>;

    /// Send one message to `queue`. A single attempt; the caller decides
    /// what a failure means.
    async fn send(&self, queue: &QueueRef, message: &OutboundMessage) -> Result<(), QueueError>;

    /// Delete the delivery identified by `receipt_token` from `queue`.
    async fn delete(&self, queue: &QueueRef, receipt_token: &str) -> Result<(), QueueError>;
}

/// Production [`QueueClient`] backed by the AWS SQS SDK.
#[derive(Clone)]
pub struct SqsQueueClient {
    inner: aws_sdk_sqs::Client,
}

impl SqsQueueClient {
    pub fn new(inner: aws_sdk_sqs::Client) -> Self {
        Self { inner }
    }

    /// Build a client from the ambient AWS environment (shared config files,
    /// `AWS_PROFILE`, instance roles), the same resolution chain the AWS CLI
    /// uses.
    pub async fn from_env() -> Self {
        let config = aws_config::load_defaults(aws_config::BehaviorVersion::latest()).await;
        Self::new(aws_sdk_sqs::Client::new(&config))
    }
}

#[async_trait]
impl QueueClient for SqsQueueClient {
    async fn receive(
        &self,
        queue: &QueueRef,
        max_messages: i32,
        wait_seconds: i32,
    ) -> Result<Vec<Message>, QueueError> {
        let output = self
            .inner
            .receive_message()
            .queue_url(&queue.url)
            .max_number_of_messages(max_messages)
            .wait_time_seconds(wait_seconds)
            .message_system_attribute_names(MessageSystemAttributeName::All)
            .message_attribute_names("All")
            .send()
            .await
            .map_err(|e| QueueError::Receive {
                queue_url: queue.url.clone(),
                source: Box::new(e),
            })?;

        Ok(output
            .messages
            .unwrap_or_default()
            .into_iter()
            .map(Message::from)
            .collect())
    }

    async fn send(&self, queue: &QueueRef, message: &OutboundMessage) -> Result<(), QueueError> {
        let attributes: Option<HashMap<_, _>> = if message.attributes.is_empty() {
            None
        } else {
            Some(message.attributes.clone())
        };

        self.inner
            .send_message()
            .queue_url(&queue.url)
            .message_body(&message.body)
            .set_message_attributes(attributes)
            .set_message_group_id(message.group_id.clone())
            .set_message_deduplication_id(message.deduplication_id.clone())
            .send()
            .await
            .map_err(|e| QueueError::Send {
                queue_url: queue.url.clone(),
                source: Box::new(e),
            })?;

        Ok(())
    }

    async fn delete(&self, queue: &QueueRef, receipt_token: &str) -> Result<(), QueueError> {
        self.inner
            .delete_message()
            .queue_url(&queue.url)
            .receipt_handle(receipt_token)
            .send()
            .await
            .map_err(|e| QueueError::Delete {
                queue_url: queue.url.clone(),
                source: Box::new(e),
            })?;

        Ok(())
    }
}
