//! Queue service boundary: message types, the client contract, and the SQS
//! adapter.

pub mod client;
#[cfg(test)]
pub(crate) mod testing;
pub mod types;

pub use client::{QueueClient, QueueError, SqsQueueClient};
pub use types::{Message, OutboundMessage, QueueMode, QueueRef, MAX_BATCH_SIZE};
