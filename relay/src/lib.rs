//! sqs-relay - Concurrent SQS-to-SQS message transfer.
//!
//! Drains a source queue and re-enqueues every message onto a destination
//! queue, deleting from the source only after a confirmed forward. Supports
//! standard and FIFO destinations.
//!
//! ## Architecture
//!
//! ```text
//! Orchestrator → N × TransferWorker → poll → per-message {transform → forward → acknowledge}
//! ```
//!
//! Delivery is at-least-once: a failed forward or delete leaves the message
//! on the source for redelivery after its visibility timeout. No ordering is
//! preserved across workers or within a batch, so messages of the same FIFO
//! group may arrive at the destination out of order.

pub mod config;
pub mod orchestrator;
pub mod queue;
pub mod transfer;

// Re-export commonly used types
pub use config::RelayConfig;
pub use queue::{Message, OutboundMessage, QueueClient, QueueError, QueueMode, QueueRef, SqsQueueClient};
pub use transfer::{transform, DrainState, TransferWorker, TransformError, WorkerSummary};
