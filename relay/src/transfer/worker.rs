//! Transfer worker: one continuous poll → transform → forward → acknowledge
//! loop against the source queue.
//!
//! Failure policy: a receive error is fatal for the worker and propagates to
//! the orchestrator; send and delete errors are contained per message: the
//! message stays on the source and will be redelivered once its visibility
//! timeout lapses. The engine is therefore at-least-once, never exactly-once.

use std::sync::Arc;

use futures::future::join_all;
use tracing::{error, info, warn};

use crate::queue::client::{QueueClient, QueueError};
use crate::queue::types::{Message, QueueRef, MAX_BATCH_SIZE};
use crate::transfer::transform::transform;

/// Decision produced by [`DrainState`] for each observed batch.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Drain {
    /// Keep polling.
    Active,
    /// Two consecutive empty batches; the source is probably empty.
    Stopped,
}

/// Per-worker termination state machine.
///
/// A single empty receive does not prove the queue is drained (SQS may
/// under-report while messages are in flight), so the worker stops only
/// after two consecutive empty batches. This is a best-effort drain
/// heuristic, not a completion guarantee.
#[derive(Debug)]
pub struct DrainState {
    previous_count: usize,
}

impl DrainState {
    /// Starts with a sentinel of 1, so the very first empty batch does not
    /// stop the worker.
    pub fn new() -> Self {
        Self { previous_count: 1 }
    }

    /// Record one batch size and decide whether to keep polling.
    pub fn observe(&mut self, batch_len: usize) -> Drain {
        if self.previous_count == 0 && batch_len == 0 {
            return Drain::Stopped;
        }
        self.previous_count = batch_len;
        Drain::Active
    }
}

impl Default for DrainState {
    fn default() -> Self {
        Self::new()
    }
}

/// Outcome of one per-message transfer unit.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MessageOutcome {
    /// Forwarded to the destination and deleted from the source.
    Relayed,
    /// Could not be represented on the destination (FIFO ids missing);
    /// left on the source, not forwarded.
    TransformFailed,
    /// Send failed; left on the source for redelivery.
    ForwardFailed,
    /// Forwarded, but the source delete failed; the message may be
    /// forwarded again after redelivery.
    AcknowledgeFailed,
}

/// Per-batch tally of message outcomes.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct BatchReport {
    pub relayed: usize,
    pub transform_failed: usize,
    pub forward_failed: usize,
    pub acknowledge_failed: usize,
}

impl BatchReport {
    fn record(&mut self, outcome: MessageOutcome) {
        match outcome {
            MessageOutcome::Relayed => self.relayed += 1,
            MessageOutcome::TransformFailed => self.transform_failed += 1,
            MessageOutcome::ForwardFailed => self.forward_failed += 1,
            MessageOutcome::AcknowledgeFailed => self.acknowledge_failed += 1,
        }
    }
}

/// Totals for one worker's lifetime, returned on clean termination.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct WorkerSummary {
    pub batches: usize,
    pub relayed: usize,
    pub transform_failed: usize,
    pub forward_failed: usize,
    pub acknowledge_failed: usize,
}

impl WorkerSummary {
    fn absorb(&mut self, report: BatchReport) {
        self.batches += 1;
        self.relayed += report.relayed;
        self.transform_failed += report.transform_failed;
        self.forward_failed += report.forward_failed;
        self.acknowledge_failed += report.acknowledge_failed;
    }
}

/// One independent transfer worker.
///
/// Workers share nothing but the queue client and the two queue refs; each
/// holds its own [`DrainState`].
pub struct TransferWorker<C> {
    id: usize,
    client: Arc<C>,
    source: QueueRef,
    destination: QueueRef,
    wait_seconds: i32,
    drain: DrainState,
}

impl<C: QueueClient> TransferWorker<C> {
    pub fn new(
        id: usize,
        client: Arc<C>,
        source: QueueRef,
        destination: QueueRef,
        wait_seconds: i32,
    ) -> Self {
        Self {
            id,
            client,
            source,
            destination,
            wait_seconds,
            drain: DrainState::new(),
        }
    }

    /// Poll the source until the drain heuristic fires or a receive call
    /// fails. Each batch is fully processed before the next poll.
    pub async fn run(mut self) -> Result<WorkerSummary, QueueError> {
        let mut summary = WorkerSummary::default();

        loop {
            let batch = self
                .client
                .receive(&self.source, MAX_BATCH_SIZE, self.wait_seconds)
                .await?;

            if self.drain.observe(batch.len()) == Drain::Stopped {
                info!(worker = self.id, "source_drained");
                return Ok(summary);
            }

            info!(worker = self.id, batch_size = batch.len(), "batch_received");

            // An empty poll carries no work; just poll again.
            if batch.is_empty() {
                continue;
            }

            let report = self.relay_batch(batch).await;
            summary.absorb(report);
        }
    }

    /// Process every message in the batch concurrently, joining before
    /// returning so the batch acts as a synchronization barrier.
    async fn relay_batch(&self, batch: Vec<Message>) -> BatchReport {
        let outcomes = join_all(batch.into_iter().map(|msg| self.relay_message(msg))).await;

        let mut report = BatchReport::default();
        for outcome in outcomes {
            report.record(outcome);
        }
        report
    }

    /// One transform → forward → acknowledge unit. Never escalates: every
    /// failure path leaves the message on the source and reports an outcome.
    async fn relay_message(&self, message: Message) -> MessageOutcome {
        let outbound = match transform(&message, self.destination.mode) {
            Ok(outbound) => outbound,
            Err(e) => {
                warn!(
                    worker = self.id,
                    message_id = %message.message_id,
                    error = %e,
                    "message_transform_failed"
                );
                return MessageOutcome::TransformFailed;
            }
        };

        if let Err(e) = self.client.send(&self.destination, &outbound).await {
            error!(
                worker = self.id,
                message_id = %message.message_id,
                error = %e,
                "message_forward_failed"
            );
            return MessageOutcome::ForwardFailed;
        }

        // Forward confirmed; only now is the receipt token spent.
        if let Err(e) = self.client.delete(&self.source, &message.receipt_token).await {
            error!(
                worker = self.id,
                message_id = %message.message_id,
                error = %e,
                "message_acknowledge_failed"
            );
            return MessageOutcome::AcknowledgeFailed;
        }

        MessageOutcome::Relayed
    }
}
