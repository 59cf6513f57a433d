//! Scripted in-memory [`QueueClient`] double for engine tests.
//!
//! Tests enqueue the batches each receive call should return and script
//! per-message send failures; the double records every send and delete so
//! assertions run against engine behavior instead of log output.

use std::collections::{HashMap, VecDeque};
use std::sync::Mutex;

use async_trait::async_trait;

use super::client::{QueueClient, QueueError};
use super::types::{
    Message, OutboundMessage, QueueRef, DEDUPLICATION_ID_ATTRIBUTE, GROUP_ID_ATTRIBUTE,
};

#[derive(Default)]
struct ScriptState {
    batches: VecDeque<Vec<Message>>,
    receive_calls: usize,
    // (max_messages, wait_seconds) of every receive call
    receive_requests: Vec<(i32, i32)>,
    fail_receive_on_call: Option<usize>,
    // body -> remaining send failures before sends start succeeding
    send_failures: HashMap<String, usize>,
    fail_all_deletes: bool,
    sent: Vec<OutboundMessage>,
    deleted: Vec<String>,
}

pub(crate) struct ScriptedQueue {
    state: Mutex<ScriptState>,
}

impl ScriptedQueue {
    pub(crate) fn new() -> Self {
        Self {
            state: Mutex::new(ScriptState::default()),
        }
    }

    /// Queue a batch to be returned by the next unscripted receive call.
    /// Once all batches are consumed, receives return empty.
    pub(crate) fn push_batch(&self, batch: Vec<Message>) {
        self.state.lock().unwrap().batches.push_back(batch);
    }

    /// Make the n-th receive call (1-based) fail.
    pub(crate) fn fail_receive_on_call(&self, call: usize) {
        self.state.lock().unwrap().fail_receive_on_call = Some(call);
    }

    /// Make the next `times` sends of a message with this body fail.
    pub(crate) fn fail_sends(&self, body: &str, times: usize) {
        self.state
            .lock()
            .unwrap()
            .send_failures
            .insert(body.to_string(), times);
    }

    /// Make every delete call fail.
    pub(crate) fn fail_all_deletes(&self) {
        self.state.lock().unwrap().fail_all_deletes = true;
    }

    pub(crate) fn receive_calls(&self) -> usize {
        self.state.lock().unwrap().receive_calls
    }

    /// `(max_messages, wait_seconds)` of every receive call, in order.
    pub(crate) fn receive_requests(&self) -> Vec<(i32, i32)> {
        self.state.lock().unwrap().receive_requests.clone()
    }

    pub(crate) fn sent(&self) -> Vec<OutboundMessage> {
        self.state.lock().unwrap().sent.clone()
    }

    pub(crate) fn deleted(&self) -> Vec<String> {
        self.state.lock().unwrap().deleted.clone()
    }
}

#[async_trait]
impl QueueClient for ScriptedQueue {
    async fn receive(
        &self,
        queue: &QueueRef,
        max_messages: i32,
        wait_seconds: i32,
    ) -> Result<Vec<Message>, QueueError> {
        let mut state = self.state.lock().unwrap();
        state.receive_calls += 1;
        state.receive_requests.push((max_messages, wait_seconds));

        if state.fail_receive_on_call == Some(state.receive_calls) {
            return Err(QueueError::Receive {
                queue_url: queue.url.clone(),
                source: "scripted receive failure".into(),
            });
        }

        Ok(state.batches.pop_front().unwrap_or_default())
    }

    async fn send(&self, queue: &QueueRef, message: &OutboundMessage) -> Result<(), QueueError> {
        let mut state = self.state.lock().unwrap();

        if let Some(remaining) = state.send_failures.get_mut(&message.body) {
            if *remaining > 0 {
                *remaining -= 1;
                return Err(QueueError::Send {
                    queue_url: queue.url.clone(),
                    source: "scripted send failure".into(),
                });
            }
        }

        state.sent.push(message.clone());
        Ok(())
    }

    async fn delete(&self, queue: &QueueRef, receipt_token: &str) -> Result<(), QueueError> {
        let mut state = self.state.lock().unwrap();

        if state.fail_all_deletes {
            return Err(QueueError::Delete {
                queue_url: queue.url.clone(),
                source: "scripted delete failure".into(),
            });
        }

        state.deleted.push(receipt_token.to_string());
        Ok(())
    }
}

/// Build a standard test message with no system attributes.
pub(crate) fn message(id: &str, body: &str) -> Message {
    Message {
        message_id: id.to_string(),
        receipt_token: format!("receipt-{id}"),
        body: body.to_string(),
        attributes: HashMap::new(),
        system_attributes: HashMap::new(),
    }
}

/// Build a FIFO test message carrying group and deduplication ids.
pub(crate) fn fifo_message(id: &str, body: &str, group: &str, dedup: &str) -> Message {
    let mut msg = message(id, body);
    msg.system_attributes
        .insert(GROUP_ID_ATTRIBUTE.to_string(), group.to_string());
    msg.system_attributes
        .insert(DEDUPLICATION_ID_ATTRIBUTE.to_string(), dedup.to_string());
    msg
}
