//! Orchestrator: launches the configured number of transfer workers and
//! blocks until all of them finish.
//!
//! Workers are fully independent: a fatal worker failure is logged and does
//! not cancel its siblings, and no aggregate result is produced beyond the
//! terminal `all_done` line.

use std::sync::Arc;

use tracing::{error, info};

use crate::config::RelayConfig;
use crate::queue::client::QueueClient;
use crate::transfer::worker::TransferWorker;

/// Spawn `config.clients` workers against the configured queues and wait
/// for every one of them to terminate, cleanly or not.
pub async fn run<C>(client: Arc<C>, config: &RelayConfig)
where
    C: QueueClient + 'static,
{
    let source = config.source();
    let destination = config.destination();

    let mut handles = Vec::with_capacity(usize::from(config.clients));
    for id in 1..=usize::from(config.clients) {
        let worker = TransferWorker::new(
            id,
            Arc::clone(&client),
            source.clone(),
            destination.clone(),
            config.wait_time,
        );
        handles.push((id, tokio::spawn(worker.run())));
    }

    for (id, handle) in handles {
        match handle.await {
            Ok(Ok(summary)) => info!(
                worker = id,
                batches = summary.batches,
                relayed = summary.relayed,
                transform_failed = summary.transform_failed,
                forward_failed = summary.forward_failed,
                acknowledge_failed = summary.acknowledge_failed,
                "worker_finished"
            ),
            Ok(Err(e)) => error!(worker = id, error = %e, "worker_failed"),
            Err(e) => error!(worker = id, error = %e, "worker_panicked"),
        }
    }

    info!("all_done");
}
