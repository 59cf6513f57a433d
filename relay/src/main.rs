//! sqs-relay binary - moves messages from one SQS queue to another.

use std::sync::Arc;

use anyhow::Result;
use clap::Parser;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use sqs_relay::queue::SqsQueueClient;
use sqs_relay::{orchestrator, RelayConfig};

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize structured JSON logging
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().json().flatten_event(true))
        .init();

    // Invalid flags exit with usage before any queue interaction.
    let config = RelayConfig::parse();

    tracing::info!(
        src = %config.src,
        dest = %config.dest,
        clients = config.clients,
        fifo = config.fifo,
        wait_time = config.wait_time,
        "relay_starting"
    );

    // Resolves credentials the same way the AWS CLI does (AWS_PROFILE,
    // shared config files, instance roles).
    let client = SqsQueueClient::from_env().await;

    orchestrator::run(Arc::new(client), &config).await;

    Ok(())
}
