//! Command-line configuration.
//!
//! Validation happens entirely at parse time: missing or invalid flags make
//! clap print usage and exit non-zero before any queue interaction.

use clap::builder::NonEmptyStringValueParser;
use clap::Parser;

use crate::queue::types::{QueueMode, QueueRef};

/// Move messages from one SQS queue to another.
#[derive(Parser, Debug, Clone)]
#[command(name = "sqs-relay", version, about, long_about = None)]
pub struct RelayConfig {
    /// Source queue URL
    #[arg(long, value_parser = NonEmptyStringValueParser::new())]
    pub src: String,

    /// Destination queue URL
    #[arg(long, value_parser = NonEmptyStringValueParser::new())]
    pub dest: String,

    /// Number of concurrent transfer workers
    #[arg(long, default_value_t = 1, value_parser = clap::value_parser!(u16).range(1..))]
    pub clients: u16,

    /// Treat the destination as a FIFO queue
    #[arg(long)]
    pub fifo: bool,

    /// Receive wait time in seconds (0 = short poll)
    #[arg(long, default_value_t = 0, value_parser = clap::value_parser!(i32).range(0..=20))]
    pub wait_time: i32,
}

impl RelayConfig {
    /// Destination queue semantics selected by `--fifo`.
    pub fn mode(&self) -> QueueMode {
        if self.fifo {
            QueueMode::Fifo
        } else {
            QueueMode::Standard
        }
    }

    /// The source queue. The source mode never changes engine behavior, so
    /// it mirrors the destination's.
    pub fn source(&self) -> QueueRef {
        QueueRef::new(&self.src, self.mode())
    }

    /// The destination queue.
    pub fn destination(&self) -> QueueRef {
        QueueRef::new(&self.dest, self.mode())
    }
}
