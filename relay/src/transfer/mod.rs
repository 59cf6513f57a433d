//! The transfer engine: message transformation and the per-worker
//! poll/forward/acknowledge loop.

pub mod transform;
pub mod worker;

pub use transform::{transform, TransformError};
pub use worker::{BatchReport, Drain, DrainState, MessageOutcome, TransferWorker, WorkerSummary};
