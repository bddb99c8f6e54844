//! Progress and diagnostics reporting for a pipeline run.

use tracing::{error, info, warn};

/// Running totals emitted after each completed batch.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Checkpoint {
    /// Batches submitted so far.
    pub batches: u64,
    /// Documents processed so far.
    pub processed: u64,
    /// Documents acknowledged so far.
    pub succeeded: u64,
}

/// Receives progress checkpoints, warnings and per-document failures.
///
/// Injected into the index manager and bulk ingestor. All implementations
/// must be `Send + Sync`.
pub trait IngestObserver: Send + Sync {
    fn progress(&self, checkpoint: &Checkpoint);

    fn warn(&self, message: &str);

    fn error(&self, message: &str);
}

/// Forwards everything to `tracing`.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingObserver;

impl IngestObserver for TracingObserver {
    fn progress(&self, checkpoint: &Checkpoint) {
        info!(
            batches = checkpoint.batches,
            processed = checkpoint.processed,
            succeeded = checkpoint.succeeded,
            "Checkpoint"
        );
    }

    fn warn(&self, message: &str) {
        warn!("{}", message);
    }

    fn error(&self, message: &str) {
        error!("{}", message);
    }
}
