//! Summary of an ingestion run.

use std::collections::BTreeSet;
use std::time::Duration;

use chrono::{DateTime, Utc};
use serde::Serialize;

/// Immutable summary of a completed run.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct IngestionReport {
    /// Index the documents were written to.
    pub index: String,
    /// Documents seen.
    pub processed: u64,
    /// Documents acknowledged by the destination.
    pub succeeded: u64,
    /// Distinct operation kinds performed for successful writes.
    pub operations: BTreeSet<String>,
    /// When the run started.
    pub started_at: DateTime<Utc>,
    /// Wall-clock duration of the run.
    pub elapsed: Duration,
    /// Whether the post-load refresh succeeded.
    pub refreshed: bool,
}

impl IngestionReport {
    /// Documents that were processed but not acknowledged.
    pub fn failed(&self) -> u64 {
        self.processed.saturating_sub(self.succeeded)
    }

    /// Share of processed documents that were written, `0.0` for an empty run.
    pub fn success_rate(&self) -> f64 {
        if self.processed == 0 {
            return 0.0;
        }
        self.succeeded as f64 / self.processed as f64
    }

    /// Replace the run timing, keeping every counter.
    pub fn with_timing(self, started_at: DateTime<Utc>, elapsed: Duration) -> Self {
        Self {
            started_at,
            elapsed,
            ..self
        }
    }
}
