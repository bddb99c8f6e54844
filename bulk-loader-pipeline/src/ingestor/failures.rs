//! Bounded buffer of recent per-document failures.

use std::collections::VecDeque;

use bulk_loader_shared::BulkOutcome;

/// Failures collected since the last drain.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct DrainedFailures {
    /// Retained failures, oldest first.
    pub failures: Vec<BulkOutcome>,
    /// Failures evicted to stay within capacity.
    pub evicted: u64,
}

/// Fixed-capacity ring of failed outcomes. The oldest entry is evicted when
/// a push would exceed capacity.
#[derive(Debug)]
pub struct FailureBuffer {
    capacity: usize,
    entries: VecDeque<BulkOutcome>,
    evicted: u64,
}

impl FailureBuffer {
    pub fn new(capacity: usize) -> Self {
        Self {
            capacity,
            entries: VecDeque::with_capacity(capacity),
            evicted: 0,
        }
    }

    pub fn push(&mut self, outcome: BulkOutcome) {
        if self.capacity == 0 {
            self.evicted += 1;
            return;
        }
        if self.entries.len() == self.capacity {
            self.entries.pop_front();
            self.evicted += 1;
        }
        self.entries.push_back(outcome);
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty() && self.evicted == 0
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Take every retained failure and reset the eviction count.
    pub fn drain(&mut self) -> DrainedFailures {
        DrainedFailures {
            failures: self.entries.drain(..).collect(),
            evicted: std::mem::take(&mut self.evicted),
        }
    }
}
