//! # Finding Cap
//!
//! Process-lifetime limit on findings emitted by one monitor instance. Slots
//! are reserved one finding at a time, so the limit holds even when passes
//! run concurrently.

use std::sync::atomic::{AtomicUsize, Ordering};

/// Bounded counter of emitted findings.
#[derive(Debug)]
pub struct FindingCap {
    limit: usize,
    emitted: AtomicUsize,
}

impl FindingCap {
    /// Cap allowing `limit` findings.
    pub fn new(limit: usize) -> Self {
        Self {
            limit,
            emitted: AtomicUsize::new(0),
        }
    }

    /// Maximum number of findings.
    pub fn limit(&self) -> usize {
        self.limit
    }

    /// Findings emitted so far.
    pub fn emitted(&self) -> usize {
        self.emitted.load(Ordering::Acquire)
    }

    /// No slot left.
    pub fn is_exhausted(&self) -> bool {
        self.emitted() >= self.limit
    }

    /// Take one slot. `false` once the cap is reached.
    pub fn try_reserve(&self) -> bool {
        self.emitted
            .fetch_update(Ordering::AcqRel, Ordering::Acquire, |n| {
                (n < self.limit).then_some(n + 1)
            })
            .is_ok()
    }
}
