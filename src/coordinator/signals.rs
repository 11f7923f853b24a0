//! One-shot run flags shared by the producer and the consumers

use std::sync::atomic::{AtomicBool, Ordering};

/// Completion and cancellation flags
///
/// Both flags only ever go from `false` to `true`. Setters use Release and
/// readers Acquire, and every setter follows up with a broadcast under each
/// queue's monitor lock so a consumer checking its wait predicate under that
/// lock cannot miss the change.
#[derive(Debug, Default)]
pub struct RunSignals {
    completed: AtomicBool,
    cancelled: AtomicBool,
}

impl RunSignals {
    pub fn new() -> Self {
        Self::default()
    }

    /// Mark production as finished; returns `true` on the first call only
    pub fn complete(&self) -> bool {
        !self.completed.swap(true, Ordering::AcqRel)
    }

    pub fn is_completed(&self) -> bool {
        self.completed.load(Ordering::Acquire)
    }

    /// Request cancellation; returns `true` on the first call only
    pub fn cancel(&self) -> bool {
        !self.cancelled.swap(true, Ordering::AcqRel)
    }

    pub fn is_cancelled(&self) -> bool {
        self.cancelled.load(Ordering::Acquire)
    }
}
