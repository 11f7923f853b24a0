//! The three queue monitors and the run flags they share

use crate::coordinator::monitor::QueueMonitor;
use crate::coordinator::signals::RunSignals;
use crate::ordering::Scheme;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

#[derive(Debug)]
pub(crate) struct SchemeQueues {
    monitors: [QueueMonitor; 3],
    signals: RunSignals,
    produced: AtomicUsize,
}

impl SchemeQueues {
    pub(crate) fn new() -> Self {
        Self {
            monitors: Scheme::ALL.map(QueueMonitor::new),
            signals: RunSignals::new(),
            produced: AtomicUsize::new(0),
        }
    }

    pub(crate) fn monitor(&self, scheme: Scheme) -> &QueueMonitor {
        &self.monitors[scheme.index()]
    }

    pub(crate) fn monitors(&self) -> &[QueueMonitor] {
        &self.monitors
    }

    pub(crate) fn signals(&self) -> &RunSignals {
        &self.signals
    }

    /// Pixels inserted into all three queues so far
    pub(crate) fn produced(&self) -> usize {
        self.produced.load(Ordering::Acquire)
    }

    pub(crate) fn record_produced(&self) {
        self.produced.fetch_add(1, Ordering::AcqRel);
    }

    /// Set the completion flag, then broadcast on every monitor
    pub(crate) fn complete(&self) {
        if self.signals.complete() {
            log::debug!("Production complete; waking consumers");
        }
        self.wake_all();
    }

    /// Set the cancellation flag, then broadcast on every monitor
    pub(crate) fn cancel(&self) {
        if self.signals.cancel() {
            log::warn!("Cancellation requested");
        }
        self.wake_all();
    }

    fn wake_all(&self) {
        for monitor in &self.monitors {
            monitor.wake_all();
        }
    }
}

/// Cloneable handle that cancels a run from any thread
///
/// Cancelling stops the producer before its next pixel and makes every
/// consumer abandon its queue. Calling it more than once, or after the run
/// has finished, has no further effect.
#[derive(Debug, Clone)]
pub struct CancelHandle {
    queues: Arc<SchemeQueues>,
}

impl CancelHandle {
    pub(crate) fn new(queues: Arc<SchemeQueues>) -> Self {
        Self { queues }
    }

    pub fn cancel(&self) {
        self.queues.cancel();
    }

    pub fn is_cancelled(&self) -> bool {
        self.queues.signals().is_cancelled()
    }
}

/// Signals completion when dropped, so consumers are released on every
/// producer exit path, including a panic.
pub(crate) struct CompletionGuard {
    queues: Arc<SchemeQueues>,
}

impl CompletionGuard {
    pub(crate) fn new(queues: Arc<SchemeQueues>) -> Self {
        Self { queues }
    }
}

impl Drop for CompletionGuard {
    fn drop(&mut self) {
        self.queues.complete();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_monitors_follow_scheme_order() {
        let queues = SchemeQueues::new();

        for scheme in Scheme::ALL {
            assert_eq!(queues.monitor(scheme).scheme(), scheme);
        }
        assert_eq!(queues.monitors().len(), 3);
    }

    #[test]
    fn test_cancel_handle_sets_flag() {
        let queues = Arc::new(SchemeQueues::new());
        let handle = CancelHandle::new(Arc::clone(&queues));
        let clone = handle.clone();

        assert!(!handle.is_cancelled());
        clone.cancel();
        assert!(handle.is_cancelled());
        assert!(queues.signals().is_cancelled());
        assert!(!queues.signals().is_completed());
    }

    #[test]
    fn test_produced_counter() {
        let queues = SchemeQueues::new();
        assert_eq!(queues.produced(), 0);

        queues.record_produced();
        queues.record_produced();
        assert_eq!(queues.produced(), 2);
    }

    #[test]
    fn test_completion_guard_completes_on_drop() {
        let queues = Arc::new(SchemeQueues::new());
        {
            let _guard = CompletionGuard::new(Arc::clone(&queues));
            assert!(!queues.signals().is_completed());
        }
        assert!(queues.signals().is_completed());
    }
}
