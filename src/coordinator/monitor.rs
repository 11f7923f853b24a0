//! Per-queue monitor: a heap behind a mutex plus a condition variable
//!
//! Each scheme gets its own monitor, so the producer and one consumer contend
//! only on that queue and the three consumers never contend with each other.

use crate::coordinator::error::MonitorError;
use crate::coordinator::signals::RunSignals;
use crate::core::sync::handle_mutex_poison;
use crate::heap::PriorityHeap;
use crate::ordering::Scheme;
use crate::pixel::PixelSample;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Condvar, Mutex, MutexGuard, PoisonError};

type SampleHeap = PriorityHeap<PixelSample, Scheme>;

/// Result of asking a monitor for the next sample
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum Take {
    Item(PixelSample),
    /// The queue is empty and production has completed
    Exhausted,
    Cancelled,
}

#[derive(Debug)]
pub struct QueueMonitor {
    scheme: Scheme,
    heap: Mutex<SampleHeap>,
    available: Condvar,
    reported: AtomicUsize,
}

impl QueueMonitor {
    pub fn new(scheme: Scheme) -> Self {
        Self {
            scheme,
            heap: Mutex::new(PriorityHeap::new(scheme)),
            available: Condvar::new(),
            reported: AtomicUsize::new(0),
        }
    }

    pub fn scheme(&self) -> Scheme {
        self.scheme
    }

    /// Samples currently waiting in the queue
    pub fn pending(&self) -> Result<usize, MonitorError> {
        Ok(self.lock()?.size())
    }

    /// Samples the consumer has handed to the sink so far
    pub fn reported(&self) -> usize {
        self.reported.load(Ordering::Acquire)
    }

    pub(crate) fn record_reported(&self) {
        self.reported.fetch_add(1, Ordering::AcqRel);
    }

    /// Insert without signalling; only used while no consumer exists yet
    pub(crate) fn offer_quiet(&self, sample: PixelSample) -> Result<(), MonitorError> {
        self.lock()?.offer(sample);
        Ok(())
    }

    /// Insert under the lock and wake the consumer if it is waiting
    pub(crate) fn offer_and_notify(&self, sample: PixelSample) -> Result<(), MonitorError> {
        let mut heap = self.lock()?;
        heap.offer(sample);
        self.available.notify_one();
        Ok(())
    }

    /// Broadcast after a flag change
    ///
    /// The lock is taken even when poisoned: a waiting consumer must always be
    /// released, otherwise the run could never finish.
    pub(crate) fn wake_all(&self) {
        let _heap = self.heap.lock().unwrap_or_else(PoisonError::into_inner);
        self.available.notify_all();
    }

    /// Block until a sample is available, production completed, or the run was cancelled
    ///
    /// The predicate is re-checked after every wake, so spurious wakeups are
    /// harmless.
    pub(crate) fn next(&self, signals: &RunSignals) -> Result<Take, MonitorError> {
        let mut heap = self.lock()?;
        while heap.is_empty() && !signals.is_completed() && !signals.is_cancelled() {
            heap = handle_mutex_poison(self.available.wait(heap), |message| {
                MonitorError::Poisoned { message }
            })?;
        }

        if signals.is_cancelled() {
            return Ok(Take::Cancelled);
        }
        if heap.is_empty() {
            return Ok(Take::Exhausted);
        }
        Ok(Take::Item(heap.poll()?))
    }

    /// Take one sample without waiting; used for the final drain
    pub(crate) fn try_take(&self, signals: &RunSignals) -> Result<Take, MonitorError> {
        if signals.is_cancelled() {
            return Ok(Take::Cancelled);
        }

        let mut heap = self.lock()?;
        if heap.is_empty() {
            return Ok(Take::Exhausted);
        }
        Ok(Take::Item(heap.poll()?))
    }

    fn lock(&self) -> Result<MutexGuard<'_, SampleHeap>, MonitorError> {
        handle_mutex_poison(self.heap.lock(), |message| MonitorError::Poisoned {
            message,
        })
    }
}
