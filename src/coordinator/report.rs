//! Per-run and per-consumer results

use crate::ordering::Scheme;
use std::fmt;

/// How a consumer thread ended
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConsumerOutcome {
    /// Completion was observed and the queue was fully drained
    Drained,
    /// Cancellation was observed; remaining items were abandoned
    Cancelled,
    /// The consumer stopped on an error (sink failure, poisoned lock, panic)
    Failed { message: String },
}

impl fmt::Display for ConsumerOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConsumerOutcome::Drained => f.write_str("drained"),
            ConsumerOutcome::Cancelled => f.write_str("cancelled"),
            ConsumerOutcome::Failed { message } => write!(f, "failed ({})", message),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConsumerReport {
    pub scheme: Scheme,
    /// Number of samples handed to the sink
    pub reported: usize,
    pub outcome: ConsumerOutcome,
}

/// Summary of a coordinator run
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunReport {
    /// Pixels in the source
    pub total: usize,
    /// Pixels inserted during warm-up, before consumers started
    pub warmup: usize,
    /// Pixels delivered to all three queues
    pub produced: usize,
    /// One entry per consumer that was started, in [`Scheme::ALL`] order
    pub consumers: Vec<ConsumerReport>,
}

impl RunReport {
    pub(crate) fn new(total: usize, warmup: usize) -> Self {
        Self {
            total,
            warmup,
            produced: 0,
            consumers: Vec::new(),
        }
    }

    pub fn consumer(&self, scheme: Scheme) -> Option<&ConsumerReport> {
        self.consumers.iter().find(|report| report.scheme == scheme)
    }

    /// True when every pixel was produced and every consumer drained it all
    pub fn is_complete(&self) -> bool {
        self.produced == self.total
            && self.consumers.len() == Scheme::ALL.len()
            && self.consumers.iter().all(|report| {
                report.outcome == ConsumerOutcome::Drained && report.reported == self.total
            })
    }
}

impl fmt::Display for RunReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "produced {}/{} pixels", self.produced, self.total)?;
        for report in &self.consumers {
            write!(
                f,
                "; {} reported {} ({})",
                report.scheme, report.reported, report.outcome
            )?;
        }
        Ok(())
    }
}
