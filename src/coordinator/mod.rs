//! Producer/consumer coordination over three priority queues
//!
//! A run uses four threads:
//!
//! ```text
//!                         ┌─► [LEX heap] ─► consumer-LEX ─┐
//!   PixelSource ─► producer ─► [EUC heap] ─► consumer-EUC ─┼─► PixelSink
//!                         └─► [BMX heap] ─► consumer-BMX ─┘
//! ```
//!
//! The producer first inserts a warm-up batch into all three heaps, then
//! starts the consumers and keeps inserting, one lock/offer/notify per heap.
//! Each heap is guarded by its own [`QueueMonitor`]. Once the source is
//! exhausted the producer sets the completion flag and wakes every consumer;
//! consumers then drain what remains and exit. A [`CancelHandle`] stops the
//! run early, in which case consumers abandon their queues.
//!
//! Within one scheme, reports come out in non-increasing priority order among
//! the items present when each was dequeued. Across schemes the interleaving
//! is unspecified.

mod consumer;
mod error;
mod monitor;
mod producer;
mod queues;
mod report;
mod runner;
mod signals;
mod sink;

pub use error::{MonitorError, RunError, RunResult, SinkError};
pub use monitor::QueueMonitor;
pub use queues::CancelHandle;
pub use report::{ConsumerOutcome, ConsumerReport, RunReport};
pub use runner::{Coordinator, DEFAULT_WARMUP};
pub use signals::RunSignals;
pub use sink::{consumer_name, CollectingSink, LineFormat, LogSink, PixelSink, WriterSink};

#[cfg(test)]
mod tests;
