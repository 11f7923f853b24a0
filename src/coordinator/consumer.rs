//! Consumer loop bound to one queue

use crate::coordinator::error::MonitorError;
use crate::coordinator::monitor::{QueueMonitor, Take};
use crate::coordinator::report::{ConsumerOutcome, ConsumerReport};
use crate::coordinator::signals::RunSignals;
use crate::coordinator::sink::PixelSink;
use crate::pixel::PixelSample;

enum Stop {
    Cancelled,
    Failed(String),
}

impl From<MonitorError> for Stop {
    fn from(error: MonitorError) -> Self {
        Stop::Failed(error.to_string())
    }
}

/// Drain `monitor` into `sink` until production completes or the run is cancelled
///
/// Samples are polled under the monitor lock and reported after it is
/// released. Once completion is observed the remaining samples are drained
/// one lock acquisition at a time.
pub(crate) fn consume(
    monitor: &QueueMonitor,
    signals: &RunSignals,
    sink: &dyn PixelSink,
) -> ConsumerReport {
    let scheme = monitor.scheme();
    log::debug!("consumer-{} started", scheme);

    let outcome = match run(monitor, signals, sink) {
        Ok(()) => ConsumerOutcome::Drained,
        Err(Stop::Cancelled) => ConsumerOutcome::Cancelled,
        Err(Stop::Failed(message)) => {
            log::error!("consumer-{} stopped: {}", scheme, message);
            ConsumerOutcome::Failed { message }
        }
    };

    let reported = monitor.reported();
    log::debug!("consumer-{} finished: {} reported, {}", scheme, reported, outcome);
    ConsumerReport {
        scheme,
        reported,
        outcome,
    }
}

fn run(monitor: &QueueMonitor, signals: &RunSignals, sink: &dyn PixelSink) -> Result<(), Stop> {
    loop {
        match monitor.next(signals)? {
            Take::Item(sample) => deliver(monitor, sink, &sample)?,
            Take::Exhausted => break,
            Take::Cancelled => return Err(Stop::Cancelled),
        }
    }

    // Anything offered between the last wait and observing completion
    loop {
        match monitor.try_take(signals)? {
            Take::Item(sample) => deliver(monitor, sink, &sample)?,
            Take::Exhausted => return Ok(()),
            Take::Cancelled => return Err(Stop::Cancelled),
        }
    }
}

fn deliver(monitor: &QueueMonitor, sink: &dyn PixelSink, sample: &PixelSample) -> Result<(), Stop> {
    sink.report(monitor.scheme(), sample)
        .map_err(|error| Stop::Failed(error.to_string()))?;
    monitor.record_reported();
    Ok(())
}
