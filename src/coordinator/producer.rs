//! Producer loop: warm-up, consumer start-up, steady-state insertion

use crate::coordinator::consumer::consume;
use crate::coordinator::error::MonitorError;
use crate::coordinator::queues::{CompletionGuard, SchemeQueues};
use crate::coordinator::report::ConsumerReport;
use crate::coordinator::sink::PixelSink;
use crate::ordering::Scheme;
use crate::pixel::{PixelSample, PixelSource, SourceError};
use std::sync::mpsc::Sender;
use std::sync::Arc;
use std::thread::{self, JoinHandle};

#[derive(Debug)]
pub(crate) enum ProducerError {
    Source(SourceError),
    Cancelled,
    Spawn {
        thread: String,
        source: std::io::Error,
    },
    Monitor(MonitorError),
}

impl From<SourceError> for ProducerError {
    fn from(error: SourceError) -> Self {
        ProducerError::Source(error)
    }
}

impl From<MonitorError> for ProducerError {
    fn from(error: MonitorError) -> Self {
        ProducerError::Monitor(error)
    }
}

/// Consumer threads as they are started, in [`Scheme::ALL`] order
///
/// The receiving end stays with the coordinator, so every started consumer
/// can be joined even when the producer thread dies.
pub(crate) type StartedConsumers = Sender<(Scheme, JoinHandle<ConsumerReport>)>;

pub(crate) struct Producer<S> {
    pub(crate) source: S,
    pub(crate) queues: Arc<SchemeQueues>,
    pub(crate) sink: Arc<dyn PixelSink>,
    pub(crate) warmup: usize,
    pub(crate) started: StartedConsumers,
}

impl<S: PixelSource> Producer<S> {
    /// Run to completion; completion is signalled on every exit path
    pub(crate) fn run(self) -> Result<(), ProducerError> {
        let _completion = CompletionGuard::new(Arc::clone(&self.queues));

        let result = self.produce();
        if let Err(error) = &result {
            log::debug!(
                "Producer stopped after {} pixels: {:?}",
                self.queues.produced(),
                error
            );
        }
        result
    }

    fn produce(&self) -> Result<(), ProducerError> {
        let total = self.source.pixel_count();
        let warmup = self.warmup.min(total);

        // No consumer exists yet, so nobody needs waking
        for index in 0..warmup {
            let sample = self.read(index)?;
            for monitor in self.queues.monitors() {
                monitor.offer_quiet(sample)?;
            }
            self.queues.record_produced();
        }
        log::debug!("Warm-up inserted {} pixels; starting consumers", warmup);

        for scheme in Scheme::ALL {
            let handle = self.spawn_consumer(scheme)?;
            if self.started.send((scheme, handle)).is_err() {
                log::warn!("Coordinator went away; consumer-{} is detached", scheme);
            }
        }

        // One critical section per queue, so consumers never wait on each other
        for index in warmup..total {
            let sample = self.read(index)?;
            for monitor in self.queues.monitors() {
                monitor.offer_and_notify(sample)?;
            }
            self.queues.record_produced();
        }
        Ok(())
    }

    fn read(&self, index: usize) -> Result<PixelSample, ProducerError> {
        if self.queues.signals().is_cancelled() {
            return Err(ProducerError::Cancelled);
        }

        let (width, height) = (self.source.width(), self.source.height());
        // Only reachable when pixel_count disagrees with width * height
        let (x, y) = self.source.position_of(index).ok_or(SourceError::OutOfRange {
            x: width,
            y: height,
            width,
            height,
        })?;
        let pixel = self.source.pixel_at(x, y)?;
        log::trace!("producer: {} at ({}, {})", pixel, x, y);
        Ok(PixelSample::new(x, y, pixel))
    }

    fn spawn_consumer(&self, scheme: Scheme) -> Result<JoinHandle<ConsumerReport>, ProducerError> {
        let name = format!("consumer-{}", scheme);
        let queues = Arc::clone(&self.queues);
        let sink = Arc::clone(&self.sink);

        thread::Builder::new()
            .name(name.clone())
            .spawn(move || consume(queues.monitor(scheme), queues.signals(), sink.as_ref()))
            .map_err(|source| ProducerError::Spawn {
                thread: name,
                source,
            })
    }
}
