//! The coordinator: owns one run from first pixel to last report

use crate::coordinator::error::{RunError, RunResult};
use crate::coordinator::producer::{Producer, ProducerError};
use crate::coordinator::queues::{CancelHandle, SchemeQueues};
use crate::coordinator::report::{ConsumerOutcome, ConsumerReport, RunReport};
use crate::coordinator::sink::PixelSink;
use crate::pixel::PixelSource;
use std::sync::mpsc;
use std::sync::Arc;
use std::thread;

/// Pixels inserted before any consumer starts
pub const DEFAULT_WARMUP: usize = 100;

/// Runs one producer and three consumers over a pixel source
///
/// ```no_run
/// use pixel_priority::coordinator::{CollectingSink, Coordinator};
/// use pixel_priority::pixel::{Pixel, PixelGrid};
/// use std::sync::Arc;
///
/// let grid = PixelGrid::from_row(vec![Pixel::new(1, 2, 3), Pixel::new(9, 9, 9)]);
/// let sink = Arc::new(CollectingSink::new());
/// let report = Coordinator::new(grid, sink.clone()).run().unwrap();
/// assert!(report.is_complete());
/// assert_eq!(sink.len(), 6);
/// ```
pub struct Coordinator<S> {
    source: S,
    sink: Arc<dyn PixelSink>,
    warmup: usize,
    queues: Arc<SchemeQueues>,
}

impl<S: PixelSource + 'static> Coordinator<S> {
    pub fn new(source: S, sink: Arc<dyn PixelSink>) -> Self {
        Self {
            source,
            sink,
            warmup: DEFAULT_WARMUP,
            queues: Arc::new(SchemeQueues::new()),
        }
    }

    /// Override the warm-up size; it is clamped to the pixel count at run time
    pub fn with_warmup(mut self, warmup: usize) -> Self {
        self.warmup = warmup;
        self
    }

    pub fn warmup(&self) -> usize {
        self.warmup
    }

    /// Handle that can cancel this run from another thread, before or during `run`
    pub fn cancel_handle(&self) -> CancelHandle {
        CancelHandle::new(Arc::clone(&self.queues))
    }

    /// Execute the run and block until all four threads have finished
    ///
    /// Returns the report when every pixel reached every consumer. Otherwise
    /// the error carries the partial report: a producer panic takes precedence,
    /// then a source failure, then cancellation, then the first failed consumer,
    /// then a sink flush error. Every consumer that was started has been joined
    /// before this returns, whatever the outcome.
    pub fn run(self) -> RunResult<RunReport> {
        let Coordinator {
            source,
            sink,
            warmup,
            queues,
        } = self;

        let total = source.pixel_count();
        let warmup = warmup.min(total);
        let mut report = RunReport::new(total, warmup);
        log::info!(
            "Classifying {} pixels ({}x{}), warm-up {}",
            total,
            source.width(),
            source.height(),
            warmup
        );

        let (started, started_consumers) = mpsc::channel();
        let producer = Producer {
            source,
            queues: Arc::clone(&queues),
            sink: Arc::clone(&sink),
            warmup,
            started,
        };
        let spawned = thread::Builder::new()
            .name("producer".to_string())
            .spawn(move || producer.run());
        let handle = match spawned {
            Ok(handle) => handle,
            Err(source) => {
                queues.complete();
                return Err(RunError::Spawn {
                    thread: "producer".to_string(),
                    source,
                    report,
                });
            }
        };

        // A dead producer has still completed the run, so its consumers finish too
        let joined = handle.join();
        report.produced = queues.produced();

        for (scheme, handle) in started_consumers.try_iter() {
            let consumer = handle.join().unwrap_or_else(|_| ConsumerReport {
                scheme,
                reported: queues.monitor(scheme).reported(),
                outcome: ConsumerOutcome::Failed {
                    message: "consumer thread panicked".to_string(),
                },
            });
            report.consumers.push(consumer);
        }
        let finished = sink.finish();

        let result = match joined {
            Ok(result) => result,
            Err(_) => {
                log::error!("Producer panicked after {} pixels", report.produced);
                return Err(RunError::Panicked {
                    thread: "producer".to_string(),
                    report,
                });
            }
        };

        match result {
            Ok(()) => {}
            Err(ProducerError::Source(source)) => return Err(RunError::Source { source, report }),
            Err(ProducerError::Cancelled) => return Err(RunError::Cancelled { report }),
            Err(ProducerError::Spawn { thread, source }) => {
                return Err(RunError::Spawn {
                    thread,
                    source,
                    report,
                })
            }
            Err(ProducerError::Monitor(error)) => {
                return Err(RunError::Synchronization {
                    message: error.to_string(),
                    report,
                })
            }
        }

        if report
            .consumers
            .iter()
            .any(|consumer| consumer.outcome == ConsumerOutcome::Cancelled)
        {
            return Err(RunError::Cancelled { report });
        }

        let failed = report.consumers.iter().find_map(|consumer| match &consumer.outcome {
            ConsumerOutcome::Failed { message } => Some((consumer.scheme, message.clone())),
            _ => None,
        });
        if let Some((scheme, message)) = failed {
            return Err(RunError::Consumer {
                scheme,
                message,
                report,
            });
        }

        if let Err(source) = finished {
            return Err(RunError::Sink { source, report });
        }

        log::info!("Run complete: {}", report);
        Ok(report)
    }
}

impl<S> std::fmt::Debug for Coordinator<S> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Coordinator")
            .field("warmup", &self.warmup)
            .field("cancelled", &self.queues.signals().is_cancelled())
            .finish()
    }
}
