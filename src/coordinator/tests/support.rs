//! Pixel sources and sinks used by the coordinator tests

use crate::coordinator::{CollectingSink, PixelSink, SinkError};
use crate::ordering::Scheme;
use crate::pixel::{Pixel, PixelGrid, PixelSample, PixelSource, SourceError, SourceResult};
use std::sync::mpsc::{self, Receiver, Sender};
use std::sync::Mutex;
use std::thread;
use std::time::Duration;

/// Deterministic pixels so failures are reproducible
pub fn random_grid(seed: u64, width: u32, height: u32) -> PixelGrid {
    let mut state = seed.max(1);
    let pixels = (0..(width * height))
        .map(|_| {
            state ^= state << 13;
            state ^= state >> 7;
            state ^= state << 17;
            Pixel::from_packed(state as u32)
        })
        .collect();
    PixelGrid::new(width, height, pixels).unwrap()
}

/// Fails when the producer reaches the pixel at `fail_at` (row-major index)
pub struct FailingSource {
    pub inner: PixelGrid,
    pub fail_at: usize,
}

impl PixelSource for FailingSource {
    fn width(&self) -> u32 {
        self.inner.width()
    }

    fn height(&self) -> u32 {
        self.inner.height()
    }

    fn pixel_at(&self, x: u32, y: u32) -> SourceResult<Pixel> {
        let index = (y * self.width() + x) as usize;
        if index == self.fail_at {
            return Err(SourceError::Io {
                path: format!("pixel-{}", index).into(),
                source: std::io::Error::new(std::io::ErrorKind::UnexpectedEof, "truncated"),
            });
        }
        self.inner.pixel_at(x, y)
    }
}

/// Panics when the producer reaches the pixel at `panic_at` (row-major index)
pub struct PanickingSource {
    pub inner: PixelGrid,
    pub panic_at: usize,
}

impl PixelSource for PanickingSource {
    fn width(&self) -> u32 {
        self.inner.width()
    }

    fn height(&self) -> u32 {
        self.inner.height()
    }

    fn pixel_at(&self, x: u32, y: u32) -> SourceResult<Pixel> {
        let index = (y * self.width() + x) as usize;
        if index == self.panic_at {
            panic!("source exploded at pixel {}", index);
        }
        self.inner.pixel_at(x, y)
    }
}

/// Claims pixels while reporting zero width
pub struct ZeroWidthSource {
    pub claimed: usize,
}

impl PixelSource for ZeroWidthSource {
    fn width(&self) -> u32 {
        0
    }

    fn height(&self) -> u32 {
        self.claimed as u32
    }

    fn pixel_at(&self, x: u32, y: u32) -> SourceResult<Pixel> {
        Err(SourceError::OutOfRange {
            x,
            y,
            width: 0,
            height: self.height(),
        })
    }

    fn pixel_count(&self) -> usize {
        self.claimed
    }
}

/// Blocks the producer at `gate_at` until the test releases it
pub struct GatedSource {
    inner: PixelGrid,
    gate_at: usize,
    reached: Sender<()>,
    release: Mutex<Receiver<()>>,
}

/// Test-side ends of a [`GatedSource`]
pub struct Gate {
    pub reached: Receiver<()>,
    pub release: Sender<()>,
}

impl GatedSource {
    pub fn new(inner: PixelGrid, gate_at: usize) -> (Self, Gate) {
        let (reached_tx, reached_rx) = mpsc::channel();
        let (release_tx, release_rx) = mpsc::channel();
        let source = Self {
            inner,
            gate_at,
            reached: reached_tx,
            release: Mutex::new(release_rx),
        };
        let gate = Gate {
            reached: reached_rx,
            release: release_tx,
        };
        (source, gate)
    }
}

impl PixelSource for GatedSource {
    fn width(&self) -> u32 {
        self.inner.width()
    }

    fn height(&self) -> u32 {
        self.inner.height()
    }

    fn pixel_at(&self, x: u32, y: u32) -> SourceResult<Pixel> {
        let index = (y * self.width() + x) as usize;
        if index == self.gate_at {
            let _ = self.reached.send(());
            let _ = self.release.lock().unwrap().recv();
        }
        self.inner.pixel_at(x, y)
    }
}

/// Rejects every report for one scheme
pub struct RejectingSink {
    pub scheme: Scheme,
}

impl PixelSink for RejectingSink {
    fn report(&self, scheme: Scheme, _sample: &PixelSample) -> Result<(), SinkError> {
        if scheme == self.scheme {
            return Err(SinkError::Unavailable {
                message: format!("{} rejected", scheme),
            });
        }
        Ok(())
    }
}

/// Accepts reports but fails to flush
pub struct UnflushableSink;

impl PixelSink for UnflushableSink {
    fn report(&self, _scheme: Scheme, _sample: &PixelSample) -> Result<(), SinkError> {
        Ok(())
    }

    fn finish(&self) -> Result<(), SinkError> {
        Err(SinkError::Io(std::io::Error::new(
            std::io::ErrorKind::BrokenPipe,
            "closed",
        )))
    }
}

/// Panics on the first report for one scheme
pub struct PanickingSink {
    pub scheme: Scheme,
}

impl PixelSink for PanickingSink {
    fn report(&self, scheme: Scheme, _sample: &PixelSample) -> Result<(), SinkError> {
        if scheme == self.scheme {
            panic!("sink exploded for {}", scheme);
        }
        Ok(())
    }
}

/// Collects reports, sleeping before each one so consumers lag the producer
pub struct SlowSink {
    pub inner: CollectingSink,
    pub delay: Duration,
}

impl SlowSink {
    pub fn new(delay: Duration) -> Self {
        Self {
            inner: CollectingSink::new(),
            delay,
        }
    }
}

impl PixelSink for SlowSink {
    fn report(&self, scheme: Scheme, sample: &PixelSample) -> Result<(), SinkError> {
        thread::sleep(self.delay);
        self.inner.report(scheme, sample)
    }
}
