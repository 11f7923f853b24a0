//! Report sinks: where consumers deliver dequeued samples
//!
//! A sink is shared by all three consumers and is called outside any queue
//! lock, so implementations must synchronize internally.

use crate::coordinator::error::SinkError;
use crate::ordering::Scheme;
use crate::pixel::PixelSample;
use serde::Serialize;
use std::io::Write;
use std::sync::{Mutex, MutexGuard, PoisonError};

/// Receiver of `(scheme, sample)` reports
pub trait PixelSink: Send + Sync {
    fn report(&self, scheme: Scheme, sample: &PixelSample) -> Result<(), SinkError>;

    /// Called once after every consumer has finished
    fn finish(&self) -> Result<(), SinkError> {
        Ok(())
    }
}

/// Display name of the consumer bound to `scheme`
///
/// Thread 1 is the producer; the consumers are threads 2 to 4.
pub fn consumer_name(scheme: Scheme) -> &'static str {
    match scheme {
        Scheme::Lexicographic => "Thread2-PQLEX",
        Scheme::EuclideanNorm => "Thread3-PQEUC",
        Scheme::BitInterleave => "Thread4-PQBMX",
    }
}

/// Emits every report as an info-level log record
#[derive(Debug, Clone, Copy, Default)]
pub struct LogSink;

impl PixelSink for LogSink {
    fn report(&self, scheme: Scheme, sample: &PixelSample) -> Result<(), SinkError> {
        log::info!("{}: {}", consumer_name(scheme), sample);
        Ok(())
    }
}

/// Line layout for [`WriterSink`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LineFormat {
    /// `Thread2-PQLEX: [255,0,0]`
    #[default]
    Text,
    /// `{"scheme":"LEX","x":0,"y":0,"r":255,"g":0,"b":0}`
    Json,
}

#[derive(Serialize)]
struct JsonLine {
    scheme: Scheme,
    x: u32,
    y: u32,
    r: u8,
    g: u8,
    b: u8,
}

/// Writes one line per report to any writer
///
/// The writer sits behind a mutex, so lines from different consumers never
/// interleave within a line.
#[derive(Debug)]
pub struct WriterSink<W> {
    writer: Mutex<W>,
    format: LineFormat,
}

impl<W: Write + Send> WriterSink<W> {
    pub fn new(writer: W, format: LineFormat) -> Self {
        Self {
            writer: Mutex::new(writer),
            format,
        }
    }

    pub fn format(&self) -> LineFormat {
        self.format
    }

    pub fn into_inner(self) -> W {
        self.writer
            .into_inner()
            .unwrap_or_else(PoisonError::into_inner)
    }

    fn writer(&self) -> Result<MutexGuard<'_, W>, SinkError> {
        self.writer.lock().map_err(|_| SinkError::Unavailable {
            message: "writer lock poisoned".to_string(),
        })
    }
}

impl WriterSink<std::io::Stdout> {
    pub fn stdout(format: LineFormat) -> Self {
        Self::new(std::io::stdout(), format)
    }
}

impl<W: Write + Send> PixelSink for WriterSink<W> {
    fn report(&self, scheme: Scheme, sample: &PixelSample) -> Result<(), SinkError> {
        let mut writer = self.writer()?;
        match self.format {
            LineFormat::Text => {
                writeln!(writer, "{}: {}", consumer_name(scheme), sample)?;
            }
            LineFormat::Json => {
                let line = JsonLine {
                    scheme,
                    x: sample.x,
                    y: sample.y,
                    r: sample.pixel.r,
                    g: sample.pixel.g,
                    b: sample.pixel.b,
                };
                serde_json::to_writer(&mut *writer, &line)?;
                writer.write_all(b"\n")?;
            }
        }
        Ok(())
    }

    fn finish(&self) -> Result<(), SinkError> {
        self.writer()?.flush()?;
        Ok(())
    }
}

/// Keeps every report in memory, in arrival order
#[derive(Debug, Default)]
pub struct CollectingSink {
    reports: Mutex<Vec<(Scheme, PixelSample)>>,
}

impl CollectingSink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn reports(&self) -> Vec<(Scheme, PixelSample)> {
        self.lock().clone()
    }

    /// Samples reported for one scheme, in the order that consumer reported them
    pub fn reports_for(&self, scheme: Scheme) -> Vec<PixelSample> {
        self.lock()
            .iter()
            .filter(|(reported, _)| *reported == scheme)
            .map(|(_, sample)| *sample)
            .collect()
    }

    pub fn len(&self) -> usize {
        self.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.lock().is_empty()
    }

    fn lock(&self) -> MutexGuard<'_, Vec<(Scheme, PixelSample)>> {
        self.reports.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl PixelSink for CollectingSink {
    fn report(&self, scheme: Scheme, sample: &PixelSample) -> Result<(), SinkError> {
        self.lock().push((scheme, *sample));
        Ok(())
    }
}
