//! Coordinator Error Types

use crate::coordinator::report::RunReport;
use crate::core::error_handling::ContextualError;
use crate::heap::HeapError;
use crate::ordering::Scheme;
use crate::pixel::SourceError;

/// Failure of a single monitor operation
#[derive(Debug, thiserror::Error)]
pub enum MonitorError {
    #[error("{message}")]
    Poisoned { message: String },

    #[error(transparent)]
    Heap(#[from] HeapError),
}

/// A sink could not accept a report
#[derive(Debug, thiserror::Error)]
pub enum SinkError {
    #[error("Failed to write report: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to serialize report: {0}")]
    Serialize(#[from] serde_json::Error),

    #[error("Sink is unavailable: {message}")]
    Unavailable { message: String },
}

/// Outcome of a run that did not complete normally
///
/// Every variant carries the partial [`RunReport`] so callers can see how
/// far the run got.
#[derive(Debug, thiserror::Error)]
pub enum RunError {
    #[error(
        "Pixel source failed after {} of {} pixels: {source}",
        .report.produced,
        .report.total
    )]
    Source { source: SourceError, report: RunReport },

    #[error("Run cancelled after {} of {} pixels", .report.produced, .report.total)]
    Cancelled { report: RunReport },

    #[error("Consumer {scheme} failed: {message}")]
    Consumer {
        scheme: Scheme,
        message: String,
        report: RunReport,
    },

    #[error("Failed to flush sink: {source}")]
    Sink { source: SinkError, report: RunReport },

    #[error("Failed to spawn {thread} thread: {source}")]
    Spawn {
        thread: String,
        source: std::io::Error,
        report: RunReport,
    },

    #[error("Internal synchronisation error: {message}")]
    Synchronization { message: String, report: RunReport },

    #[error("The {thread} thread panicked after {} of {} pixels", .report.produced, .report.total)]
    Panicked { thread: String, report: RunReport },
}

impl RunError {
    /// How far the run got before it stopped
    pub fn report(&self) -> &RunReport {
        match self {
            RunError::Source { report, .. }
            | RunError::Cancelled { report }
            | RunError::Consumer { report, .. }
            | RunError::Sink { report, .. }
            | RunError::Spawn { report, .. }
            | RunError::Synchronization { report, .. }
            | RunError::Panicked { report, .. } => report,
        }
    }

    pub fn is_cancelled(&self) -> bool {
        matches!(self, RunError::Cancelled { .. })
    }
}

impl ContextualError for RunError {
    fn is_user_actionable(&self) -> bool {
        match self {
            RunError::Source { source, .. } => source.is_user_actionable(),
            RunError::Cancelled { .. } => true,
            _ => false,
        }
    }

    fn user_message(&self) -> Option<String> {
        match self {
            RunError::Source { source, .. } => source.user_message(),
            RunError::Cancelled { .. } => Some(self.to_string()),
            _ => None,
        }
    }
}

/// Result type for a coordinator run
pub type RunResult<T> = Result<T, RunError>;
