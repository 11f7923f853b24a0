//! Heap Error Types

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum HeapError {
    #[error("Queue is empty")]
    Empty,
}

/// Result type for heap operations
pub type HeapResult<T> = Result<T, HeapError>;
