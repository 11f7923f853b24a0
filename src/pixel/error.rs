//! Pixel Source Error Types

use std::path::PathBuf;

#[derive(Debug, thiserror::Error)]
pub enum SourceError {
    #[error("Pixel ({x}, {y}) is outside the {width}x{height} source")]
    OutOfRange {
        x: u32,
        y: u32,
        width: u32,
        height: u32,
    },

    #[error("Grid of {width}x{height} needs {expected} pixels, got {actual}")]
    Dimensions {
        width: u32,
        height: u32,
        expected: usize,
        actual: usize,
    },

    #[error("Failed to read image {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to decode image {}: {source}", .path.display())]
    Image {
        path: PathBuf,
        #[source]
        source: image::ImageError,
    },
}

/// Result type for pixel source operations
pub type SourceResult<T> = Result<T, SourceError>;

impl crate::core::error_handling::ContextualError for SourceError {
    fn is_user_actionable(&self) -> bool {
        matches!(self, SourceError::Io { .. } | SourceError::Image { .. })
    }

    fn user_message(&self) -> Option<String> {
        self.is_user_actionable().then(|| self.to_string())
    }
}
