//! Error reporting shared by every fallible layer
//!
//! Errors the user can fix (a missing image, a bad configuration value) are
//! reported with their own message; internal failures are reported with the
//! operation context only, and their details go to the debug log.

/// Errors that know whether their message is meant for the user
///
/// When `is_user_actionable()` returns `true`, `user_message()` must return
/// `Some`; otherwise it returns `None`.
pub trait ContextualError: std::error::Error {
    fn is_user_actionable(&self) -> bool;

    fn user_message(&self) -> Option<String>;
}

/// Log a fatal error with the detail level its kind calls for
///
/// ```rust,no_run
/// # use pixel_priority::core::error_handling::log_error_with_context;
/// # use pixel_priority::pixel::ImageSource;
/// if let Err(error) = ImageSource::open("missing.png") {
///     // Logs: "FATAL: Failed to read image missing.png: No such file or directory ..."
///     log_error_with_context(&error, "Loading image");
/// }
/// ```
pub fn log_error_with_context<E: ContextualError>(error: &E, operation_context: &str) {
    match error.user_message() {
        Some(user_msg) if error.is_user_actionable() => log::error!("FATAL: {}", user_msg),
        _ => log::error!("FATAL: {}", operation_context),
    }
    log::debug!("DETAIL: {}", error);
    log::debug!("DEBUG_DETAILS: {:?}", error);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::coordinator::{RunError, SinkError};
    use crate::pixel::SourceError;

    fn missing_file() -> SourceError {
        SourceError::Io {
            path: "missing.png".into(),
            source: std::io::Error::new(std::io::ErrorKind::NotFound, "not found"),
        }
    }

    #[test]
    fn test_file_errors_are_user_actionable() {
        let error = missing_file();

        assert!(error.is_user_actionable());
        assert!(error.user_message().unwrap().contains("missing.png"));
    }

    #[test]
    fn test_out_of_range_is_internal() {
        let error = SourceError::OutOfRange {
            x: 5,
            y: 0,
            width: 2,
            height: 2,
        };

        assert!(!error.is_user_actionable());
        assert_eq!(error.user_message(), None);
    }

    #[test]
    fn test_run_errors_delegate_to_source() {
        let report = crate::coordinator::RunReport {
            total: 4,
            warmup: 4,
            produced: 2,
            consumers: Vec::new(),
        };
        let error = RunError::Source {
            source: missing_file(),
            report,
        };

        assert!(error.is_user_actionable());
        assert!(error.user_message().unwrap().contains("missing.png"));
    }

    #[test]
    fn test_panics_are_internal() {
        let error = RunError::Panicked {
            thread: "producer".to_string(),
            report: crate::coordinator::RunReport::new(4, 4),
        };

        assert!(!error.is_user_actionable());
        assert_eq!(error.user_message(), None);
    }

    #[test]
    fn test_sink_failures_are_internal() {
        let report = crate::coordinator::RunReport {
            total: 1,
            warmup: 1,
            produced: 1,
            consumers: Vec::new(),
        };
        let error = RunError::Sink {
            source: SinkError::Unavailable {
                message: "closed".to_string(),
            },
            report,
        };

        assert!(!error.is_user_actionable());
    }
}
