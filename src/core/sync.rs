//! Mutex poisoning helpers

use std::sync::LockResult;

/// Convert a poisoned lock result into an application error
///
/// A poisoned lock means a thread panicked while holding it. The message
/// handed to `error_constructor` always contains "mutex poisoned" so callers
/// and tests can recognise the condition.
///
/// # Examples
/// ```
/// use std::sync::Mutex;
/// use pixel_priority::coordinator::MonitorError;
/// use pixel_priority::core::sync::handle_mutex_poison;
///
/// let mutex = Mutex::new(42);
/// let guard = handle_mutex_poison(mutex.lock(), |message| MonitorError::Poisoned { message })
///     .unwrap();
/// assert_eq!(*guard, 42);
/// ```
pub fn handle_mutex_poison<T, E>(
    result: LockResult<T>,
    error_constructor: impl FnOnce(String) -> E,
) -> Result<T, E> {
    result.map_err(|poison_err| {
        error_constructor(format!(
            "Internal synchronisation error (mutex poisoned). This indicates a panic occurred while holding a lock. PoisonError: {:?}",
            poison_err
        ))
    })
}
