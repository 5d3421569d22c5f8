//! Error definitions shared across library modules.
//! Configuration problems are reported synchronously by the builder and
//! `fire()`; timeouts and condition failures only through the wait future.
use crate::time::TimeUnit;
use thiserror_no_std::Error;

//==================================================================================CONFIG_ERROR
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
/// Invalid or missing waiter configuration. Never retried: the caller has to
/// fix the configuration and fire a new waiter.
pub enum ConfigError {
    /// Only days, hours, minutes, seconds and milliseconds are accepted.
    #[error("Unsupported time unit: {unit:?}")]
    UnsupportedTimeUnit { unit: TimeUnit },
    /// Durations must have a positive magnitude.
    #[error("Time magnitude must be positive")]
    ZeroMagnitude,
    /// `fire()` was called before a condition was provided.
    #[error("A condition is required")]
    MissingCondition,
    /// The first check would never happen before the deadline.
    #[error("Initial delay ({initial_delay_ms} ms) must be less than max wait ({max_wait_ms} ms)")]
    MaxWaitNotAfterInitialDelay {
        initial_delay_ms: u64,
        max_wait_ms: u64,
    },
    /// A single interval already exceeds the deadline.
    #[error("Interval ({interval_ms} ms) must be less than max wait ({max_wait_ms} ms)")]
    MaxWaitNotAfterInterval { interval_ms: u64, max_wait_ms: u64 },
}

//==================================================================================WAIT_ERROR
#[derive(Error, Debug, PartialEq, Eq)]
/// Terminal failures of a running wait, delivered by the [`Wait`] future.
///
/// [`Wait`]: crate::waiter::session::Wait
pub enum WaitError<E: core::fmt::Debug> {
    /// The deadline elapsed before any check reported `true`.
    #[error("{max_wait_ms}ms threshold exceeded")]
    Timeout { max_wait_ms: u64 },
    /// The condition itself failed; the wait stops on the first failure.
    #[error("Condition check failed: {0:?}")]
    Condition(E),
}

impl<E: core::fmt::Debug> WaitError<E> {
    /// `true` for the expected "deadline reached" outcome.
    pub fn is_timeout(&self) -> bool {
        matches!(self, WaitError::Timeout { .. })
    }
}
