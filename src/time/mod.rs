//! Time units understood by the waiter builder and the default schedule.
//!
//! ## Default schedule
//!
//! A waiter that only receives a condition checks it almost immediately,
//! then every two seconds, and gives up after one minute.

use crate::error::ConfigError;

/// Delay before the first condition check when none is configured (ms).
///
/// One millisecond rather than zero so the first check always goes through the
/// scheduler instead of running inside `fire()`.
pub const DEFAULT_INITIAL_DELAY_MS: u64 = 1;

/// Period between two condition checks when none is configured (ms).
pub const DEFAULT_INTERVAL_MS: u64 = 2_000;

/// Deadline of a wait when none is configured (ms).
///
/// # Constraints
///
/// - Must stay strictly greater than [`DEFAULT_INITIAL_DELAY_MS`].
/// - Must stay strictly greater than [`DEFAULT_INTERVAL_MS`].
pub const DEFAULT_MAX_WAIT_MS: u64 = 60_000;

const _: () = assert!(DEFAULT_MAX_WAIT_MS > DEFAULT_INITIAL_DELAY_MS);
const _: () = assert!(DEFAULT_MAX_WAIT_MS > DEFAULT_INTERVAL_MS);

const MILLIS_PER_SECOND: u64 = 1_000;
const MILLIS_PER_MINUTE: u64 = 60 * MILLIS_PER_SECOND;
const MILLIS_PER_HOUR: u64 = 60 * MILLIS_PER_MINUTE;
const MILLIS_PER_DAY: u64 = 24 * MILLIS_PER_HOUR;

//==================================================================================TIME_UNIT
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
/// Unit attached to a duration magnitude.
///
/// Sub-millisecond units exist so callers can express them, but the waiter
/// rejects them: the scheduler works at millisecond resolution.
pub enum TimeUnit {
    Days,
    Hours,
    Minutes,
    Seconds,
    Milliseconds,
    Microseconds,
    Nanoseconds,
}

impl TimeUnit {
    /// Milliseconds in one unit, or `None` for sub-millisecond units.
    pub fn millis_per_unit(self) -> Option<u64> {
        match self {
            TimeUnit::Days => Some(MILLIS_PER_DAY),
            TimeUnit::Hours => Some(MILLIS_PER_HOUR),
            TimeUnit::Minutes => Some(MILLIS_PER_MINUTE),
            TimeUnit::Seconds => Some(MILLIS_PER_SECOND),
            TimeUnit::Milliseconds => Some(1),
            TimeUnit::Microseconds | TimeUnit::Nanoseconds => None,
        }
    }

    /// Converts `value` units into milliseconds.
    ///
    /// Fails with [`ConfigError::UnsupportedTimeUnit`] for microseconds and
    /// nanoseconds, and with [`ConfigError::ZeroMagnitude`] when `value == 0`.
    /// A `u32` magnitude of days cannot overflow a `u64` millisecond count.
    pub fn to_millis(self, value: u32) -> Result<u64, ConfigError> {
        let factor = self
            .millis_per_unit()
            .ok_or(ConfigError::UnsupportedTimeUnit { unit: self })?;
        if value == 0 {
            return Err(ConfigError::ZeroMagnitude);
        }
        Ok(u64::from(value) * factor)
    }
}
