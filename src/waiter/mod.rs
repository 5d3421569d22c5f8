//! Fluent waiter builder: collects the condition and the schedule, validates
//! them when fired, then hands everything to a fresh [`WaitSession`].
//!
//! Each call to [`Waiter::configure`] returns an independently owned builder,
//! so any number of waits can run side by side.
use crate::error::ConfigError;
use crate::time::{TimeUnit, DEFAULT_INITIAL_DELAY_MS, DEFAULT_INTERVAL_MS, DEFAULT_MAX_WAIT_MS};
use crate::traits::condition::{Condition, NoCondition};
use crate::traits::scheduler::Scheduler;

pub mod session;

use session::{Wait, WaitSession};

//==================================================================================WAITER_CONFIG
#[derive(Debug, Clone)]
/// Schedule and condition of one wait, durations normalized to milliseconds.
pub struct WaiterConfig<C> {
    initial_delay_ms: u64,
    interval_ms: u64,
    max_wait_ms: u64,
    condition: Option<C>,
}

impl<C> WaiterConfig<C> {
    pub fn initial_delay_ms(&self) -> u64 {
        self.initial_delay_ms
    }

    pub fn interval_ms(&self) -> u64 {
        self.interval_ms
    }

    pub fn max_wait_ms(&self) -> u64 {
        self.max_wait_ms
    }

    pub fn has_condition(&self) -> bool {
        self.condition.is_some()
    }

    /// Checks the whole configuration at once:
    /// - a condition is present;
    /// - `max_wait > initial_delay`;
    /// - `max_wait > interval`.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.condition.is_none() {
            return Err(ConfigError::MissingCondition);
        }
        check_schedule(self.initial_delay_ms, self.interval_ms, self.max_wait_ms)
    }

    /// Same checks as [`WaiterConfig::validate`], handing back the condition.
    fn into_validated(self) -> Result<(C, u64, u64, u64), ConfigError> {
        let condition = self.condition.ok_or(ConfigError::MissingCondition)?;
        check_schedule(self.initial_delay_ms, self.interval_ms, self.max_wait_ms)?;
        Ok((
            condition,
            self.initial_delay_ms,
            self.interval_ms,
            self.max_wait_ms,
        ))
    }
}

/// The deadline must come strictly after the first check and after one interval.
fn check_schedule(initial_delay_ms: u64, interval_ms: u64, max_wait_ms: u64) -> Result<(), ConfigError> {
    if max_wait_ms <= initial_delay_ms {
        return Err(ConfigError::MaxWaitNotAfterInitialDelay {
            initial_delay_ms,
            max_wait_ms,
        });
    }
    if max_wait_ms <= interval_ms {
        return Err(ConfigError::MaxWaitNotAfterInterval {
            interval_ms,
            max_wait_ms,
        });
    }
    Ok(())
}

impl Default for WaiterConfig<NoCondition> {
    fn default() -> Self {
        Self {
            initial_delay_ms: DEFAULT_INITIAL_DELAY_MS,
            interval_ms: DEFAULT_INTERVAL_MS,
            max_wait_ms: DEFAULT_MAX_WAIT_MS,
            condition: None,
        }
    }
}

//==================================================================================WAITER
/// Builder for a single wait against scheduler `S`.
///
/// Consumed by [`Waiter::fire`], so a configuration runs at most once.
pub struct Waiter<'s, S: Scheduler, C = NoCondition> {
    scheduler: &'s S,
    config: WaiterConfig<C>,
}

impl<'s, S: Scheduler> Waiter<'s, S, NoCondition> {
    /// Starts a builder with the default schedule and no condition.
    pub fn configure(scheduler: &'s S) -> Self {
        Self {
            scheduler,
            config: WaiterConfig::default(),
        }
    }
}

impl<'s, S: Scheduler, C: Condition> Waiter<'s, S, C> {
    /// Sets the condition to evaluate, replacing any previous one.
    pub fn with_condition<N: Condition>(self, condition: N) -> Waiter<'s, S, N> {
        Waiter {
            scheduler: self.scheduler,
            config: WaiterConfig {
                initial_delay_ms: self.config.initial_delay_ms,
                interval_ms: self.config.interval_ms,
                max_wait_ms: self.config.max_wait_ms,
                condition: Some(condition),
            },
        }
    }

    /// How long to wait before the first check.
    pub fn with_initial_delay(mut self, value: u32, unit: TimeUnit) -> Result<Self, ConfigError> {
        self.config.initial_delay_ms = unit.to_millis(value)?;
        #[cfg(feature = "defmt")]
        defmt::debug!("initial delay => {} ms", self.config.initial_delay_ms);
        Ok(self)
    }

    /// How often the condition is checked.
    pub fn with_interval(mut self, value: u32, unit: TimeUnit) -> Result<Self, ConfigError> {
        self.config.interval_ms = unit.to_millis(value)?;
        #[cfg(feature = "defmt")]
        defmt::debug!("interval => {} ms", self.config.interval_ms);
        Ok(self)
    }

    /// Maximum time to wait, measured from [`Waiter::fire`].
    pub fn with_max_wait(mut self, value: u32, unit: TimeUnit) -> Result<Self, ConfigError> {
        self.config.max_wait_ms = unit.to_millis(value)?;
        #[cfg(feature = "defmt")]
        defmt::debug!("max wait => {} ms", self.config.max_wait_ms);
        Ok(self)
    }

    pub fn config(&self) -> &WaiterConfig<C> {
        &self.config
    }

    /// Validates the configuration and starts the wait.
    ///
    /// Misconfiguration is reported here, before the scheduler is touched.
    /// On success the deadline and the periodic check are scheduled right
    /// away; the returned future resolves with `Ok(true)` on the first
    /// successful check, or with a [`WaitError`](crate::error::WaitError)
    /// on timeout or condition failure.
    pub fn fire(self) -> Result<Wait<S, C>, ConfigError> {
        let (condition, initial_delay_ms, interval_ms, max_wait_ms) =
            self.config.into_validated()?;

        #[cfg(feature = "defmt")]
        defmt::debug!(
            "firing waiter: initial delay {} ms, interval {} ms, max wait {} ms",
            initial_delay_ms,
            interval_ms,
            max_wait_ms
        );

        // Deadline first: it is measured from this call.
        let deadline = self.scheduler.schedule_once(max_wait_ms);
        let periodic = self
            .scheduler
            .schedule_periodic(initial_delay_ms, interval_ms);

        Ok(Wait::new(WaitSession::<S, C>::new(
            condition,
            max_wait_ms,
            deadline,
            periodic,
        )))
    }
}
