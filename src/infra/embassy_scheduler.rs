//! [`Scheduler`] backed by `embassy-time`: works on any target providing an
//! embassy time driver (MCU HALs, or the `std` driver on desktop).
//!
//! The builder accepts delays far beyond what an embassy tick counter can
//! hold. Such delays saturate to [`Instant::MAX`], which never elapses.
use core::future::Future;
use core::pin::Pin;
use core::task::{Context, Poll};

use embassy_time::{Duration, Instant, Timer, TICK_HZ};
use futures_util::stream::Stream;

use crate::traits::scheduler::Scheduler;

/// Zero-sized scheduler using the global embassy time driver.
#[derive(Debug, Clone, Copy, Default)]
pub struct EmbassyScheduler;

impl Scheduler for EmbassyScheduler {
    type Once = Timer;
    type Periodic = EmbassyTicks;

    fn schedule_once(&self, delay_ms: u64) -> Timer {
        Timer::at(from_now(delay_ms))
    }

    fn schedule_periodic(&self, initial_delay_ms: u64, interval_ms: u64) -> EmbassyTicks {
        EmbassyTicks::new(
            from_now(initial_delay_ms),
            duration_from_millis_saturating(interval_ms),
        )
    }
}

/// Like `Duration::from_millis`, rounding up to whole ticks, but clamped to
/// [`Duration::MAX`] instead of overflowing.
pub fn duration_from_millis_saturating(ms: u64) -> Duration {
    let ticks = (u128::from(ms) * u128::from(TICK_HZ)).div_ceil(1_000);
    Duration::from_ticks(u64::try_from(ticks).unwrap_or(u64::MAX))
}

fn from_now(delay_ms: u64) -> Instant {
    instant_saturating_add(Instant::now(), duration_from_millis_saturating(delay_ms))
}

/// `at + after`, clamped to [`Instant::MAX`].
pub(crate) fn instant_saturating_add(at: Instant, after: Duration) -> Instant {
    at.checked_add(after).unwrap_or(Instant::MAX)
}

//==================================================================================TICKS
/// Tick stream anchored on absolute instants: tick `n` is due at
/// `first + n * period`, whatever the consumer's latency. A tick that
/// would land past [`Instant::MAX`] is never due.
pub struct EmbassyTicks {
    next: Instant,
    period: Duration,
    timer: Timer,
}

impl EmbassyTicks {
    pub fn new(first: Instant, period: Duration) -> Self {
        Self {
            next: first,
            period,
            timer: Timer::at(first),
        }
    }

    /// Instant at which the next tick is due.
    pub fn next_due(&self) -> Instant {
        self.next
    }
}

impl Stream for EmbassyTicks {
    type Item = ();

    fn poll_next(self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Option<()>> {
        let this = self.get_mut();
        match Pin::new(&mut this.timer).poll(cx) {
            Poll::Ready(()) => {
                this.next = instant_saturating_add(this.next, this.period);
                this.timer = Timer::at(this.next);
                Poll::Ready(Some(()))
            }
            Poll::Pending => Poll::Pending,
        }
    }
}
