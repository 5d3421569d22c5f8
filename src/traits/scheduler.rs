//! Timer scheduling abstraction. Lets the waiter run on any event loop that
//! can provide a one-shot delay and a periodic tick (embassy, tokio, a
//! hand-written reactor, etc.).
use futures_util::stream::Stream;
use core::future::Future;

/// Contract to schedule delayed and periodic activities.
///
/// Both activities are plain values: polling drives them, dropping them
/// cancels them. Delays are measured from the moment the activity is
/// scheduled, not from its first poll.
pub trait Scheduler {
    /// Activity completing once, after the requested delay.
    type Once: Future<Output = ()>;
    /// Activity yielding one item per tick, never ending on its own.
    type Periodic: Stream<Item = ()>;

    /// Schedule an activity completing `delay_ms` milliseconds from now.
    fn schedule_once(&self, delay_ms: u64) -> Self::Once;

    /// Schedule ticks at `initial_delay_ms`, then every `interval_ms`.
    ///
    /// Ticks follow the scheduler's clock: a slow consumer must not push the
    /// following ticks back.
    fn schedule_periodic(&self, initial_delay_ms: u64, interval_ms: u64) -> Self::Periodic;
}
