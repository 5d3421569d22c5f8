/// Test doubles: a tokio-driven scheduler and scripted conditions.
use futures_util::stream::Stream;
use korri_wait::traits::scheduler::Scheduler;
use std::cell::Cell;
use std::future::Future;
use std::pin::Pin;
use std::rc::Rc;
use std::task::{Context, Poll};
use tokio::time::{interval_at, sleep, Duration, Instant, Interval, Sleep};

#[allow(dead_code)]
/// Scheduler based on `tokio::time`, meant for `start_paused` tests.
///
/// Counts scheduling requests and keeps track of how many activities are
/// still alive so tests can assert cancellation.
#[derive(Default)]
pub struct TokioScheduler {
    pub live: Rc<Cell<usize>>,
    pub once_calls: Cell<u32>,
    pub periodic_calls: Cell<u32>,
}

#[allow(dead_code)]
impl TokioScheduler {
    pub fn live_activities(&self) -> usize {
        self.live.get()
    }
}

/// Decrements the live counter when the owning activity is dropped.
struct LiveGuard(Rc<Cell<usize>>);

impl LiveGuard {
    fn new(live: &Rc<Cell<usize>>) -> Self {
        live.set(live.get() + 1);
        Self(live.clone())
    }
}

impl Drop for LiveGuard {
    fn drop(&mut self) {
        self.0.set(self.0.get() - 1);
    }
}

/// Deadline activity.
pub struct TokioOnce {
    sleep: Pin<Box<Sleep>>,
    _guard: LiveGuard,
}

impl Future for TokioOnce {
    type Output = ();

    fn poll(mut self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<()> {
        self.sleep.as_mut().poll(cx)
    }
}

/// Periodic activity.
pub struct TokioTicks {
    interval: Interval,
    _guard: LiveGuard,
}

impl Stream for TokioTicks {
    type Item = ();

    fn poll_next(mut self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Option<()>> {
        self.interval.poll_tick(cx).map(|_| Some(()))
    }
}

impl Scheduler for TokioScheduler {
    type Once = TokioOnce;
    type Periodic = TokioTicks;

    fn schedule_once(&self, delay_ms: u64) -> TokioOnce {
        self.once_calls.set(self.once_calls.get() + 1);
        TokioOnce {
            sleep: Box::pin(sleep(Duration::from_millis(delay_ms))),
            _guard: LiveGuard::new(&self.live),
        }
    }

    fn schedule_periodic(&self, initial_delay_ms: u64, interval_ms: u64) -> TokioTicks {
        self.periodic_calls.set(self.periodic_calls.get() + 1);
        let start = Instant::now() + Duration::from_millis(initial_delay_ms);
        TokioTicks {
            interval: interval_at(start, Duration::from_millis(interval_ms)),
            _guard: LiveGuard::new(&self.live),
        }
    }
}

#[allow(dead_code)]
/// Condition that turns `true` once `flip_after` has elapsed since creation
/// and counts its evaluations.
#[derive(Clone)]
pub struct FlipCondition {
    ready_at: Instant,
    pub checks: Rc<Cell<u32>>,
}

#[allow(dead_code)]
impl FlipCondition {
    pub fn after(flip_after: Duration) -> Self {
        Self {
            ready_at: Instant::now() + flip_after,
            checks: Rc::new(Cell::new(0)),
        }
    }

    pub fn never() -> Self {
        Self::after(Duration::from_secs(365 * 24 * 3600))
    }

    /// Closure usable as a `Condition`.
    pub fn as_condition(
        &self,
    ) -> impl Fn() -> std::future::Ready<Result<bool, ()>> {
        let this = self.clone();
        move || {
            this.checks.set(this.checks.get() + 1);
            std::future::ready(Ok(Instant::now() >= this.ready_at))
        }
    }
}

#[allow(dead_code)]
/// Milliseconds elapsed since `start` on tokio's (possibly paused) clock.
pub fn elapsed_ms(start: Instant) -> u128 {
    start.elapsed().as_millis()
}
