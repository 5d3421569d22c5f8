//! Runtime side of one wait: the race between the periodic check and the
//! deadline.
//!
//! Every path that ends the wait goes through [`WaitSession::resolve`], which
//! checks-and-sets the resolution, cancels both scheduled activities and drops
//! the checks still in flight. Once resolved, further attempts are no-ops.
use alloc::boxed::Box;
use core::future::Future;
use core::pin::Pin;
use core::task::{Context, Poll};

use futures_util::stream::{FuturesUnordered, Stream, StreamExt};

use crate::error::WaitError;
use crate::traits::condition::Condition;
use crate::traits::scheduler::Scheduler;

//==================================================================================STATE
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
/// Lifecycle of a fired wait.
pub enum WaitState {
    /// Activities scheduled, outcome still open.
    Running,
    /// A check reported `true`.
    Succeeded,
    /// The deadline elapsed first.
    TimedOut,
    /// A check returned an error.
    ConditionFailed,
}

/// Terminal result competing for the session.
#[derive(Debug)]
pub enum Outcome<E> {
    Succeeded,
    TimedOut,
    ConditionFailed(E),
}

impl<E: core::fmt::Debug> Outcome<E> {
    fn state(&self) -> WaitState {
        match self {
            Outcome::Succeeded => WaitState::Succeeded,
            Outcome::TimedOut => WaitState::TimedOut,
            Outcome::ConditionFailed(_) => WaitState::ConditionFailed,
        }
    }

    fn into_result(self, max_wait_ms: u64) -> Result<bool, WaitError<E>> {
        match self {
            Outcome::Succeeded => Ok(true),
            Outcome::TimedOut => Err(WaitError::Timeout { max_wait_ms }),
            Outcome::ConditionFailed(err) => Err(WaitError::Condition(err)),
        }
    }
}

//==================================================================================ACTIVITY
/// Handle on a scheduled activity. Cancelling drops it.
struct Activity<A> {
    inner: Option<Pin<Box<A>>>,
}

impl<A> Activity<A> {
    fn new(activity: A) -> Self {
        Self {
            inner: Some(Box::pin(activity)),
        }
    }

    /// Returns `false` when the activity was already gone.
    fn cancel(&mut self) -> bool {
        self.inner.take().is_some()
    }

    fn is_live(&self) -> bool {
        self.inner.is_some()
    }
}

impl<A: Future<Output = ()>> Activity<A> {
    fn poll_elapsed(&mut self, cx: &mut Context<'_>) -> Poll<()> {
        match self.inner.as_mut() {
            Some(once) => once.as_mut().poll(cx),
            None => Poll::Pending,
        }
    }
}

impl<A: Stream<Item = ()>> Activity<A> {
    fn poll_tick(&mut self, cx: &mut Context<'_>) -> Poll<Option<()>> {
        match self.inner.as_mut() {
            Some(ticks) => ticks.as_mut().poll_next(cx),
            None => Poll::Pending,
        }
    }
}

//==================================================================================SESSION
/// Per-`fire()` state: resolution flag, both activities and in-flight checks.
pub struct WaitSession<S: Scheduler, C: Condition> {
    condition: C,
    max_wait_ms: u64,
    state: WaitState,
    deadline: Activity<S::Once>,
    periodic: Activity<S::Periodic>,
    in_flight: FuturesUnordered<C::Check>,
    checks_started: u32,
}

impl<S: Scheduler, C: Condition> WaitSession<S, C> {
    pub(crate) fn new(
        condition: C,
        max_wait_ms: u64,
        deadline: S::Once,
        periodic: S::Periodic,
    ) -> Self {
        Self {
            condition,
            max_wait_ms,
            state: WaitState::Running,
            deadline: Activity::new(deadline),
            periodic: Activity::new(periodic),
            in_flight: FuturesUnordered::new(),
            checks_started: 0,
        }
    }

    pub fn state(&self) -> WaitState {
        self.state
    }

    /// Number of checks started by the periodic activity so far.
    pub fn checks_started(&self) -> u32 {
        self.checks_started
    }

    /// Single resolution point. Returns `None` if the session already holds
    /// an outcome.
    pub fn resolve(
        &mut self,
        outcome: Outcome<C::Error>,
    ) -> Option<Result<bool, WaitError<C::Error>>> {
        if self.state != WaitState::Running {
            return None;
        }
        let _periodic_cancelled = self.periodic.cancel();
        let _deadline_cancelled = self.deadline.cancel();
        self.in_flight.clear();
        self.state = outcome.state();

        #[cfg(feature = "defmt")]
        match self.state {
            WaitState::Succeeded => defmt::info!(
                "Condition succeeded after {} checks",
                self.checks_started
            ),
            WaitState::TimedOut => defmt::warn!(
                "{}ms threshold exceeded, periodic check cancelled: {}",
                self.max_wait_ms,
                _periodic_cancelled
            ),
            WaitState::ConditionFailed => defmt::error!("Condition check failed"),
            WaitState::Running => {}
        }

        Some(outcome.into_result(self.max_wait_ms))
    }

    fn finish(&mut self, outcome: Outcome<C::Error>) -> Poll<Result<bool, WaitError<C::Error>>> {
        match self.resolve(outcome) {
            Some(result) => Poll::Ready(result),
            None => Poll::Pending,
        }
    }

    fn poll_outcome(&mut self, cx: &mut Context<'_>) -> Poll<Result<bool, WaitError<C::Error>>> {
        loop {
            // Step 1: settle the checks that completed since the last poll.
            while let Poll::Ready(Some(result)) = self.in_flight.poll_next_unpin(cx) {
                match result {
                    Ok(true) => return self.finish(Outcome::Succeeded),
                    Ok(false) => {
                        #[cfg(feature = "defmt")]
                        defmt::debug!("Condition not met yet");
                    }
                    Err(err) => return self.finish(Outcome::ConditionFailed(err)),
                }
            }

            // Step 2: deadline.
            if self.deadline.poll_elapsed(cx).is_ready() {
                return self.finish(Outcome::TimedOut);
            }

            // Step 3: start one check per tick, without waiting for the
            // previous ones.
            match self.periodic.poll_tick(cx) {
                Poll::Ready(Some(())) => {
                    #[cfg(feature = "defmt")]
                    defmt::trace!("Checking condition");
                    self.checks_started = self.checks_started.saturating_add(1);
                    self.in_flight.push(self.condition.check());
                }
                Poll::Ready(None) => {
                    // Scheduler stopped ticking; only the deadline is left.
                    self.periodic.cancel();
                    if self.in_flight.is_empty() {
                        return Poll::Pending;
                    }
                }
                Poll::Pending => return Poll::Pending,
            }
        }
    }
}

//==================================================================================WAIT
/// Future returned by [`Waiter::fire`](crate::waiter::Waiter::fire).
///
/// Resolves once. Dropping it cancels both activities.
///
/// # Panics
///
/// Polling it again after it returned `Poll::Ready` panics, like most
/// futures; the outcome is delivered a single time.
pub struct Wait<S: Scheduler, C: Condition> {
    session: WaitSession<S, C>,
}

// Activities are boxed and `FuturesUnordered` is `Unpin`; nothing is
// pin-projected.
impl<S: Scheduler, C: Condition> Unpin for Wait<S, C> {}

impl<S: Scheduler, C: Condition> Wait<S, C> {
    pub(crate) fn new(session: WaitSession<S, C>) -> Self {
        Self { session }
    }

    pub fn state(&self) -> WaitState {
        self.session.state()
    }

    pub fn checks_started(&self) -> u32 {
        self.session.checks_started()
    }

    /// `true` while the deadline or the periodic check is still scheduled.
    pub fn has_live_activities(&self) -> bool {
        self.session.deadline.is_live() || self.session.periodic.is_live()
    }
}

impl<S: Scheduler, C: Condition> Future for Wait<S, C> {
    type Output = Result<bool, WaitError<C::Error>>;

    fn poll(self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Self::Output> {
        let session = &mut self.get_mut().session;
        assert!(
            session.state == WaitState::Running,
            "`Wait` polled after completion"
        );
        session.poll_outcome(cx)
    }
}
