//! Asynchronous predicate polled by the waiter.
use core::convert::Infallible;
use core::fmt::Debug;
use core::future::{ready, Future, Ready};

/// Contract for the condition a waiter is waiting on.
///
/// `Ok(false)` means "not yet" and is never treated as an error. `Err` aborts
/// the wait.
pub trait Condition {
    type Error: Debug;
    /// Future returned by one check. It must not borrow the condition, so
    /// several checks can be in flight at once.
    type Check: Future<Output = Result<bool, Self::Error>>;

    /// Start one evaluation of the condition.
    fn check(&self) -> Self::Check;
}

impl<F, Fut, E> Condition for F
where
    F: Fn() -> Fut,
    Fut: Future<Output = Result<bool, E>>,
    E: Debug,
{
    type Error = E;
    type Check = Fut;

    fn check(&self) -> Fut {
        self()
    }
}

/// Type parameter of a builder that has not received a condition yet.
/// Firing such a builder fails with `ConfigError::MissingCondition`.
///
/// The type has no public constructor, so it can never be handed to
/// `with_condition` as if it were a real predicate:
///
/// ```compile_fail
/// use korri_wait::{infra::EmbassyScheduler, traits::condition::NoCondition, waiter::Waiter};
///
/// let scheduler = EmbassyScheduler;
/// let _wait = Waiter::configure(&scheduler).with_condition(NoCondition).fire();
/// ```
#[derive(Debug, Clone, Copy)]
pub struct NoCondition {
    _private: (),
}

impl Condition for NoCondition {
    type Error = Infallible;
    type Check = Ready<Result<bool, Infallible>>;

    fn check(&self) -> Self::Check {
        ready(Ok(false))
    }
}
