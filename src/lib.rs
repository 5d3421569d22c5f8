//! `korri-wait` library: a `no_std` "poll until a condition holds, or give up
//! after a deadline" primitive. The crate exposes the waiter builder, the
//! traits for the scheduler and condition it consumes, and an `embassy-time`
//! backed scheduler.
//!
//! ```rust,ignore
//! use korri_wait::{infra::EmbassyScheduler, time::TimeUnit, waiter::Waiter};
//!
//! let scheduler = EmbassyScheduler;
//! let ready = Waiter::configure(&scheduler)
//!     .with_condition(|| async { Ok::<_, ()>(sensor_is_up().await) })
//!     .with_interval(500, TimeUnit::Milliseconds)?
//!     .with_max_wait(10, TimeUnit::Seconds)?
//!     .fire()?
//!     .await;
//! ```
#![no_std]

extern crate alloc;
//==================================================================================
/// Configuration and wait errors.
pub mod error;
/// Ready-made scheduler implementations.
pub mod infra;
/// Time units accepted by the builder and the default durations.
pub mod time;
/// Capabilities consumed by the waiter (scheduler, condition).
pub mod traits;
/// Waiter builder, validation and the polling session.
pub mod waiter;
//==================================================================================
