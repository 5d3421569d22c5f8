//! Scheduler implementations shipped with the crate.
pub mod embassy_scheduler;

pub use embassy_scheduler::{duration_from_millis_saturating, EmbassyScheduler, EmbassyTicks};
