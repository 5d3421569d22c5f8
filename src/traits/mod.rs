//! Abstraction traits consumed by the waiter (scheduler and condition).
pub mod condition;
pub mod scheduler;
