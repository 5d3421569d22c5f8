//! Quickstart: wait for a "service" to come up, polling every 200 ms for at
//! most 3 s, on the embassy-time `std` driver.
//!
//! Run with `cargo run --example quickstart`.
use std::time::{Duration, Instant};

use korri_wait::{
    error::{ConfigError, WaitError},
    infra::EmbassyScheduler,
    time::TimeUnit,
    waiter::Waiter,
};

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<(), ConfigError> {
    let scheduler = EmbassyScheduler;
    let boot_done = Instant::now() + Duration::from_millis(750);

    // Step 1: a service that becomes healthy after 750 ms.
    let health_check = move || async move {
        let healthy = Instant::now() >= boot_done;
        println!("health check -> {healthy}");
        Ok::<_, &'static str>(healthy)
    };

    // Step 2: configure and fire; misconfiguration is reported right here.
    let wait = Waiter::configure(&scheduler)
        .with_condition(health_check)
        .with_initial_delay(100, TimeUnit::Milliseconds)?
        .with_interval(200, TimeUnit::Milliseconds)?
        .with_max_wait(3, TimeUnit::Seconds)?
        .fire()?;

    // Step 3: await the single outcome.
    match wait.await {
        Ok(_) => println!("service is up"),
        Err(WaitError::Timeout { max_wait_ms }) => println!("gave up after {max_wait_ms} ms"),
        Err(WaitError::Condition(err)) => println!("health check failed: {err}"),
    }

    // A deadline shorter than the interval is refused before anything runs.
    let rejected = Waiter::configure(&scheduler)
        .with_condition(|| async { Ok::<_, ()>(true) })
        .with_max_wait(1, TimeUnit::Seconds)?
        .with_interval(2, TimeUnit::Seconds)?
        .fire();
    if let Err(err) = rejected {
        println!("configuration rejected: {err}");
    }

    Ok(())
}
