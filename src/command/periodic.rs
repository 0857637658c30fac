use std::time::{Duration, Instant};

use log::trace;

use crate::executor::CancellationToken;

/// Invokes `tick` at a fixed period until `duration` has elapsed, passing
/// the seconds elapsed since the loop started.
///
/// Deadlines are absolute, so a slow tick does not accumulate drift. The
/// cancellation token is re-checked immediately after every wake; when it is
/// raised the loop returns at that tick boundary without running the
/// remaining ticks.
pub fn run_periodic<F>(period: Duration, duration: Duration, cancel: &CancellationToken, mut tick: F)
where
    F: FnMut(f64),
{
    let start = Instant::now();
    let mut deadline = start;

    loop {
        if cancel.is_cancelled() {
            trace!("periodic loop cancelled");
            return;
        }

        let elapsed = start.elapsed();
        if elapsed >= duration {
            return;
        }

        tick(elapsed.as_secs_f64());

        deadline += period;
        if let Some(remaining) = deadline.checked_duration_since(Instant::now()) {
            std::thread::sleep(remaining);
        }
    }
}
