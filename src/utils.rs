use std::time::{Duration, Instant};

/// Logs the time spent in `step` since `previous` and returns the new total.
pub(crate) fn trace(l_type: &str, l_step: &str, start: Instant, previous: Duration) -> Duration {
    let elapsed = start.elapsed();
    log::trace!("{} | Total={:.2?} | {}={:.2?}", l_type, elapsed, l_step, elapsed - previous);
    elapsed
}
