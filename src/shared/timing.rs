//! Timing utilities for request round-trips.

use std::time::Instant;

/// Measures the time from sending a request until its response head arrives.
///
/// Uses the monotonic clock; the reported value is rounded to whole
/// milliseconds.
#[derive(Debug)]
pub struct RequestTiming {
    pub start: Instant,
    pub end: Option<Instant>,
}

impl RequestTiming {
    /// Starts the timer.
    pub fn start() -> Self {
        Self {
            start: Instant::now(),
            end: None,
        }
    }

    /// Records the moment the response was obtained.
    pub fn stop(&mut self) {
        self.end = Some(Instant::now());
    }

    /// Elapsed time in whole milliseconds, measured up to now if not stopped.
    pub fn elapsed_ms(&self) -> u64 {
        let elapsed = self
            .end
            .unwrap_or_else(Instant::now)
            .duration_since(self.start);
        (elapsed.as_secs_f64() * 1000.0).round() as u64
    }
}
