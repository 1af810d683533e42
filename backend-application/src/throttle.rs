// Global submission throttle
// Bounded sliding-window counter driven by the injected clock, replacing
// a live "count rows in the last 60s" query so the limit is testable
// without wall-clock delay.

use std::collections::VecDeque;

#[derive(Debug)]
pub struct SlidingWindow {
    limit: usize,
    window_millis: i64,
    samples: VecDeque<i64>,
}

impl SlidingWindow {
    pub fn new(limit: usize, window_seconds: u64) -> Self {
        Self {
            limit,
            window_millis: (window_seconds as i64) * 1000,
            samples: VecDeque::with_capacity(limit + 1),
        }
    }

    /// Err carries retry-after guidance in whole seconds.
    pub fn check(&mut self, now_millis: i64) -> Result<(), u64> {
        self.prune(now_millis);
        if self.samples.len() < self.limit {
            return Ok(());
        }
        let oldest = self.samples.front().copied().unwrap_or(now_millis);
        let until_free = oldest + self.window_millis - now_millis;
        Err((until_free.max(1) as u64).div_ceil(1000).max(1))
    }

    /// Records one accepted submission.
    pub fn record(&mut self, now_millis: i64) {
        self.prune(now_millis);
        self.samples.push_back(now_millis);
    }

    fn prune(&mut self, now_millis: i64) {
        let cutoff = now_millis - self.window_millis;
        while matches!(self.samples.front(), Some(&sample) if sample <= cutoff) {
            self.samples.pop_front();
        }
    }
}
