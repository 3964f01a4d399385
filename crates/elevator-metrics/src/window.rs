//! Sliding-window utilization/throughput sample buffer.

use std::collections::VecDeque;

use elevator_core::SimMillis;

/// One sample pushed each tick: a running total, not a per-tick delta —
/// recent figures are derived by differencing the oldest sample still in
/// the window against the newest.
#[derive(Clone, Copy, Debug)]
pub struct Sample {
    pub ts: SimMillis,
    pub total_util_time_ms: i64,
    pub served_count: usize,
}

/// Ring of utilization samples pruned to `2 * window_ms` of history so the
/// oldest sample within the requested `window_ms` is always available for
/// differencing, even right after a prune.
#[derive(Clone, Debug, Default)]
pub struct SampleWindow {
    samples: VecDeque<Sample>,
}

impl SampleWindow {
    pub fn new() -> Self {
        Self { samples: VecDeque::new() }
    }

    pub fn push(&mut self, sample: Sample, window_ms: i64) {
        self.samples.push_back(sample);
        let cutoff = sample.ts.since(SimMillis::ZERO) - 2 * window_ms;
        while let Some(front) = self.samples.front() {
            if front.ts.since(SimMillis::ZERO) < cutoff {
                self.samples.pop_front();
            } else {
                break;
            }
        }
    }

    pub fn clear(&mut self) {
        self.samples.clear();
    }

    pub fn latest(&self) -> Option<&Sample> {
        self.samples.back()
    }

    /// The oldest retained sample at least `window_ms` behind `now` (or the
    /// very oldest sample if the window hasn't filled yet).
    pub fn oldest_within(&self, now: SimMillis, window_ms: i64) -> Option<&Sample> {
        let threshold = now.since(SimMillis::ZERO) - window_ms;
        self.samples
            .iter()
            .find(|s| s.ts.since(SimMillis::ZERO) >= threshold)
            .or_else(|| self.samples.front())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn prunes_samples_older_than_twice_the_window() {
        let mut window = SampleWindow::new();
        for t in (0..=300_000i64).step_by(1000) {
            window.push(
                Sample { ts: SimMillis(t), total_util_time_ms: t, served_count: 0 },
                60_000,
            );
        }
        // Oldest retained sample should be no older than 2*60_000 = 120_000ms
        // before the latest.
        let latest = window.latest().unwrap().ts.0;
        let oldest = window.samples.front().unwrap().ts.0;
        assert!(latest - oldest <= 120_000);
    }

    #[test]
    fn oldest_within_falls_back_to_front_before_window_fills() {
        let mut window = SampleWindow::new();
        window.push(Sample { ts: SimMillis(0), total_util_time_ms: 0, served_count: 0 }, 60_000);
        window.push(Sample { ts: SimMillis(1000), total_util_time_ms: 100, served_count: 1 }, 60_000);
        let oldest = window.oldest_within(SimMillis(1000), 60_000).unwrap();
        assert_eq!(oldest.ts, SimMillis(0));
    }
}
