//! `MetricsAggregator` — folds elevator/request state and the sliding
//! sample window into a [`MetricsSnapshot`].

use elevator_core::SimMillis;
use elevator_motion::Elevator;
use elevator_request::RequestBook;

use crate::snapshot::MetricsSnapshot;
use crate::window::{Sample, SampleWindow};

pub const RECENT_WINDOW_MS: i64 = 60_000;

#[derive(Clone, Debug, Default)]
pub struct MetricsAggregator {
    window: SampleWindow,
}

impl MetricsAggregator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn reset(&mut self) {
        self.window.clear();
    }

    /// §4.6 step 5: called once per tick after util-time accrual.
    pub fn record_tick(&mut self, now: SimMillis, elevators: &[Elevator], book: &RequestBook) {
        let total_util_time_ms: i64 = elevators.iter().map(|e| e.util_time_ms).sum();
        self.window.push(
            Sample { ts: now, total_util_time_ms, served_count: book.served_count() },
            RECENT_WINDOW_MS,
        );
    }

    pub fn snapshot(&self, now: SimMillis, elevators: &[Elevator], book: &RequestBook) -> MetricsSnapshot {
        let served = book.served();
        let served_count = served.len();

        let (wait_sum, wait_max) = served.iter().fold((0i64, 0i64), |(sum, max), r| {
            let wait = r.pickup_time.map(|t| t.since(r.created_at)).unwrap_or(0);
            (sum + wait, max.max(wait))
        });
        let (travel_sum, travel_max) = served.iter().fold((0i64, 0i64), |(sum, max), r| {
            let travel = match (r.pickup_time, r.dropoff_time) {
                (Some(p), Some(d)) => d.since(p),
                _ => 0,
            };
            (sum + travel, max.max(travel))
        });

        let avg_wait_ms = if served_count > 0 { wait_sum as f64 / served_count as f64 } else { 0.0 };
        let avg_travel_ms = if served_count > 0 { travel_sum as f64 / served_count as f64 } else { 0.0 };

        let total_util_time_ms: i64 = elevators.iter().map(|e| e.util_time_ms).sum();
        let now_ms = now.since(SimMillis::ZERO);
        let utilization = if !elevators.is_empty() && now_ms > 0 {
            total_util_time_ms as f64 / (elevators.len() as f64 * now_ms as f64)
        } else {
            0.0
        };

        let (recent_util, throughput_per_min) = self.recent_figures(now, elevators.len());

        let pending_count = book.pending_count();
        let max_pending_wait_ms = book.pending().map(|r| r.waited_ms(now)).max().unwrap_or(0);

        MetricsSnapshot {
            served_count,
            avg_wait_ms,
            max_wait_ms: wait_max,
            avg_travel_ms,
            max_travel_ms: travel_max,
            utilization,
            recent_util,
            throughput_per_min,
            pending_count,
            max_pending_wait_ms,
        }
    }

    fn recent_figures(&self, now: SimMillis, n_elevators: usize) -> (f64, f64) {
        let Some(latest) = self.window.latest() else { return (0.0, 0.0) };
        let Some(oldest) = self.window.oldest_within(now, RECENT_WINDOW_MS) else {
            return (0.0, 0.0);
        };
        if n_elevators == 0 {
            return (0.0, 0.0);
        }
        // Guard against deltaTime == 0 by flooring the denominator at 1
        // rather than short-circuiting to zeroed figures.
        let delta_time_ms = latest.ts.since(oldest.ts).max(1);
        let delta_util = (latest.total_util_time_ms - oldest.total_util_time_ms) as f64;
        let recent_util = delta_util / (n_elevators as f64 * delta_time_ms as f64);

        let delta_served = (latest.served_count - oldest.served_count) as f64;
        let delta_minutes = delta_time_ms as f64 / 60_000.0;
        let throughput_per_min = delta_served / delta_minutes;

        (recent_util, throughput_per_min)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use elevator_core::{BuildingConfig, ElevatorId};
    use elevator_request::Request;

    #[test]
    fn snapshot_on_empty_state_is_all_zero() {
        let agg = MetricsAggregator::new();
        let elevators = vec![Elevator::new(ElevatorId::new(0), 1, 6)];
        let book = RequestBook::new();
        let snap = agg.snapshot(SimMillis::ZERO, &elevators, &book);
        assert_eq!(snap.served_count, 0);
        assert_eq!(snap.pending_count, 0);
        assert_eq!(snap.utilization, 0.0);
    }

    #[test]
    fn avg_and_max_wait_reflect_served_archive() {
        let cfg = BuildingConfig::default();
        let mut book = RequestBook::new();
        let mut r1 = Request::new_external(SimMillis::ZERO, 1, 5, false, &cfg).unwrap();
        r1.pickup_time = Some(SimMillis(1000));
        r1.dropoff_time = Some(SimMillis(5000));
        let id1 = book.insert_pending(r1);
        book.archive(id1);

        let mut r2 = Request::new_external(SimMillis::ZERO, 1, 5, false, &cfg).unwrap();
        r2.pickup_time = Some(SimMillis(3000));
        r2.dropoff_time = Some(SimMillis(4000));
        let id2 = book.insert_pending(r2);
        book.archive(id2);

        let agg = MetricsAggregator::new();
        let elevators = vec![Elevator::new(ElevatorId::new(0), 1, 6)];
        let snap = agg.snapshot(SimMillis(10_000), &elevators, &book);
        assert_eq!(snap.served_count, 2);
        assert_eq!(snap.max_wait_ms, 3000);
        assert!((snap.avg_wait_ms - 2000.0).abs() < 1e-9);
        assert_eq!(snap.max_travel_ms, 4000);
    }

    #[test]
    fn cumulative_utilization_is_fraction_of_elevators_times_now() {
        let mut elevators = vec![Elevator::new(ElevatorId::new(0), 1, 6)];
        elevators[0].util_time_ms = 5000;
        let book = RequestBook::new();
        let agg = MetricsAggregator::new();
        let snap = agg.snapshot(SimMillis(10_000), &elevators, &book);
        assert!((snap.utilization - 0.5).abs() < 1e-9);
    }

    #[test]
    fn recent_util_and_throughput_use_window_deltas() {
        let mut agg = MetricsAggregator::new();
        let mut elevators = vec![Elevator::new(ElevatorId::new(0), 1, 6)];
        let book = RequestBook::new();

        elevators[0].util_time_ms = 0;
        agg.record_tick(SimMillis(0), &elevators, &book);
        elevators[0].util_time_ms = 30_000;
        agg.record_tick(SimMillis(30_000), &elevators, &book);

        let (recent_util, _) = agg.recent_figures(SimMillis(30_000), 1);
        assert!((recent_util - 1.0).abs() < 1e-9);
    }

    #[test]
    fn recent_figures_floors_zero_delta_time_instead_of_dividing_by_zero() {
        let mut agg = MetricsAggregator::new();
        let mut elevators = vec![Elevator::new(ElevatorId::new(0), 1, 6)];
        let book = RequestBook::new();

        // Two samples landing on the same sim-ms: a degenerate case a
        // naive division would turn into NaN/Infinity.
        elevators[0].util_time_ms = 0;
        agg.record_tick(SimMillis(1000), &elevators, &book);
        elevators[0].util_time_ms = 1;
        agg.record_tick(SimMillis(1000), &elevators, &book);

        let (recent_util, throughput) = agg.recent_figures(SimMillis(1000), 1);
        assert!(recent_util.is_finite());
        assert!(throughput.is_finite());
    }
}
