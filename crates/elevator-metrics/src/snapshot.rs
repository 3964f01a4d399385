//! `MetricsSnapshot` — the shape returned by `metricsSnapshot()`.

/// A point-in-time read of cumulative and sliding-window statistics.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "camelCase"))]
pub struct MetricsSnapshot {
    pub served_count: usize,
    pub avg_wait_ms: f64,
    pub max_wait_ms: i64,
    pub avg_travel_ms: f64,
    pub max_travel_ms: i64,
    /// Cumulative utilization fraction over `[elevators x now]`, in `[0, 1]`.
    pub utilization: f64,
    /// Utilization fraction over the trailing 60s window.
    pub recent_util: f64,
    /// Requests served per minute over the trailing 60s window.
    pub throughput_per_min: f64,
    pub pending_count: usize,
    pub max_pending_wait_ms: i64,
}
