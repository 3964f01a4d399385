//! Virtual simulated-time clock.
//!
//! # Design
//!
//! All timestamps in the system — request creation time, an elevator's
//! `statusSince`, utilization samples — are expressed in `SimMillis`, a
//! monotonically increasing counter advanced by [`SimClock::advance`]. The
//! mapping from real wall-clock ticks to simulated time is:
//!
//!   sim_dt = real_dt_ms * speed
//!
//! Real time only enters the system through the tick timer interval and the
//! spawner interval (both owned by the application layer); the core never
//! reads the wall clock directly.

use std::fmt;

use crate::error::{CoreError, CoreResult};

// ── SimMillis ───────────────────────────────────────────────────────────────

/// An absolute point (or duration) of simulated time, in milliseconds.
#[derive(Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Debug, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SimMillis(pub i64);

impl SimMillis {
    pub const ZERO: SimMillis = SimMillis(0);

    #[inline]
    pub fn since(self, earlier: SimMillis) -> i64 {
        self.0 - earlier.0
    }
}

impl std::ops::Add<i64> for SimMillis {
    type Output = SimMillis;
    #[inline]
    fn add(self, rhs: i64) -> SimMillis {
        SimMillis(self.0 + rhs)
    }
}

impl std::ops::Sub for SimMillis {
    type Output = i64;
    #[inline]
    fn sub(self, rhs: SimMillis) -> i64 {
        self.0 - rhs.0
    }
}

impl fmt::Display for SimMillis {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}ms", self.0)
    }
}

// ── Morning-rush window ──────────────────────────────────────────────────────

/// Start of the morning-rush window, in minutes since sim-time-of-day 00:00 (09:00).
const MORNING_RUSH_START_MIN: i64 = 9 * 60;
/// End of the morning-rush window, exclusive (09:30).
const MORNING_RUSH_END_MIN: i64 = 9 * 60 + 30;
const MINUTES_PER_DAY: i64 = 24 * 60;

// ── SimClock ──────────────────────────────────────────────────────────────────

/// The engine's single monotonic time source.
///
/// Cheap to copy, holds no heap data. `current_tick`-style progression is
/// realized via repeated [`advance`][Self::advance] calls from the tick
/// driver; there is no separate discrete "tick count" — sim time itself is
/// the canonical progress measure.
#[derive(Clone, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SimClock {
    sim_time: SimMillis,
    /// Multiplier applied to real elapsed milliseconds each tick. Must stay
    /// strictly positive — see [`SimClock::set_speed`].
    speed: f64,
}

impl Default for SimClock {
    fn default() -> Self {
        Self::new(1.0)
    }
}

impl SimClock {
    /// Construct a clock at `sim_time == 0` with the given speed multiplier.
    pub fn new(speed: f64) -> Self {
        Self { sim_time: SimMillis::ZERO, speed }
    }

    /// Advance simulated time by `real_dt_ms * speed` and return the
    /// simulated delta that elapsed (what elevator motion steps with).
    pub fn advance(&mut self, real_dt_ms: f64) -> i64 {
        let sim_dt = (real_dt_ms * self.speed).round() as i64;
        self.sim_time = self.sim_time + sim_dt;
        sim_dt
    }

    #[inline]
    pub fn now(&self) -> SimMillis {
        self.sim_time
    }

    #[inline]
    pub fn speed(&self) -> f64 {
        self.speed
    }

    /// Replace the speed multiplier. Rejects non-positive speeds: the
    /// distilled spec leaves this unvalidated, but a zero or negative speed
    /// would freeze or reverse the clock, which no downstream invariant
    /// tolerates.
    pub fn set_speed(&mut self, speed: f64) -> CoreResult<()> {
        if !(speed > 0.0) {
            return Err(CoreError::InvalidSpeed(speed));
        }
        self.speed = speed;
        Ok(())
    }

    /// Reset simulated time to zero without touching the speed multiplier.
    pub fn reset(&mut self) {
        self.sim_time = SimMillis::ZERO;
    }

    /// `true` when the current sim-time-of-day falls in the morning-rush
    /// window `[09:00, 09:30)`. Sim-time-of-day wraps every 24 simulated
    /// hours from `sim_time == 0`.
    pub fn is_morning_rush(&self) -> bool {
        let minute_of_day = (self.sim_time.0 / 60_000).rem_euclid(MINUTES_PER_DAY);
        (MORNING_RUSH_START_MIN..MORNING_RUSH_END_MIN).contains(&minute_of_day)
    }
}
