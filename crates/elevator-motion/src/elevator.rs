//! `Elevator` — per-car motion, door, and occupancy state.

use elevator_core::{BuildingConfig, ElevatorId, SimMillis};

use crate::state::{Direction, DoorState, MotionEvent};

/// A single elevator car.
///
/// `route` is the ordered sequence of floors the car intends to visit next,
/// deduplicated so a floor never appears twice — see [`Elevator::push_route`].
#[derive(Clone, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "camelCase"))]
pub struct Elevator {
    pub id: ElevatorId,
    pub current_floor: u32,
    pub route: Vec<u32>,
    pub direction: Direction,
    pub door: DoorState,
    pub status_since: SimMillis,
    pub passenger_count: u32,
    pub capacity: u32,
    /// Sub-floor progress carried across ticks so correctness doesn't depend
    /// on `sim_dt >= time_per_floor_ms`.
    pub accumulator_ms: i64,
    /// Cumulative sim-ms spent with at least one passenger onboard.
    pub util_time_ms: i64,
}

impl Elevator {
    pub fn new(id: ElevatorId, starting_floor: u32, capacity: u32) -> Self {
        Self {
            id,
            current_floor: starting_floor,
            route: Vec::new(),
            direction: Direction::Idle,
            door: DoorState::Closed,
            status_since: SimMillis::ZERO,
            passenger_count: 0,
            capacity,
            accumulator_ms: 0,
            util_time_ms: 0,
        }
    }

    #[inline]
    pub fn is_idle(&self) -> bool {
        self.route.is_empty()
    }

    #[inline]
    pub fn is_full(&self) -> bool {
        self.passenger_count >= self.capacity
    }

    /// Projected load: current passengers plus requests already assigned but
    /// not yet picked up. Callers (the scheduler) track the "assigned but
    /// not yet picked up" count themselves; this just exposes the occupancy
    /// half of that sum.
    #[inline]
    pub fn projected_load(&self, already_assigned_not_picked_up: u32) -> u32 {
        self.passenger_count + already_assigned_not_picked_up
    }

    /// Append `floor` to the route, preserving first-occurrence order — a
    /// floor already present is never re-appended or reordered.
    pub fn push_route(&mut self, floor: u32) {
        if !self.route.contains(&floor) {
            self.route.push(floor);
        }
    }

    /// Board a passenger if there is capacity. Returns `false` (no mutation)
    /// if the car is full.
    pub fn try_board(&mut self) -> bool {
        if self.is_full() {
            return false;
        }
        self.passenger_count += 1;
        true
    }

    /// Disembark one passenger, floored at zero.
    pub fn disembark(&mut self) {
        self.passenger_count = self.passenger_count.saturating_sub(1);
    }

    /// Advance utilization time by `sim_dt` if the car is currently carrying
    /// at least one passenger.
    pub fn accrue_utilization(&mut self, sim_dt: i64) {
        if self.passenger_count > 0 {
            self.util_time_ms += sim_dt;
        }
    }

    /// Run one motion/door tick. See the module-level docs on
    /// [`MotionEvent`] for why arrival does not pop the route itself.
    pub fn step(&mut self, now: SimMillis, sim_dt: i64, cfg: &BuildingConfig) -> MotionEvent {
        // 1. Door dwell gate.
        if self.door == DoorState::Open {
            if now.since(self.status_since) < cfg.door_dwell_ms {
                return MotionEvent::None;
            }
            // 2. Door close.
            self.door = DoorState::Closed;
            self.status_since = now;
        }

        // 3. Idle transition.
        let Some(&target) = self.route.first() else {
            if self.direction != Direction::Idle {
                self.direction = Direction::Idle;
                self.status_since = now;
            }
            return MotionEvent::None;
        };

        // 4. Arrival at head-of-route.
        if self.current_floor == target {
            self.door = DoorState::Open;
            self.status_since = now;
            return MotionEvent::Arrived { floor: target };
        }

        // 5. Travel.
        self.direction = Self::direction_toward(self.current_floor, target);
        self.accumulator_ms += sim_dt;
        let floors_to_move = self.accumulator_ms / cfg.time_per_floor_ms;
        if floors_to_move <= 0 {
            return MotionEvent::None;
        }

        let mut moved = 0;
        while moved < floors_to_move && self.current_floor != target {
            match Self::direction_toward(self.current_floor, target) {
                Direction::Up => self.current_floor += 1,
                Direction::Down => self.current_floor -= 1,
                Direction::Idle => break,
            }
            moved += 1;
        }
        self.accumulator_ms %= cfg.time_per_floor_ms;
        self.status_since = now;
        if self.current_floor != target {
            self.direction = Self::direction_toward(self.current_floor, target);
        }
        MotionEvent::None
    }

    /// Complete an arrival reported by [`Elevator::step`]: pop the stop just
    /// serviced off the route and recompute direction toward the new head.
    /// Call this only after the arrival-handling sweep has run (it may have
    /// appended new stops, which must not be mistaken for the one just
    /// serviced).
    pub fn finish_arrival(&mut self) {
        if !self.route.is_empty() {
            self.route.remove(0);
        }
        self.direction = match self.route.first() {
            Some(&next) => Self::direction_toward(self.current_floor, next),
            None => Direction::Idle,
        };
    }

    fn direction_toward(from: u32, to: u32) -> Direction {
        match to.cmp(&from) {
            std::cmp::Ordering::Greater => Direction::Up,
            std::cmp::Ordering::Less => Direction::Down,
            std::cmp::Ordering::Equal => Direction::Idle,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cfg() -> BuildingConfig {
        BuildingConfig::default()
    }

    #[test]
    fn idle_elevator_stays_idle() {
        let mut e = Elevator::new(ElevatorId::new(0), 1, 6);
        let event = e.step(SimMillis(100), 100, &cfg());
        assert_eq!(event, MotionEvent::None);
        assert_eq!(e.direction, Direction::Idle);
    }

    #[test]
    fn arrival_is_reported_before_route_pop() {
        let mut e = Elevator::new(ElevatorId::new(0), 5, 6);
        e.push_route(5);
        let event = e.step(SimMillis::ZERO, 0, &cfg());
        assert_eq!(event, MotionEvent::Arrived { floor: 5 });
        assert_eq!(e.door, DoorState::Open);
        // Route head is untouched until finish_arrival.
        assert_eq!(e.route, vec![5]);
        e.finish_arrival();
        assert!(e.route.is_empty());
    }

    #[test]
    fn door_dwell_blocks_close_and_motion() {
        let mut e = Elevator::new(ElevatorId::new(0), 5, 6);
        e.push_route(5);
        e.step(SimMillis::ZERO, 0, &cfg()); // arrives, door opens at t=0
        e.finish_arrival();
        e.push_route(8);
        // Door dwell is 2000ms; at t=1000 it must still be open and car must
        // not have moved.
        let event = e.step(SimMillis(1000), 1000, &cfg());
        assert_eq!(event, MotionEvent::None);
        assert_eq!(e.door, DoorState::Open);
        assert_eq!(e.current_floor, 5);
    }

    #[test]
    fn accumulator_preserves_sub_floor_progress_across_ticks() {
        let mut e = Elevator::new(ElevatorId::new(0), 1, 6);
        e.push_route(5);
        // Door is closed already (never opened); time_per_floor = 1000ms.
        // Feed 400ms per tick: no floor should move until the 3rd tick
        // (400*3 = 1200 >= 1000).
        e.step(SimMillis(400), 400, &cfg());
        assert_eq!(e.current_floor, 1);
        e.step(SimMillis(800), 400, &cfg());
        assert_eq!(e.current_floor, 1);
        e.step(SimMillis(1200), 400, &cfg());
        assert_eq!(e.current_floor, 2);
        assert_eq!(e.accumulator_ms, 200);
    }

    #[test]
    fn travel_direction_points_toward_target() {
        let mut e = Elevator::new(ElevatorId::new(0), 8, 6);
        e.push_route(2);
        e.step(SimMillis(500), 500, &cfg());
        assert_eq!(e.direction, Direction::Down);
    }

    #[test]
    fn push_route_dedups_preserving_first_occurrence() {
        let mut e = Elevator::new(ElevatorId::new(0), 3, 6);
        e.push_route(8);
        e.push_route(5);
        e.push_route(8);
        assert_eq!(e.route, vec![8, 5]);
    }

    #[test]
    fn boarding_respects_capacity() {
        let mut e = Elevator::new(ElevatorId::new(0), 1, 2);
        assert!(e.try_board());
        assert!(e.try_board());
        assert!(!e.try_board());
        assert_eq!(e.passenger_count, 2);
    }

    #[test]
    fn utilization_only_accrues_with_passengers_onboard() {
        let mut e = Elevator::new(ElevatorId::new(0), 1, 6);
        e.accrue_utilization(500);
        assert_eq!(e.util_time_ms, 0);
        e.try_board();
        e.accrue_utilization(500);
        assert_eq!(e.util_time_ms, 500);
    }
}
