//! ETA estimation and the candidate scoring function.
//!
//! The constants here are a single tunable block; what must not change is
//! their *relative* ordering — full-car and same-floor terms dominate,
//! fairness is a tie-breaking nudge. See [`ScoringWeights::default`].

use elevator_core::BuildingConfig;
use elevator_motion::{Direction, Elevator};
use elevator_request::Request;

/// Tunable weights for [`score`]. Grouped into one struct so a caller (e.g.
/// `reconfig`) can retune dispatch behavior without touching call sites.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "camelCase"))]
pub struct ScoringWeights {
    pub same_floor_boost: f64,
    pub nearby_boost: f64,
    pub direction_boost: f64,
    pub eta_weight: f64,
    pub target_penalty: f64,
    pub occupancy_penalty_near: f64,
    pub occupancy_penalty_full: f64,
    pub fairness_weight: f64,
    pub escalated_boost: f64,
}

impl Default for ScoringWeights {
    fn default() -> Self {
        Self {
            same_floor_boost: 10_000.0,
            nearby_boost: 75.0,
            direction_boost: 20.0,
            eta_weight: 0.0015,
            target_penalty: 12.0,
            occupancy_penalty_near: 200.0,
            occupancy_penalty_full: 10_000.0,
            fairness_weight: 0.000_08,
            escalated_boost: 5000.0,
        }
    }
}

/// `estimateETA(E, pickup)` — walk the car's scheduled stops in order,
/// accounting for a door-dwell stop at each intermediate stop, falling
/// through to a direct estimate if `pickup` isn't already on the route.
pub fn estimate_eta(elevator: &Elevator, pickup: u32, cfg: &BuildingConfig) -> i64 {
    if elevator.route.is_empty() {
        return (elevator.current_floor as i64 - pickup as i64).abs() * cfg.time_per_floor_ms;
    }

    let mut total = 0i64;
    let mut cur = elevator.current_floor;
    for &stop in &elevator.route {
        total += (cur as i64 - stop as i64).abs() * cfg.time_per_floor_ms;
        if stop == pickup {
            return total;
        }
        total += cfg.door_dwell_ms;
        cur = stop;
    }
    total + (cur as i64 - pickup as i64).abs() * cfg.time_per_floor_ms
}

/// The direction a request implies for the elevator that would serve it:
/// up if the pickup floor is above the destination's origin... in plain
/// terms, the direction of travel from pickup to destination.
fn request_direction(request: &Request) -> Direction {
    let pickup = request.pickup_floor();
    match request.destination.cmp(&pickup) {
        std::cmp::Ordering::Greater => Direction::Up,
        std::cmp::Ordering::Less => Direction::Down,
        std::cmp::Ordering::Equal => Direction::Idle,
    }
}

fn occupancy_penalty(elevator: &Elevator, weights: &ScoringWeights) -> f64 {
    if elevator.passenger_count >= elevator.capacity {
        weights.occupancy_penalty_full
    } else if elevator.passenger_count >= (elevator.capacity * 8 / 10) {
        weights.occupancy_penalty_near
    } else {
        0.0
    }
}

/// `score(E, r)` per the dispatch design: priority plus a handful of
/// situational boosts, minus ETA/route-length/occupancy/fairness penalties.
pub fn score(
    elevator: &Elevator,
    request: &Request,
    eta: i64,
    cfg: &BuildingConfig,
    weights: &ScoringWeights,
) -> f64 {
    let pickup = request.pickup_floor();
    let mut s = request.priority;

    if elevator.current_floor == pickup
        && (elevator.direction == Direction::Idle || elevator.route.first() == Some(&pickup))
    {
        s += weights.same_floor_boost;
    }
    if (elevator.current_floor as i64 - pickup as i64).abs() == 1 {
        s += weights.nearby_boost;
    }
    if elevator.direction == request_direction(request) {
        s += weights.direction_boost;
    }

    s -= eta as f64 * weights.eta_weight;
    s -= elevator.route.len() as f64 * weights.target_penalty;
    s -= occupancy_penalty(elevator, weights);
    s -= elevator.util_time_ms as f64 * weights.fairness_weight;

    if request.escalated {
        s += weights.escalated_boost;
    }

    let _ = cfg;
    s
}

#[cfg(test)]
mod tests {
    use super::*;
    use elevator_core::{ElevatorId, SimMillis};

    fn cfg() -> BuildingConfig {
        BuildingConfig::default()
    }

    #[test]
    fn eta_is_direct_distance_for_idle_car() {
        let e = Elevator::new(ElevatorId::new(0), 3, 6);
        assert_eq!(estimate_eta(&e, 8, &cfg()), 5 * cfg().time_per_floor_ms);
    }

    #[test]
    fn eta_accounts_for_dwell_at_intermediate_stops() {
        let mut e = Elevator::new(ElevatorId::new(0), 1, 6);
        e.push_route(3);
        e.push_route(8);
        let eta = estimate_eta(&e, 8, &cfg());
        let expected = 2 * cfg().time_per_floor_ms + cfg().door_dwell_ms + 5 * cfg().time_per_floor_ms;
        assert_eq!(eta, expected);
    }

    #[test]
    fn full_car_is_penalized_far_more_than_near_capacity() {
        let weights = ScoringWeights::default();
        let mut full = Elevator::new(ElevatorId::new(0), 1, 6);
        full.passenger_count = 6;
        let mut near = Elevator::new(ElevatorId::new(1), 1, 6);
        near.passenger_count = 5;
        assert!(occupancy_penalty(&full, &weights) > occupancy_penalty(&near, &weights));
    }

    #[test]
    fn escalated_request_outweighs_direction_and_nearby_boosts() {
        let weights = ScoringWeights::default();
        let cfg = cfg();
        let e = Elevator::new(ElevatorId::new(0), 1, 6);
        let mut r = Request::new_external(SimMillis::ZERO, 1, 8, false, &cfg).unwrap();
        let base = score(&e, &r, estimate_eta(&e, 1, &cfg), &cfg, &weights);
        r.escalated = true;
        let escalated = score(&e, &r, estimate_eta(&e, 1, &cfg), &cfg, &weights);
        assert!(escalated - base >= weights.escalated_boost - 1.0);
    }
}
