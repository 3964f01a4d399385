//! The greedy multi-criteria scheduler: priority refresh, idle-set global
//! assignment, and busy-set intra-trip batching.

use std::collections::HashSet;

use elevator_core::{BuildingConfig, ElevatorId, SimClock};
use elevator_motion::{Direction, Elevator};
use elevator_request::{Request, RequestBook, RequestId};
use tracing::info;

use crate::scoring::{estimate_eta, score, ScoringWeights};

const ESCALATION_THRESHOLD_MS: i64 = 30_000;
const ESCALATION_PRIORITY_BONUS: f64 = 2000.0;
const MORNING_RUSH_PRIORITY_MULTIPLIER: f64 = 1.5;

/// A pluggable dispatch policy. Only [`GreedyPolicy`] ships today, but the
/// seam exists the way behavior models are pluggable elsewhere in this
/// workspace: a future policy (e.g. zone-based) implements the same trait.
pub trait DispatchPolicy {
    fn run_tick(
        &self,
        now: elevator_core::SimMillis,
        clock: &SimClock,
        elevators: &mut [Elevator],
        book: &mut RequestBook,
        cfg: &BuildingConfig,
    );
}

/// The greedy multi-criteria scheduler described by the dispatch design.
#[derive(Clone, Debug, Default)]
pub struct GreedyPolicy {
    pub weights: ScoringWeights,
}

impl DispatchPolicy for GreedyPolicy {
    fn run_tick(
        &self,
        now: elevator_core::SimMillis,
        clock: &SimClock,
        elevators: &mut [Elevator],
        book: &mut RequestBook,
        cfg: &BuildingConfig,
    ) {
        refresh_priorities(now, clock, book, cfg);
        assign_idle(now, elevators, book, cfg, &self.weights);
        batch_busy(elevators, book, cfg);
    }
}

/// §4.4 step 1: recompute every pending request's dynamic priority, apply
/// escalation once `waited >= 30_000ms`, and apply the morning-rush lobby
/// multiplier.
fn refresh_priorities(
    now: elevator_core::SimMillis,
    clock: &SimClock,
    book: &mut RequestBook,
    cfg: &BuildingConfig,
) {
    let rush_window_active = clock.is_morning_rush();
    for request in book.pending_mut() {
        let waited = request.waited_ms(now);
        request.priority = request.base_priority + waited as f64 * 0.001;

        if !request.escalated && waited >= ESCALATION_THRESHOLD_MS {
            request.escalated = true;
            request.priority += ESCALATION_PRIORITY_BONUS;
            info!(request = %request.id, waited, "request escalated");
        }

        let at_lobby = request.pickup_floor() == cfg.lobby_floor;
        if (rush_window_active || request.morning_rush) && at_lobby {
            request.priority *= MORNING_RUSH_PRIORITY_MULTIPLIER;
        }
    }
}

struct Candidate {
    elevator_idx: usize,
    request_id: RequestId,
    escalated: bool,
    score: f64,
    eta: i64,
    util_time_ms: i64,
}

/// §4.4 steps 2-3: idle/busy partition, then global greedy assignment over
/// the idle set sorted by (escalated, score desc, eta asc, fairness asc).
fn assign_idle(
    now: elevator_core::SimMillis,
    elevators: &mut [Elevator],
    book: &mut RequestBook,
    cfg: &BuildingConfig,
    weights: &ScoringWeights,
) {
    let idle_idxs: Vec<usize> = elevators
        .iter()
        .enumerate()
        .filter(|(_, e)| e.is_idle())
        .map(|(i, _)| i)
        .collect();
    if idle_idxs.is_empty() {
        return;
    }

    let unassigned: Vec<Request> = book
        .pending()
        .filter(|r| r.assigned_to.is_none())
        .cloned()
        .collect();
    if unassigned.is_empty() {
        return;
    }

    let mut candidates: Vec<Candidate> = Vec::with_capacity(idle_idxs.len() * unassigned.len());
    for &idx in &idle_idxs {
        let elevator = &elevators[idx];
        for request in &unassigned {
            let pickup = request.pickup_floor();
            let eta = estimate_eta(elevator, pickup, cfg);
            let s = score(elevator, request, eta, cfg, weights);
            candidates.push(Candidate {
                elevator_idx: idx,
                request_id: request.id,
                escalated: request.escalated,
                score: s,
                eta,
                util_time_ms: elevator.util_time_ms,
            });
        }
    }

    candidates.sort_by(|a, b| {
        b.escalated
            .cmp(&a.escalated)
            .then(b.score.partial_cmp(&a.score).unwrap_or(std::cmp::Ordering::Equal))
            .then(a.eta.cmp(&b.eta))
            .then(a.util_time_ms.cmp(&b.util_time_ms))
    });

    let mut used_elevators: HashSet<usize> = HashSet::new();
    let mut used_requests: HashSet<RequestId> = HashSet::new();
    // Tracks requests already assigned to each elevator within this pass
    // but not yet reflected in `passenger_count` (still pending pickup).
    let mut projected_extra: Vec<u32> = vec![0; elevators.len()];

    for candidate in candidates {
        if used_elevators.contains(&candidate.elevator_idx) || used_requests.contains(&candidate.request_id) {
            continue;
        }
        let elevator = &elevators[candidate.elevator_idx];
        let projected = elevator.projected_load(projected_extra[candidate.elevator_idx]);
        if projected >= elevator.capacity {
            continue;
        }

        let Some(request) = book.get_mut(candidate.request_id) else {
            continue;
        };
        let elevator = &mut elevators[candidate.elevator_idx];
        request.assigned_to = Some(elevator.id);
        if let Some(origin) = request.origin {
            elevator.push_route(origin);
        }
        elevator.push_route(request.destination);

        used_elevators.insert(candidate.elevator_idx);
        used_requests.insert(candidate.request_id);
        projected_extra[candidate.elevator_idx] += 1;
        let _ = now;
    }
}

/// §4.4 step 4: a busy elevator already traveling can pick up any
/// unassigned request whose pickup floor lies strictly between its current
/// position and the far end of its route, without detouring.
fn batch_busy(elevators: &mut [Elevator], book: &mut RequestBook, _cfg: &BuildingConfig) {
    let unassigned_ids: Vec<RequestId> = book
        .pending()
        .filter(|r| r.assigned_to.is_none())
        .map(|r| r.id)
        .collect();

    for elevator in elevators.iter_mut() {
        if elevator.is_idle() {
            continue;
        }
        match elevator.direction {
            Direction::Up => {
                let Some(&far) = elevator.route.iter().max() else { continue };
                for &id in &unassigned_ids {
                    if elevator.is_full() {
                        break;
                    }
                    let Some(request) = book.get_mut(id) else { continue };
                    if request.assigned_to.is_some() {
                        continue;
                    }
                    let pickup = request.pickup_floor();
                    if pickup > elevator.current_floor && pickup < far {
                        request.assigned_to = Some(elevator.id);
                        elevator.push_route(pickup);
                    }
                }
            }
            Direction::Down => {
                let Some(&near) = elevator.route.iter().min() else { continue };
                for &id in &unassigned_ids {
                    if elevator.is_full() {
                        break;
                    }
                    let Some(request) = book.get_mut(id) else { continue };
                    if request.assigned_to.is_some() {
                        continue;
                    }
                    let pickup = request.pickup_floor();
                    if pickup < elevator.current_floor && pickup > near {
                        request.assigned_to = Some(elevator.id);
                        elevator.push_route(pickup);
                    }
                }
            }
            Direction::Idle => {}
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use elevator_core::SimMillis;

    fn cfg() -> BuildingConfig {
        BuildingConfig::default()
    }

    #[test]
    fn escalation_triggers_at_30_seconds() {
        let mut book = RequestBook::new();
        let id = book
            .insert_pending(Request::new_external(SimMillis::ZERO, 1, 5, false, &cfg()).unwrap());
        let clock = SimClock::new(1.0);
        refresh_priorities(SimMillis(30_000), &clock, &mut book, &cfg());
        let r = book.get(id).unwrap();
        assert!(r.escalated);
        assert!(r.priority >= 1.0 + 30.0 + 2000.0 - 1.0);
    }

    #[test]
    fn escalation_does_not_trigger_before_30_seconds() {
        let mut book = RequestBook::new();
        let id = book
            .insert_pending(Request::new_external(SimMillis::ZERO, 1, 5, false, &cfg()).unwrap());
        let clock = SimClock::new(1.0);
        refresh_priorities(SimMillis(29_999), &clock, &mut book, &cfg());
        assert!(!book.get(id).unwrap().escalated);
    }

    #[test]
    fn morning_rush_multiplies_lobby_priority() {
        let mut book = RequestBook::new();
        let id = book.insert_pending(
            Request::new_external(SimMillis::ZERO, 1, 5, true, &cfg()).unwrap(),
        );
        // Not in the rush window, but the request carries the flag itself.
        let clock = SimClock::new(1.0);
        refresh_priorities(SimMillis(1000), &clock, &mut book, &cfg());
        let r = book.get(id).unwrap();
        let expected = (1.0 + 1.0) * 1.5;
        assert!((r.priority - expected).abs() < 1e-6);
    }

    #[test]
    fn idle_elevator_is_assigned_nearest_pending_request() {
        let cfg = cfg();
        let mut elevators = vec![
            Elevator::new(ElevatorId::new(0), 1, 6),
            Elevator::new(ElevatorId::new(1), 10, 6),
        ];
        let mut book = RequestBook::new();
        let id = book.insert_pending(
            Request::new_external(SimMillis::ZERO, 9, 2, false, &cfg).unwrap(),
        );
        assign_idle(SimMillis::ZERO, &mut elevators, &mut book, &cfg, &ScoringWeights::default());
        let r = book.get(id).unwrap();
        assert_eq!(r.assigned_to, Some(ElevatorId::new(1)));
        assert_eq!(elevators[1].route, vec![9, 2]);
    }

    #[test]
    fn busy_elevator_batches_intra_trip_pickup() {
        let cfg = cfg();
        let mut elevators = vec![Elevator::new(ElevatorId::new(0), 3, 6)];
        elevators[0].push_route(8);
        elevators[0].direction = Direction::Up;
        let mut book = RequestBook::new();
        let id = book.insert_pending(
            Request::new_external(SimMillis::ZERO, 5, 1, false, &cfg).unwrap(),
        );
        batch_busy(&mut elevators, &mut book, &cfg);
        assert_eq!(book.get(id).unwrap().assigned_to, Some(ElevatorId::new(0)));
        assert_eq!(elevators[0].route, vec![8, 5]);
    }

    #[test]
    fn busy_elevator_ignores_pickup_outside_trip_span() {
        let cfg = cfg();
        let mut elevators = vec![Elevator::new(ElevatorId::new(0), 3, 6)];
        elevators[0].push_route(8);
        elevators[0].direction = Direction::Up;
        let mut book = RequestBook::new();
        let id = book.insert_pending(
            Request::new_external(SimMillis::ZERO, 11, 1, false, &cfg).unwrap(),
        );
        batch_busy(&mut elevators, &mut book, &cfg);
        assert!(book.get(id).unwrap().assigned_to.is_none());
        assert_eq!(elevators[0].route, vec![8]);
    }

    // §8 laws, randomized command traces: a scheduler pass may reassign
    // requests but may never duplicate a floor within a route, nor change
    // how many requests live in the book.
    proptest::proptest! {
        #[test]
        fn run_tick_never_duplicates_a_route_floor_or_loses_a_request(
            n_floors in 2u32..16,
            n_elevators in 1usize..5,
            starts in proptest::collection::vec(1u32..16, 1..5),
            requests in proptest::collection::vec((1u32..16, 1u32..16), 0..8),
        ) {
            let cfg = BuildingConfig { n_floors, ..BuildingConfig::default() };
            let mut elevators: Vec<Elevator> = starts
                .into_iter()
                .take(n_elevators.max(1))
                .map(|start| Elevator::new(ElevatorId::new(0), start.min(n_floors).max(1), 6))
                .enumerate()
                .map(|(i, mut e)| { e.id = ElevatorId::new(i as u32); e })
                .collect();
            if elevators.is_empty() {
                elevators.push(Elevator::new(ElevatorId::new(0), 1, 6));
            }

            let mut book = RequestBook::new();
            let mut inserted = 0usize;
            for (origin, destination) in requests {
                let origin = origin.min(n_floors).max(1);
                let destination = destination.min(n_floors).max(1);
                if origin == destination {
                    continue;
                }
                if let Ok(request) = Request::new_external(SimMillis::ZERO, origin, destination, false, &cfg) {
                    book.insert_pending(request);
                    inserted += 1;
                }
            }

            let policy = GreedyPolicy::default();
            let clock = SimClock::new(1.0);
            policy.run_tick(SimMillis::ZERO, &clock, &mut elevators, &mut book, &cfg);

            for elevator in &elevators {
                let mut seen = std::collections::HashSet::new();
                for &floor in &elevator.route {
                    proptest::prop_assert!(seen.insert(floor), "duplicate floor {} in route", floor);
                }
            }
            proptest::prop_assert_eq!(book.pending().count(), inserted);
        }
    }
}
