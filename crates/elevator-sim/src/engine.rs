//! `Engine` — the single owned simulation handle (§9 design notes: "mutable
//! global simulation object → engine handle"). Every command handler and
//! the tick driver operate on an explicit `&mut Engine`; there is no
//! process-wide singleton.

use std::panic::{self, AssertUnwindSafe};

use elevator_core::{ElevatorId, SimClock, SimMillis, SimRng};
use elevator_dispatch::{DispatchPolicy, GreedyPolicy};
use elevator_metrics::{MetricsAggregator, MetricsSnapshot};
use elevator_motion::{Elevator, MotionEvent};
use elevator_request::{Request, RequestBook, RequestKind};
use tracing::{debug, error, info, warn};

use crate::arrival::{add_internal_request, handle_arrival};
use crate::config::EngineConfig;
use crate::error::{EngineError, EngineResult};
use crate::observer::EngineObserver;
use crate::snapshot::Snapshot;
use crate::spawner::{
    periodic_spawn, scenario_requests, spawn_interval_ms, MORNING_RUSH_DEFAULT_COUNT,
    RANDOM_BURST_DEFAULT_COUNT, SCENARIO_COUNT_CAP,
};

/// The shape of `addManualRequest` (§6): a tagged spec, not a constructed
/// `Request` — validation and assignment happen inside
/// [`Engine::add_manual_request`].
#[derive(Clone, Debug)]
pub struct ManualRequestSpec {
    pub kind: RequestKind,
    pub origin: Option<u32>,
    pub destination: u32,
    pub elevator_id: Option<ElevatorId>,
    pub is_morning_rush: bool,
}

pub struct Engine {
    config: EngineConfig,
    seed: u64,
    clock: SimClock,
    elevators: Vec<Elevator>,
    book: RequestBook,
    rng: SimRng,
    policy: GreedyPolicy,
    metrics: MetricsAggregator,
    running: bool,
    /// Requests per minute for the periodic spawner; `<= 0` means inactive.
    request_freq_per_minute: f64,
    /// Real-time accumulator driving the periodic spawner, independent of
    /// the (speed-scaled) sim clock — §4.7 intervals are real-time.
    spawn_accum_ms: f64,
}

impl Engine {
    /// Construct a fresh, stopped engine from `config`, seeded for
    /// deterministic randomness (§9 design notes).
    pub fn new(config: EngineConfig, seed: u64) -> Self {
        let elevators = build_elevators(&config);
        Self {
            config,
            seed,
            clock: SimClock::default(),
            elevators,
            book: RequestBook::new(),
            rng: SimRng::new(seed),
            policy: GreedyPolicy::default(),
            metrics: MetricsAggregator::new(),
            running: false,
            request_freq_per_minute: 0.0,
            spawn_accum_ms: 0.0,
        }
    }

    // ── Command surface (§6) ────────────────────────────────────────────

    /// Idempotent: a no-op if already running.
    pub fn start(&mut self) {
        if !self.running {
            self.running = true;
            info!("engine started");
        }
    }

    /// Idempotent: a no-op if already stopped.
    pub fn stop(&mut self) {
        if self.running {
            self.running = false;
            info!("engine stopped");
        }
    }

    /// Stop, reconstruct the clock/elevators/request-book/rng/metrics from
    /// the current config, and emit one snapshot.
    pub fn reset(&mut self, observer: &mut impl EngineObserver) {
        self.stop();
        self.elevators = build_elevators(&self.config);
        self.clock = SimClock::default();
        self.book.reset();
        self.rng = SimRng::new(self.seed);
        self.metrics.reset();
        self.spawn_accum_ms = 0.0;
        info!("engine reset");
        observer.on_snapshot(&self.snapshot());
    }

    pub fn set_speed(&mut self, speed: f64) -> EngineResult<()> {
        self.clock.set_speed(speed)?;
        Ok(())
    }

    /// Only permitted while stopped; re-initializes elevators/book/clock
    /// from the merged config (the caller — the command boundary — is
    /// responsible for merging partial input onto the current config
    /// before calling this, per §6A's request-validation middleware).
    /// Also takes over the spawner rate from `new_config.request_freq`,
    /// starting the spawner when it is `> 0` (§6 `reconfig`).
    pub fn reconfig(&mut self, new_config: EngineConfig) -> EngineResult<()> {
        if self.running {
            return Err(EngineError::State("cannot reconfig while running".into()));
        }
        if new_config.building.n_elevators == 0 {
            return Err(EngineError::InvalidInput("nElevators must be at least 1".into()));
        }
        if new_config.building.n_floors == 0 {
            return Err(EngineError::InvalidInput("nFloors must be at least 1".into()));
        }
        self.config = new_config;
        self.policy = GreedyPolicy { weights: self.config.scoring };
        self.elevators = build_elevators(&self.config);
        self.clock = SimClock::default();
        self.book.reset();
        self.rng = SimRng::new(self.seed);
        self.metrics.reset();
        self.request_freq_per_minute = self.config.request_freq;
        self.spawn_accum_ms = 0.0;
        info!(
            n_elevators = self.config.building.n_elevators,
            request_freq = self.request_freq_per_minute,
            "engine reconfigured"
        );
        Ok(())
    }

    /// `addManualRequest` (§6): returns the constructed request on success.
    pub fn add_manual_request(&mut self, spec: ManualRequestSpec) -> EngineResult<Request> {
        let now = self.clock.now();
        match spec.kind {
            RequestKind::External => {
                let origin = spec
                    .origin
                    .ok_or_else(|| EngineError::InvalidInput("external request requires an origin floor".into()))?;
                let request = Request::new_external(now, origin, spec.destination, spec.is_morning_rush, &self.config.building)?;
                self.book.insert_pending(request.clone());
                debug!(request = %request.id, origin, destination = spec.destination, "external request submitted");
                Ok(request)
            }
            RequestKind::Internal => {
                let elevator_id = spec
                    .elevator_id
                    .ok_or_else(|| EngineError::InvalidInput("internal request requires an elevatorId".into()))?;
                let elevator = self
                    .elevators
                    .iter_mut()
                    .find(|e| e.id == elevator_id)
                    .ok_or(EngineError::NotFound(elevator_id))?;
                let request =
                    add_internal_request(elevator, spec.destination, now, &self.config.building, &mut self.book)?;
                debug!(request = %request.id, elevator = %elevator_id, destination = spec.destination, "internal request submitted");
                Ok(request)
            }
        }
    }

    /// `spawnScenario(name, count?)` (§4.7): rejects `count > 250` without
    /// mutating engine state.
    pub fn spawn_scenario(&mut self, name: &str, count: Option<u32>) -> EngineResult<usize> {
        let count = count.unwrap_or(match name {
            "morningRush" => MORNING_RUSH_DEFAULT_COUNT,
            "randomBurst" => RANDOM_BURST_DEFAULT_COUNT,
            _ => 10,
        });
        if count > SCENARIO_COUNT_CAP {
            return Err(EngineError::InvalidInput(format!(
                "scenario count {count} exceeds the cap of {SCENARIO_COUNT_CAP}"
            )));
        }
        let specs = scenario_requests(&mut self.rng, name, count, &self.config.building);
        let now = self.clock.now();
        let mut inserted = 0usize;
        for spec in specs {
            match Request::new_external(now, spec.origin, spec.destination, spec.morning_rush, &self.config.building) {
                Ok(request) => {
                    self.book.insert_pending(request);
                    inserted += 1;
                }
                Err(err) => warn!(%err, "scenario produced an invalid request spec, skipping"),
            }
        }
        info!(scenario = name, count = inserted, "scenario spawned");
        Ok(inserted)
    }

    /// `setRequestFrequency(freqPerMinute)`: configures the periodic
    /// spawner. A value `<= 0` deactivates it; no other validation per §4.7.
    pub fn set_request_frequency(&mut self, freq_per_minute: f64) {
        self.request_freq_per_minute = freq_per_minute;
        self.spawn_accum_ms = 0.0;
    }

    pub fn snapshot(&self) -> Snapshot {
        Snapshot {
            time: self.clock.now(),
            elevators: self.elevators.clone(),
            pending_requests: self.book.pending().cloned().collect(),
            running: self.running,
        }
    }

    pub fn metrics_snapshot(&self) -> MetricsSnapshot {
        self.metrics.snapshot(self.clock.now(), &self.elevators, &self.book)
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    /// The configuration currently in effect. Used by the transport layer to
    /// merge a partial `reconfig` body onto the live config before replacing
    /// it wholesale (§6 `reconfig`).
    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    // ── Tick driver (§4.6) ───────────────────────────────────────────────

    /// Advance the engine by one tick given `real_dt_ms` of elapsed
    /// real time. No-op (other than the spawner-inactive check) if the
    /// engine is stopped. Never panics out of the tick: scheduler and
    /// metrics failures are caught and logged (§7 TRANSIENT) and never halt
    /// the loop.
    pub fn tick(&mut self, real_dt_ms: f64, observer: &mut impl EngineObserver) {
        if !self.running {
            return;
        }

        self.run_spawner(real_dt_ms);

        let sim_dt = self.clock.advance(real_dt_ms);
        let now = self.clock.now();

        // Motion in elevator id order (§5 ordering guarantee).
        for elevator in &mut self.elevators {
            let event = elevator.step(now, sim_dt, &self.config.building);
            if let MotionEvent::Arrived { floor } = event {
                handle_arrival(elevator, floor, now, &mut self.book);
                elevator.finish_arrival();
            }
        }

        // Scheduler: caught so a logic bug here degrades to "no new
        // assignments this tick" rather than killing the engine (§7
        // TRANSIENT).
        let policy = &self.policy;
        let elevators = &mut self.elevators;
        let book = &mut self.book;
        let clock = &self.clock;
        let cfg = &self.config.building;
        let scheduler_result = panic::catch_unwind(AssertUnwindSafe(|| {
            policy.run_tick(now, clock, elevators, book, cfg);
        }));
        if scheduler_result.is_err() {
            error!("scheduler pass failed; skipping assignment this tick");
        }

        for elevator in &mut self.elevators {
            elevator.accrue_utilization(sim_dt);
        }

        let metrics = &mut self.metrics;
        let elevators = &self.elevators;
        let book = &self.book;
        let sampler_result = panic::catch_unwind(AssertUnwindSafe(|| {
            metrics.record_tick(now, elevators, book);
        }));
        if sampler_result.is_err() {
            error!("utilization sampler failed this tick");
        }

        observer.on_snapshot(&self.snapshot());
    }

    fn run_spawner(&mut self, real_dt_ms: f64) {
        if !self.running {
            return;
        }
        let Some(interval_ms) = spawn_interval_ms(self.request_freq_per_minute) else {
            return;
        };
        self.spawn_accum_ms += real_dt_ms;
        while self.spawn_accum_ms >= interval_ms as f64 {
            self.spawn_accum_ms -= interval_ms as f64;
            let spec = periodic_spawn(&mut self.rng, &self.clock, &self.config.building);
            let now = self.clock.now();
            match Request::new_external(now, spec.origin, spec.destination, spec.morning_rush, &self.config.building) {
                Ok(request) => {
                    self.book.insert_pending(request);
                }
                Err(err) => warn!(%err, "periodic spawner produced an invalid request, skipping"),
            }
        }
    }
}

fn build_elevators(config: &EngineConfig) -> Vec<Elevator> {
    (0..config.building.n_elevators)
        .map(|i| Elevator::new(ElevatorId::new(i), config.building.lobby_floor, config.building.capacity))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::observer::NoopObserver;
    use elevator_core::BuildingConfig;

    fn fast_cfg() -> EngineConfig {
        EngineConfig { building: BuildingConfig::default(), scoring: Default::default(), request_freq: 0.0 }
    }

    #[test]
    fn start_is_idempotent() {
        let mut engine = Engine::new(fast_cfg(), 1);
        engine.start();
        assert!(engine.is_running());
        engine.start();
        assert!(engine.is_running());
    }

    #[test]
    fn stop_is_idempotent() {
        let mut engine = Engine::new(fast_cfg(), 1);
        engine.start();
        engine.stop();
        assert!(!engine.is_running());
        engine.stop();
        assert!(!engine.is_running());
    }

    #[test]
    fn reconfig_rejected_while_running() {
        let mut engine = Engine::new(fast_cfg(), 1);
        engine.start();
        let err = engine.reconfig(fast_cfg()).unwrap_err();
        assert!(matches!(err, EngineError::State(_)));
    }

    #[test]
    fn reconfig_adopts_request_freq_and_restarts_spawner_accumulator() {
        let mut engine = Engine::new(fast_cfg(), 1);
        engine.set_request_frequency(5.0);
        engine.spawn_accum_ms = 123.0;

        let mut cfg = fast_cfg();
        cfg.request_freq = 30.0;
        engine.reconfig(cfg).unwrap();

        assert_eq!(engine.request_freq_per_minute, 30.0);
        assert_eq!(engine.spawn_accum_ms, 0.0);
    }

    #[test]
    fn single_external_request_is_served_end_to_end() {
        let mut engine = Engine::new(fast_cfg(), 7);
        engine.start();
        engine
            .add_manual_request(ManualRequestSpec {
                kind: RequestKind::External,
                origin: Some(1),
                destination: 5,
                elevator_id: None,
                is_morning_rush: false,
            })
            .unwrap();

        let mut observer = NoopObserver;
        // 1000ms/floor, 2000ms dwell; drive enough ticks of 1000ms to
        // complete a 1->5 trip: assignment, 4 floors of travel, dwell, pickup
        // already at floor 1 (same-floor boost), dropoff at floor 5.
        for _ in 0..12 {
            engine.tick(1000.0, &mut observer);
        }
        let metrics = engine.metrics_snapshot();
        assert_eq!(metrics.served_count, 1);
    }

    #[test]
    fn full_capacity_seventh_internal_request_is_rejected() {
        let mut engine = Engine::new(fast_cfg(), 3);
        engine.start();
        let elevator_id = ElevatorId::new(0);
        // Capacity defaults to 6: floors 2..=7 fill the car exactly.
        for floor in 2..=7 {
            engine
                .add_manual_request(ManualRequestSpec {
                    kind: RequestKind::Internal,
                    origin: None,
                    destination: floor,
                    elevator_id: Some(elevator_id),
                    is_morning_rush: false,
                })
                .unwrap();
        }
        let err = engine
            .add_manual_request(ManualRequestSpec {
                kind: RequestKind::Internal,
                origin: None,
                destination: 8,
                elevator_id: Some(elevator_id),
                is_morning_rush: false,
            })
            .unwrap_err();
        assert!(matches!(err, EngineError::Full(_)));
        assert_eq!(engine.snapshot().elevators[0].passenger_count, 6);
    }

    #[test]
    fn reset_clears_served_count_pending_and_simtime() {
        let mut engine = Engine::new(fast_cfg(), 11);
        engine.start();
        engine
            .add_manual_request(ManualRequestSpec {
                kind: RequestKind::External,
                origin: Some(1),
                destination: 5,
                elevator_id: None,
                is_morning_rush: false,
            })
            .unwrap();
        let mut observer = NoopObserver;
        for _ in 0..12 {
            engine.tick(1000.0, &mut observer);
        }
        assert_eq!(engine.metrics_snapshot().served_count, 1);

        engine.reset(&mut observer);
        assert!(!engine.is_running());
        assert_eq!(engine.snapshot().time, SimMillis::ZERO);
        assert_eq!(engine.snapshot().pending_requests.len(), 0);
        assert_eq!(engine.metrics_snapshot().served_count, 0);
        assert!(engine.snapshot().elevators.iter().all(|e| e.current_floor == 1));
    }

    #[test]
    fn scenario_count_above_cap_is_rejected_without_mutation() {
        let mut engine = Engine::new(fast_cfg(), 5);
        engine.start();
        let err = engine.spawn_scenario("randomBurst", Some(251)).unwrap_err();
        assert!(matches!(err, EngineError::InvalidInput(_)));
        assert_eq!(engine.snapshot().pending_requests.len(), 0);
    }

    #[test]
    fn morning_rush_scenario_inserts_requested_count() {
        let mut engine = Engine::new(fast_cfg(), 9);
        engine.start();
        let inserted = engine.spawn_scenario("morningRush", Some(20)).unwrap();
        assert_eq!(inserted, 20);
        assert_eq!(engine.snapshot().pending_requests.len(), 20);
    }
}
