//! Periodic spawner and one-shot scenario batches (§4.7).
//!
//! Neither function touches the engine directly — each returns plain
//! `(origin, destination, morning_rush)` tuples that [`crate::engine::Engine`]
//! turns into [`elevator_request::Request`]s, so the random-choice logic here
//! stays independent of the request book and is easy to exercise with a
//! fixed-seed [`SimRng`][elevator_core::SimRng] in tests.

use elevator_core::{BuildingConfig, SimClock, SimRng};

/// A single synthetic request spec, not yet validated or timestamped.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SpawnSpec {
    pub origin: u32,
    pub destination: u32,
    pub morning_rush: bool,
}

/// Minimum real-time interval between periodic spawns, in ms.
const MIN_SPAWN_INTERVAL_MS: u64 = 200;

/// `interval = max(200ms, floor(60_000 / freqPerMinute))` of real time.
/// Returns `None` if `freq_per_minute <= 0` (spawner inactive).
pub fn spawn_interval_ms(freq_per_minute: f64) -> Option<u64> {
    if freq_per_minute <= 0.0 {
        return None;
    }
    let raw = (60_000.0 / freq_per_minute).floor() as u64;
    Some(raw.max(MIN_SPAWN_INTERVAL_MS))
}

/// One periodic-spawner fire. In the morning-rush window, 70% of fires are
/// lobby → random upper floor (flagged `morning_rush`); the rest — in or out
/// of the window — are uniform random `(origin, destination)` with
/// `origin != destination`.
pub fn periodic_spawn(rng: &mut SimRng, clock: &SimClock, cfg: &BuildingConfig) -> SpawnSpec {
    if clock.is_morning_rush() && rng.gen_bool(0.7) {
        let destination = uniform_upper_floor(rng, cfg);
        return SpawnSpec { origin: cfg.lobby_floor, destination, morning_rush: true };
    }
    uniform_pair(rng, cfg)
}

/// Batch-insert requests for a named scenario. `count` is already validated
/// against the `> 250` cap by the command boundary before this is called.
pub fn scenario_requests(rng: &mut SimRng, name: &str, count: u32, cfg: &BuildingConfig) -> Vec<SpawnSpec> {
    match name {
        "morningRush" => {
            let rush_count = (count as f64 * 0.7).ceil() as u32;
            let mut specs = Vec::with_capacity(count as usize);
            for _ in 0..rush_count {
                let destination = uniform_upper_floor(rng, cfg);
                specs.push(SpawnSpec { origin: cfg.lobby_floor, destination, morning_rush: true });
            }
            for _ in rush_count..count {
                specs.push(uniform_pair(rng, cfg));
            }
            specs
        }
        "randomBurst" => (0..count).map(|_| uniform_pair(rng, cfg)).collect(),
        _ => (0..10).map(|_| uniform_pair(rng, cfg)).collect(),
    }
}

pub const MORNING_RUSH_DEFAULT_COUNT: u32 = 50;
pub const RANDOM_BURST_DEFAULT_COUNT: u32 = 100;
pub const SCENARIO_COUNT_CAP: u32 = 250;

/// A floor strictly above the lobby, uniformly chosen. Falls back to the
/// lobby floor itself in a degenerate one-floor building.
fn uniform_upper_floor(rng: &mut SimRng, cfg: &BuildingConfig) -> u32 {
    if cfg.lobby_floor >= cfg.n_floors {
        return cfg.lobby_floor;
    }
    rng.gen_range_inclusive((cfg.lobby_floor + 1) as i32, cfg.n_floors as i32) as u32
}

/// Uniform random `(origin, destination)` with `origin != destination`.
fn uniform_pair(rng: &mut SimRng, cfg: &BuildingConfig) -> SpawnSpec {
    let origin = rng.gen_range_inclusive(1, cfg.n_floors as i32) as u32;
    let mut destination = origin;
    while destination == origin {
        destination = rng.gen_range_inclusive(1, cfg.n_floors as i32) as u32;
    }
    SpawnSpec { origin, destination, morning_rush: false }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cfg() -> BuildingConfig {
        BuildingConfig::default()
    }

    #[test]
    fn spawn_interval_floors_and_has_a_floor_of_200ms() {
        assert_eq!(spawn_interval_ms(60.0), Some(1000));
        assert_eq!(spawn_interval_ms(600.0), Some(200)); // 100ms raw, floored to 200
        assert_eq!(spawn_interval_ms(0.0), None);
        assert_eq!(spawn_interval_ms(-5.0), None);
    }

    #[test]
    fn uniform_pair_never_produces_equal_floors() {
        let mut rng = SimRng::new(1);
        let cfg = cfg();
        for _ in 0..500 {
            let spec = uniform_pair(&mut rng, &cfg);
            assert_ne!(spec.origin, spec.destination);
            assert!(cfg.floor_in_range(spec.origin));
            assert!(cfg.floor_in_range(spec.destination));
        }
    }

    #[test]
    fn morning_rush_scenario_splits_by_point_seven() {
        let mut rng = SimRng::new(2);
        let specs = scenario_requests(&mut rng, "morningRush", 50, &cfg());
        assert_eq!(specs.len(), 50);
        let rush_count = specs.iter().filter(|s| s.morning_rush).count();
        assert_eq!(rush_count, 35); // ceil(0.7 * 50)
        for spec in specs.iter().take(35) {
            assert_eq!(spec.origin, cfg().lobby_floor);
        }
    }

    #[test]
    fn random_burst_scenario_is_all_uniform() {
        let mut rng = SimRng::new(3);
        let specs = scenario_requests(&mut rng, "randomBurst", 100, &cfg());
        assert_eq!(specs.len(), 100);
        assert!(specs.iter().all(|s| !s.morning_rush));
    }

    #[test]
    fn unknown_scenario_name_yields_ten_uniform_requests() {
        let mut rng = SimRng::new(4);
        let specs = scenario_requests(&mut rng, "bogus", 999, &cfg());
        assert_eq!(specs.len(), 10);
    }
}
