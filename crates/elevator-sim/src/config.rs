//! `EngineConfig` — the full set of knobs `reconfig` may replace wholesale.

use elevator_core::BuildingConfig;
use elevator_dispatch::ScoringWeights;

/// Everything [`crate::engine::Engine::reconfig`] replaces in one shot:
/// the building/fleet shape plus the scheduler's tunable scoring weights.
/// Kept as a single `Clone`-able struct with a `Default` impl, constructed
/// directly by library callers and tests — the command surface is small
/// enough that a dedicated config-file loader would be pure ceremony.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default, rename_all = "camelCase"))]
pub struct EngineConfig {
    pub building: BuildingConfig,
    pub scoring: ScoringWeights,
    /// Periodic-spawner rate (§6 `reconfig`: "optionally start spawner if
    /// requestFreq > 0"). `<= 0` leaves the spawner inactive.
    pub request_freq: f64,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self { building: BuildingConfig::default(), scoring: ScoringWeights::default(), request_freq: 0.0 }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_matches_building_and_scoring_defaults() {
        let cfg = EngineConfig::default();
        assert_eq!(cfg.building, BuildingConfig::default());
        assert_eq!(cfg.building.n_elevators, 3);
        assert_eq!(cfg.request_freq, 0.0);
    }
}
