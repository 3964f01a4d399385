//! Building/fleet configuration — immutable while the engine is running.

/// Static configuration for a simulation run. Re-created wholesale on
/// `reconfig`/`reset`; never mutated in place while the engine is ticking.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default, rename_all = "camelCase"))]
pub struct BuildingConfig {
    pub n_elevators: u32,
    pub n_floors: u32,
    /// Sim-ms to travel one floor at full speed.
    pub time_per_floor_ms: i64,
    /// Sim-ms a door stays open for boarding before it may close.
    pub door_dwell_ms: i64,
    /// The floor requests bias toward during the morning-rush window.
    pub lobby_floor: u32,
    /// Passenger capacity per car.
    pub capacity: u32,
}

impl Default for BuildingConfig {
    fn default() -> Self {
        Self {
            n_elevators: 3,
            n_floors: 12,
            time_per_floor_ms: 1000,
            door_dwell_ms: 2000,
            lobby_floor: 1,
            capacity: 6,
        }
    }
}

impl BuildingConfig {
    #[inline]
    pub fn floor_in_range(&self, floor: u32) -> bool {
        (1..=self.n_floors).contains(&floor)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_spec() {
        let cfg = BuildingConfig::default();
        assert_eq!(cfg.n_elevators, 3);
        assert_eq!(cfg.n_floors, 12);
        assert_eq!(cfg.time_per_floor_ms, 1000);
        assert_eq!(cfg.door_dwell_ms, 2000);
        assert_eq!(cfg.lobby_floor, 1);
        assert_eq!(cfg.capacity, 6);
    }

    #[test]
    fn floor_in_range_boundaries() {
        let cfg = BuildingConfig::default();
        assert!(cfg.floor_in_range(1));
        assert!(cfg.floor_in_range(12));
        assert!(!cfg.floor_in_range(0));
        assert!(!cfg.floor_in_range(13));
    }
}
