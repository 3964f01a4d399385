//! `elevator-core` — foundational types for the elevator-sim dispatch framework.
//!
//! This crate is a dependency of every other crate in the workspace. It has
//! no crate-local dependencies and a minimal external footprint (`rand`,
//! `thiserror`, plus optional `serde`).
//!
//! # What lives here
//!
//! | Module     | Contents                                      |
//! |------------|------------------------------------------------|
//! | [`ids`]    | `ElevatorId`                                  |
//! | [`time`]   | `SimMillis`, `SimClock`                       |
//! | [`rng`]    | `SimRng` — the engine's single seedable RNG   |
//! | [`config`] | `BuildingConfig`                               |
//! | [`error`]  | `CoreError`, `CoreResult`                     |
//!
//! # Feature flags
//!
//! | Flag    | Effect                                               |
//! |---------|-------------------------------------------------------|
//! | `serde` | Adds `Serialize`/`Deserialize` to all public types.   |

pub mod config;
pub mod error;
pub mod ids;
pub mod rng;
pub mod time;

pub use config::BuildingConfig;
pub use error::{CoreError, CoreResult};
pub use ids::ElevatorId;
pub use rng::SimRng;
pub use time::{SimClock, SimMillis};
