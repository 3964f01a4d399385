//! `elevator-sim` — the tick-driver orchestrator for the elevator dispatch
//! framework: the [`Engine`] handle, arrival handling, the request spawner
//! and scenarios, the command surface, and the snapshot/observer seam a
//! transport layer hangs off of.
//!
//! # Crate layout
//!
//! | Module       | Contents                                              |
//! |--------------|--------------------------------------------------------|
//! | [`config`]   | `EngineConfig`                                        |
//! | [`engine`]   | `Engine`, `ManualRequestSpec` — the owned engine handle and command surface |
//! | [`arrival`]  | Pickup/dropoff sweep + internal-request fast path (§4.3) |
//! | [`spawner`]  | Periodic spawner and one-shot scenarios (§4.7)        |
//! | [`snapshot`] | `Snapshot` — the `snapshot()` command's return shape  |
//! | [`observer`] | `EngineObserver`, `NoopObserver` — the push-channel seam |
//! | [`error`]    | `EngineError`, `EngineResult<T>`, `ErrorKind`          |
//!
//! This crate has no transport or async-runtime dependency: the tick driver
//! itself is just [`Engine::tick`], called with a real-time delta by
//! whatever periodic timer the application layer owns (§6A).

pub mod arrival;
pub mod config;
pub mod engine;
pub mod error;
pub mod observer;
pub mod snapshot;
pub mod spawner;

pub use config::EngineConfig;
pub use engine::{Engine, ManualRequestSpec};
pub use error::{EngineError, EngineResult, ErrorKind};
pub use observer::{EngineObserver, NoopObserver};
pub use snapshot::Snapshot;
