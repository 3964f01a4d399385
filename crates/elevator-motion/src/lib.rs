//! `elevator-motion` — per-car motion and door state machine.
//!
//! # Crate layout
//!
//! | Module      | Contents                                    |
//! |-------------|----------------------------------------------|
//! | [`state`]   | `Direction`, `DoorState`, `MotionEvent`       |
//! | [`elevator`]| `Elevator` and its `step`/`finish_arrival` motion model |

pub mod elevator;
pub mod state;

pub use elevator::Elevator;
pub use state::{Direction, DoorState, MotionEvent};
