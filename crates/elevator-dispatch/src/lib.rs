//! `elevator-dispatch` — the greedy multi-criteria scheduler.
//!
//! # Crate layout
//!
//! | Module        | Contents                                          |
//! |---------------|----------------------------------------------------|
//! | [`scoring`]    | ETA estimator, `ScoringWeights`, the `score` function |
//! | [`scheduler`]  | `DispatchPolicy` trait, `GreedyPolicy`, priority refresh, assignment passes |

pub mod scheduler;
pub mod scoring;

pub use scheduler::{DispatchPolicy, GreedyPolicy};
pub use scoring::{estimate_eta, score, ScoringWeights};
