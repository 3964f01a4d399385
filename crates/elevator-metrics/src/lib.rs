//! `elevator-metrics` — cumulative and sliding-window statistics.
//!
//! # Crate layout
//!
//! | Module         | Contents                                      |
//! |----------------|--------------------------------------------------|
//! | [`window`]      | `Sample`, `SampleWindow` — the pruned sliding buffer |
//! | [`aggregator`]  | `MetricsAggregator` — folds state into a snapshot |
//! | [`snapshot`]    | `MetricsSnapshot`                             |

pub mod aggregator;
pub mod snapshot;
pub mod window;

pub use aggregator::{MetricsAggregator, RECENT_WINDOW_MS};
pub use snapshot::MetricsSnapshot;
pub use window::{Sample, SampleWindow};
