//! Engine observer trait for the push channel and operational visibility.
//!
//! All methods have default no-op implementations so implementors only
//! override what they care about — the same shape as a tick-loop progress
//! callback, generalized here to carry the push-channel payloads a
//! WebSocket transport forwards to subscribers (§6, §6A).

use crate::error::EngineError;
use crate::snapshot::Snapshot;

/// Callbacks invoked by [`crate::engine::Engine`] at the points the push
/// channel contract (§6) requires a message.
pub trait EngineObserver {
    /// Called once per tick after the snapshot is built (§4.6 step 6) —
    /// the transport layer broadcasts `{type: "snapshot", data: ...}` here.
    fn on_snapshot(&mut self, _snapshot: &Snapshot) {}

    /// Called in response to a successful command — the transport layer
    /// sends `{type: "info", message}` here.
    fn on_info(&mut self, _message: &str) {}

    /// Called when a command is rejected — the transport layer sends
    /// `{type: "error", message}` here. Never called for `TRANSIENT`/
    /// `TRANSPORT` failures, which are logged and swallowed inside the tick
    /// loop instead (§7).
    fn on_error(&mut self, _error: &EngineError) {}
}

/// An [`EngineObserver`] that does nothing. Use when driving the engine
/// without a push-channel subscriber (e.g. in tests).
pub struct NoopObserver;

impl EngineObserver for NoopObserver {}
