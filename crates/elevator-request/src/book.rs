//! `RequestBook` — the pending/served request ledger.
//!
//! The pending set is an unordered `HashMap` (assignment order doesn't
//! matter; lookups by id do). The served archive is an append-only `Vec`
//! that grows monotonically until [`RequestBook::reset`].

use std::collections::HashMap;

use crate::request::{Request, RequestId};

#[derive(Default)]
pub struct RequestBook {
    pending: HashMap<RequestId, Request>,
    served: Vec<Request>,
}

impl RequestBook {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert_pending(&mut self, request: Request) -> RequestId {
        let id = request.id;
        self.pending.insert(id, request);
        id
    }

    pub fn get(&self, id: RequestId) -> Option<&Request> {
        self.pending.get(&id)
    }

    pub fn get_mut(&mut self, id: RequestId) -> Option<&mut Request> {
        self.pending.get_mut(&id)
    }

    /// Snapshot of pending request ids, for sweeps that must not mutate
    /// `self.pending` while iterating (§4.3: "sweeps operate on a snapshot").
    pub fn pending_ids(&self) -> Vec<RequestId> {
        self.pending.keys().copied().collect()
    }

    pub fn pending(&self) -> impl Iterator<Item = &Request> {
        self.pending.values()
    }

    pub fn pending_mut(&mut self) -> impl Iterator<Item = &mut Request> {
        self.pending.values_mut()
    }

    pub fn pending_count(&self) -> usize {
        self.pending.len()
    }

    pub fn served(&self) -> &[Request] {
        &self.served
    }

    pub fn served_count(&self) -> usize {
        self.served.len()
    }

    /// Move `id` from pending to the served archive. No-op if it is not
    /// currently pending (defensive; callers only invoke this once a
    /// dropoff has just been recorded).
    pub fn archive(&mut self, id: RequestId) {
        if let Some(request) = self.pending.remove(&id) {
            self.served.push(request);
        }
    }

    /// Stop-the-world reset: clears pending and served state. The caller is
    /// responsible for resetting the clock and elevators alongside this.
    pub fn reset(&mut self) {
        self.pending.clear();
        self.served.clear();
    }
}
