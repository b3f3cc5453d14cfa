//! Reclamation queue and the inline sweep.

use crate::context::ScopeId;
use dashmap::DashMap;
use parking_lot::Mutex;
use std::collections::VecDeque;

/// Pending drop notifications for scopes that may have cache entries.
///
/// Scopes push their id here from `Drop`; the sweep drains it at the start of
/// every public cache operation. Both ends are non-blocking apart from the
/// queue mutex itself.
pub(crate) struct ReclaimQueue {
    pending: Mutex<VecDeque<ScopeId>>,
}

impl ReclaimQueue {
    pub(crate) fn new() -> Self {
        Self {
            pending: Mutex::new(VecDeque::new()),
        }
    }

    pub(crate) fn push(&self, id: ScopeId) {
        self.pending.lock().push_back(id);
    }

    pub(crate) fn poll(&self) -> Option<ScopeId> {
        self.pending.lock().pop_front()
    }
}

/// Drain every pending notification and evict the matching entries.
///
/// Runs inline on the calling thread; never blocks on discovery or I/O. With
/// a sweep at the start of each operation, at most one operation's worth of
/// dead entries can accumulate between sweeps.
pub(crate) fn sweep<V>(queue: &ReclaimQueue, entries: &DashMap<ScopeId, V>) {
    let mut swept = 0usize;
    while let Some(id) = queue.poll() {
        if entries.remove(&id).is_some() {
            swept += 1;
        }
    }
    if swept > 0 {
        tracing::trace!(swept, "swept entries for reclaimed scopes");
    }
}
