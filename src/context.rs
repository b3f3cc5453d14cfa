//! Scope identities and drop-driven reclamation notification.

use crate::janitor::ReclaimQueue;
use core::fmt;
use parking_lot::Mutex;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Weak};

/// Identity of a caller scope. Identities are assigned from a process-wide
/// counter and never reused, so a stale id in a reclaim queue can never alias
/// a newer scope.
pub(crate) type ScopeId = u64;

/// Identity shared by every caller without a specific scope.
pub(crate) const NO_CONTEXT_ID: ScopeId = 0;

static NEXT_SCOPE_ID: AtomicU64 = AtomicU64::new(1);

pub(crate) struct ContextCore {
    id: ScopeId,
    // Reclaim queues to notify when this scope is dropped. Held weakly so a
    // cache that died first does not get pinned by scopes that outlive it.
    watchers: Mutex<Vec<Weak<ReclaimQueue>>>,
}

impl ContextCore {
    pub(crate) fn id(&self) -> ScopeId {
        self.id
    }

    /// Subscribe a reclaim queue to this scope's drop notification.
    /// Idempotent per queue; dead watcher slots are compacted on the way.
    pub(crate) fn watch(&self, queue: &Arc<ReclaimQueue>) {
        let probe = Arc::downgrade(queue);
        let mut watchers = self.watchers.lock();
        watchers.retain(|w| w.strong_count() > 0);
        if !watchers.iter().any(|w| w.ptr_eq(&probe)) {
            watchers.push(probe);
        }
    }
}

impl Drop for ContextCore {
    fn drop(&mut self) {
        // Last handle is gone: deliver the reclamation notification to every
        // watcher that is still alive.
        for w in self.watchers.get_mut().drain(..) {
            if let Some(queue) = w.upgrade() {
                queue.push(self.id);
            }
        }
    }
}

/// An opaque handle for a caller's execution scope.
///
/// Clones share one identity; the scope is considered reclaimed when the last
/// clone is dropped, at which point every cache holding an entry for it is
/// notified through its reclaim queue.
#[derive(Clone)]
pub struct Context {
    core: Arc<ContextCore>,
}

impl Context {
    pub fn new() -> Self {
        Self {
            core: Arc::new(ContextCore {
                id: NEXT_SCOPE_ID.fetch_add(1, Ordering::Relaxed),
                watchers: Mutex::new(Vec::new()),
            }),
        }
    }

    /// Stable identity of this scope, unique for the life of the process.
    pub fn id(&self) -> u64 {
        self.core.id
    }

    pub(crate) fn core(&self) -> &Arc<ContextCore> {
        &self.core
    }
}

impl Default for Context {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for Context {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("Context").field(&self.core.id).finish()
    }
}
