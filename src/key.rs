//! Cache keys: tagged scope identity with a construction-time hash snapshot.

use crate::context::{Context, ContextCore, ScopeId, NO_CONTEXT_ID};
use crate::janitor::ReclaimQueue;
use core::hash::{Hash, Hasher};
use std::sync::{Arc, Weak};

/// Key derived from a caller scope at probe/insert time.
///
/// `Scoped` snapshots the scope id at construction; the snapshot stays valid
/// after the scope dies, but equality then fails against every freshly built
/// key, so a dead entry can never satisfy a lookup again. That makes equality
/// deliberately non-reflexive for dead keys, which is why this type has no
/// `Eq` impl and is never used as a hash-map key directly.
#[derive(Debug)]
pub(crate) enum ContextKey {
    /// Shared by every caller without a specific scope; always mutually equal.
    NoContext,
    Scoped {
        scope: Weak<ContextCore>,
        snapshot: ScopeId,
    },
}

impl ContextKey {
    /// Build a key for `scope`, registering `queue` for the scope's drop
    /// notification. `None` maps to the shared no-context key.
    pub(crate) fn make(scope: Option<&Context>, queue: &Arc<ReclaimQueue>) -> Self {
        match scope {
            None => ContextKey::NoContext,
            Some(ctx) => {
                ctx.core().watch(queue);
                ContextKey::Scoped {
                    scope: Arc::downgrade(ctx.core()),
                    snapshot: ctx.id(),
                }
            }
        }
    }

    /// Hash snapshot: a fixed constant for no-context, the scope id
    /// otherwise. Stable even after the underlying scope is reclaimed.
    pub(crate) fn snapshot(&self) -> ScopeId {
        match self {
            ContextKey::NoContext => NO_CONTEXT_ID,
            ContextKey::Scoped { snapshot, .. } => *snapshot,
        }
    }
}

impl PartialEq for ContextKey {
    fn eq(&self, other: &Self) -> bool {
        // Fast reject on the snapshot before touching any weak reference.
        if self.snapshot() != other.snapshot() {
            return false;
        }
        match (self, other) {
            (ContextKey::NoContext, ContextKey::NoContext) => true,
            (ContextKey::Scoped { scope: a, .. }, ContextKey::Scoped { scope: b, .. }) => {
                // Both sides must resolve to the same still-live scope. A
                // reclaimed scope upgrades to None and matches nothing.
                match (a.upgrade(), b.upgrade()) {
                    (Some(a), Some(b)) => Arc::ptr_eq(&a, &b),
                    _ => false,
                }
            }
            _ => false,
        }
    }
}

impl Hash for ContextKey {
    fn hash<H: Hasher>(&self, state: &mut H) {
        state.write_u64(self.snapshot());
    }
}
