//! The discovery cache: get-or-discover per scope, plus invalidate-all.

use crate::context::{Context, ScopeId};
use crate::janitor::{self, ReclaimQueue};
use crate::key::ContextKey;
use crate::locator::Locator;
use crate::slot::ResultSlot;
use dashmap::DashMap;
use std::sync::Arc;
use tracing::{trace, warn};

struct CacheEntry<P> {
    key: ContextKey,
    slot: ResultSlot<P>,
}

/// Caches the provider list discovered for each caller scope.
///
/// Entries are keyed by scope identity and hold the scope only weakly; when
/// the last handle to a scope is dropped, its entry is evicted by the sweep
/// that runs at the start of the next public operation. All work happens on
/// the calling thread.
///
/// Concurrent misses for one scope may each invoke the locator; the last
/// write wins and earlier results become garbage. The locator is treated as
/// idempotent, so this races only on effort, not on correctness.
pub struct DiscoveryCache<L: Locator> {
    locator: L,
    entries: DashMap<ScopeId, CacheEntry<L::Provider>>,
    reclaim: Arc<ReclaimQueue>,
}

impl<L: Locator> DiscoveryCache<L> {
    pub fn new(locator: L) -> Self {
        Self {
            locator,
            entries: DashMap::new(),
            reclaim: Arc::new(ReclaimQueue::new()),
        }
    }

    /// Providers visible to `scope`, discovering on the first call and
    /// serving the identical cached list afterwards.
    ///
    /// Never fails: a locator error is caught here, logged, and degraded to
    /// an empty list. Callers decide how to react to having no providers.
    pub fn lookup(&self, scope: Option<&Context>) -> Arc<[L::Provider]> {
        janitor::sweep(&self.reclaim, &self.entries);

        let probe = ContextKey::make(scope, &self.reclaim);
        let id = probe.snapshot();

        if let Some(entry) = self.entries.get(&id) {
            // A hit needs the stored key to still resolve to the same live
            // scope and the slot to still carry its payload; a released
            // payload or a reclaimed scope reads as a miss.
            if entry.key == probe {
                if let Some(providers) = entry.slot.get() {
                    trace!(scope = id, "discovery cache hit");
                    return providers;
                }
            }
        }

        match self.locator.discover(scope) {
            Ok(found) => {
                if found.is_empty() {
                    warn!(scope = id, "no providers discovered for scope");
                } else {
                    trace!(scope = id, count = found.len(), "discovered providers");
                }
                let providers: Arc<[L::Provider]> = found.into();
                self.entries.insert(
                    id,
                    CacheEntry {
                        key: probe,
                        slot: ResultSlot::new(providers.clone()),
                    },
                );
                providers
            }
            Err(err) => {
                // Contained, not cached: the next lookup for this scope
                // retries discovery instead of serving the degraded result.
                trace!(scope = id, error = %err, "discovery failed, treating as no providers");
                Vec::new().into()
            }
        }
    }

    /// Drop every cached entry unconditionally; the next lookup for any scope
    /// rediscovers. Does not touch the locator.
    pub fn invalidate_all(&self) {
        janitor::sweep(&self.reclaim, &self.entries);
        self.entries.clear();
        trace!("discovery cache invalidated");
    }

    /// Release every cached payload while keeping the entries in place, the
    /// explicit analog of reclamation under memory pressure. Each scope's
    /// next lookup rediscovers into a fresh slot.
    pub fn shed_payloads(&self) {
        for entry in self.entries.iter() {
            entry.slot.release();
        }
        trace!("discovery cache payloads shed");
    }

    /// Number of cached entries, including entries whose payload was shed.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
