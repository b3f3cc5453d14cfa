//! discovery-cache: a per-scope provider discovery cache with drop-driven
//! eviction and explicit invalidation.
//!
//! Internal Design:
//!
//! Summary
//! - Goal: cache the provider list discovered for each caller scope so that
//!   isolated modules sharing one process each see only their own providers,
//!   without the cache ever keeping a scope or a result alive on its own.
//! - Layers:
//!   - Context: the opaque scope handle callers hold. Clones share a unique
//!     64-bit identity; dropping the last clone delivers a reclamation
//!     notification to every subscribed cache.
//!   - ContextKey: tagged key (`NoContext | Scoped`) with a hash snapshot
//!     taken at construction and weak-identity equality. A key whose scope
//!     has been reclaimed is equal to nothing, itself included, so dead
//!     entries can never satisfy a lookup.
//!   - ResultSlot: releasable holder for one discovered list; a released
//!     payload turns the next lookup into a rediscovering miss.
//!   - ReclaimQueue + sweep: the pending-notification channel and the inline
//!     janitor that drains it at the start of every public operation.
//!   - DiscoveryCache: the public surface; composes the above over a sharded
//!     concurrent map keyed by scope identity.
//!
//! Constraints
//! - Thread-safe: arbitrary caller threads, no worker thread, no event loop;
//!   every step (sweep, lookup, discovery) runs on the calling thread.
//! - Never pins: scopes are held via `Weak`, entries evicted on drop
//!   notification; payloads can be shed without removing entries.
//! - Never fails: `lookup` degrades to an empty list on locator failure and
//!   relies on `tracing` for observability.
//! - Concurrent misses for one scope may race; last write wins ("at most
//!   roughly once", the locator being idempotent by contract).
//!
//! Why this split?
//! - Localize invariants: key equality, slot release, and queue draining each
//!   have a small, testable contract; the cache composes them without adding
//!   states of its own (an entry is Absent or Cached, nothing in between).
//! - The inline sweep keeps staleness bounded to one operation's worth of
//!   dead entries without introducing a background thread to reason about.
//!
//! Reclamation model
//! - The source runtime signalled reclamation through its collector; here the
//!   notification is delivered deterministically by `Context`'s `Drop`, and
//!   memory-pressure shedding of payloads is an explicit call
//!   (`DiscoveryCache::shed_payloads`) instead of an automatic one.
//!
//! Notes and non-goals
//! - Equality on `ContextKey` is deliberately non-reflexive once the scope is
//!   dead; the type implements `PartialEq` only and is never used as a
//!   hash-map key (the map is keyed by the never-reused scope id).
//! - All callers without a specific scope share the single no-context entry.
//! - No per-entry TTL, no eviction policy, no persisted state: staleness is
//!   governed entirely by scope lifetime, shedding, and `invalidate_all`.
//! - Public API surface is `Context`, `DiscoveryCache`, and the `Locator`
//!   seam; keys, slots, and the janitor are implementation details.

mod cache;
mod context;
mod janitor;
mod key;
mod locator;
mod slot;

// Public surface
pub use cache::DiscoveryCache;
pub use context::Context;
pub use locator::{locate_fn, LocateError, LocateFn, Locator, StaticLocator};
